//! Error types for the feed selection pipeline
//!
//! Fetch failures are non-fatal at the assembly level: the assembler
//! records the failing ids and keeps going. `Superseded` is the only way
//! an assembly aborts wholesale, and it means the caller already moved on.

use thiserror::Error;

/// Error types for feed assembly
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// A referenced chirp could not be fetched
    #[error("Failed to fetch chirp {id}: {reason}")]
    Fetch { id: String, reason: String },

    /// The assembly was cancelled because the view selection changed
    #[error("Assembly superseded by a newer view selection")]
    Superseded,
}

impl FeedError {
    /// Fetch failure for a given chirp id
    pub fn fetch(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
