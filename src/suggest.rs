//! Follow suggestions and debounced recomputation
//!
//! Suggestions carry an explicit interest-overlap structure instead of a
//! loose metadata bag, so the discovery widget can render "you both
//! follow ai, climate" without poking at untyped fields.
//!
//! `Debouncer` backs the type-ahead suggestion flows: each input change
//! supersedes the previous in-flight computation, and only the last
//! submission's result is ever produced.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::model::{UserProfile, ViewerContext};

// ============================================================================
// Follow suggestions
// ============================================================================

/// A suggested account with the interests it shares with the viewer.
#[derive(Debug, Clone)]
pub struct FollowSuggestion {
    pub user: UserProfile,
    /// Interests shared with the viewer, as spelled by the candidate
    pub matching_interests: Vec<String>,
    pub overlap_count: usize,
}

/// Rank candidate accounts by interest overlap with the viewer.
///
/// Excludes the viewer themself, accounts already followed, and blocked
/// or muted accounts. Candidates with no overlap are dropped. Ties break
/// by handle for a stable display order. `limit == 0` means uncapped.
pub fn suggest_follows(
    viewer: &ViewerContext,
    candidates: &[UserProfile],
    limit: usize,
) -> Vec<FollowSuggestion> {
    let wanted: Vec<String> = viewer.interests.iter().map(|i| i.to_lowercase()).collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<FollowSuggestion> = candidates
        .iter()
        .filter(|u| viewer.id() != Some(u.id.as_str()))
        .filter(|u| !viewer.follows.contains(&u.id))
        .filter(|u| !viewer.blocked.contains(&u.id) && !viewer.muted.contains(&u.id))
        .filter_map(|u| {
            let matching: Vec<String> = u
                .interests
                .iter()
                .filter(|i| wanted.contains(&i.to_lowercase()))
                .cloned()
                .collect();
            if matching.is_empty() {
                return None;
            }
            Some(FollowSuggestion {
                user: u.clone(),
                overlap_count: matching.len(),
                matching_interests: matching,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.overlap_count
            .cmp(&a.overlap_count)
            .then_with(|| a.user.handle.cmp(&b.user.handle))
    });

    if limit > 0 {
        suggestions.truncate(limit);
    }
    suggestions
}

// ============================================================================
// Debounced recomputation
// ============================================================================

/// Debounces effectful recomputation triggered by text input.
///
/// Each `submit` cancels the prior in-flight task and starts a new one
/// that only runs after the quiet period passes uncancelled. A
/// superseded or cancelled submission resolves to `None`.
pub struct Debouncer {
    quiet_period: Duration,
    current: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            current: None,
        }
    }

    /// Submit new work, superseding any prior submission.
    pub fn submit<T, Fut>(&mut self, work: Fut) -> JoinHandle<Option<T>>
    where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if let Some(prev) = self.current.take() {
            prev.cancel();
        }

        let token = CancellationToken::new();
        self.current = Some(token.clone());
        let quiet = self.quiet_period;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                _ = tokio::time::sleep(quiet) => {
                    tokio::select! {
                        _ = token.cancelled() => None,
                        out = work => Some(out),
                    }
                }
            }
        })
    }

    /// Cancel the in-flight submission, if any (view dismissed).
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
