//! Community review aggregation
//!
//! Reviewers vote per extracted claim: validate or invalidate, with
//! source URLs and an optional written justification. Votes accumulate
//! client-side into tallies against a fixed quorum threshold. The quorum
//! is a display gate only; nothing here is transactional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{ChirpId, UserId};

/// Reviewer's verdict on a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    Validate,
    Invalidate,
}

/// A single community review vote against one claim of a chirp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewVote {
    pub chirp_id: ChirpId,
    /// Index into the chirp's extracted claims
    pub claim_index: usize,
    pub verdict: ReviewVerdict,
    /// Supporting source URLs
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Aggregated validate/invalidate counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTally {
    pub validates: u32,
    pub invalidates: u32,
}

impl ReviewTally {
    pub fn total(&self) -> u32 {
        self.validates + self.invalidates
    }

    /// Whether enough votes accumulated for the verdict to display as settled
    pub fn quorum_reached(&self, quorum: u32) -> bool {
        self.total() >= quorum
    }

    fn count(&mut self, verdict: ReviewVerdict) {
        match verdict {
            ReviewVerdict::Validate => self.validates += 1,
            ReviewVerdict::Invalidate => self.invalidates += 1,
        }
    }
}

/// Tally all votes for a chirp, across claims.
pub fn tally(votes: &[ReviewVote]) -> ReviewTally {
    let mut out = ReviewTally::default();
    for vote in votes {
        out.count(vote.verdict);
    }
    out
}

/// Tally votes per claim index.
pub fn tally_by_claim(votes: &[ReviewVote]) -> HashMap<usize, ReviewTally> {
    let mut out: HashMap<usize, ReviewTally> = HashMap::new();
    for vote in votes {
        out.entry(vote.claim_index).or_default().count(vote.verdict);
    }
    out
}
