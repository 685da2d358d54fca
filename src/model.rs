//! Core feed data model
//!
//! Client-facing types use camelCase serialization; these are the shapes
//! the sync layer materializes into client memory and hands to the
//! selectors in this crate. Nothing here talks to the network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Chirp identifier (document id from the sync layer).
pub type ChirpId = String;

/// User identifier.
pub type UserId = String;

// ============================================================================
// Moderation / fact-check
// ============================================================================

/// Moderation status attached to a chirp by the fact-check pipeline.
///
/// `Blocked` chirps are hidden from everyone except their author.
/// Everything else renders normally; `NeedsReview` only changes how the
/// claim annotations are displayed, not eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCheckStatus {
    #[default]
    None,
    Clean,
    NeedsReview,
    Blocked,
}

/// Verdict for a single extracted claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCheck {
    /// Claim text extracted from the chirp body
    pub claim: String,
    /// Pipeline verdict (e.g. "supported", "disputed", "unverifiable")
    pub verdict: String,
}

/// Community value score with sub-dimensions.
///
/// `total` is the aggregate in [0, 1] used by the most-valued surface;
/// sub-dimensions are display-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueScore {
    pub total: f64,
    #[serde(default)]
    pub insight: f64,
    #[serde(default)]
    pub civility: f64,
    #[serde(default)]
    pub accuracy: f64,
}

// ============================================================================
// Chirp
// ============================================================================

/// A single post ("chirp") as resident in client memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chirp {
    pub id: ChirpId,

    pub author_id: UserId,

    /// Plain text body
    pub text: String,

    /// Rich-formatted body, when the composer produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<String>,

    /// Primary topic label
    pub topic: String,

    /// Semantic topic tags from the tagging pipeline
    #[serde(default)]
    pub semantic_tags: Vec<String>,

    pub created_at: DateTime<Utc>,

    /// Scheduled publish time; future-dated chirps are only shown to
    /// their author until the time passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Quoted chirp, if this is a quote post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoted_chirp_id: Option<ChirpId>,

    /// Original chirp, if this is a repost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repost_of_id: Option<ChirpId>,

    #[serde(default)]
    pub comment_count: u32,

    #[serde(default)]
    pub fact_check_status: FactCheckStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_score: Option<ValueScore>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claims: Vec<ClaimCheck>,
}

impl Chirp {
    /// A freshly composed chirp with the given identity and body
    pub fn new(
        id: impl Into<ChirpId>,
        author_id: impl Into<UserId>,
        text: impl Into<String>,
        topic: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            text: text.into(),
            rich_text: None,
            topic: topic.into(),
            semantic_tags: Vec::new(),
            created_at,
            scheduled_at: None,
            image_url: None,
            quoted_chirp_id: None,
            repost_of_id: None,
            comment_count: 0,
            fact_check_status: FactCheckStatus::default(),
            value_score: None,
            claims: Vec::new(),
        }
    }

    /// Aggregate value score, absent scores count as unscored (not 0.0)
    pub fn value_total(&self) -> Option<f64> {
        self.value_score.as_ref().map(|s| s.total)
    }

    /// Topic plus semantic tags, lowercased, for interest matching
    pub fn topic_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = vec![self.topic.to_lowercase()];
        terms.extend(self.semantic_tags.iter().map(|t| t.to_lowercase()));
        terms
    }
}

// ============================================================================
// Viewer context
// ============================================================================

/// Who is looking at the feed.
///
/// `user_id == None` means an anonymous session: blocked chirps are
/// always hidden and follow-based surfaces yield nothing.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub user_id: Option<UserId>,
    pub follows: HashSet<UserId>,
    pub interests: Vec<String>,
    pub blocked: HashSet<UserId>,
    pub muted: HashSet<UserId>,
}

impl ViewerContext {
    /// Anonymous session with no identity and no follow graph
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated viewer
    pub fn for_user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Viewer id as a borrowed str, for the visibility predicate
    pub fn id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

// ============================================================================
// User profiles (follow suggestions)
// ============================================================================

/// Minimal profile shape needed for discovery/suggestion surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

// ============================================================================
// News stories
// ============================================================================

/// A clustered news story: title, keywords, and an ordered list of
/// related chirp ids. Cluster members may not all be resident locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsStory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Story keywords from the clustering pipeline
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Related topic labels
    #[serde(default)]
    pub topics: Vec<String>,
    /// Ordered cluster of related chirps
    #[serde(default)]
    pub chirp_ids: Vec<ChirpId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_check_status_wire_names() {
        let json = serde_json::to_string(&FactCheckStatus::NeedsReview).unwrap();
        assert_eq!(json, "\"needs_review\"");

        let parsed: FactCheckStatus = serde_json::from_str("\"blocked\"").unwrap();
        assert_eq!(parsed, FactCheckStatus::Blocked);
    }

    #[test]
    fn test_chirp_defaults_from_sparse_json() {
        let json = serde_json::json!({
            "id": "c1",
            "authorId": "alice",
            "text": "hello world",
            "topic": "general",
            "createdAt": "2026-08-01T12:00:00Z",
        });

        let chirp: Chirp = serde_json::from_value(json).unwrap();
        assert_eq!(chirp.comment_count, 0);
        assert_eq!(chirp.fact_check_status, FactCheckStatus::None);
        assert!(chirp.value_total().is_none());
    }

    #[test]
    fn test_topic_terms_lowercased() {
        let json = serde_json::json!({
            "id": "c2",
            "authorId": "bob",
            "text": "t",
            "topic": "AI",
            "semanticTags": ["Machine-Learning"],
            "createdAt": "2026-08-01T12:00:00Z",
        });
        let chirp: Chirp = serde_json::from_value(json).unwrap();
        assert_eq!(chirp.topic_terms(), vec!["ai", "machine-learning"]);
    }

    #[test]
    fn test_anonymous_viewer() {
        let viewer = ViewerContext::anonymous();
        assert!(viewer.is_anonymous());
        assert!(viewer.id().is_none());

        let alice = ViewerContext::for_user("alice");
        assert_eq!(alice.id(), Some("alice"));
    }
}
