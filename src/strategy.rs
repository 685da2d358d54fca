//! Scoring and sort strategies
//!
//! Three named strategies, matching the feed tabs:
//!
//! - **Latest**: stable descending by creation time.
//! - **Top**: descending comment count, ties broken by recency.
//! - **Most valued**: value-score threshold filter, optional interest
//!   intersection, descending by aggregate score, capped for the compact
//!   widget slice.
//!
//! All of these are pure: callers pass the collection, the options and
//! the clock. Strategy selection belongs to the caller (tab state).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MIN_VALUE_THRESHOLD;
use crate::model::Chirp;

// ============================================================================
// Options
// ============================================================================

/// Time window for the most-valued surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Day,
    #[default]
    Week,
    Month,
    /// No window, consider everything resident
    All,
}

impl Timeframe {
    /// Window start for a given clock reading; `None` means unbounded.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timeframe::Day => Some(now - Duration::days(1)),
            Timeframe::Week => Some(now - Duration::days(7)),
            Timeframe::Month => Some(now - Duration::days(30)),
            Timeframe::All => None,
        }
    }
}

/// Options for the most-valued strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostValuedOptions {
    #[serde(default)]
    pub timeframe: Timeframe,

    /// When set, only chirps whose topic or semantic tags intersect
    /// these interests are eligible (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,

    /// Minimum aggregate value score in [0, 1]. `None` means the caller
    /// did not pin one; surfaces seed it from `FeedConfig`, and the bare
    /// strategy falls back to the client default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value_threshold: Option<f64>,

    /// Ask upstream caches to bypass; carried for callers that own a
    /// cache, nothing in this layer caches
    #[serde(default)]
    pub force_refresh: bool,
}

impl Default for MostValuedOptions {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            interests: None,
            min_value_threshold: None,
            force_refresh: false,
        }
    }
}

impl MostValuedOptions {
    /// Restrict to chirps matching the given interests
    pub fn with_interests(mut self, interests: Vec<String>) -> Self {
        self.interests = Some(interests);
        self
    }

    /// Pin the score threshold, overriding any configured default
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.min_value_threshold = Some(threshold);
        self
    }

    /// Threshold to apply: the pinned value or the client default
    pub fn effective_threshold(&self) -> f64 {
        self.min_value_threshold
            .unwrap_or(DEFAULT_MIN_VALUE_THRESHOLD)
    }
}

/// Named sort strategy, selected by the caller's tab state.
#[derive(Debug, Clone, Default)]
pub enum SortStrategy {
    /// Chronological, newest first
    #[default]
    Latest,
    /// Engagement-weighted: comment count, then recency
    Top,
    /// Value-score threshold selection
    MostValued(MostValuedOptions),
}

// ============================================================================
// Sorts
// ============================================================================

/// Stable descending sort by creation time.
pub fn sort_chronological(mut chirps: Vec<Chirp>) -> Vec<Chirp> {
    chirps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    chirps
}

/// Engagement-weighted sort: comment count descending, recency as the
/// tie-break.
pub fn sort_top(mut chirps: Vec<Chirp>) -> Vec<Chirp> {
    chirps.sort_by(|a, b| {
        b.comment_count
            .cmp(&a.comment_count)
            .then(b.created_at.cmp(&a.created_at))
    });
    chirps
}

/// Most-valued selection: timeframe window, score threshold, optional
/// interest intersection, then descending by aggregate score.
///
/// Chirps with no value score are excluded outright. `limit == 0` means
/// uncapped (the full "see more" set).
pub fn select_most_valued(
    chirps: &[Chirp],
    opts: &MostValuedOptions,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Chirp> {
    let cutoff = opts.timeframe.cutoff(now);
    let threshold = opts.effective_threshold();
    let interests: Option<Vec<String>> = opts
        .interests
        .as_ref()
        .map(|list| list.iter().map(|i| i.to_lowercase()).collect());

    let mut selected: Vec<Chirp> = chirps
        .iter()
        .filter(|c| match c.value_total() {
            Some(total) => total >= threshold,
            None => false,
        })
        .filter(|c| cutoff.map_or(true, |cut| c.created_at >= cut))
        .filter(|c| match &interests {
            Some(wanted) => {
                let terms = c.topic_terms();
                wanted.iter().any(|i| terms.contains(i))
            }
            None => true,
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        let score_a = a.value_total().unwrap_or(0.0);
        let score_b = b.value_total().unwrap_or(0.0);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.created_at.cmp(&a.created_at))
    });

    if limit > 0 {
        selected.truncate(limit);
    }
    selected
}

/// Dispatch a strategy over an already eligibility-filtered collection.
///
/// `MostValued` here applies uncapped; the compact widget slice is the
/// surface's concern.
pub fn apply(strategy: &SortStrategy, chirps: Vec<Chirp>, now: DateTime<Utc>) -> Vec<Chirp> {
    match strategy {
        SortStrategy::Latest => sort_chronological(chirps),
        SortStrategy::Top => sort_top(chirps),
        SortStrategy::MostValued(opts) => select_most_valued(&chirps, opts, now, 0),
    }
}
