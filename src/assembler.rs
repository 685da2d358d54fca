//! News-story view assembly
//!
//! A story carries an ordered cluster of related chirp ids; some may not
//! be resident in client memory. The assembler resolves the cluster:
//!
//! 1. Compute which cluster ids are missing locally. If none are, the
//!    fetcher is never invoked.
//! 2. Fan out one fetch task per missing id, fan in after every task
//!    settles. Individual failures are recorded and never abort the
//!    assembly; partial results still render.
//! 3. Resolvable cluster: ordered lookup of cluster ids, visibility
//!    filter, caller's sort strategy. Otherwise fall back to keyword and
//!    topic matching against the resident collection.
//!
//! Superseding a story selection cancels the in-flight assembly through
//! its CancellationToken; a superseded assembly returns
//! `FeedError::Superseded` so stale results are never applied.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::model::{Chirp, ChirpId, NewsStory, ViewerContext};
use crate::strategy::{self, SortStrategy};
use crate::visibility::filter_visible;

// ============================================================================
// Fetcher trait (for dependency injection)
// ============================================================================

/// Fetch-by-id capability for chirps not resident locally (allows
/// mocking in tests). `Ok(None)` means the chirp does not exist.
#[async_trait]
pub trait ChirpFetcher: Send + Sync {
    async fn fetch_chirp(&self, id: &str) -> Result<Option<Chirp>, FeedError>;
}

// ============================================================================
// Assembled view
// ============================================================================

/// Result of assembling a story view.
///
/// `failed_ids` is non-empty when some cluster members could not be
/// fetched; the caller shows an inline notice next to the partial
/// results. An empty `chirps` with no failures is the distinct
/// "no results" state.
#[derive(Debug, Clone, Default)]
pub struct AssembledView {
    pub chirps: Vec<Chirp>,
    pub failed_ids: Vec<ChirpId>,
}

impl AssembledView {
    /// Whether some related chirps failed to load
    pub fn is_partial(&self) -> bool {
        !self.failed_ids.is_empty()
    }
}

// ============================================================================
// Assembler
// ============================================================================

/// Assembles story detail views from resident chirps plus on-demand
/// fetches of missing cluster members.
pub struct ViewAssembler<F: ChirpFetcher + 'static> {
    fetcher: Arc<F>,
}

impl<F: ChirpFetcher + 'static> ViewAssembler<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Assemble the view for one story selection.
    ///
    /// `cancel` belongs to this selection; cancelling it (because the
    /// user picked another story or dismissed the view) makes the
    /// assembly return `Err(FeedError::Superseded)`.
    pub async fn assemble(
        &self,
        story: &NewsStory,
        resident: &[Chirp],
        viewer: &ViewerContext,
        strategy: &SortStrategy,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<AssembledView, FeedError> {
        let mut by_id: HashMap<ChirpId, Chirp> =
            resident.iter().map(|c| (c.id.clone(), c.clone())).collect();

        let missing: Vec<ChirpId> = story
            .chirp_ids
            .iter()
            .filter(|id| !by_id.contains_key(*id))
            .cloned()
            .collect();

        let mut failed_ids = Vec::new();

        if !missing.is_empty() {
            debug!(
                story_id = %story.id,
                missing = missing.len(),
                "Fetching missing cluster chirps"
            );

            let mut tasks: JoinSet<(ChirpId, Result<Option<Chirp>, FeedError>)> = JoinSet::new();
            for id in missing {
                let fetcher = Arc::clone(&self.fetcher);
                let cancel = cancel.clone();
                tasks.spawn(async move {
                    let result = tokio::select! {
                        _ = cancel.cancelled() => Err(FeedError::Superseded),
                        result = fetcher.fetch_chirp(&id) => result,
                    };
                    (id, result)
                });
            }

            // Fan-in: results are only applied after every fetch settles
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((id, Ok(Some(chirp)))) => {
                        by_id.insert(id, chirp);
                    }
                    Ok((id, Ok(None))) => {
                        debug!(chirp_id = %id, "Cluster chirp does not exist");
                    }
                    Ok((_, Err(FeedError::Superseded))) => {
                        // cancel.is_cancelled() check below reports it
                    }
                    Ok((id, Err(e))) => {
                        warn!(chirp_id = %id, error = %e, "Failed to fetch cluster chirp");
                        failed_ids.push(id);
                    }
                    Err(e) => {
                        warn!(error = %e, "Fetch task failed to complete");
                    }
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(FeedError::Superseded);
        }

        let resolvable = story.chirp_ids.iter().any(|id| by_id.contains_key(id));
        let ordered: Vec<Chirp> = if !story.chirp_ids.is_empty() && resolvable {
            story
                .chirp_ids
                .iter()
                .filter_map(|id| by_id.get(id).cloned())
                .collect()
        } else {
            keyword_match(story, resident)
        };

        let visible = filter_visible(&ordered, viewer.id());
        let chirps = strategy::apply(strategy, visible, now);

        Ok(AssembledView { chirps, failed_ids })
    }
}

/// Keyword/topic fallback when the story has no resolvable cluster.
///
/// A chirp matches when its text contains any story keyword or any
/// significant (4+ character) word of the story title, or when its topic
/// equals one of the story's topics, all case-insensitive.
fn keyword_match(story: &NewsStory, chirps: &[Chirp]) -> Vec<Chirp> {
    let mut needles: Vec<String> = story.keywords.iter().map(|k| k.to_lowercase()).collect();
    needles.extend(
        story
            .title
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .map(|w| w.to_lowercase()),
    );

    let topics: Vec<String> = story.topics.iter().map(|t| t.to_lowercase()).collect();

    chirps
        .iter()
        .filter(|c| {
            let text = c.text.to_lowercase();
            needles.iter().any(|n| text.contains(n)) || topics.contains(&c.topic.to_lowercase())
        })
        .cloned()
        .collect()
}
