//! Per-surface feed selectors
//!
//! Each surface is a pure function over the resident collection, the
//! viewer context and the clock. The rendering layer owns tab state and
//! passes the matching strategy; nothing here reads ambient stores.

use chrono::{DateTime, Utc};

use crate::config::FeedConfig;
use crate::model::{Chirp, ViewerContext};
use crate::strategy::{self, MostValuedOptions, SortStrategy};
use crate::visibility::filter_live;

/// "Latest" tab: chronological feed of followed authors.
///
/// Requires an authenticated viewer with a follow list; anonymous
/// sessions get an empty feed, not an error.
pub fn latest_following(
    chirps: &[Chirp],
    viewer: &ViewerContext,
    now: DateTime<Utc>,
) -> Vec<Chirp> {
    if viewer.is_anonymous() {
        return Vec::new();
    }

    let followed: Vec<Chirp> = chirps
        .iter()
        .filter(|c| viewer.follows.contains(&c.author_id))
        .cloned()
        .collect();

    strategy::sort_chronological(filter_live(&followed, viewer, now))
}

/// "Most Valued" widget: compact high-value slice for the sidebar.
///
/// When the options don't pin an interest list, the viewer's own
/// interests are used (when they have any); when they don't pin a score
/// threshold, the configured deployment threshold applies.
pub fn most_valued(
    chirps: &[Chirp],
    viewer: &ViewerContext,
    config: &FeedConfig,
    opts: &MostValuedOptions,
    now: DateTime<Utc>,
) -> Vec<Chirp> {
    let mut opts = opts.clone();
    if opts.interests.is_none() && !viewer.interests.is_empty() {
        opts.interests = Some(viewer.interests.clone());
    }
    if opts.min_value_threshold.is_none() {
        opts.min_value_threshold = Some(config.min_value_threshold);
    }

    let eligible = filter_live(chirps, viewer, now);
    strategy::select_most_valued(&eligible, &opts, now, config.most_valued_limit)
}

/// Full most-valued set behind the widget's "see more" affordance.
pub fn most_valued_full(
    chirps: &[Chirp],
    viewer: &ViewerContext,
    opts: &MostValuedOptions,
    now: DateTime<Utc>,
) -> Vec<Chirp> {
    let eligible = filter_live(chirps, viewer, now);
    strategy::select_most_valued(&eligible, opts, now, 0)
}

/// Search over the resident collection.
///
/// Token match (lowercased, tokens of 3+ characters) against text, topic
/// and semantic tags. A chirp matches when any query token appears.
/// Blank queries yield the empty "no results" state.
pub fn search(
    chirps: &[Chirp],
    query: &str,
    viewer: &ViewerContext,
    strategy: &SortStrategy,
    now: DateTime<Utc>,
) -> Vec<Chirp> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let matched: Vec<Chirp> = chirps
        .iter()
        .filter(|c| matches_tokens(c, &tokens))
        .cloned()
        .collect();

    strategy::apply(strategy, filter_live(&matched, viewer, now), now)
}

/// Tokenize query text: lowercase alphanumeric words of 3+ characters.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| word.len() >= 3)
        .collect()
}

fn matches_tokens(chirp: &Chirp, tokens: &[String]) -> bool {
    let haystack = format!(
        "{} {} {}",
        chirp.text.to_lowercase(),
        chirp.topic.to_lowercase(),
        chirp.semantic_tags.join(" ").to_lowercase()
    );
    tokens.iter().any(|t| haystack.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    fn chirp(id: &str, author: &str, text: &str, created: DateTime<Utc>) -> Chirp {
        Chirp::new(id, author, text, "general", created)
    }

    #[test]
    fn test_latest_following_empty_for_anonymous() {
        let chirps = vec![chirp("c1", "alice", "hello", at(1, 0))];
        let result = latest_following(&chirps, &ViewerContext::anonymous(), at(2, 0));
        assert!(result.is_empty());
    }

    #[test]
    fn test_latest_following_restricted_to_follow_set() {
        let chirps = vec![
            chirp("c1", "alice", "from alice", at(1, 0)),
            chirp("c2", "carol", "from carol", at(2, 0)),
            chirp("c3", "alice", "more alice", at(3, 0)),
        ];

        let mut viewer = ViewerContext::for_user("bob");
        viewer.follows.insert("alice".to_string());

        let result = latest_following(&chirps, &viewer, at(4, 0));
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c1"]);
    }

    #[test]
    fn test_most_valued_uses_viewer_interests() {
        let mut ai = chirp("ai", "alice", "on models", at(1, 0));
        ai.topic = "ai".to_string();
        ai.value_score = Some(crate::model::ValueScore {
            total: 0.8,
            ..Default::default()
        });

        let mut sports = chirp("sports", "alice", "on football", at(1, 1));
        sports.topic = "sports".to_string();
        sports.value_score = Some(crate::model::ValueScore {
            total: 0.9,
            ..Default::default()
        });

        let mut viewer = ViewerContext::for_user("bob");
        viewer.interests = vec!["ai".to_string()];

        let opts = MostValuedOptions::default().with_interests(vec!["ai".to_string()]);
        let result = most_valued(
            &[ai, sports],
            &viewer,
            &FeedConfig::default(),
            &opts,
            at(2, 0),
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ai");
        assert_eq!(result[0].value_total(), Some(0.8));
    }

    #[test]
    fn test_most_valued_applies_configured_threshold() {
        let mut mid = chirp("mid", "alice", "solid take", at(1, 0));
        mid.value_score = Some(crate::model::ValueScore {
            total: 0.6,
            ..Default::default()
        });

        let viewer = ViewerContext::for_user("bob");
        let strict = FeedConfig {
            min_value_threshold: 0.9,
            ..Default::default()
        };

        // Configured threshold applies when the options don't pin one
        let result = most_valued(
            std::slice::from_ref(&mid),
            &viewer,
            &strict,
            &MostValuedOptions::default(),
            at(2, 0),
        );
        assert!(result.is_empty());

        // A pinned threshold wins over the configured one
        let opts = MostValuedOptions::default().with_threshold(0.5);
        let result = most_valued(&[mid], &viewer, &strict, &opts, at(2, 0));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_search_token_match_and_sort() {
        let chirps = vec![
            chirp("c1", "alice", "the election results are in", at(1, 0)),
            chirp("c2", "bob", "cooking pasta tonight", at(2, 0)),
            chirp("c3", "carol", "Election night recap", at(3, 0)),
        ];

        let result = search(
            &chirps,
            "election",
            &ViewerContext::for_user("dave"),
            &SortStrategy::Latest,
            at(4, 0),
        );
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c1"]);
    }

    #[test]
    fn test_search_blank_query_is_no_results() {
        let chirps = vec![chirp("c1", "alice", "hello", at(1, 0))];
        let viewer = ViewerContext::for_user("bob");
        assert!(search(&chirps, "  ", &viewer, &SortStrategy::Latest, at(2, 0)).is_empty());
        // Short words tokenize away entirely
        assert!(search(&chirps, "an it", &viewer, &SortStrategy::Latest, at(2, 0)).is_empty());
    }

    #[test]
    fn test_search_hides_blocked_chirps() {
        let mut blocked = chirp("c1", "alice", "election takes", at(1, 0));
        blocked.fact_check_status = crate::model::FactCheckStatus::Blocked;

        let result = search(
            &[blocked],
            "election",
            &ViewerContext::for_user("bob"),
            &SortStrategy::Latest,
            at(2, 0),
        );
        assert!(result.is_empty());
    }
}
