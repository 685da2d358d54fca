//! Visibility predicate and eligibility filtering
//!
//! Two layers with different strictness:
//!
//! - `is_visible` / `filter_visible`: moderation only. A blocked chirp is
//!   hidden from everyone except its author; every other status renders.
//! - `is_live` / `filter_live`: what the feed surfaces actually show.
//!   Adds the viewer's block/mute lists and hides future-scheduled
//!   chirps from everyone but their author.
//!
//! An anonymous viewer never matches authorship, so blocked and
//! future-scheduled chirps are always hidden from anonymous sessions.

use chrono::{DateTime, Utc};

use crate::model::{Chirp, FactCheckStatus, ViewerContext};

/// Check whether a chirp passes moderation for a given viewer.
///
/// Returns false only when the chirp is blocked and the viewer is not
/// its author. `None`, `Clean` and `NeedsReview` are all visible.
pub fn is_visible(chirp: &Chirp, viewer_id: Option<&str>) -> bool {
    match chirp.fact_check_status {
        FactCheckStatus::Blocked => viewer_id == Some(chirp.author_id.as_str()),
        _ => true,
    }
}

/// Apply the visibility predicate across a collection, preserving order.
pub fn filter_visible(chirps: &[Chirp], viewer_id: Option<&str>) -> Vec<Chirp> {
    chirps
        .iter()
        .filter(|c| is_visible(c, viewer_id))
        .cloned()
        .collect()
}

/// Check whether a chirp is eligible for a feed surface.
///
/// On top of moderation: the author must not be blocked or muted by the
/// viewer, and a future-scheduled chirp only shows for its author.
pub fn is_live(chirp: &Chirp, viewer: &ViewerContext, now: DateTime<Utc>) -> bool {
    if !is_visible(chirp, viewer.id()) {
        return false;
    }

    if viewer.blocked.contains(&chirp.author_id) || viewer.muted.contains(&chirp.author_id) {
        return false;
    }

    if let Some(scheduled_at) = chirp.scheduled_at {
        if scheduled_at > now && viewer.id() != Some(chirp.author_id.as_str()) {
            return false;
        }
    }

    true
}

/// Apply the surface eligibility check across a collection, preserving order.
pub fn filter_live(chirps: &[Chirp], viewer: &ViewerContext, now: DateTime<Utc>) -> Vec<Chirp> {
    chirps
        .iter()
        .filter(|c| is_live(c, viewer, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chirp(id: &str, author: &str, status: FactCheckStatus) -> Chirp {
        let created = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let mut c = Chirp::new(id, author, format!("chirp {id}"), "general", created);
        c.fact_check_status = status;
        c
    }

    #[test]
    fn test_blocked_hidden_from_others() {
        let blocked = chirp("c1", "alice", FactCheckStatus::Blocked);

        assert!(!is_visible(&blocked, Some("bob")));
        assert!(!is_visible(&blocked, None));
        // The author still sees their own blocked chirp
        assert!(is_visible(&blocked, Some("alice")));
    }

    #[test]
    fn test_non_blocked_always_visible() {
        for status in [
            FactCheckStatus::None,
            FactCheckStatus::Clean,
            FactCheckStatus::NeedsReview,
        ] {
            let c = chirp("c1", "alice", status);
            assert!(is_visible(&c, Some("bob")));
            assert!(is_visible(&c, None));
        }
    }

    #[test]
    fn test_filter_visible_preserves_order() {
        let chirps = vec![
            chirp("c1", "alice", FactCheckStatus::Clean),
            chirp("c2", "alice", FactCheckStatus::Blocked),
            chirp("c3", "bob", FactCheckStatus::NeedsReview),
        ];

        let visible = filter_visible(&chirps, Some("bob"));
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);

        // Input untouched
        assert_eq!(chirps.len(), 3);
    }

    #[test]
    fn test_live_excludes_muted_and_blocked_authors() {
        let now = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
        let c = chirp("c1", "troll", FactCheckStatus::Clean);

        let mut viewer = ViewerContext::for_user("bob");
        assert!(is_live(&c, &viewer, now));

        viewer.muted.insert("troll".to_string());
        assert!(!is_live(&c, &viewer, now));

        viewer.muted.clear();
        viewer.blocked.insert("troll".to_string());
        assert!(!is_live(&c, &viewer, now));
    }

    #[test]
    fn test_live_hides_future_scheduled_except_author() {
        let now = Utc.with_ymd_and_hms(2026, 8, 2, 0, 0, 0).unwrap();
        let mut c = chirp("c1", "alice", FactCheckStatus::Clean);
        c.scheduled_at = Some(Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap());

        assert!(!is_live(&c, &ViewerContext::for_user("bob"), now));
        assert!(!is_live(&c, &ViewerContext::anonymous(), now));
        assert!(is_live(&c, &ViewerContext::for_user("alice"), now));

        // Once the scheduled time passes, everyone sees it
        let later = Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap();
        assert!(is_live(&c, &ViewerContext::for_user("bob"), later));
    }
}
