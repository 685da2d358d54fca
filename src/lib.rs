//! Kurral Feed Core - Feed Ranking and Eligibility Filtering
//!
//! Pure selection layer between the client's resident chirp collection
//! and the rendering surfaces. Given an in-memory collection and a
//! viewer context, produces the ordered, visibility-filtered sequence a
//! surface renders:
//!
//! - **visibility**: moderation predicate plus block/mute and
//!   scheduled-publish eligibility
//! - **strategy**: chronological, engagement-weighted and value-threshold
//!   ordering
//! - **surfaces**: latest-following feed, most-valued widget, search
//! - **assembler**: news-story detail assembly with fan-out fetch of
//!   missing cluster members and cancellation on supersede
//! - **review**: community fact-check vote tallies
//! - **suggest**: interest-overlap follow suggestions and debounced
//!   recomputation
//!
//! Everything takes its inputs as parameters; persistence, auth, push
//! delivery and the AI services live behind the callers.

pub mod assembler;
pub mod config;
pub mod error;
pub mod model;
pub mod review;
pub mod strategy;
pub mod suggest;
pub mod surfaces;
pub mod visibility;

pub use assembler::{AssembledView, ChirpFetcher, ViewAssembler};
pub use config::FeedConfig;
pub use error::FeedError;
pub use model::{
    Chirp, ChirpId, ClaimCheck, FactCheckStatus, NewsStory, UserId, UserProfile, ValueScore,
    ViewerContext,
};
pub use review::{ReviewTally, ReviewVerdict, ReviewVote};
pub use strategy::{MostValuedOptions, SortStrategy, Timeframe};
pub use suggest::{Debouncer, FollowSuggestion};
