//! Feed configuration
//!
//! Client-side defaults for the most-valued surface and the review
//! quorum. These were historically hard-coded in the UI; keeping them
//! here with env overrides lets deployments tune them without a code
//! change. The quorum is a display threshold only, nothing enforces it
//! transactionally.

/// Observed client default for the most-valued score threshold
pub const DEFAULT_MIN_VALUE_THRESHOLD: f64 = 0.5;

/// Configuration for feed selection surfaces
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Minimum aggregate value score for the most-valued surface
    pub min_value_threshold: f64,
    /// Community votes needed before a claim verdict is considered settled
    pub review_quorum: u32,
    /// Compact most-valued slice size ("see more" shows the rest)
    pub most_valued_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            min_value_threshold: DEFAULT_MIN_VALUE_THRESHOLD,
            review_quorum: 50,
            most_valued_limit: 5,
        }
    }
}

impl FeedConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("KURRAL_MIN_VALUE_THRESHOLD") {
            if let Ok(threshold) = val.parse::<f64>() {
                if (0.0..=1.0).contains(&threshold) {
                    config.min_value_threshold = threshold;
                }
            }
        }

        if let Ok(val) = std::env::var("KURRAL_REVIEW_QUORUM") {
            if let Ok(quorum) = val.parse::<u32>() {
                config.review_quorum = quorum;
            }
        }

        if let Ok(val) = std::env::var("KURRAL_MOST_VALUED_LIMIT") {
            if let Ok(limit) = val.parse::<usize>() {
                config.most_valued_limit = limit;
            }
        }

        config
    }
}
