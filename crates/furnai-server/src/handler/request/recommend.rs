//! Recommendation request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of results when `top_k` is omitted.
pub const DEFAULT_TOP_K: usize = 5;

/// Largest accepted `top_k`.
pub const MAX_TOP_K: usize = 1000;

/// Request payload of `POST /recommend`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    /// Free-text query to embed.
    #[validate(length(min = 1))]
    pub query: String,
    /// Maximum number of results.
    #[serde(default = "default_top_k")]
    #[validate(range(min = 1, max = MAX_TOP_K))]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
