//! Recommendation response types.

use furnai_vector::{Metadata, QueryMatch};
use serde::{Deserialize, Serialize};

use crate::service::Recommendations;

/// A single recommended product.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    /// Product identifier in the index.
    pub id: String,
    /// Similarity score, higher is closer.
    pub score: f32,
    /// Product metadata stored alongside the vector.
    pub metadata: Metadata,
}

impl From<QueryMatch> for RecommendedProduct {
    fn from(m: QueryMatch) -> Self {
        Self {
            id: m.id,
            score: m.score,
            metadata: m.metadata,
        }
    }
}

/// Response of `POST /recommend`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// The query as received.
    pub query: String,
    /// Matches in index order.
    pub results: Vec<RecommendedProduct>,
}

impl From<Recommendations> for RecommendResponse {
    fn from(recommendations: Recommendations) -> Self {
        Self {
            query: recommendations.query,
            results: recommendations
                .matches
                .into_iter()
                .map(RecommendedProduct::from)
                .collect(),
        }
    }
}
