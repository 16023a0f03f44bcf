//! Application state and dependency injection.

use furnai_core::emb::EmbeddingService;
use furnai_vector::VectorService;

use crate::service::RecommendService;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    embedding: EmbeddingService,
    vectors: VectorService,

    // Internal services:
    recommend: RecommendService,
}

impl ServiceState {
    /// Builds the state from connected providers.
    pub fn new(
        embedding: EmbeddingService,
        vectors: VectorService,
        namespace: Option<String>,
    ) -> Self {
        let recommend = RecommendService::new(embedding.clone(), vectors.clone(), namespace);

        Self {
            embedding,
            vectors,
            recommend,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(embedding: EmbeddingService);
impl_di!(vectors: VectorService);

// Internal services:
impl_di!(recommend: RecommendService);
