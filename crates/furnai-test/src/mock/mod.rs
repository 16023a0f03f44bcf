//! Mock implementations of the embedding provider and vector index.

mod embedding;
mod vector;

pub use embedding::{MockEmbeddingConfig, MockEmbeddingProvider};
use furnai_core::emb::EmbeddingService;
use furnai_vector::VectorService;
pub use vector::{MockVectorIndex, UpsertCall};

/// Creates a mock embedding service and an empty mock vector service.
pub fn create_mock_services() -> (EmbeddingService, VectorService) {
    (
        EmbeddingService::new(MockEmbeddingProvider::default()),
        VectorService::new(MockVectorIndex::default()),
    )
}
