//! Text embedding abstractions.
//!
//! Concrete providers (the Hugging Face client, test mocks) implement
//! [`EmbeddingProvider`]; callers hold the cloneable [`EmbeddingService`].

mod service;

pub use service::EmbeddingService;

use crate::{Result, ServiceHealth};

/// Tracing target for embedding operations.
pub const TRACING_TARGET: &str = "furnai_core::emb";

/// Core trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single text into a dense vector.
    ///
    /// The vector length is fixed by the provider's model. A non-success
    /// upstream answer is returned as an error carrying the provider's body.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Performs a health check on the provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
