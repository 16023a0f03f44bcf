//! Embedding service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{EmbeddingProvider, TRACING_TARGET};
use crate::{Result, ServiceHealth};

/// Embedding service wrapper with observability.
///
/// Adds structured logging to any [`EmbeddingProvider`]. The inner provider
/// is wrapped in `Arc` for cheap cloning into request handlers.
#[derive(Clone)]
pub struct EmbeddingService {
    inner: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingService").finish_non_exhaustive()
    }
}

impl EmbeddingService {
    /// Creates a new embedding service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: EmbeddingProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Embeds the given text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            text_len = text.len(),
            "Embedding text"
        );

        let result = self.inner.embed(text).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(vector) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    dimensions = vector.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Embedding generated"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    kind = error.kind_str(),
                    elapsed_ms = elapsed.as_millis(),
                    "Embedding failed"
                );
            }
        }

        result
    }

    /// Checks the health of the underlying provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let result = self.inner.health_check().await;
        if let Err(error) = &result {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Embedding provider health check failed"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct Fixed(Option<Vec<f32>>);

    #[async_trait::async_trait]
    impl EmbeddingProvider for Fixed {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.0
                .clone()
                .ok_or_else(|| Error::external_error().with_message("unavailable"))
        }

        async fn health_check(&self) -> Result<ServiceHealth> {
            Ok(ServiceHealth::healthy())
        }
    }

    #[tokio::test]
    async fn forwards_to_provider() {
        let service = EmbeddingService::new(Fixed(Some(vec![0.5, 0.25])));
        let cloned = service.clone();

        assert_eq!(cloned.embed("chair").await.unwrap(), vec![0.5, 0.25]);
        assert!(service.health_check().await.unwrap().is_healthy());
    }

    #[tokio::test]
    async fn propagates_errors() {
        let service = EmbeddingService::new(Fixed(None));
        let error = service.embed("chair").await.unwrap_err();

        assert_eq!(error.kind(), crate::ErrorKind::ExternalError);
    }
}
