//! Mock embedding provider for testing.

use std::sync::{Arc, Mutex};

use furnai_core::emb::EmbeddingProvider;
use furnai_core::{Error, Result, ServiceHealth};
use serde::{Deserialize, Serialize};

/// Configuration for the mock embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockEmbeddingConfig {
    /// Length of derived vectors.
    pub dimensions: usize,
}

impl Default for MockEmbeddingConfig {
    fn default() -> Self {
        Self { dimensions: 384 }
    }
}

#[derive(Debug, Clone)]
enum Behavior {
    Derived,
    Fixed(Vec<f32>),
    Failing { status: u16, body: String },
}

/// Mock embedding provider for testing.
///
/// By default derives a deterministic vector from the text bytes. Clones
/// share the list of embedded texts.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    config: MockEmbeddingConfig,
    behavior: Behavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(MockEmbeddingConfig::default())
    }
}

impl MockEmbeddingProvider {
    /// Creates a new mock embedding provider with the given configuration.
    pub fn new(config: MockEmbeddingConfig) -> Self {
        Self {
            config,
            behavior: Behavior::Derived,
            calls: Arc::default(),
        }
    }

    /// Always answers with `vector`.
    pub fn fixed(vector: Vec<f32>) -> Self {
        let config = MockEmbeddingConfig {
            dimensions: vector.len(),
        };
        Self {
            behavior: Behavior::Fixed(vector),
            ..Self::new(config)
        }
    }

    /// Always fails like a provider answering `503` with `body`.
    pub fn failing(body: impl Into<String>) -> Self {
        Self::failing_with_status(503, body)
    }

    /// Always fails like a provider answering `status` with `body`.
    pub fn failing_with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Failing {
                status,
                body: body.into(),
            },
            ..Self::default()
        }
    }

    /// Texts embedded so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn derive(&self, text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        (0..self.config.dimensions)
            .map(|i| match bytes.get(i % bytes.len().max(1)) {
                Some(b) => f32::from(*b) / 255.0,
                None => 0.0,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_owned());
        }

        match &self.behavior {
            Behavior::Derived => Ok(self.derive(text)),
            Behavior::Fixed(vector) => Ok(vector.clone()),
            Behavior::Failing { status, body } => Err(Error::from_status(*status, body.clone())),
        }
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(match &self.behavior {
            Behavior::Failing { body, .. } => ServiceHealth::unhealthy(body.clone()),
            _ => ServiceHealth::healthy(),
        })
    }
}
