//! Vector index service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    IndexStats, QueryMatch, QueryOptions, TRACING_TARGET, VectorIndex, VectorRecord,
    VectorResult,
};

/// Vector index wrapper with observability.
///
/// Adds structured logging to any [`VectorIndex`] backend. The backend is
/// wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct VectorService {
    inner: Arc<dyn VectorIndex>,
}

impl fmt::Debug for VectorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorService").finish_non_exhaustive()
    }
}

impl VectorService {
    /// Creates a new vector service wrapper.
    pub fn new<B>(backend: B) -> Self
    where
        B: VectorIndex + 'static,
    {
        Self {
            inner: Arc::new(backend),
        }
    }

    /// Queries the nearest neighbours of `vector`.
    pub async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
        options: QueryOptions,
    ) -> VectorResult<Vec<QueryMatch>> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            dimensions = vector.len(),
            top_k,
            namespace = ?options.namespace,
            "Querying vector index"
        );

        let result = self.inner.query(vector, top_k, options).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(matches) => tracing::debug!(
                target: TRACING_TARGET,
                matches = matches.len(),
                elapsed_ms = elapsed.as_millis(),
                "Vector query completed"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Vector query failed"
            ),
        }

        result
    }

    /// Upserts records into `namespace` (or the default namespace).
    pub async fn upsert(
        &self,
        records: Vec<VectorRecord>,
        namespace: Option<&str>,
    ) -> VectorResult<usize> {
        let started_at = Instant::now();
        let count = records.len();

        tracing::debug!(
            target: TRACING_TARGET,
            count,
            namespace = ?namespace,
            "Upserting vectors"
        );

        let result = self.inner.upsert(records, namespace).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(upserted) => tracing::debug!(
                target: TRACING_TARGET,
                upserted,
                elapsed_ms = elapsed.as_millis(),
                "Vectors upserted"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                count,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Vector upsert failed"
            ),
        }

        result
    }

    /// Describes the index.
    pub async fn describe_stats(&self) -> VectorResult<IndexStats> {
        let result = self.inner.describe_stats().await;
        if let Err(error) = &result {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Describing index stats failed"
            );
        }

        result
    }
}
