//! Mock vector index for testing.

use std::sync::{Arc, Mutex};

use furnai_vector::{
    IndexStats, NamespaceStats, QueryMatch, QueryOptions, VectorError, VectorIndex, VectorRecord,
    VectorResult,
};

/// A recorded upsert call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertCall {
    /// Namespace passed to the upsert, if any.
    pub namespace: Option<String>,
    /// Records in the batch.
    pub records: Vec<VectorRecord>,
}

#[derive(Debug, Default)]
struct State {
    upserts: Vec<UpsertCall>,
    queries: Vec<(usize, QueryOptions)>,
}

/// Mock vector index for testing.
///
/// Serves a fixed match list (truncated to `top_k` unless
/// [`over_fetching`](Self::over_fetching)) and records every upsert. Clones
/// share recorded state.
#[derive(Debug, Clone, Default)]
pub struct MockVectorIndex {
    matches: Vec<QueryMatch>,
    dimension: usize,
    over_fetch: bool,
    fail_upsert_at: Option<usize>,
    fail_query: Option<String>,
    fail_stats: Option<String>,
    state: Arc<Mutex<State>>,
}

impl MockVectorIndex {
    /// Creates an index answering every query with `matches`.
    pub fn with_matches(matches: Vec<QueryMatch>) -> Self {
        Self {
            matches,
            ..Self::default()
        }
    }

    /// Sets the dimension reported by `describe_stats`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Answers every query with the whole match list, ignoring `top_k`.
    pub fn over_fetching(mut self) -> Self {
        self.over_fetch = true;
        self
    }

    /// Fails the upsert call with the given zero-based position.
    pub fn failing_upsert_at(mut self, call: usize) -> Self {
        self.fail_upsert_at = Some(call);
        self
    }

    /// Fails every query with an upstream error carrying `body`.
    pub fn failing_query(mut self, body: impl Into<String>) -> Self {
        self.fail_query = Some(body.into());
        self
    }

    /// Fails `describe_stats` with an upstream error carrying `body`.
    pub fn failing_stats(mut self, body: impl Into<String>) -> Self {
        self.fail_stats = Some(body.into());
        self
    }

    /// Upsert calls received so far.
    pub fn upserts(&self) -> Vec<UpsertCall> {
        self.state
            .lock()
            .map(|s| s.upserts.clone())
            .unwrap_or_default()
    }

    /// `(top_k, options)` of every query received so far.
    pub fn queries(&self) -> Vec<(usize, QueryOptions)> {
        self.state
            .lock()
            .map(|s| s.queries.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> VectorResult<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| VectorError::connection("mock state poisoned"))
    }
}

#[async_trait::async_trait]
impl VectorIndex for MockVectorIndex {
    async fn query(
        &self,
        _vector: Vec<f32>,
        top_k: usize,
        options: QueryOptions,
    ) -> VectorResult<Vec<QueryMatch>> {
        self.lock()?.queries.push((top_k, options));

        if let Some(body) = &self.fail_query {
            return Err(VectorError::api(500, body.clone()));
        }

        let limit = if self.over_fetch {
            self.matches.len()
        } else {
            top_k
        };
        Ok(self.matches.iter().take(limit).cloned().collect())
    }

    async fn upsert(
        &self,
        records: Vec<VectorRecord>,
        namespace: Option<&str>,
    ) -> VectorResult<usize> {
        let mut state = self.lock()?;
        if self.fail_upsert_at == Some(state.upserts.len()) {
            state.upserts.push(UpsertCall {
                namespace: namespace.map(str::to_owned),
                records: Vec::new(),
            });
            return Err(VectorError::api(500, "upsert rejected"));
        }

        let count = records.len();
        state.upserts.push(UpsertCall {
            namespace: namespace.map(str::to_owned),
            records,
        });

        Ok(count)
    }

    async fn describe_stats(&self) -> VectorResult<IndexStats> {
        if let Some(body) = &self.fail_stats {
            return Err(VectorError::api(503, body.clone()));
        }

        let state = self.lock()?;
        let mut stats = IndexStats {
            dimension: self.dimension,
            ..IndexStats::default()
        };

        for call in &state.upserts {
            let name = call.namespace.clone().unwrap_or_default();
            let entry = stats
                .namespaces
                .entry(name)
                .or_insert_with(NamespaceStats::default);
            entry.vector_count += call.records.len() as u64;
            stats.total_vector_count += call.records.len() as u64;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, score: f32) -> QueryMatch {
        QueryMatch {
            id: id.to_owned(),
            score,
            values: None,
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn query_truncates_to_top_k() {
        let index = MockVectorIndex::with_matches(vec![hit("a", 0.9), hit("b", 0.8)]);
        let matches = index.query(vec![0.0], 1, QueryOptions::new()).await.unwrap();

        assert_eq!(matches, vec![hit("a", 0.9)]);
        assert_eq!(index.queries()[0].0, 1);
    }

    #[tokio::test]
    async fn over_fetching_ignores_top_k() {
        let index =
            MockVectorIndex::with_matches(vec![hit("a", 0.9), hit("b", 0.8)]).over_fetching();
        let matches = index.query(vec![0.0], 1, QueryOptions::new()).await.unwrap();

        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn records_upserts_and_stats() {
        let index = MockVectorIndex::default().with_dimension(2);
        let shared = index.clone();

        index
            .upsert(vec![VectorRecord::new("1", vec![0.0, 1.0])], Some("ns"))
            .await
            .unwrap();

        let stats = shared.describe_stats().await.unwrap();
        assert_eq!(stats.total_vector_count, 1);
        assert_eq!(stats.namespaces["ns"].vector_count, 1);
        assert_eq!(shared.upserts().len(), 1);
    }

    #[tokio::test]
    async fn fails_configured_upsert() {
        let index = MockVectorIndex::default().failing_upsert_at(1);

        assert!(index.upsert(vec![], None).await.is_ok());
        assert!(index.upsert(vec![], None).await.is_err());
    }

    #[tokio::test]
    async fn fails_stats_when_configured() {
        let index = MockVectorIndex::default().failing_stats("index is initializing");
        let error = index.describe_stats().await.unwrap_err();

        assert!(error.to_string().contains("index is initializing"));
    }
}
