//! Vector index trait and record types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VectorResult;

/// Metadata attached to a stored vector.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A vector to be upserted into the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier for the vector.
    pub id: String,
    /// The embedding vector.
    pub values: Vec<f32>,
    /// Attached metadata.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl VectorRecord {
    /// Creates a new record with an ID and embedding.
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            values,
            metadata: Metadata::new(),
        }
    }

    /// Replaces the record metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Adds a single metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A single nearest-neighbour match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Vector ID.
    pub id: String,
    /// Similarity score.
    pub score: f32,
    /// The vector (if requested).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    /// Associated metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Query options. Stored vectors are never returned.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Include metadata in results.
    pub include_metadata: bool,
    /// Namespace to search; `None` means the default namespace.
    pub namespace: Option<String>,
}

impl QueryOptions {
    /// Creates default query options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include metadata in results.
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }

    /// Set the namespace. An empty name selects the default namespace.
    pub fn with_namespace(mut self, namespace: Option<impl Into<String>>) -> Self {
        self.namespace = namespace.map(Into::into).filter(|ns| !ns.is_empty());
        self
    }
}

/// Per-namespace statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceStats {
    /// Number of vectors stored in the namespace.
    pub vector_count: u64,
}

/// Index statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Vector dimension of the index.
    pub dimension: usize,
    /// Total number of vectors across all namespaces.
    pub total_vector_count: u64,
    /// Fraction of the index capacity in use.
    pub index_fullness: f64,
    /// Per-namespace statistics, keyed by namespace name.
    pub namespaces: HashMap<String, NamespaceStats>,
}

/// Trait for vector index backends.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns up to `top_k` nearest neighbours of `vector`, best first.
    async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
        options: QueryOptions,
    ) -> VectorResult<Vec<QueryMatch>>;

    /// Inserts or replaces records, returning the number upserted.
    async fn upsert(
        &self,
        records: Vec<VectorRecord>,
        namespace: Option<&str>,
    ) -> VectorResult<usize>;

    /// Describes the index.
    async fn describe_stats(&self) -> VectorResult<IndexStats>;
}
