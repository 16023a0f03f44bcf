//! Pinecone REST request and response bodies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{IndexStats, Metadata, NamespaceStats, QueryMatch, VectorRecord};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub include_metadata: bool,
    pub include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub values: Vec<f32>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl From<WireMatch> for QueryMatch {
    fn from(m: WireMatch) -> Self {
        Self {
            id: m.id,
            score: m.score,
            values: (!m.values.is_empty()).then_some(m.values),
            metadata: m.metadata.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertRequest<'a> {
    pub vectors: &'a [VectorRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpsertResponse {
    #[serde(default)]
    pub upserted_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireNamespaceStats {
    #[serde(default)]
    pub vector_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescribeStatsResponse {
    #[serde(default)]
    pub namespaces: HashMap<String, WireNamespaceStats>,
    #[serde(default)]
    pub dimension: usize,
    #[serde(default)]
    pub index_fullness: f64,
    #[serde(default)]
    pub total_vector_count: u64,
}

impl From<DescribeStatsResponse> for IndexStats {
    fn from(r: DescribeStatsResponse) -> Self {
        Self {
            dimension: r.dimension,
            total_vector_count: r.total_vector_count,
            index_fullness: r.index_fullness,
            namespaces: r
                .namespaces
                .into_iter()
                .map(|(name, ns)| {
                    let stats = NamespaceStats {
                        vector_count: ns.vector_count,
                    };
                    (name, stats)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DescribeIndexResponse {
    pub host: String,
}
