//! Query embedding and nearest-neighbour lookup.

use furnai_core::Result;
use furnai_core::emb::EmbeddingService;
use furnai_vector::{QueryMatch, QueryOptions, VectorService};

/// Tracing target for recommendation operations.
const TRACING_TARGET: &str = "furnai_server::service::recommend";

/// Matches for a query, in index order.
#[derive(Debug, Clone)]
pub struct Recommendations {
    /// The query as received.
    pub query: String,
    /// Nearest neighbours, best first as returned by the index.
    pub matches: Vec<QueryMatch>,
}

/// Embeds queries and looks up their nearest products.
#[derive(Debug, Clone)]
pub struct RecommendService {
    embedding: EmbeddingService,
    vectors: VectorService,
    namespace: Option<String>,
}

impl RecommendService {
    /// Creates a new service querying `namespace` (or the default one).
    pub fn new(
        embedding: EmbeddingService,
        vectors: VectorService,
        namespace: Option<String>,
    ) -> Self {
        Self {
            embedding,
            vectors,
            namespace: namespace.filter(|ns| !ns.is_empty()),
        }
    }

    /// Returns the embedding service.
    pub fn embedding(&self) -> &EmbeddingService {
        &self.embedding
    }

    /// Returns the vector service.
    pub fn vectors(&self) -> &VectorService {
        &self.vectors
    }

    /// Returns up to `top_k` products closest to `query`.
    ///
    /// Provider failures are returned as-is; nothing is retried or cached.
    pub async fn recommend(&self, query: &str, top_k: usize) -> Result<Recommendations> {
        let vector = self.embedding.embed(query).await?;

        let options = QueryOptions::new()
            .with_metadata()
            .with_namespace(self.namespace.clone());
        let mut matches = self.vectors.query(vector, top_k, options).await?;
        matches.truncate(top_k);

        tracing::info!(
            target: TRACING_TARGET,
            top_k,
            results = matches.len(),
            "Recommendations found"
        );

        Ok(Recommendations {
            query: query.to_owned(),
            matches,
        })
    }
}
