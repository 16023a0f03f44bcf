//! Ingestion configuration.

use std::path::PathBuf;

use clap::Args;

use super::{HttpArgs, PineconeArgs};

/// Options of `furnai ingest`.
#[derive(Debug, Clone, Args)]
pub struct IngestArgs {
    /// Vector index configuration.
    #[clap(flatten)]
    pub pinecone: PineconeArgs,

    /// Outbound HTTP client configuration.
    #[clap(flatten)]
    pub http: HttpArgs,

    /// Path to the `.npy` matrix of product embeddings.
    #[arg(long, env = "EMBEDDINGS_PATH", default_value = "product_embeddings.npy")]
    pub embeddings: PathBuf,

    /// Path to the product CSV dataset.
    #[arg(long, env = "DATASET_PATH", default_value = "dataset_with_ids.csv")]
    pub dataset: PathBuf,

    /// Records per upsert request.
    #[arg(
        long,
        env = "BATCH_SIZE",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub batch_size: u64,

    /// Build every batch without writing to the index.
    #[arg(long)]
    pub dry_run: bool,
}
