#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for ingestion runs.
pub const TRACING_TARGET: &str = "furnai_ingest";

/// Tracing target for file loading.
pub const TRACING_TARGET_LOAD: &str = "furnai_ingest::load";

mod dataset;
mod embeddings;
mod error;
mod metadata;
mod pipeline;

pub use dataset::{Dataset, DatasetRow, ID_COLUMN};
pub use embeddings::Embeddings;
pub use error::{IngestError, IngestResult};
pub use metadata::{DESCRIPTION_LIMIT, TEXT_FIELDS, parse_price, product_metadata};
pub use pipeline::{
    DEFAULT_BATCH_SIZE, IngestOptions, IngestOptionsBuilder, IngestReport, Ingestor,
};
