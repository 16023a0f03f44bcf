#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod pinecone;

mod error;
mod index;
mod service;

pub use error::{VectorError, VectorResult};
pub use index::{
    IndexStats, Metadata, NamespaceStats, QueryMatch, QueryOptions, VectorIndex, VectorRecord,
};
pub use service::VectorService;

/// Tracing target for vector index operations.
pub const TRACING_TARGET: &str = "furnai_vector";

/// Tracing target for the Pinecone backend.
pub const TRACING_TARGET_PINECONE: &str = "furnai_vector::pinecone";
