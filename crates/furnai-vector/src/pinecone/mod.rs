//! Pinecone vector index backend.
//!
//! Talks to the data plane REST API (`/query`, `/vectors/upsert`,
//! `/describe_index_stats`) with the `Api-Key` header.

mod backend;
mod config;
mod wire;

pub use backend::PineconeBackend;
pub use config::{DEFAULT_API_VERSION, DEFAULT_CONTROL_URL, PineconeConfig};
