#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client operations.
pub const TRACING_TARGET_CLIENT: &str = "furnai_hf::client";

/// Tracing target for embedding provider operations.
pub const TRACING_TARGET_PROVIDER: &str = "furnai_hf::provider";

mod client;
mod error;
mod provider;

pub use crate::client::{HfBuilder, HfClient, HfConfig, HfCredentials};
pub use crate::error::{Error, Result};
