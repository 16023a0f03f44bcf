//! Hugging Face client module.
//!
//! Provides the HTTP client, its configuration builder and the credentials
//! attached to every inference request.

mod credentials;
mod hf_client;
mod hf_config;

pub use credentials::HfCredentials;
pub use hf_client::HfClient;
pub use hf_config::{HfBuilder, HfConfig};
