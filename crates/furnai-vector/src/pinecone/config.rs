//! Pinecone configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{VectorError, VectorResult};

/// Default control plane URL.
pub const DEFAULT_CONTROL_URL: &str = "https://api.pinecone.io";

/// API version sent in `X-Pinecone-API-Version`.
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Pinecone configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PineconeConfig {
    /// Pinecone API key.
    pub api_key: String,
    /// Index name.
    pub index: String,
    /// Namespace; `None` selects the default namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Data plane host. Resolved through the control plane when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_host: Option<String>,
    /// Control plane base URL.
    pub control_url: String,
    /// API version header value.
    pub api_version: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("index", &self.index)
            .field("namespace", &self.namespace)
            .field("index_host", &self.index_host)
            .field("control_url", &self.control_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PineconeConfig {
    /// Creates a new Pinecone configuration.
    pub fn new(api_key: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            index: index.into(),
            namespace: None,
            index_host: None,
            control_url: DEFAULT_CONTROL_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the namespace. An empty name selects the default namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.is_empty()).then_some(namespace);
        self
    }

    /// Sets the data plane host, skipping control plane resolution.
    pub fn with_index_host(mut self, host: impl Into<String>) -> Self {
        self.index_host = Some(host.into());
        self
    }

    /// Sets the control plane URL.
    pub fn with_control_url(mut self, url: impl Into<String>) -> Self {
        self.control_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that required values are present.
    pub fn validate(&self) -> VectorResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(VectorError::invalid_config("Pinecone API key is empty"));
        }
        if self.index.trim().is_empty() {
            return Err(VectorError::invalid_config("Pinecone index name is empty"));
        }
        if self.timeout.is_zero() {
            return Err(VectorError::invalid_config("Timeout must be greater than 0"));
        }
        Ok(())
    }
}

/// Prefixes a bare host name with `https://`.
pub(crate) fn host_url(host: &str) -> VectorResult<url::Url> {
    let host = host.trim().trim_end_matches('/');
    let full = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };

    url::Url::parse(&full)
        .map_err(|e| VectorError::invalid_config(format!("Invalid host '{host}': {e}")))
}
