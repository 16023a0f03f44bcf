//! Embedding provider and vector index configuration.

use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Args;
use furnai_core::emb::EmbeddingService;
use furnai_hf::{HfClient, HfConfig, HfCredentials};
use furnai_vector::VectorService;
use furnai_vector::pinecone::{PineconeBackend, PineconeConfig};

use crate::TRACING_TARGET_CONFIG;

/// Outbound HTTP client configuration shared by both providers.
#[derive(Debug, Clone, Args)]
pub struct HttpArgs {
    /// Timeout in seconds for calls to the embedding provider and the index.
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = 30)]
    pub http_timeout: u64,
}

impl HttpArgs {
    /// Rejects a zero timeout.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.http_timeout == 0 {
            return Err(anyhow!("HTTP timeout must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

/// Hugging Face inference API configuration.
#[derive(Clone, Args)]
pub struct HuggingFaceArgs {
    /// Hugging Face API token.
    #[arg(long, env = "HF_API_KEY", hide_env_values = true)]
    pub hf_api_key: String,

    /// Base URL of the inference API.
    #[arg(long, env = "HF_API_URL", default_value = "https://api-inference.huggingface.co")]
    pub hf_api_url: String,

    /// Sentence embedding model.
    #[arg(
        long,
        env = "HF_MODEL",
        default_value = "sentence-transformers/all-MiniLM-L6-v2"
    )]
    pub hf_model: String,
}

impl std::fmt::Debug for HuggingFaceArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceArgs")
            .field("hf_api_url", &self.hf_api_url)
            .field("hf_model", &self.hf_model)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceArgs {
    /// Logs the provider configuration without the token.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            url = %self.hf_api_url,
            model = %self.hf_model,
            "Embedding provider configuration"
        );
    }
}

/// Pinecone configuration.
#[derive(Clone, Args)]
pub struct PineconeArgs {
    /// Pinecone API key.
    #[arg(long, env = "PINECONE_API_KEY", hide_env_values = true)]
    pub pinecone_api_key: String,

    /// Index name.
    #[arg(long, env = "PINECONE_INDEX")]
    pub pinecone_index: String,

    /// Namespace; unset or empty selects the default namespace.
    #[arg(long, env = "PINECONE_NAMESPACE")]
    pub pinecone_namespace: Option<String>,

    /// Data plane host; resolved through the control plane when unset.
    #[arg(long, env = "PINECONE_INDEX_HOST")]
    pub pinecone_index_host: Option<String>,

    /// Control plane base URL.
    #[arg(long, env = "PINECONE_CONTROL_URL", default_value = "https://api.pinecone.io")]
    pub pinecone_control_url: String,
}

impl std::fmt::Debug for PineconeArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PineconeArgs")
            .field("pinecone_index", &self.pinecone_index)
            .field("pinecone_namespace", &self.pinecone_namespace)
            .field("pinecone_index_host", &self.pinecone_index_host)
            .field("pinecone_control_url", &self.pinecone_control_url)
            .finish_non_exhaustive()
    }
}

impl PineconeArgs {
    /// Builds the backend configuration.
    pub fn to_config(&self, http: &HttpArgs) -> PineconeConfig {
        let mut config = PineconeConfig::new(&self.pinecone_api_key, &self.pinecone_index)
            .with_control_url(&self.pinecone_control_url)
            .with_timeout(http.timeout());

        if let Some(namespace) = &self.pinecone_namespace {
            config = config.with_namespace(namespace);
        }
        if let Some(host) = &self.pinecone_index_host {
            config = config.with_index_host(host);
        }

        config
    }

    /// Logs the index configuration without the key.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            index = %self.pinecone_index,
            namespace = ?self.pinecone_namespace,
            host = ?self.pinecone_index_host,
            "Vector index configuration"
        );
    }
}

/// Creates the embedding service from CLI configuration.
pub fn create_embedding_service(
    args: &HuggingFaceArgs,
    http: &HttpArgs,
) -> anyhow::Result<EmbeddingService> {
    let config = HfConfig::builder()
        .with_base_url(&args.hf_api_url)
        .with_model(&args.hf_model)
        .with_timeout(http.timeout())
        .build()
        .context("invalid Hugging Face configuration")?;

    let client = HfClient::new(config, HfCredentials::bearer_token(&args.hf_api_key))
        .context("failed to create Hugging Face client")?;

    Ok(EmbeddingService::new(client))
}

/// Creates the vector service, resolving the index host if needed.
pub async fn create_vector_service(
    args: &PineconeArgs,
    http: &HttpArgs,
) -> anyhow::Result<VectorService> {
    let backend = PineconeBackend::new(&args.to_config(http))
        .await
        .context("failed to connect to Pinecone")?;

    Ok(VectorService::new(backend))
}
