//! Hugging Face client configuration.

use std::time::Duration;

use derive_builder::Builder;

/// Default base URL of the hosted inference API.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default sentence embedding model (384 dimensions).
pub const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Configuration for the Hugging Face client.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "HfBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct HfConfig {
    /// Base URL for the inference API.
    #[builder(default = "DEFAULT_BASE_URL.to_owned()")]
    pub base_url: String,
    /// Model identifier used in the feature-extraction path.
    #[builder(default = "DEFAULT_MODEL.to_owned()")]
    pub model: String,
    /// Request timeout duration.
    #[builder(default = "Duration::from_secs(30)")]
    pub timeout: Duration,
    /// Connection timeout duration.
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests.
    #[builder(default = "HfConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl HfConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HfBuilder {
        HfBuilder::default()
    }

    /// Path of the feature-extraction pipeline for the configured model.
    pub fn pipeline_path(&self) -> String {
        format!("pipeline/feature-extraction/{}", self.model.trim_matches('/'))
    }

    fn default_user_agent() -> String {
        format!("furnai-hf/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl HfBuilder {
    fn validate_config(&self) -> Result<(), String> {
        if let Some(base_url) = &self.base_url {
            let url = url::Url::parse(base_url)
                .map_err(|e| format!("Invalid base URL '{base_url}': {e}"))?;
            if url.cannot_be_a_base() {
                return Err(format!("Base URL '{base_url}' cannot be a base"));
            }
        }

        if let Some(model) = &self.model
            && model.trim().is_empty()
        {
            return Err("Model must not be empty".to_string());
        }

        if let Some(timeout) = &self.timeout
            && timeout.is_zero()
        {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(connect_timeout) = &self.connect_timeout
            && connect_timeout.is_zero()
        {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HfConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.pipeline_path(),
            "pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2"
        );
    }

    #[test]
    fn builder_overrides() {
        let config = HfConfig::builder()
            .with_base_url("http://localhost:8080")
            .with_model("BAAI/bge-small-en-v1.5")
            .with_timeout(Duration::from_secs(5))
            .build()
            .expect("valid config");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.model, "BAAI/bge-small-en-v1.5");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(HfConfig::builder().with_base_url("not a url").build().is_err());
        assert!(HfConfig::builder().with_model("  ").build().is_err());
        assert!(
            HfConfig::builder()
                .with_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }
}
