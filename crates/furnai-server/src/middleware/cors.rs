//! CORS (Cross-Origin Resource Sharing) middleware configuration.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

/// Origins allowed when none are configured.
const LOCALHOST_ORIGINS: [&str; 5] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
    "http://localhost:5173",
];

/// Creates a CORS layer based on the provided configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.to_header_values())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(config.max_age())
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    /// If empty, defaults to localhost origins for development.
    #[cfg_attr(
        feature = "config",
        arg(long = "cors-origins", env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to header values, skipping invalid ones.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return LOCALHOST_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| origin.trim().parse().ok())
            .collect()
    }
}

/// Extension trait for `axum::`[`Router`] to apply the CORS layer.
pub trait RouterCorsExt<S> {
    /// Layers CORS handling with the provided configuration.
    fn with_cors(self, config: &CorsConfig) -> Self;
}

impl<S> RouterCorsExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_cors(self, config: &CorsConfig) -> Self {
        self.layer(create_cors_layer(config))
    }
}
