//! Middleware configuration for the HTTP server.

use clap::Args;
use furnai_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Request timeout and panic recovery configuration.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            request_timeout_secs = self.recovery.request_timeout,
            "Middleware configuration"
        );
    }
}
