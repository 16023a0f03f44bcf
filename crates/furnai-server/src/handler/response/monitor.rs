//! Liveness and health response types.

use furnai_core::ServiceStatus;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Liveness message.
pub const LIVENESS_MESSAGE: &str = "Recommendation API is running!";

/// Response of `GET /`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liveness {
    /// Static liveness message.
    pub message: String,
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            message: LIVENESS_MESSAGE.to_owned(),
        }
    }
}

/// Health of a single dependency.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStatus {
    /// Dependency status.
    pub status: ServiceStatus,
    /// Failure description, if unhealthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /health`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Overall status, healthy only if every dependency is.
    pub status: ServiceStatus,
    /// Embedding provider status.
    pub embedding: DependencyStatus,
    /// Vector index status.
    pub vector_index: DependencyStatus,
    /// Application version.
    pub version: String,
}
