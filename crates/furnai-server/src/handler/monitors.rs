//! Liveness and dependency health handlers.

use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use furnai_core::emb::EmbeddingService;
use furnai_core::{ServiceHealth, ServiceStatus};
use furnai_vector::VectorService;
use jiff::Timestamp;

use crate::extract::Json;
use crate::handler::response::{DependencyStatus, Liveness, MonitorStatus};
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "furnai_server::handler::monitors";

async fn liveness() -> Json<Liveness> {
    Json(Liveness::default())
}

async fn vector_health(vectors: &VectorService) -> ServiceHealth {
    let started_at = Instant::now();
    match vectors.describe_stats().await {
        Ok(_) => ServiceHealth::healthy().with_response_time(started_at.elapsed()),
        Err(error) => ServiceHealth::unhealthy(error.to_string()),
    }
}

async fn embedding_health(embedding: &EmbeddingService) -> ServiceHealth {
    embedding
        .health_check()
        .await
        .unwrap_or_else(|error| ServiceHealth::unhealthy(error.to_string()))
}

impl From<ServiceHealth> for DependencyStatus {
    fn from(health: ServiceHealth) -> Self {
        Self {
            status: health.status,
            message: health.message,
        }
    }
}

#[tracing::instrument(skip_all)]
async fn health_status(
    State(embedding): State<EmbeddingService>,
    State(vectors): State<VectorService>,
) -> (StatusCode, Json<MonitorStatus>) {
    let (embedding, vector_index) =
        futures::join!(embedding_health(&embedding), vector_health(&vectors));

    let is_healthy = embedding.is_healthy() && vector_index.is_healthy();
    let (status, status_code) = if is_healthy {
        (ServiceStatus::Healthy, StatusCode::OK)
    } else {
        (ServiceStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE)
    };

    tracing::info!(
        target: TRACING_TARGET,
        embedding = embedding.is_healthy(),
        vector_index = vector_index.is_healthy(),
        status_code = status_code.as_u16(),
        "Health status response prepared"
    );

    let response = MonitorStatus {
        checked_at: Timestamp::now(),
        status,
        embedding: embedding.into(),
        vector_index: vector_index.into(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    };

    (status_code, Json(response))
}

/// Returns a [`Router`] with the liveness and health routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_status))
}
