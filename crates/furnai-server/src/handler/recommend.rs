//! Product recommendation handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::RecommendRequest;
use crate::handler::response::RecommendResponse;
use crate::service::{RecommendService, ServiceState};

/// Tracing target for recommendation handlers.
const TRACING_TARGET: &str = "furnai_server::handler::recommend";

#[tracing::instrument(skip_all)]
async fn recommend(
    State(service): State<RecommendService>,
    ValidateJson(request): ValidateJson<RecommendRequest>,
) -> Result<Json<RecommendResponse>> {
    tracing::debug!(
        target: TRACING_TARGET,
        query_len = request.query.len(),
        top_k = request.top_k,
        "Recommendation requested"
    );

    let recommendations = service.recommend(&request.query, request.top_k).await?;
    Ok(Json(recommendations.into()))
}

/// Returns a [`Router`] with the recommendation route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/recommend", post(recommend))
}
