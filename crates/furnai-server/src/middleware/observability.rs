//! Request tracing, request ids and header redaction.

use axum::Router;
use axum::http::{HeaderName, header};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request id.
const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Pinecone style key header, redacted alongside `Authorization`.
const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Generates an `x-request-id` for each request, traces it, marks
    /// credential headers as sensitive and echoes the id in the response.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                API_KEY_HEADER,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
    }
}
