//! Recovery middleware for handling errors, panics, and timeouts.

use std::any::Any;
use std::future::ready;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

/// Tracing target for error recovery.
const TRACING_TARGET_ERROR: &str = "furnai_server::recovery::error";

/// Tracing target for panic recovery.
const TRACING_TARGET_PANIC: &str = "furnai_server::recovery::panic";

type ResponseFut = BoxFuture<'static, Response>;
type Panic = Box<dyn Any + Send + 'static>;

/// Configuration for recovery middleware behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Maximum duration in seconds to wait for a request to complete.
    /// Requests exceeding this duration receive a 504 response.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "REQUEST_TIMEOUT",
            default_value = "30",
            value_parser = clap::value_parser!(u64).range(1..=300)
        )
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
        }
    }
}

impl RecoveryConfig {
    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Layers timeout, panic and service error handling.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// Layers recovery middleware with the default 30 second timeout.
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let middlewares = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .layer(CatchPanicLayer::custom(catch_panic))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(middlewares)
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

fn handle_error(err: tower::BoxError) -> ResponseFut {
    use tower::timeout::error::Elapsed;

    let error = if err.is::<Elapsed>() {
        tracing::error!(
            target: TRACING_TARGET_ERROR,
            error = %err,
            "request timeout exceeded"
        );

        Error::new(ErrorKind::GatewayTimeout)
            .with_context("The request took too long to process and was terminated")
    } else {
        tracing::error!(
            target: TRACING_TARGET_ERROR,
            error = %err,
            "unknown middleware error"
        );

        Error::new(ErrorKind::InternalServerError).with_context(err.to_string())
    };

    ready(error.into_response()).boxed()
}

fn catch_panic(err: Panic) -> Response {
    if let Some(error) = err.downcast_ref::<Error>() {
        tracing::error!(
            target: TRACING_TARGET_PANIC,
            error = %error,
            "service panic"
        );
        return error.clone().into_response();
    }

    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic type");

    tracing::error!(
        target: TRACING_TARGET_PANIC,
        message = %message,
        "service panic"
    );

    Error::new(ErrorKind::InternalServerError)
        .with_message("An unexpected panic occurred")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;
    use crate::handler::ErrorResponse;

    #[tokio::test]
    async fn slow_handler_times_out() -> anyhow::Result<()> {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_error))
                    .layer(TimeoutLayer::new(Duration::from_millis(50))),
            );

        let server = TestServer::new(router)?;
        let response = server.get("/slow").await;
        response.assert_status(StatusCode::GATEWAY_TIMEOUT);

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "gateway_timeout");
        Ok(())
    }

    #[tokio::test]
    async fn panic_becomes_json_500() -> anyhow::Result<()> {
        let router = Router::new()
            .route(
                "/panic",
                get(|| async {
                    if true {
                        panic!("boom");
                    }
                    "unreachable"
                }),
            )
            .with_default_recovery();

        let server = TestServer::new(router)?;
        let response = server.get("/panic").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        Ok(())
    }
}
