//! HTTP handlers and the API router.

mod error;
mod monitors;
mod recommend;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub(crate) use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every API route and a JSON 404 fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(monitors::routes())
        .merge(recommend::routes())
        .fallback(handler)
}

#[cfg(test)]
mod test {
    use axum::Router;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use furnai_test::create_mock_services;

    use crate::handler::{ErrorResponse, routes};
    use crate::service::ServiceState;

    pub fn create_test_state() -> ServiceState {
        let (embedding, vectors) = create_mock_services();
        ServiceState::new(embedding, vectors, None)
    }

    pub fn create_test_server_with_router(
        router: impl Fn(ServiceState) -> Router<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let state = create_test_state();
        let router = router(state.clone());
        create_test_server_with_state(router, state)
    }

    pub fn create_test_server_with_state(
        router: Router<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app = router.with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_router(|_| routes())
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/products").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body = response.json::<ErrorResponse>();
        assert_eq!(body.name, "not_found");
        Ok(())
    }
}
