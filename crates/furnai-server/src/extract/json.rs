//! JSON extractor with structured rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

/// Drop-in replacement for [`axum::Json`].
///
/// Rejections are converted into [`Error`] so clients always receive the
/// JSON error body instead of axum's plain-text one.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Creates a new [`Json`] wrapper around the provided value.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self::new(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::JsonSyntaxError(err) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(sanitize_error_message(&err.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::UnsupportedMediaType
                .with_context("Content-Type must be application/json"),
            JsonRejection::BytesRejection(err) => {
                if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
                    ErrorKind::PayloadTooLarge.with_context(err.body_text())
                } else {
                    ErrorKind::BadRequest
                        .with_message("Failed to read request body")
                        .with_context(sanitize_error_message(&err.body_text()))
                }
            }
            other => ErrorKind::InternalServerError
                .with_context(format!("Unexpected JSON rejection: {other:?}")),
        }
    }
}

/// Keeps rejection details short: three lines, 200 characters.
fn sanitize_error_message(message: &str) -> String {
    let lines = message.lines().take(3).collect::<Vec<_>>();
    lines.join(" ").chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_limits_length_and_lines() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_error_message(&long).len(), 200);
        assert_eq!(sanitize_error_message("a\nb\nc\nd"), "a b c");
    }
}
