//! Handler error and the status each kind answers with.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::ErrorResponse;

/// Tracing target for error responses.
const TRACING_TARGET: &str = "furnai_server::handler::error";

/// A specialized [`Result`] type for handlers and extractors.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Kinds of failure the API answers with.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The body failed to parse or validate.
    BadRequest,
    /// No route matched.
    NotFound,
    /// The body exceeds the size limit.
    PayloadTooLarge,
    /// The body was sent without a JSON content type.
    UnsupportedMediaType,
    /// A failure on our side.
    #[default]
    InternalServerError,
    /// The embedding provider or the vector index failed.
    BadGateway,
    /// The request deadline passed or an upstream call timed out.
    GatewayTimeout,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Returns the `name` sent in the error body.
    pub fn name(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::PayloadTooLarge => "payload_too_large",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::InternalServerError => "internal_server_error",
            Self::BadGateway => "bad_gateway",
            Self::GatewayTimeout => "gateway_timeout",
        }
    }

    /// Returns the message used when no detail is attached.
    pub fn summary(self) -> &'static str {
        match self {
            Self::BadRequest => "Invalid request data",
            Self::NotFound => "Resource not found",
            Self::PayloadTooLarge => "Payload too large",
            Self::UnsupportedMediaType => "Unsupported media type",
            Self::InternalServerError => "Internal server error",
            Self::BadGateway => "Upstream provider error",
            Self::GatewayTimeout => "Request timed out",
        }
    }

    /// Creates an [`Error`] of this kind carrying `message`.
    #[inline]
    pub fn with_message(self, message: impl Into<String>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] of this kind carrying log-only `context`.
    #[inline]
    pub fn with_context(self, context: impl Into<String>) -> Error {
        Error::new(self).with_context(context)
    }

    /// Creates an [`Error`] of this kind naming `resource`.
    #[inline]
    pub fn with_resource(self, resource: &'static str) -> Error {
        Error::new(self).with_resource(resource)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        Error::new(self).into_response()
    }
}

/// Error returned by handlers and extractors.
///
/// The message is appended to the kind's summary in the response body.
/// Context is logged when the response is built and never sent.
#[derive(Debug, Clone, Default)]
#[must_use = "errors do nothing unless returned"]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    resource: Option<&'static str>,
    context: Option<String>,
}

impl Error {
    /// Creates an error of `kind` without detail.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Sets the client-facing detail.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the log-only context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Names the part of the request the error relates to.
    pub fn with_resource(mut self, resource: &'static str) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the client-facing detail, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource, if any.
    #[inline]
    pub fn resource(&self) -> Option<&'static str> {
        self.resource
    }

    /// Returns the log-only context, if any.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Message sent to the client: the summary, then the detail.
    pub fn client_message(&self) -> String {
        match &self.message {
            Some(message) => format!("{}. {message}", self.kind.summary()),
            None => format!("{}.", self.kind.summary()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.kind,
            self.kind.status_code().as_u16(),
            self.client_message()
        )?;

        if let Some(context) = &self.context {
            write!(f, " - {context}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::warn!(
                target: TRACING_TARGET,
                name = self.kind.name(),
                status = status.as_u16(),
                context = self.context.as_deref(),
                "Answering with a server error"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                name = self.kind.name(),
                status = status.as_u16(),
                context = self.context.as_deref(),
                "Answering with a client error"
            );
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
