//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of structured errors so that any transport or parsing
/// failure can be attached without leaking its concrete type.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while talking to external providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// Network-related error occurred.
    NetworkError,
    /// Authentication failed.
    Authentication,
    /// Rate limit exceeded.
    RateLimited,
    /// The external service answered with a non-success status.
    ExternalError,
    /// Configuration error.
    Configuration,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
}

/// A structured error type for provider operations.
#[derive(Debug, Error)]
#[error("{}{}", .kind.as_ref(), .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new external error.
    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Maps a non-success HTTP status from an upstream service to an error.
    ///
    /// The raw response body is kept verbatim as the message.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ErrorKind::Authentication,
            429 => ErrorKind::RateLimited,
            408 | 504 => ErrorKind::Timeout,
            _ => ErrorKind::ExternalError,
        };

        Self::new(kind).with_message(format!("HTTP {status}: {}", body.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns true if the error originates from the upstream service rather
    /// than from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ExternalError
                | ErrorKind::NetworkError
                | ErrorKind::Authentication
                | ErrorKind::RateLimited
                | ErrorKind::Timeout
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization()
            .with_message(err.to_string())
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let error = Error::external_error().with_message("model is loading");
        assert_eq!(error.to_string(), "external_error: model is loading");

        let error = Error::timeout();
        assert_eq!(error.to_string(), "timeout");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(Error::from_status(401, "").kind(), ErrorKind::Authentication);
        assert_eq!(Error::from_status(429, "").kind(), ErrorKind::RateLimited);
        assert_eq!(Error::from_status(504, "").kind(), ErrorKind::Timeout);

        let error = Error::from_status(503, "{\"error\":\"overloaded\"}");
        assert_eq!(error.kind(), ErrorKind::ExternalError);
        assert!(error.message.as_deref().unwrap().contains("overloaded"));
        assert!(error.is_upstream());
    }

    #[test]
    fn kind_str_is_snake_case() {
        assert_eq!(Error::invalid_input().kind_str(), "invalid_input");
        assert!(!Error::configuration().is_upstream());
    }
}
