//! Provider error to handler error conversion.

use furnai_core::{Error as CoreError, ErrorKind as CoreErrorKind};

use super::http_error::{Error, ErrorKind};

/// Tracing target for provider error conversions.
const TRACING_TARGET: &str = "furnai_server::handler::provider";

/// Detail shown instead of the message of errors raised in this process.
const INTERNAL_DETAIL: &str = "Provider operation failed";

fn status_kind(kind: CoreErrorKind) -> ErrorKind {
    match kind {
        CoreErrorKind::InvalidInput => ErrorKind::BadRequest,
        CoreErrorKind::Timeout => ErrorKind::GatewayTimeout,
        CoreErrorKind::ExternalError
        | CoreErrorKind::NetworkError
        | CoreErrorKind::Authentication
        | CoreErrorKind::RateLimited => ErrorKind::BadGateway,
        CoreErrorKind::Configuration | CoreErrorKind::Serialization => {
            ErrorKind::InternalServerError
        }
    }
}

impl From<CoreError> for Error {
    /// Upstream failures keep the provider's message, including the status
    /// and raw body of a non-success answer.
    fn from(error: CoreError) -> Self {
        if error.is_upstream() {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                error_kind = error.kind_str(),
                "Upstream provider request failed"
            );
        } else {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                error_kind = error.kind_str(),
                "Provider operation failed"
            );
        }

        let kind = status_kind(error.kind());
        let converted = kind.with_context(error.to_string());

        match (kind, error.message) {
            (ErrorKind::InternalServerError, _) => converted.with_message(INTERNAL_DETAIL),
            (_, Some(message)) => converted.with_message(message),
            (_, None) => converted,
        }
    }
}
