//! Error types for furnai-hf.

use thiserror::Error;

/// Error type for the Hugging Face client.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference API answered with a non-success status.
    #[error("Hugging Face API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body did not contain an embedding.
    #[error("Unexpected response: {0}")]
    Response(String),

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an API error from a status code and the raw response body.
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

impl From<Error> for furnai_core::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Http(e) if e.is_timeout() => furnai_core::Error::timeout()
                .with_message("Hugging Face request timed out")
                .with_source(e),
            Error::Http(e) if e.is_decode() => furnai_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Http(e) => furnai_core::Error::network_error()
                .with_message(e.to_string())
                .with_source(e),
            Error::Api { status, body } => furnai_core::Error::from_status(status, body),
            Error::Response(message) => {
                furnai_core::Error::external_error().with_message(message)
            }
            Error::Config(message) => furnai_core::Error::configuration().with_message(message),
        }
    }
}

/// Result type alias for furnai-hf operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use furnai_core::ErrorKind;

    use super::*;

    #[test]
    fn api_error_maps_to_external_error() {
        let error: furnai_core::Error = Error::api_error(503, "Model is loading").into();

        assert_eq!(error.kind(), ErrorKind::ExternalError);
        assert_eq!(
            error.message.as_deref(),
            Some("HTTP 503: Model is loading")
        );
    }

    #[test]
    fn config_error_maps_to_configuration() {
        let error: furnai_core::Error = Error::invalid_config("bad url").into();
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
