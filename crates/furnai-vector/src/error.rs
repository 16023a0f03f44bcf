//! Vector index error types.

use thiserror::Error;

/// Result type for vector index operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// Vector index errors.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Index not found.
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Operation timeout.
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// The backend answered with a non-success status.
    #[error("backend error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VectorError {
    /// Creates a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an index not found error.
    pub fn index_not_found(name: impl Into<String>) -> Self {
        Self::IndexNotFound(name.into())
    }

    /// Creates an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates an API error from a status code and the raw response body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_decode() {
            Self::serialization(err.to_string())
        } else {
            Self::connection(err.to_string())
        }
    }
}

impl From<VectorError> for furnai_core::Error {
    fn from(err: VectorError) -> Self {
        let mapped = match &err {
            VectorError::Connection(_) => furnai_core::Error::network_error(),
            VectorError::IndexNotFound(_) => furnai_core::Error::external_error(),
            VectorError::InvalidConfig(_) => furnai_core::Error::configuration(),
            VectorError::Timeout(_) => furnai_core::Error::timeout(),
            VectorError::Api { status, body } => {
                return furnai_core::Error::from_status(*status, body.clone()).with_source(err);
            }
            VectorError::Serialization(_) => furnai_core::Error::serialization(),
        };

        mapped.with_message(err.to_string()).with_source(err)
    }
}
