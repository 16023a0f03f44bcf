//! Authentication credentials for the Hugging Face inference API.

use std::fmt;

/// Authentication credentials for the inference API.
///
/// The hosted API expects an `Authorization: Bearer` header. Self-hosted
/// text-embeddings-inference servers commonly run without authentication.
#[derive(Clone, Default)]
pub enum HfCredentials {
    /// Bearer token (a Hugging Face access token).
    BearerToken(String),
    /// No authentication.
    #[default]
    None,
}

impl HfCredentials {
    /// Create bearer token credentials.
    pub fn bearer_token(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// Create credentials with no authentication.
    pub fn none() -> Self {
        Self::None
    }
}

impl fmt::Debug for HfCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
            Self::None => f.write_str("None"),
        }
    }
}
