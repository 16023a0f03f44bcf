use serde::{Deserialize, Serialize};

use crate::handler::Error;

/// JSON body of every error answer.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Snake-case error name, e.g. `bad_gateway`.
    pub name: String,
    /// Client-safe message; upstream failures carry the provider's text.
    pub message: String,
    /// Part of the request the error relates to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            name: error.kind().name().to_owned(),
            message: error.client_message(),
            resource: error.resource().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErrorKind;

    #[test]
    fn context_stays_server_side() {
        let error = ErrorKind::BadRequest
            .with_message("Field 'top_k' must be between 1 and 1000")
            .with_resource("request")
            .with_context("top_k = 0");

        let json = serde_json::to_value(ErrorResponse::from(&error)).unwrap();

        assert_eq!(json["name"], "bad_request");
        assert_eq!(json["resource"], "request");
        assert!(json["message"].as_str().unwrap().contains("top_k"));
        assert!(json.get("context").is_none());
    }
}
