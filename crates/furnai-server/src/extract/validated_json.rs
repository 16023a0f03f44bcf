//! JSON extractor that runs `validator` rules after deserialization.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::extract::Json;
use crate::handler::{Error, ErrorKind};

/// Tracing target for request validation.
const TRACING_TARGET: &str = "furnai_server::extract";

/// [`Json`] extractor that also validates the payload.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

type Params = HashMap<Cow<'static, str>, serde_json::Value>;

fn param(params: &Params, key: &str) -> Option<String> {
    params.get(key).map(|value| match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn format_bounds(field: &str, params: &Params, what: &str) -> String {
    match (param(params, "min"), param(params, "max")) {
        (Some(min), Some(max)) => format!("Field '{field}' must be between {min} and {max}"),
        (Some(min), None) => format!("Field '{field}' must be at least {min}{what}"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max}{what}"),
        (None, None) => format!("Field '{field}' is invalid"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("Field '{field}': {message}");
    }

    match error.code.as_ref() {
        "length" => format_bounds(field, &error.params, " characters long"),
        "range" => format_bounds(field, &error.params, ""),
        "required" => format!("Field '{field}' is required"),
        code => format!("Field '{field}' failed validation: {code}"),
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        messages.sort();

        tracing::warn!(
            target: TRACING_TARGET,
            errors = ?messages,
            "Request validation failed"
        );

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            many => many.join(". "),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        text: String,
        #[validate(range(min = 1, max = 10))]
        count: usize,
    }

    #[test]
    fn formats_each_field() {
        let errors = Sample {
            text: String::new(),
            count: 0,
        }
        .validate()
        .unwrap_err();

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        let message = error.message().unwrap_or_default();
        assert!(message.starts_with("Field 'count' must be between"));
        assert!(message.contains("Field 'text' must be at least"));
    }
}
