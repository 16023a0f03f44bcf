//! Request extractors with API-shaped rejections.
//!
//! - [`Json`] answers malformed bodies with the JSON error shape.
//! - [`ValidateJson`] additionally runs `validator` rules.

mod json;
mod validated_json;

pub use crate::extract::json::Json;
pub use crate::extract::validated_json::ValidateJson;
