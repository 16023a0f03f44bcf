//! Row to index metadata sanitization.
//!
//! Every text field is always present (missing columns become `""`), the
//! description is capped at [`DESCRIPTION_LIMIT`] characters, and `price`
//! only appears when the cell parses to a finite number.

use furnai_vector::Metadata;
use serde_json::{Number, Value};

use crate::DatasetRow;

/// Text columns copied into metadata.
pub const TEXT_FIELDS: [&str; 7] = [
    "title",
    "description",
    "image_url",
    "product_url",
    "country",
    "color",
    "material",
];

/// Maximum description length, in characters.
pub const DESCRIPTION_LIMIT: usize = 500;

/// Builds the index metadata for a dataset row.
pub fn product_metadata(row: &DatasetRow) -> Metadata {
    let mut metadata = Metadata::new();

    for field in TEXT_FIELDS {
        let raw = row.get(field).unwrap_or_default();
        let text = if field == "description" {
            raw.chars().take(DESCRIPTION_LIMIT).collect()
        } else {
            raw.to_owned()
        };
        metadata.insert(field.to_owned(), Value::String(text));
    }

    if let Some(price) = row.get("price").and_then(parse_price) {
        metadata.insert("price".to_owned(), Value::Number(price));
    }

    metadata
}

/// Parses a price cell such as `"$1,234.50"`.
///
/// Strips `$` and `,`, then surrounding whitespace. Returns `None` for
/// anything that is not a finite number.
pub fn parse_price(raw: &str) -> Option<Number> {
    let cleaned = raw.replace(['$', ','], "");
    let value: f64 = cleaned.trim().parse().ok()?;
    Number::from_f64(value)
}
