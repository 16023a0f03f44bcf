//! CSV product dataset.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::TRACING_TARGET_LOAD;
use crate::error::{IngestError, IngestResult};

/// Name of the optional identifier column.
pub const ID_COLUMN: &str = "id";

/// One dataset row, keyed by header name.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// Record identifier, from the `id` column or the row position.
    pub id: String,
    fields: HashMap<String, String>,
}

impl DatasetRow {
    /// Returns the raw cell of `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// A CSV dataset with a header row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Reads a dataset from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| IngestError::Dataset {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_csv(reader).map_err(|source| IngestError::Dataset {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            target: TRACING_TARGET_LOAD,
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers.len(),
            synthesized_ids = !dataset.has_id_column(),
            "Dataset loaded"
        );

        Ok(dataset)
    }

    /// Reads a dataset from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let id_index = headers.iter().position(|h| h == ID_COLUMN);

        let mut rows = Vec::new();
        for (position, record) in reader.records().enumerate() {
            let record = record?;
            let fields: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_owned))
                .collect();

            let id = id_index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map_or_else(|| position.to_string(), str::to_owned);

            rows.push(DatasetRow { id, fields });
        }

        Ok(Self { headers, rows })
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns true if ids come from the file rather than row positions.
    pub fn has_id_column(&self) -> bool {
        self.headers.iter().any(|h| h == ID_COLUMN)
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
