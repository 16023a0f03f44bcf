//! Ingestion error types.

use std::path::PathBuf;

use furnai_vector::VectorError;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Ingestion errors.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The dataset file could not be read or parsed.
    #[error("failed to read dataset {}: {source}", .path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The embedding file could not be read or is not a 2-D float array.
    #[error("failed to read embeddings {}: {source}", .path.display())]
    Embeddings {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// Embedding and dataset row counts differ.
    #[error("mismatch: embeddings count {embeddings} vs dataset rows {rows}")]
    CountMismatch { embeddings: usize, rows: usize },

    /// Invalid ingestion options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A batch upsert failed; later batches were not attempted.
    #[error("upsert of batch {batch} failed: {source}")]
    Upsert {
        batch: usize,
        #[source]
        source: VectorError,
    },

    /// Fetching index statistics failed.
    #[error("failed to describe index stats: {0}")]
    Stats(#[source] VectorError),
}

impl IngestError {
    /// Returns true if the error was raised before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Dataset { .. }
                | Self::Embeddings { .. }
                | Self::CountMismatch { .. }
                | Self::InvalidOptions(_)
        )
    }
}
