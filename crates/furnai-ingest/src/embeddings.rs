//! Precomputed embedding matrix loaded from `.npy`.

use std::path::Path;

use ndarray::{Array2, ArrayView1};
use ndarray_npy::{ReadNpyError, read_npy};

use crate::TRACING_TARGET_LOAD;
use crate::error::{IngestError, IngestResult};

/// Row-major embedding matrix, one row per dataset row.
#[derive(Debug, Clone)]
pub struct Embeddings {
    matrix: Array2<f32>,
}

impl Embeddings {
    /// Loads a 2-D `float32` or `float64` array. `float64` is narrowed.
    pub fn from_path(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let wrap = |source| IngestError::Embeddings {
            path: path.to_path_buf(),
            source,
        };

        let matrix = match read_npy::<_, Array2<f32>>(path) {
            Ok(matrix) => matrix,
            Err(ReadNpyError::WrongDescriptor(_)) => read_npy::<_, Array2<f64>>(path)
                .map_err(wrap)?
                .mapv(|v| v as f32),
            Err(err) => return Err(wrap(err)),
        };

        tracing::info!(
            target: TRACING_TARGET_LOAD,
            path = %path.display(),
            rows = matrix.nrows(),
            dimension = matrix.ncols(),
            "Embeddings loaded"
        );

        Ok(Self { matrix })
    }

    /// Number of embeddings.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Returns true if there are no embeddings.
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Vector dimension.
    pub fn dimension(&self) -> usize {
        self.matrix.ncols()
    }

    /// Embedding at row `index`.
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.len()).then(|| self.matrix.row(index))
    }
}

impl From<Array2<f32>> for Embeddings {
    fn from(matrix: Array2<f32>) -> Self {
        Self { matrix }
    }
}
