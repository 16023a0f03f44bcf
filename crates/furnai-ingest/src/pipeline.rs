//! Batched upload of dataset rows into the vector index.

use derive_builder::Builder;
use furnai_vector::{IndexStats, VectorRecord, VectorService};
use serde::Serialize;

use crate::error::{IngestError, IngestResult};
use crate::{Dataset, DatasetRow, Embeddings, TRACING_TARGET, product_metadata};

/// Default number of records per upsert.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Options of an ingestion run.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "IngestOptionsBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_options")
)]
pub struct IngestOptions {
    /// Records per upsert call.
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    pub batch_size: usize,
    /// Target namespace; `None` selects the default namespace.
    #[builder(default)]
    pub namespace: Option<String>,
    /// Build every batch without calling the index.
    #[builder(default)]
    pub dry_run: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            namespace: None,
            dry_run: false,
        }
    }
}

impl IngestOptions {
    /// Create a new options builder.
    pub fn builder() -> IngestOptionsBuilder {
        IngestOptionsBuilder::default()
    }
}

impl IngestOptionsBuilder {
    fn validate_options(&self) -> Result<(), String> {
        if self.batch_size == Some(0) {
            return Err("Batch size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Outcome of a completed ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Dataset rows processed.
    pub rows: usize,
    /// Batches built.
    pub batches: usize,
    /// Records upserted (or built, on a dry run).
    pub upserted: usize,
    /// Index statistics after the run; absent on a dry run.
    pub stats: Option<IndexStats>,
}

/// Uploads a dataset and its embeddings into the vector index.
#[derive(Debug, Clone)]
pub struct Ingestor {
    vectors: Option<VectorService>,
    options: IngestOptions,
}

impl Ingestor {
    /// Creates an ingestor writing through `vectors`.
    pub fn new(vectors: VectorService, options: IngestOptions) -> Self {
        Self {
            vectors: Some(vectors),
            options,
        }
    }

    /// Creates an ingestor without an index; every run is a dry run.
    pub fn offline(options: IngestOptions) -> Self {
        Self {
            vectors: None,
            options: IngestOptions {
                dry_run: true,
                ..options
            },
        }
    }

    /// The index to write to, `None` on a dry run.
    fn index(&self) -> Option<&VectorService> {
        self.vectors.as_ref().filter(|_| !self.options.dry_run)
    }

    /// Returns the run options.
    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Runs the ingestion to completion.
    ///
    /// Counts are checked before any network call. The first failed upsert
    /// halts the run; earlier batches stay in the index.
    pub async fn run(
        &self,
        dataset: &Dataset,
        embeddings: &Embeddings,
    ) -> IngestResult<IngestReport> {
        if self.options.batch_size == 0 {
            return Err(IngestError::InvalidOptions(
                "batch size must be greater than 0".to_string(),
            ));
        }

        if embeddings.len() != dataset.len() {
            return Err(IngestError::CountMismatch {
                embeddings: embeddings.len(),
                rows: dataset.len(),
            });
        }

        tracing::info!(
            target: TRACING_TARGET,
            rows = dataset.len(),
            batch_size = self.options.batch_size,
            namespace = ?self.options.namespace,
            dry_run = self.options.dry_run,
            "Uploading in batches"
        );

        let mut report = IngestReport {
            rows: dataset.len(),
            ..IngestReport::default()
        };

        for (batch, rows) in dataset.rows().chunks(self.options.batch_size).enumerate() {
            let start = batch * self.options.batch_size;
            let records = build_records(rows, start, embeddings);
            report.batches += 1;
            report.upserted += self.upload_batch(batch, records).await?;
        }

        let Some(vectors) = self.index() else {
            tracing::info!(
                target: TRACING_TARGET,
                batches = report.batches,
                records = report.upserted,
                "Dry run complete"
            );
            return Ok(report);
        };

        tracing::info!(
            target: TRACING_TARGET,
            batches = report.batches,
            upserted = report.upserted,
            "Upsert complete"
        );

        let stats = vectors
            .describe_stats()
            .await
            .map_err(IngestError::Stats)?;

        tracing::info!(
            target: TRACING_TARGET,
            dimension = stats.dimension,
            total_vector_count = stats.total_vector_count,
            index_fullness = stats.index_fullness,
            namespaces = stats.namespaces.len(),
            "Index stats"
        );

        report.stats = Some(stats);
        Ok(report)
    }

    /// Upserts a single batch, skipping empty ones.
    pub async fn upload_batch(
        &self,
        batch: usize,
        records: Vec<VectorRecord>,
    ) -> IngestResult<usize> {
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            tracing::warn!(target: TRACING_TARGET, batch, "Skipped empty batch");
            return Ok(0);
        };

        tracing::info!(
            target: TRACING_TARGET,
            batch,
            count = records.len(),
            first_id = %first.id,
            last_id = %last.id,
            "Uploading batch"
        );

        let Some(vectors) = self.index() else {
            return Ok(records.len());
        };

        vectors
            .upsert(records, self.options.namespace.as_deref())
            .await
            .map_err(|source| IngestError::Upsert { batch, source })
    }
}

/// Pairs rows with the embeddings at the same dataset positions.
fn build_records(
    rows: &[DatasetRow],
    start: usize,
    embeddings: &Embeddings,
) -> Vec<VectorRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(offset, row)| {
            let values = embeddings.row(start + offset)?.to_vec();
            Some(VectorRecord::new(row.id.clone(), values).with_metadata(product_metadata(row)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use furnai_test::MockVectorIndex;
    use ndarray::Array2;

    use super::*;

    fn fixture(rows: usize) -> (Dataset, Embeddings) {
        let mut csv = String::from("title,price\n");
        for i in 0..rows {
            csv.push_str(&format!("Item {i},${i}.00\n"));
        }

        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let matrix = Array2::from_shape_fn((rows, 3), |(r, c)| (r * 3 + c) as f32);
        (dataset, Embeddings::from(matrix))
    }

    fn ingestor(index: &MockVectorIndex, options: IngestOptions) -> Ingestor {
        Ingestor::new(VectorService::new(index.clone()), options)
    }

    #[tokio::test]
    async fn uploads_every_row_once() {
        let (dataset, embeddings) = fixture(250);
        let index = MockVectorIndex::default().with_dimension(3);

        let report = ingestor(&index, IngestOptions::default())
            .run(&dataset, &embeddings)
            .await
            .unwrap();

        let upserts = index.upserts();
        let sizes: Vec<_> = upserts.iter().map(|u| u.records.len()).collect();
        assert_eq!(sizes, [100, 100, 50]);
        assert_eq!(report.batches, 3);
        assert_eq!(report.upserted, 250);

        let ids: HashSet<_> = upserts
            .iter()
            .flat_map(|u| u.records.iter().map(|r| r.id.clone()))
            .collect();
        assert_eq!(ids.len(), 250);

        let record = &upserts[2].records[0];
        assert_eq!(record.id, "200");
        assert_eq!(record.values, vec![600.0, 601.0, 602.0]);
        assert_eq!(record.metadata["title"], "Item 200");
        assert_eq!(record.metadata["price"], serde_json::json!(200.0));

        let stats = report.stats.unwrap();
        assert_eq!(stats.total_vector_count, 250);
    }

    #[tokio::test]
    async fn count_mismatch_aborts_before_upload() {
        let (dataset, _) = fixture(5);
        let (_, embeddings) = fixture(4);
        let index = MockVectorIndex::default();

        let error = ingestor(&index, IngestOptions::default())
            .run(&dataset, &embeddings)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            IngestError::CountMismatch { embeddings: 4, rows: 5 }
        ));
        assert!(error.is_precondition());
        assert!(index.upserts().is_empty());
    }

    #[tokio::test]
    async fn upsert_failure_halts_remaining_batches() {
        let (dataset, embeddings) = fixture(30);
        let index = MockVectorIndex::default().failing_upsert_at(1);
        let options = IngestOptions::builder().with_batch_size(10usize).build().unwrap();

        let error = ingestor(&index, options)
            .run(&dataset, &embeddings)
            .await
            .unwrap_err();

        assert!(matches!(error, IngestError::Upsert { batch: 1, .. }));
        assert_eq!(index.upserts().len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_is_skipped() {
        let index = MockVectorIndex::default();
        let upserted = ingestor(&index, IngestOptions::default())
            .upload_batch(0, Vec::new())
            .await
            .unwrap();

        assert_eq!(upserted, 0);
        assert!(index.upserts().is_empty());
    }

    #[tokio::test]
    async fn empty_dataset_uploads_nothing() {
        let (dataset, embeddings) = fixture(0);
        let index = MockVectorIndex::default();

        let report = ingestor(&index, IngestOptions::default())
            .run(&dataset, &embeddings)
            .await
            .unwrap();

        assert_eq!(report.batches, 0);
        assert!(index.upserts().is_empty());
    }

    #[tokio::test]
    async fn dry_run_skips_index() {
        let (dataset, embeddings) = fixture(12);
        let index = MockVectorIndex::default();
        let options = IngestOptions::builder()
            .with_batch_size(5usize)
            .with_dry_run(true)
            .build()
            .unwrap();

        let report = ingestor(&index, options)
            .run(&dataset, &embeddings)
            .await
            .unwrap();

        assert_eq!(report.batches, 3);
        assert_eq!(report.upserted, 12);
        assert!(report.stats.is_none());
        assert!(index.upserts().is_empty());
    }

    #[tokio::test]
    async fn offline_ingestor_is_a_dry_run() {
        let (dataset, embeddings) = fixture(7);
        let options = IngestOptions::builder()
            .with_batch_size(3usize)
            .build()
            .unwrap();

        let ingestor = Ingestor::offline(options);
        let report = ingestor.run(&dataset, &embeddings).await.unwrap();

        assert!(ingestor.options().dry_run);
        assert_eq!(report.batches, 3);
        assert_eq!(report.upserted, 7);
        assert!(report.stats.is_none());
    }

    #[tokio::test]
    async fn namespace_is_forwarded() {
        let (dataset, embeddings) = fixture(1);
        let index = MockVectorIndex::default();
        let options = IngestOptions::builder()
            .with_namespace("furniture")
            .build()
            .unwrap();

        ingestor(&index, options)
            .run(&dataset, &embeddings)
            .await
            .unwrap();

        assert_eq!(index.upserts()[0].namespace.as_deref(), Some("furniture"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(IngestOptions::builder().with_batch_size(0usize).build().is_err());
    }
}
