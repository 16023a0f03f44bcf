//! `furnai ingest`: loads local files and uploads them in batches.

use anyhow::Context;
use furnai_ingest::{Dataset, Embeddings, IngestError, IngestOptions, IngestReport, Ingestor};

use crate::TRACING_TARGET_INGEST;
use crate::config::{IngestArgs, create_vector_service};

/// Builds the run options from CLI arguments.
fn options(args: &IngestArgs) -> anyhow::Result<IngestOptions> {
    let batch_size = usize::try_from(args.batch_size).context("batch size is too large")?;

    let mut builder = IngestOptions::builder()
        .with_batch_size(batch_size)
        .with_dry_run(args.dry_run);
    if let Some(namespace) = args
        .pinecone
        .pinecone_namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
    {
        builder = builder.with_namespace(namespace);
    }

    builder.build().context("invalid ingestion options")
}

/// Runs an ingestion described by `args`.
///
/// Both files are loaded before the index is contacted, so missing or
/// mismatched inputs fail without any network call. A dry run never
/// contacts the index.
pub async fn run(args: &IngestArgs) -> anyhow::Result<IngestReport> {
    args.http
        .validate()
        .context("invalid HTTP client configuration")?;
    let options = options(args)?;

    let embeddings = Embeddings::from_path(&args.embeddings)?;
    let dataset = Dataset::from_path(&args.dataset)?;

    tracing::info!(
        target: TRACING_TARGET_INGEST,
        embeddings = embeddings.len(),
        dimension = embeddings.dimension(),
        rows = dataset.len(),
        "Inputs loaded"
    );

    if embeddings.len() != dataset.len() {
        return Err(IngestError::CountMismatch {
            embeddings: embeddings.len(),
            rows: dataset.len(),
        }
        .into());
    }

    let ingestor = if options.dry_run {
        Ingestor::offline(options)
    } else {
        let vectors = create_vector_service(&args.pinecone, &args.http).await?;
        Ingestor::new(vectors, options)
    };

    let report = ingestor.run(&dataset, &embeddings).await?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use ndarray::Array2;
    use ndarray_npy::write_npy;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{HttpArgs, PineconeArgs};

    const CSV: &str = "\
title,description,price,id
Oak chair,Solid oak,$120.00,p-1
Walnut desk,Wide desk,N/A,p-2
Linen sofa,Three seats,\"$1,234.50\",p-3
";

    fn write_inputs(dir: &Path, rows: usize) -> anyhow::Result<()> {
        write_npy(dir.join("emb.npy"), &Array2::<f32>::zeros((rows, 4)))?;
        let mut file = std::fs::File::create(dir.join("data.csv"))?;
        file.write_all(CSV.as_bytes())?;
        Ok(())
    }

    fn args(dir: &Path, dry_run: bool) -> IngestArgs {
        IngestArgs {
            pinecone: PineconeArgs {
                pinecone_api_key: "pc_test".into(),
                pinecone_index: "products".into(),
                pinecone_namespace: Some("catalog".into()),
                pinecone_index_host: Some("products-abc.svc.pinecone.io".into()),
                pinecone_control_url: "https://api.pinecone.io".into(),
            },
            http: HttpArgs { http_timeout: 5 },
            embeddings: dir.join("emb.npy"),
            dataset: dir.join("data.csv"),
            batch_size: 2,
            dry_run,
        }
    }

    #[tokio::test]
    async fn dry_run_builds_batches() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path(), 3)?;

        let report = run(&args(dir.path(), true)).await?;
        assert_eq!(report.rows, 3);
        assert_eq!(report.batches, 2);
        assert!(report.stats.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dry_run_skips_host_lookup() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path(), 3)?;

        let mut args = args(dir.path(), true);
        args.pinecone.pinecone_index_host = None;
        args.pinecone.pinecone_control_url = "http://127.0.0.1:9".into();

        let report = run(&args).await?;
        assert_eq!(report.upserted, 3);
        Ok(())
    }

    #[tokio::test]
    async fn count_mismatch_fails_before_upload() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path(), 2)?;

        let error = run(&args(dir.path(), false)).await.unwrap_err();
        let error = error.downcast::<IngestError>()?;
        assert!(matches!(
            error,
            IngestError::CountMismatch {
                embeddings: 2,
                rows: 3
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(run(&args(dir.path(), true)).await.is_err());
    }

    #[test]
    fn options_follow_arguments() {
        let dir = TempDir::new().unwrap();
        let options = options(&args(dir.path(), true)).unwrap();

        assert_eq!(options.batch_size, 2);
        assert_eq!(options.namespace.as_deref(), Some("catalog"));
        assert!(options.dry_run);
    }
}
