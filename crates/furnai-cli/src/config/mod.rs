//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── serve: ServeArgs
//! │   ├── server: ServerConfig          # Host, port, shutdown
//! │   ├── middleware: MiddlewareConfig  # CORS, request timeout
//! │   ├── huggingface: HuggingFaceArgs  # Embedding provider
//! │   ├── pinecone: PineconeArgs        # Vector index
//! │   └── http: HttpArgs                # Outbound client timeout
//! └── ingest: IngestArgs
//!     ├── pinecone: PineconeArgs
//!     ├── http: HttpArgs
//!     └── embeddings, dataset, batch size, dry run
//! ```
//!
//! Every option can be provided as a flag or an environment variable.

mod ingest;
mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
pub use ingest::IngestArgs;
pub use middleware::MiddlewareConfig;
pub use provider::{
    HttpArgs, HuggingFaceArgs, PineconeArgs, create_embedding_service, create_vector_service,
};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "furnai")]
#[command(about = "Furniture recommendation API and index ingestion")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the recommendation HTTP API.
    Serve(ServeArgs),
    /// Upload product embeddings and metadata to the vector index.
    Ingest(IngestArgs),
}

/// Options of `furnai serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Embedding provider configuration.
    #[clap(flatten)]
    pub huggingface: HuggingFaceArgs,

    /// Vector index configuration.
    #[clap(flatten)]
    pub pinecone: PineconeArgs,

    /// Outbound HTTP client configuration.
    #[clap(flatten)]
    pub http: HttpArgs,
}

impl ServeArgs {
    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.http
            .validate()
            .context("invalid HTTP client configuration")?;
        Ok(())
    }
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so clap's `env` fallbacks can see it.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs configuration (no secrets).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        match &self.command {
            Command::Serve(args) => {
                args.server.log();
                args.middleware.log();
                args.huggingface.log();
                args.pinecone.log();
            }
            Command::Ingest(args) => {
                args.pinecone.log();
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    embeddings = %args.embeddings.display(),
                    dataset = %args.dataset.display(),
                    batch_size = args.batch_size,
                    dry_run = args.dry_run,
                    "Ingestion configuration"
                );
            }
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const KEYS: [&str; 6] = [
        "--hf-api-key",
        "hf_test",
        "--pinecone-api-key",
        "pc_test",
        "--pinecone-index",
        "products",
    ];

    #[test]
    fn parses_serve_with_defaults() {
        let cli = Cli::try_parse_from(["furnai", "serve"].into_iter().chain(KEYS)).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };

        assert_eq!(args.server.port, 8000);
        assert_eq!(args.middleware.recovery.request_timeout, 30);
        assert_eq!(args.huggingface.hf_model, "sentence-transformers/all-MiniLM-L6-v2");
        assert_eq!(args.pinecone.pinecone_index, "products");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn parses_ingest_with_defaults() {
        let cli = Cli::try_parse_from([
            "furnai",
            "ingest",
            "--pinecone-api-key",
            "pc_test",
            "--pinecone-index",
            "products",
        ])
        .unwrap();
        let Command::Ingest(args) = cli.command else {
            panic!("expected ingest");
        };

        assert_eq!(args.embeddings, Path::new("product_embeddings.npy"));
        assert_eq!(args.dataset, Path::new("dataset_with_ids.csv"));
        assert_eq!(args.batch_size, 100);
        assert!(!args.dry_run);
    }

    #[test]
    fn rejects_zero_batch_size() {
        let result = Cli::try_parse_from([
            "furnai",
            "ingest",
            "--pinecone-api-key",
            "pc_test",
            "--pinecone-index",
            "products",
            "--batch-size",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_out_of_range_request_timeout() {
        let args = ["furnai", "serve", "--request-timeout", "301"];
        assert!(Cli::try_parse_from(args.into_iter().chain(KEYS)).is_err());
    }
}
