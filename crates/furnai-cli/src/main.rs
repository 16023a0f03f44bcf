#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod ingest;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use furnai_server::handler::routes;
use furnai_server::middleware::{RouterCorsExt, RouterObservabilityExt, RouterRecoveryExt};
use furnai_server::service::ServiceState;

use crate::config::{Cli, Command, IngestArgs, MiddlewareConfig, ServeArgs};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "furnai_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "furnai_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "furnai_cli::config";
pub const TRACING_TARGET_INGEST: &str = "furnai_cli::ingest";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();
    cli.log();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Ingest(args) => ingest(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    args.validate()?;

    let embedding = config::create_embedding_service(&args.huggingface, &args.http)
        .context("failed to create embedding service")?;
    let vectors = config::create_vector_service(&args.pinecone, &args.http)
        .await
        .context("failed to create vector service")?;

    let state = ServiceState::new(embedding, vectors, args.pinecone.pinecone_namespace.clone());
    let router = create_router(state, &args.middleware);

    server::serve(router, args.server).await?;
    Ok(())
}

async fn ingest(args: IngestArgs) -> anyhow::Result<()> {
    let report = ingest::run(&args).await?;

    tracing::info!(
        target: TRACING_TARGET_INGEST,
        rows = report.rows,
        batches = report.batches,
        upserted = report.upserted,
        dry_run = args.dry_run,
        "Ingestion finished"
    );

    let summary = serde_json::to_string_pretty(&report).context("failed to render report")?;
    println!("{summary}");
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. CORS
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_cors(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
