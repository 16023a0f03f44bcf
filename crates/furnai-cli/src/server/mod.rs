//! HTTP server: bind, serve, and drain open connections on shutdown.

mod error;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
pub use crate::server::error::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until SIGTERM or Ctrl+C.
///
/// Once signalled, open connections get the configured shutdown timeout to
/// finish before they are dropped. Failures are logged with a hint.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    let result = run(app, &config).await;

    if let Err(err) = &result {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %err,
            "Server stopped with an error"
        );

        if let Some(hint) = err.hint() {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                hint,
                "Recovery suggestion"
            );
        }
    }

    result
}

async fn run(app: Router, config: &ServerConfig) -> ServerResult<()> {
    config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    let addr = config.server_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Recommendation API is reachable on every interface"
        );
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %addr,
        "Server is ready and listening for connections"
    );

    let started_at = Instant::now();
    serve_until(listener, app, shutdown_signal(), config.shutdown_timeout())
        .await
        .map_err(ServerError::Runtime)?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        uptime_secs = started_at.elapsed().as_secs(),
        "Shutdown completed"
    );

    Ok(())
}

/// Serves until `signal` resolves, then waits at most `drain` for open
/// connections.
async fn serve_until<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    drain: Duration,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        signal.await;
        let _ = signalled_tx.send(());
    };

    let server = async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    };

    let deadline = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(drain).await,
            Err(_) => std::future::pending().await,
        }
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = drain.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
            Ok(())
        }
    }
}

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "Failed to listen for Ctrl+C"
                );
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %err,
                    "Failed to listen for SIGTERM"
                );
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = received,
        "Shutdown signal received, draining connections"
    );
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    use super::*;

    async fn local_listener() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    #[tokio::test]
    async fn stops_when_idle() {
        let (listener, _) = local_listener().await;
        let app = Router::new().route("/", get(|| async { "ok" }));

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve_until(listener, app, async {}, Duration::from_secs(30)),
        )
        .await;

        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn drops_requests_past_the_drain_timeout() {
        let (listener, addr) = local_listener().await;
        let app = Router::new().route("/slow", get(std::future::pending::<&'static str>));
        let (signal_tx, signal_rx) = oneshot::channel::<()>();
        let signal = async move {
            let _ = signal_rx.await;
        };

        let server = tokio::spawn(serve_until(
            listener,
            app,
            signal,
            Duration::from_millis(200),
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        signal_tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("drain deadline not honoured")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_config_is_reported_before_binding() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };

        let error = serve(Router::new(), config).await.unwrap_err();
        assert!(matches!(error, ServerError::InvalidConfig(_)));
    }
}
