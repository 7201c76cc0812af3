//! Ingestion HTTP server.

use std::net::SocketAddr;

use clipmint_telemetry::{log_listening, log_shutdown};
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::create_router;

/// Default request body limit (512 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 512 * 1024 * 1024;

/// Server configuration.
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub max_body_size: usize,
}

/// Run the ingestion server until Ctrl-C or SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(config.max_body_size);

    let listener = TcpListener::bind(config.listen_addr).await?;
    log_listening!(
        addr = %config.listen_addr,
        max_body_size = config.max_body_size,
        "ingestion server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_shutdown!("ingestion server stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
