//! Static Cache Server - A minimal sequential static-content server
//!
//! Serves documents from disk through a bounded in-memory LRU content cache.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use static_cache_server::{serve, Config, ServerContext};

/// Main entry point for the static content server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Build the fixed configuration
/// 3. Create the server context with an empty content cache
/// 4. Bind the listening socket
/// 5. Serve connections one at a time until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_cache_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting static content server");

    let config = Config::default();
    info!(
        "Configuration: port={}, server_files={}, server_root={}, cache_capacity={}",
        config.server_port,
        config.server_files.display(),
        config.server_root.display(),
        config.cache_capacity
    );

    let mut ctx = ServerContext::from_config(&config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("fatal error getting listening socket on {}", addr))?;
    info!("Waiting for connections on port {}...", config.server_port);

    serve(listener, &mut ctx, config.max_request_size, shutdown_signal()).await?;

    let stats = ctx.cache.stats();
    info!(
        "Server shutdown complete, cache stats: {}",
        serde_json::to_string(&stats)?
    );
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
