//! Accept loop.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::ServerContext;
use crate::error::Result;
use crate::server::connection::handle_connection;

/// Accepts and serves connections one at a time until `shutdown` resolves.
///
/// Each connection is fully handled and closed before the next accept, so at
/// most one request is in flight. A failed accept or a broken connection is
/// logged and the loop moves on; `shutdown` is only observed between
/// connections.
pub async fn serve<F>(
    listener: TcpListener,
    ctx: &mut ServerContext,
    max_request_size: usize,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let (mut stream, peer) = tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("accept: {}", e);
                    continue;
                }
            },
        };

        info!("Got connection from {}", peer);

        if let Err(e) = handle_connection(&mut stream, ctx, max_request_size).await {
            warn!(peer = %peer, "Connection abandoned: {}", e);
        }
    }

    Ok(())
}
