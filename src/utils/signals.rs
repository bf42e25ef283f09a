//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{info, warn};

/// Wait for SIGTERM or SIGINT, falling back to Ctrl-C if signal hooks are unavailable
pub async fn shutdown_signal() {
    let signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]);

    match signals {
        Ok(mut signals) => {
            if let Some(signal) = signals.next().await {
                info!("Received signal: {}", signal);
            }
        }
        Err(e) => {
            warn!("Failed to register signal handlers: {}, waiting for Ctrl-C", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                futures::future::pending::<()>().await;
            }
        }
    }
}
