//! Terminal renderer background task

use std::{io::Write, sync::Arc};
use tracing::{info, warn};

use crate::{
    display::{render, RenderFormat},
    state::AppState,
};

/// Background task that prints the clock every time it changes
pub async fn renderer_task(state: Arc<AppState>, format: RenderFormat) {
    info!("Starting terminal renderer ({:?})", format);

    let mut snapshot_rx = state.snapshot_tx.subscribe();
    let mut last_line = String::new();

    loop {
        let line = {
            let snapshot = snapshot_rx.borrow_and_update();
            render(&snapshot, format)
        };

        match line {
            Ok(line) if line != last_line => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
                    warn!("Failed to write clock to terminal: {}", e);
                }
                last_line = line;
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to render clock: {}", e),
        }

        if snapshot_rx.changed().await.is_err() {
            info!("Snapshot channel closed, stopping renderer");
            return;
        }
    }
}
