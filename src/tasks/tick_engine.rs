//! One-second tick engine background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

use crate::{
    services::play_notification,
    state::{AppState, TickOutcome},
};

/// Tick period of the clock
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it runs
pub async fn tick_engine_task(state: Arc<AppState>) {
    info!("Starting tick engine");

    let mut run_rx = state.run_signal_tx.subscribe();

    loop {
        let signal = *run_rx.borrow_and_update();

        if !signal.running {
            // Wait for the timer to be started
            if run_rx.changed().await.is_err() {
                warn!("Run signal channel closed, stopping tick engine");
                return;
            }
            continue;
        }

        debug!("Tick source created (generation {})", signal.generation);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok((outcome, snapshot)) => {
                            debug!("Tick: {} remaining", snapshot.display.text);
                            if outcome.is_completion() {
                                notify_completion(&state, outcome);
                            }
                        }
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                        }
                    }
                }

                changed = run_rx.changed() => {
                    if changed.is_err() {
                        warn!("Run signal channel closed, stopping tick engine");
                        return;
                    }
                    let next = *run_rx.borrow();
                    if !next.running || next.generation != signal.generation {
                        // Stopped, paused or restarted: drop this interval
                        debug!("Tick source cleared (generation {})", signal.generation);
                        break;
                    }
                }
            }
        }
    }
}

/// Play the completion sound without holding up the next tick
fn notify_completion(state: &Arc<AppState>, outcome: TickOutcome) {
    if !state.sound_enabled() {
        debug!("Sound disabled, skipping notification for {:?}", outcome);
        return;
    }

    let sound_command = state.sound_command.clone();
    tokio::spawn(async move {
        if let Err(e) = play_notification(&sound_command).await {
            warn!("Failed to play notification: {}", e);
        }
    });
}
