//! Expiry of transient status messages

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::state::AppState;

/// How long upload confirmations stay visible
pub const UPLOAD_STATUS_TTL: Duration = Duration::from_secs(3);
/// How long the "cleared" confirmation stays visible
pub const CLEAR_STATUS_TTL: Duration = Duration::from_secs(2);

/// Clear status message `seq` after `ttl` unless a newer message replaced it
pub fn schedule_status_expiry(state: Arc<AppState>, seq: u64, ttl: Duration) {
    tokio::spawn(async move {
        sleep(ttl).await;
        match state.expire_status(seq) {
            Ok(true) => debug!("Status message {} expired", seq),
            Ok(false) => debug!("Status message {} already replaced", seq),
            Err(e) => warn!("Failed to expire status message: {}", e),
        }
    });
}
