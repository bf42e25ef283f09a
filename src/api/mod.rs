//! HTTP API module
//!
//! Each user control of the clock maps to one endpoint handler.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Largest accepted background upload
pub const MAX_BACKGROUND_BYTES: usize = 64 * 1024 * 1024;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mode/:mode", post(mode_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/countdown", put(countdown_handler))
        .route("/pomodoro", put(pomodoro_settings_handler))
        .route("/settings/flip", put(flip_handler))
        .route("/settings/sound", put(sound_handler))
        .route("/settings/font", put(font_handler))
        .route("/settings/theme", put(theme_handler))
        .route(
            "/background",
            post(upload_background_handler)
                .get(get_background_handler)
                .delete(clear_background_handler)
                .layer(DefaultBodyLimit::max(MAX_BACKGROUND_BYTES)),
        )
        .route("/display", get(display_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
