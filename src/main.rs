//! Flipclock - A flip-clock pomodoro, countdown and stopwatch timer
//!
//! This is the main entry point for the flipclock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use flipclock::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{renderer_task, tick_engine_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("flipclock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting flipclock v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, mode={}, work={}min, short_break={}min, long_break={}min, sessions={}",
        config.host,
        config.port,
        config.mode,
        config.work,
        config.short_break,
        config.long_break,
        config.sessions
    );

    // Create application state
    let state = Arc::new(AppState::from_config(&config));

    // Start the tick engine background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_engine_task(tick_state).await;
    });

    if let Some(format) = config.render {
        let render_state = Arc::clone(&state);
        tokio::spawn(async move {
            renderer_task(render_state, format).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /mode/:mode      - Switch mode (pomodoro, countdown, stopwatch)");
    info!("  POST   /timer/toggle    - Start or pause");
    info!("  POST   /timer/start     - Start or resume");
    info!("  POST   /timer/pause     - Pause");
    info!("  POST   /timer/reset     - Reset the current mode");
    info!("  PUT    /countdown       - Set countdown hours/minutes/seconds");
    info!("  PUT    /pomodoro        - Set pomodoro durations");
    info!("  PUT    /settings/flip   - Toggle flip animation");
    info!("  PUT    /settings/sound  - Toggle completion sound");
    info!("  PUT    /settings/font   - Change font");
    info!("  PUT    /settings/theme  - Change theme");
    info!("  POST   /background      - Upload background image or video");
    info!("  GET    /background      - Fetch background media");
    info!("  DELETE /background      - Clear background");
    info!("  GET    /display         - Current digits");
    info!("  GET    /status          - Full clock status");
    info!("  GET    /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
