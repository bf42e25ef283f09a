//! Flipclock - A flip-clock pomodoro, countdown and stopwatch timer
//!
//! This library provides the timer state machine, the one-second tick engine,
//! the flip-clock display formatter and an HTTP API for the clock's controls.

pub mod api;
pub mod config;
pub mod display;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, Mode, TimerState};
pub use utils::signals::shutdown_signal;
