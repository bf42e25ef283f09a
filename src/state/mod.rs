//! State management module
//!
//! This module contains the timer state machine, settings and the shared
//! application state that owns them.

pub mod app_state;
pub mod settings;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, RunSignal};
pub use settings::{Background, MediaKind, Settings, StatusMessage};
pub use snapshot::{ClockSnapshot, DisplayView, PomodoroView};
pub use timer_state::{
    CountdownInput, Mode, PomodoroDurations, PomodoroPhase, TickOutcome, TimerState,
};
