//! Serializable views of the clock published to clients and renderers

use serde::{Deserialize, Serialize};

use super::timer_state::{Mode, PomodoroPhase, TimerState};
use crate::display::{format_hms, DigitBoard, FlipDigit, FLIP_DURATION_MS};

/// Digits as the flip-clock face should show them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayView {
    pub seconds: u64,
    pub text: String,
    pub digits: Vec<FlipDigit>,
    pub flip_duration_ms: u64,
}

impl DisplayView {
    pub fn new(seconds: u64, board: &DigitBoard) -> Self {
        Self {
            seconds,
            text: format_hms(seconds),
            digits: board.digits(),
            flip_duration_ms: FLIP_DURATION_MS,
        }
    }
}

/// Pomodoro status line and progress bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroView {
    pub phase: PomodoroPhase,
    pub phase_name: String,
    pub current_session: u32,
    pub total_sessions: u32,
    pub sessions_until_long_break: u32,
    pub session_label: String,
    pub phase_duration: u64,
    pub progress: f64,
}

impl PomodoroView {
    pub fn from_timer(timer: &TimerState) -> Self {
        Self {
            phase: timer.pomodoro_phase,
            phase_name: timer.pomodoro_phase.display_name().to_string(),
            current_session: timer.current_session,
            total_sessions: timer.total_sessions,
            sessions_until_long_break: timer.durations.sessions_until_long_break,
            session_label: timer.session_label(),
            phase_duration: timer.phase_duration(),
            progress: timer.progress(),
        }
    }
}

/// Everything a client needs to draw the clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub mode: Mode,
    pub is_running: bool,
    pub is_paused: bool,
    pub time_remaining: u64,
    pub elapsed_time: u64,
    pub display: DisplayView,
    /// Present only in pomodoro mode
    pub pomodoro: Option<PomodoroView>,
}

impl ClockSnapshot {
    pub fn capture(timer: &TimerState, board: &DigitBoard) -> Self {
        Self {
            mode: timer.mode,
            is_running: timer.is_running,
            is_paused: timer.is_paused,
            time_remaining: timer.time_remaining,
            elapsed_time: timer.elapsed_time,
            display: DisplayView::new(timer.time_remaining, board),
            pomodoro: (timer.mode == Mode::Pomodoro).then(|| PomodoroView::from_timer(timer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CountdownInput, PomodoroDurations};

    #[test]
    fn test_capture_pomodoro() {
        let timer = TimerState::default();
        let board = DigitBoard::new(timer.time_remaining);
        let snapshot = ClockSnapshot::capture(&timer, &board);

        assert_eq!(snapshot.display.text, "00:25:00");
        assert_eq!(snapshot.display.digits.len(), 6);
        let pomodoro = snapshot.pomodoro.expect("pomodoro view");
        assert_eq!(pomodoro.phase_name, "Work Session");
        assert_eq!(pomodoro.session_label, "Session 1 of 4");
        assert_eq!(pomodoro.phase_duration, 1500);
        assert_eq!(pomodoro.progress, 0.0);
    }

    #[test]
    fn test_capture_countdown_omits_pomodoro() {
        let timer = TimerState::new(
            Mode::Countdown,
            PomodoroDurations::default(),
            CountdownInput::new(1, 2, 3),
        );
        let board = DigitBoard::new(timer.time_remaining);
        let snapshot = ClockSnapshot::capture(&timer, &board);

        assert!(snapshot.pomodoro.is_none());
        assert_eq!(snapshot.time_remaining, 3723);
        assert_eq!(snapshot.display.text, "01:02:03");
    }

    #[test]
    fn test_phase_serializes_camel_case() {
        let json = serde_json::to_value(PomodoroPhase::ShortBreak).unwrap();
        assert_eq!(json, "shortBreak");
    }
}
