//! Timer state machine: modes, pomodoro phases and the one-second tick

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Active timer mode (the mode buttons)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Pomodoro,
    Countdown,
    Stopwatch,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "pomodoro",
            Mode::Countdown => "countdown",
            Mode::Stopwatch => "stopwatch",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pomodoro" => Ok(Mode::Pomodoro),
            "countdown" => Ok(Mode::Countdown),
            "stopwatch" => Ok(Mode::Stopwatch),
            other => Err(format!("unknown timer mode: {}", other)),
        }
    }
}

/// Phase of the pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroPhase {
    Work,
    ShortBreak,
    LongBreak,
}

impl PomodoroPhase {
    /// Human readable phase name shown above the clock
    pub fn display_name(&self) -> &'static str {
        match self {
            PomodoroPhase::Work => "Work Session",
            PomodoroPhase::ShortBreak => "Short Break",
            PomodoroPhase::LongBreak => "Long Break",
        }
    }
}

/// Configurable pomodoro durations, all in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroDurations {
    pub work: u64,
    pub short_break: u64,
    pub long_break: u64,
    pub sessions_until_long_break: u32,
}

impl PomodoroDurations {
    /// Build durations from minute values, keeping at least one session per cycle
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64, sessions: u32) -> Self {
        Self {
            work: work.saturating_mul(60),
            short_break: short_break.saturating_mul(60),
            long_break: long_break.saturating_mul(60),
            sessions_until_long_break: sessions.max(1),
        }
    }

    pub fn for_phase(&self, phase: PomodoroPhase) -> u64 {
        match phase {
            PomodoroPhase::Work => self.work,
            PomodoroPhase::ShortBreak => self.short_break,
            PomodoroPhase::LongBreak => self.long_break,
        }
    }
}

impl Default for PomodoroDurations {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15, 4)
    }
}

/// Hours/minutes/seconds typed into the countdown inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownInput {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownInput {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Idle,
    /// Time advanced by one second
    Counted,
    /// Countdown reached zero and stopped
    CountdownFinished,
    /// Pomodoro phase ended and the next one started
    PhaseChanged {
        from: PomodoroPhase,
        to: PomodoroPhase,
    },
}

impl TickOutcome {
    /// Whether this tick completed a timer (and should play the notification)
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            TickOutcome::CountdownFinished | TickOutcome::PhaseChanged { .. }
        )
    }
}

/// Complete timer state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub is_running: bool,
    pub is_paused: bool,
    /// Seconds shown on the clock; mirrors `elapsed_time` in stopwatch mode
    pub time_remaining: u64,
    pub elapsed_time: u64,
    pub pomodoro_phase: PomodoroPhase,
    pub current_session: u32,
    pub total_sessions: u32,
    pub durations: PomodoroDurations,
    pub countdown_input: CountdownInput,
}

impl TimerState {
    /// Create a stopped timer initialized for `mode`
    pub fn new(mode: Mode, durations: PomodoroDurations, countdown_input: CountdownInput) -> Self {
        let mut state = Self {
            mode,
            is_running: false,
            is_paused: false,
            time_remaining: 0,
            elapsed_time: 0,
            pomodoro_phase: PomodoroPhase::Work,
            current_session: 1,
            total_sessions: 0,
            durations: PomodoroDurations {
                sessions_until_long_break: durations.sessions_until_long_break.max(1),
                ..durations
            },
            countdown_input,
        };
        state.initialize_mode();
        state
    }

    pub fn is_stopped(&self) -> bool {
        !self.is_running && !self.is_paused
    }

    /// Switch to another mode, stopping the active timer first
    pub fn switch_mode(&mut self, mode: Mode) {
        if self.is_running {
            self.stop();
        }
        self.mode = mode;
        self.is_paused = false;
        self.initialize_mode();
    }

    /// Start/pause button: pause when running, otherwise start or resume
    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        if self.mode == Mode::Countdown && !self.is_paused {
            self.initialize_countdown();
        }
        self.is_running = true;
        self.is_paused = false;
    }

    pub fn pause(&mut self) {
        if !self.is_running {
            return;
        }
        self.is_running = false;
        self.is_paused = true;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
        self.is_paused = false;
    }

    /// Stop and return the current mode to its initial state
    pub fn reset(&mut self) {
        self.stop();
        self.initialize_mode();
    }

    /// Store new countdown inputs; a stopped countdown shows them immediately
    pub fn set_countdown_input(&mut self, input: CountdownInput) {
        self.countdown_input = input;
        if self.mode == Mode::Countdown && self.is_stopped() {
            self.initialize_countdown();
        }
    }

    /// Store new pomodoro durations; restarts the cycle unless it is running
    pub fn update_durations(&mut self, durations: PomodoroDurations) {
        self.durations = PomodoroDurations {
            sessions_until_long_break: durations.sessions_until_long_break.max(1),
            ..durations
        };
        if self.mode == Mode::Pomodoro && !self.is_running {
            self.initialize_pomodoro();
        }
    }

    /// Advance the timer by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        match self.mode {
            Mode::Stopwatch => {
                self.elapsed_time = self.elapsed_time.saturating_add(1);
                self.time_remaining = self.elapsed_time;
                TickOutcome::Counted
            }
            Mode::Countdown | Mode::Pomodoro => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.complete()
                } else {
                    TickOutcome::Counted
                }
            }
        }
    }

    /// Duration of the current pomodoro phase in seconds
    pub fn phase_duration(&self) -> u64 {
        self.durations.for_phase(self.pomodoro_phase)
    }

    /// Fraction of the current pomodoro phase already spent, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration();
        if total == 0 {
            return 1.0;
        }
        let spent = total.saturating_sub(self.time_remaining);
        (spent as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn session_label(&self) -> String {
        format!(
            "Session {} of {}",
            self.current_session, self.durations.sessions_until_long_break
        )
    }

    fn complete(&mut self) -> TickOutcome {
        match self.mode {
            Mode::Pomodoro => {
                let from = self.pomodoro_phase;
                self.advance_phase();
                // The next phase starts on its own
                self.is_running = true;
                self.is_paused = false;
                TickOutcome::PhaseChanged {
                    from,
                    to: self.pomodoro_phase,
                }
            }
            _ => {
                self.stop();
                self.time_remaining = 0;
                TickOutcome::CountdownFinished
            }
        }
    }

    fn advance_phase(&mut self) {
        let cycle = self.durations.sessions_until_long_break.max(1);
        match self.pomodoro_phase {
            PomodoroPhase::Work => {
                self.total_sessions = self.total_sessions.saturating_add(1);
                self.pomodoro_phase = if self.total_sessions % cycle == 0 {
                    PomodoroPhase::LongBreak
                } else {
                    PomodoroPhase::ShortBreak
                };
            }
            PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => {
                self.pomodoro_phase = PomodoroPhase::Work;
                self.current_session = self.total_sessions % cycle + 1;
            }
        }
        self.time_remaining = self.phase_duration();
    }

    fn initialize_mode(&mut self) {
        match self.mode {
            Mode::Pomodoro => self.initialize_pomodoro(),
            Mode::Countdown => self.initialize_countdown(),
            Mode::Stopwatch => self.initialize_stopwatch(),
        }
    }

    fn initialize_pomodoro(&mut self) {
        self.pomodoro_phase = PomodoroPhase::Work;
        self.current_session = 1;
        self.total_sessions = 0;
        self.time_remaining = self.durations.work;
    }

    fn initialize_countdown(&mut self) {
        self.time_remaining = self.countdown_input.total_seconds();
    }

    fn initialize_stopwatch(&mut self) {
        self.time_remaining = 0;
        self.elapsed_time = 0;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(
            Mode::default(),
            PomodoroDurations::default(),
            CountdownInput::default(),
        )
    }
}
