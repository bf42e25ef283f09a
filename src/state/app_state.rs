//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    ClockSnapshot, CountdownInput, MediaKind, Mode, PomodoroDurations, Settings, TickOutcome,
    TimerState,
};
use crate::{config::Config, display::DigitBoard};

/// Tells the tick engine whether a tick source should exist.
/// `generation` changes on every start so a restart always gets a fresh interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSignal {
    pub running: bool,
    pub generation: u64,
}

/// Main application state that owns the timer, the clock face and settings
#[derive(Debug)]
pub struct AppState {
    /// Timer state machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Digits last drawn, for flip tracking
    pub digit_board: Arc<Mutex<DigitBoard>>,
    /// Cosmetic settings
    pub settings: Arc<Mutex<Settings>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Command used to play the completion sound
    pub sound_command: Vec<String>,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel driving the tick engine
    pub run_signal_tx: watch::Sender<RunSignal>,
    /// Channel for clock updates
    pub snapshot_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receivers alive to prevent channel closure
    pub _run_signal_rx: watch::Receiver<RunSignal>,
    pub _snapshot_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    /// Create a new AppState around an initial timer and settings
    pub fn new(
        port: u16,
        host: String,
        timer: TimerState,
        settings: Settings,
        sound_command: Vec<String>,
    ) -> Self {
        let board = DigitBoard::new(timer.time_remaining);
        let (snapshot_tx, snapshot_rx) = watch::channel(ClockSnapshot::capture(&timer, &board));
        let (run_signal_tx, run_signal_rx) = watch::channel(RunSignal {
            running: timer.is_running,
            generation: 0,
        });

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            digit_board: Arc::new(Mutex::new(board)),
            settings: Arc::new(Mutex::new(settings)),
            start_time: Instant::now(),
            port,
            host,
            sound_command,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            run_signal_tx,
            snapshot_tx,
            _run_signal_rx: run_signal_rx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Create the AppState described by the command line
    pub fn from_config(config: &Config) -> Self {
        let timer = TimerState::new(config.mode, config.durations(), config.countdown_input());
        Self::new(
            config.port,
            config.host.clone(),
            timer,
            config.settings(),
            config.sound_command.clone(),
        )
    }

    /// Apply a user action to the timer and publish the result
    pub fn update_timer<F>(&self, action: &str, updater: F) -> Result<ClockSnapshot, String>
    where
        F: FnOnce(&mut TimerState),
    {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let was_running = timer.is_running;
        updater(&mut *timer);

        // Signal and publish under the timer lock so they land in state order
        self.record_action(action);
        self.signal_run_state(timer.is_running, !was_running && timer.is_running);
        self.publish(&timer)
    }

    /// Switch mode; a running timer is stopped first
    pub fn switch_mode(&self, mode: Mode) -> Result<ClockSnapshot, String> {
        info!("Switching mode to: {}", mode);
        self.update_timer(&format!("mode-{}", mode), |timer| timer.switch_mode(mode))
    }

    /// Start/pause button
    pub fn toggle(&self) -> Result<ClockSnapshot, String> {
        self.update_timer("toggle", |timer| timer.toggle())
    }

    pub fn start(&self) -> Result<ClockSnapshot, String> {
        self.update_timer("start", |timer| timer.start())
    }

    pub fn pause(&self) -> Result<ClockSnapshot, String> {
        self.update_timer("pause", |timer| timer.pause())
    }

    pub fn reset(&self) -> Result<ClockSnapshot, String> {
        self.update_timer("reset", |timer| timer.reset())
    }

    pub fn set_countdown_input(&self, input: CountdownInput) -> Result<ClockSnapshot, String> {
        info!(
            "Setting countdown input to {}h {}m {}s",
            input.hours, input.minutes, input.seconds
        );
        self.update_timer("countdown-input", |timer| timer.set_countdown_input(input))
    }

    /// Replace pomodoro durations. `edit` receives the current durations.
    pub fn update_durations<F>(&self, edit: F) -> Result<ClockSnapshot, String>
    where
        F: FnOnce(&mut PomodoroDurations),
    {
        self.update_timer("pomodoro-settings", |timer| {
            let mut durations = timer.durations;
            edit(&mut durations);
            info!(
                "Pomodoro durations: work={}s short={}s long={}s sessions={}",
                durations.work,
                durations.short_break,
                durations.long_break,
                durations.sessions_until_long_break
            );
            timer.update_durations(durations);
        })
    }

    /// Advance the timer by one second (called by the tick engine)
    pub fn tick(&self) -> Result<(TickOutcome, ClockSnapshot), String> {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = timer.tick();
        if outcome == TickOutcome::Idle {
            drop(timer);
            return Ok((outcome, self.get_snapshot()?));
        }

        match outcome {
            TickOutcome::CountdownFinished => info!("Countdown finished"),
            TickOutcome::PhaseChanged { from, to } => info!(
                "Pomodoro phase complete: {} -> {} ({})",
                from.display_name(),
                to.display_name(),
                timer.session_label()
            ),
            _ => {}
        }

        self.signal_run_state(timer.is_running, false);
        Ok((outcome, self.publish(&timer)?))
    }

    /// Render the timer on the digit board and notify watchers.
    /// Callers hold the timer lock; lock order is timer, settings, board.
    fn publish(&self, timer: &TimerState) -> Result<ClockSnapshot, String> {
        let flip_enabled = self.settings.lock()
            .map(|settings| settings.flip_enabled)
            .map_err(|e| format!("Failed to lock settings: {}", e))?;

        let mut board = self.digit_board.lock()
            .map_err(|e| format!("Failed to lock digit board: {}", e))?;
        board.update(timer.time_remaining, flip_enabled && timer.is_running);
        let snapshot = ClockSnapshot::capture(timer, &board);
        drop(board);

        self.snapshot_tx.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Create or clear the tick source
    fn signal_run_state(&self, running: bool, restarted: bool) {
        let changed = self.run_signal_tx.send_if_modified(|signal| {
            if signal.running == running && !restarted {
                return false;
            }
            signal.running = running;
            if restarted {
                signal.generation = signal.generation.wrapping_add(1);
            }
            true
        });
        if changed {
            debug!("Tick source {}", if running { "created" } else { "cleared" });
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get the clock as last drawn
    pub fn get_snapshot(&self) -> Result<ClockSnapshot, String> {
        let timer = self.get_timer_state()?;
        let board = self.digit_board.lock()
            .map_err(|e| format!("Failed to lock digit board: {}", e))?;
        Ok(ClockSnapshot::capture(&timer, &board))
    }

    /// Apply a change to the cosmetic settings
    pub fn update_settings<F, T>(&self, action: &str, updater: F) -> Result<(T, Settings), String>
    where
        F: FnOnce(&mut Settings) -> T,
    {
        let mut settings = self.settings.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))?;

        let result = updater(&mut *settings);
        let new_settings = settings.clone();
        drop(settings);

        self.record_action(action);
        Ok((result, new_settings))
    }

    /// Get current settings
    pub fn get_settings(&self) -> Result<Settings, String> {
        self.settings.lock()
            .map(|settings| settings.clone())
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    pub fn set_flip(&self, enabled: bool) -> Result<Settings, String> {
        info!("Setting flip animation to: {}", enabled);
        self.update_settings("flip", |s| s.flip_enabled = enabled)
            .map(|(_, settings)| settings)
    }

    pub fn set_sound(&self, enabled: bool) -> Result<Settings, String> {
        info!("Setting sound to: {}", enabled);
        self.update_settings("sound", |s| s.sound_enabled = enabled)
            .map(|(_, settings)| settings)
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.lock().map(|s| s.sound_enabled).unwrap_or(false)
    }

    pub fn set_font(&self, font: &str) -> Result<(bool, Settings), String> {
        self.update_settings("font", |s| s.set_font(font))
    }

    pub fn set_theme(&self, theme: &str) -> Result<(bool, Settings), String> {
        self.update_settings("theme", |s| s.set_theme(theme))
    }

    /// Store an uploaded background. Returns the media kind, or None when ignored,
    /// plus the status message sequence number when one was set.
    pub fn set_background(
        &self,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(Option<(MediaKind, u64)>, Settings), String> {
        let size = data.len();
        let result = self.update_settings("background", |s| {
            let kind = s.set_background(content_type, data)?;
            let text = match kind {
                MediaKind::Image => "Background image set successfully!",
                MediaKind::Video => "Background video set successfully!",
            };
            Some((kind, s.set_status(text)))
        })?;

        match &result.0 {
            Some((kind, _)) => info!("Background {} set ({} bytes)", kind.as_str(), size),
            None => warn!("Ignoring background upload of type '{}'", content_type),
        }
        Ok(result)
    }

    /// Remove the background. Returns the status message sequence number.
    pub fn clear_background(&self) -> Result<(u64, Settings), String> {
        info!("Clearing background");
        self.update_settings("clear-background", |s| {
            s.clear_background();
            s.set_status("Background cleared")
        })
    }

    /// Uploaded background bytes with their content type
    pub fn get_background_media(&self) -> Result<Option<(String, Vec<u8>)>, String> {
        self.settings.lock()
            .map(|s| s.background.as_ref().map(|b| (b.content_type.clone(), b.data.clone())))
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    /// Drop the status message numbered `seq` if nothing replaced it
    pub fn expire_status(&self, seq: u64) -> Result<bool, String> {
        let mut settings = self.settings.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))?;
        Ok(settings.clear_status_if(seq))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(timer: TimerState) -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), timer, Settings::new(), Vec::new())
    }

    #[test]
    fn test_start_bumps_generation_and_pause_clears() {
        let state = test_state(TimerState::default());
        assert_eq!(*state.run_signal_tx.borrow(), RunSignal::default());

        state.toggle().unwrap();
        let signal = *state.run_signal_tx.borrow();
        assert!(signal.running);
        assert_eq!(signal.generation, 1);

        state.pause().unwrap();
        assert!(!state.run_signal_tx.borrow().running);

        state.start().unwrap();
        assert_eq!(state.run_signal_tx.borrow().generation, 2);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn test_concurrent_start_pause_keeps_run_signal_in_sync() {
        use std::{sync::Barrier, thread};

        let state = Arc::new(test_state(TimerState::new(
            Mode::Stopwatch,
            PomodoroDurations::default(),
            CountdownInput::default(),
        )));

        for _ in 0..2_000 {
            state.reset().unwrap();
            state.start().unwrap();

            let barrier = Arc::new(Barrier::new(2));
            let pauser = {
                let (state, barrier) = (Arc::clone(&state), Arc::clone(&barrier));
                thread::spawn(move || {
                    barrier.wait();
                    state.pause().unwrap();
                })
            };
            let starter = {
                let (state, barrier) = (Arc::clone(&state), Arc::clone(&barrier));
                thread::spawn(move || {
                    barrier.wait();
                    state.start().unwrap();
                })
            };
            pauser.join().unwrap();
            starter.join().unwrap();

            let timer = state.get_timer_state().unwrap();
            assert_eq!(timer.is_running, state.run_signal_tx.borrow().running);
            assert_eq!(timer.is_running, state.snapshot_tx.borrow().is_running);
        }
    }

    #[test]
    fn test_mode_switch_clears_tick_source() {
        let state = test_state(TimerState::default());
        state.start().unwrap();
        let snapshot = state.switch_mode(Mode::Stopwatch).unwrap();
        assert!(!snapshot.is_running);
        assert!(!state.run_signal_tx.borrow().running);
        assert_eq!(snapshot.display.text, "00:00:00");
    }

    #[test]
    fn test_tick_publishes_snapshot() {
        let state = test_state(TimerState::new(
            Mode::Countdown,
            PomodoroDurations::default(),
            CountdownInput::new(0, 0, 2),
        ));
        let mut rx = state.snapshot_tx.subscribe();
        state.start().unwrap();

        let (outcome, snapshot) = state.tick().unwrap();
        assert_eq!(outcome, TickOutcome::Counted);
        assert_eq!(snapshot.time_remaining, 1);
        assert_eq!(rx.borrow_and_update().time_remaining, 1);

        let (outcome, snapshot) = state.tick().unwrap();
        assert_eq!(outcome, TickOutcome::CountdownFinished);
        assert!(!snapshot.is_running);
        assert!(!state.run_signal_tx.borrow().running);

        let (outcome, _) = state.tick().unwrap();
        assert_eq!(outcome, TickOutcome::Idle);
    }

    #[test]
    fn test_flip_only_while_running() {
        let state = test_state(TimerState::new(
            Mode::Stopwatch,
            PomodoroDurations::default(),
            CountdownInput::default(),
        ));
        state.set_flip(true).unwrap();

        state.start().unwrap();
        let (_, snapshot) = state.tick().unwrap();
        assert!(snapshot.display.digits[5].flipping);

        let snapshot = state.reset().unwrap();
        assert!(snapshot.display.digits.iter().all(|d| !d.flipping));
    }

    #[test]
    fn test_update_durations_keeps_unedited_fields() {
        let state = test_state(TimerState::default());
        let snapshot = state.update_durations(|d| d.work = 10 * 60).unwrap();
        assert_eq!(snapshot.time_remaining, 600);

        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.durations.short_break, 300);
        assert_eq!(timer.durations.sessions_until_long_break, 4);
    }

    #[test]
    fn test_background_status_messages() {
        let state = test_state(TimerState::default());

        let (ignored, _) = state.set_background("text/html", vec![1]).unwrap();
        assert!(ignored.is_none());
        assert!(state.get_settings().unwrap().status.is_none());

        let (set, settings) = state.set_background("image/png", vec![1, 2]).unwrap();
        let (kind, seq) = set.unwrap();
        assert_eq!(kind, MediaKind::Image);
        assert_eq!(
            settings.status.unwrap().text,
            "Background image set successfully!"
        );
        assert_eq!(
            state.get_background_media().unwrap(),
            Some(("image/png".to_string(), vec![1, 2]))
        );

        let (clear_seq, _) = state.clear_background().unwrap();
        assert!(!state.expire_status(seq).unwrap());
        assert!(state.expire_status(clear_seq).unwrap());
        assert!(state.get_background_media().unwrap().is_none());
    }
}
