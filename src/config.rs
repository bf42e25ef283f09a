//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    display::RenderFormat,
    state::{CountdownInput, Mode, PomodoroDurations, Settings},
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "flipclock")]
#[command(about = "A flip-clock pomodoro, countdown and stopwatch timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Timer mode selected at startup (pomodoro, countdown, stopwatch)
    #[arg(short, long, default_value = "pomodoro")]
    pub mode: Mode,

    /// Pomodoro work session length in minutes
    #[arg(long, default_value = "25")]
    pub work: u64,

    /// Pomodoro short break length in minutes
    #[arg(long, default_value = "5")]
    pub short_break: u64,

    /// Pomodoro long break length in minutes
    #[arg(long, default_value = "15")]
    pub long_break: u64,

    /// Work sessions before a long break
    #[arg(long, default_value = "4")]
    pub sessions: u32,

    /// Countdown hours
    #[arg(long, default_value = "0")]
    pub hours: u64,

    /// Countdown minutes
    #[arg(long, default_value = "0")]
    pub minutes: u64,

    /// Countdown seconds
    #[arg(long, default_value = "0")]
    pub seconds: u64,

    /// Enable the flip animation
    #[arg(long)]
    pub flip: bool,

    /// Disable the completion sound
    #[arg(long)]
    pub mute: bool,

    /// Font family for the digits
    #[arg(long)]
    pub font: Option<String>,

    /// Color theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Program and arguments run to play the completion sound (terminal bell when unset).
    /// Each argument is passed as-is; quote ones that contain spaces.
    #[arg(long, num_args = 1.., value_name = "PROGRAM [ARGS]")]
    pub sound_command: Vec<String>,

    /// Draw the clock on the terminal (text or json)
    #[arg(long)]
    pub render: Option<RenderFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn durations(&self) -> PomodoroDurations {
        PomodoroDurations::from_minutes(self.work, self.short_break, self.long_break, self.sessions)
    }

    pub fn countdown_input(&self) -> CountdownInput {
        CountdownInput::new(self.hours, self.minutes, self.seconds)
    }

    /// Initial cosmetic settings from the flags
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.flip_enabled = self.flip;
        settings.sound_enabled = !self.mute;
        if let Some(font) = &self.font {
            settings.set_font(font);
        }
        if let Some(theme) = &self.theme {
            settings.set_theme(theme);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["flipclock"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.mode, Mode::Pomodoro);
        assert_eq!(config.durations(), PomodoroDurations::default());
        assert_eq!(config.log_level(), "info");
        assert!(config.render.is_none());
        assert!(config.sound_command.is_empty());

        let settings = config.settings();
        assert!(settings.sound_enabled);
        assert!(!settings.flip_enabled);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "flipclock",
            "--mode",
            "countdown",
            "--minutes",
            "3",
            "--seconds",
            "30",
            "--sessions",
            "0",
            "--flip",
            "--mute",
            "--theme",
            "ocean",
            "--render",
            "json",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.mode, Mode::Countdown);
        assert_eq!(config.countdown_input().total_seconds(), 210);
        assert_eq!(config.durations().sessions_until_long_break, 1);
        assert_eq!(config.render, Some(RenderFormat::Json));
        assert_eq!(config.log_level(), "debug");

        let settings = config.settings();
        assert!(settings.flip_enabled);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.theme, "ocean");
    }

    #[test]
    fn test_sound_command_keeps_arguments_with_spaces() {
        let config = Config::try_parse_from([
            "flipclock",
            "--sound-command",
            "paplay",
            "/usr/share/sounds/my bell.oga",
            "--flip",
        ])
        .unwrap();

        assert_eq!(
            config.sound_command,
            vec!["paplay".to_string(), "/usr/share/sounds/my bell.oga".to_string()]
        );
        assert!(config.flip);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Config::try_parse_from(["flipclock", "--mode", "lap"]).is_err());
    }
}
