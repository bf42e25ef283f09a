//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{ClockSnapshot, DisplayView, Settings};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub clock: ClockSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, clock: ClockSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            clock,
        }
    }

    /// Response whose status reflects whether the timer runs, is paused or is stopped
    pub fn for_clock(message: String, clock: ClockSnapshot) -> Self {
        let status = if clock.is_running {
            "running"
        } else if clock.is_paused {
            "paused"
        } else {
            "stopped"
        };
        Self::new(status.to_string(), message, clock)
    }
}

/// API response structure for settings endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub settings: Settings,
}

impl SettingsResponse {
    pub fn new(status: &str, message: String, settings: Settings) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            settings,
        }
    }

    pub fn ok(message: String, settings: Settings) -> Self {
        Self::new("ok", message, settings)
    }

    /// The request was understood but had nothing usable in it
    pub fn ignored(message: String, settings: Settings) -> Self {
        Self::new("ignored", message, settings)
    }
}

/// Full status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub clock: ClockSnapshot,
    pub settings: Settings,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Display-only response for clients that just draw digits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub display: DisplayView,
    pub flip_enabled: bool,
    pub font: String,
    pub theme: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Countdown inputs; each field may be a number or a string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountdownRequest {
    #[serde(default)]
    pub hours: Value,
    #[serde(default)]
    pub minutes: Value,
    #[serde(default)]
    pub seconds: Value,
}

/// Pomodoro settings in minutes; missing fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PomodoroSettingsRequest {
    #[serde(default)]
    pub work: Value,
    #[serde(default)]
    pub short_break: Value,
    #[serde(default)]
    pub long_break: Value,
    #[serde(default)]
    pub sessions_until_long_break: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontRequest {
    pub font: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}
