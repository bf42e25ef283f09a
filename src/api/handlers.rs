//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    state::{AppState, ClockSnapshot, CountdownInput, Mode},
    tasks::{schedule_status_expiry, CLEAR_STATUS_TTL, UPLOAD_STATUS_TTL},
    utils::{value_as_count, value_as_int},
};
use super::responses::{
    ApiResponse, CountdownRequest, DisplayResponse, FontRequest, HealthResponse,
    PomodoroSettingsRequest, SettingsResponse, StatusResponse, ThemeRequest, ToggleRequest,
};

fn clock_response(
    action: &str,
    result: Result<ClockSnapshot, String>,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(clock) => {
            info!("{} endpoint called - {}", action, message);
            Ok(Json(ApiResponse::for_clock(message.to_string(), clock)))
        }
        Err(e) => {
            error!("Failed to handle {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /mode/:mode - Mode buttons
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let mode: Mode = match mode.parse() {
        Ok(mode) => mode,
        Err(e) => {
            warn!("Rejected mode change: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let message = format!("Switched to {} mode", mode);
    clock_response("Mode", state.switch_mode(mode), &message)
}

/// Handle POST /timer/toggle - Start/pause button
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.toggle();
    let message = match &result {
        Ok(clock) if clock.is_running => "Timer started",
        Ok(_) => "Timer paused",
        Err(_) => "",
    };
    clock_response("Toggle", result, message)
}

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    clock_response("Start", state.start(), "Timer started")
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    clock_response("Pause", state.pause(), "Timer paused")
}

/// Handle POST /timer/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    clock_response("Reset", state.reset(), "Timer reset")
}

/// Handle PUT /countdown - Countdown H/M/S inputs
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CountdownRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let input = CountdownInput::new(
        value_as_count(&request.hours),
        value_as_count(&request.minutes),
        value_as_count(&request.seconds),
    );
    clock_response(
        "Countdown",
        state.set_countdown_input(input),
        "Countdown input updated",
    )
}

/// Present-but-malformed minutes become zero, missing ones keep `current`
fn minutes_field(value: &Value, current_seconds: u64) -> u64 {
    if value.is_null() {
        current_seconds
    } else {
        value_as_count(value).saturating_mul(60)
    }
}

/// Handle PUT /pomodoro - Pomodoro durations
pub async fn pomodoro_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PomodoroSettingsRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.update_durations(|durations| {
        durations.work = minutes_field(&request.work, durations.work);
        durations.short_break = minutes_field(&request.short_break, durations.short_break);
        durations.long_break = minutes_field(&request.long_break, durations.long_break);
        if !request.sessions_until_long_break.is_null() {
            let sessions = value_as_int(&request.sessions_until_long_break).unwrap_or(0);
            durations.sessions_until_long_break = sessions.clamp(1, u32::MAX as i64) as u32;
        }
    });
    clock_response("Pomodoro settings", result, "Pomodoro settings updated")
}

fn settings_response(
    action: &str,
    result: Result<crate::state::Settings, String>,
    message: String,
) -> Result<Json<SettingsResponse>, StatusCode> {
    match result {
        Ok(settings) => {
            info!("{} endpoint called - {}", action, message);
            Ok(Json(SettingsResponse::ok(message, settings)))
        }
        Err(e) => {
            error!("Failed to update {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /settings/flip - Flip animation toggle
pub async fn flip_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    let message = format!(
        "Flip animation {}",
        if request.enabled { "enabled" } else { "disabled" }
    );
    settings_response("Flip", state.set_flip(request.enabled), message)
}

/// Handle PUT /settings/sound - Sound toggle
pub async fn sound_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    let message = format!(
        "Sound {}",
        if request.enabled { "enabled" } else { "disabled" }
    );
    settings_response("Sound", state.set_sound(request.enabled), message)
}

/// Handle PUT /settings/font - Font selector
pub async fn font_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FontRequest>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.set_font(&request.font) {
        Ok((true, settings)) => {
            info!("Font changed to: {}", settings.font);
            Ok(Json(SettingsResponse::ok(format!("Font set to {}", settings.font), settings)))
        }
        Ok((false, settings)) => Ok(Json(SettingsResponse::ignored(
            "Blank font ignored".to_string(),
            settings,
        ))),
        Err(e) => {
            error!("Failed to update font: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /settings/theme - Theme selector
pub async fn theme_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.set_theme(&request.theme) {
        Ok((true, settings)) => {
            info!("Theme changed to: {}", settings.theme);
            Ok(Json(SettingsResponse::ok(format!("Theme set to {}", settings.theme), settings)))
        }
        Ok((false, settings)) => Ok(Json(SettingsResponse::ignored(
            "Blank theme ignored".to_string(),
            settings,
        ))),
        Err(e) => {
            error!("Failed to update theme: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /background - Background image/video upload
pub async fn upload_background_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SettingsResponse>, StatusCode> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match state.set_background(&content_type, body.to_vec()) {
        Ok((Some((kind, seq)), settings)) => {
            schedule_status_expiry(Arc::clone(&state), seq, UPLOAD_STATUS_TTL);
            Ok(Json(SettingsResponse::ok(
                format!("Background {} uploaded", kind.as_str()),
                settings,
            )))
        }
        Ok((None, settings)) => Ok(Json(SettingsResponse::ignored(
            "Unsupported or empty upload ignored".to_string(),
            settings,
        ))),
        Err(e) => {
            error!("Failed to store background: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /background - Serve the uploaded media
pub async fn get_background_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.get_background_media() {
        Ok(Some((content_type, data))) => {
            ([(header::CONTENT_TYPE, content_type)], data).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to read background: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle DELETE /background - Clear background
pub async fn clear_background_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.clear_background() {
        Ok((seq, settings)) => {
            schedule_status_expiry(Arc::clone(&state), seq, CLEAR_STATUS_TTL);
            Ok(Json(SettingsResponse::ok("Background cleared".to_string(), settings)))
        }
        Err(e) => {
            error!("Failed to clear background: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /display - Current digits
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Result<Json<DisplayResponse>, StatusCode> {
    let snapshot = state.get_snapshot().map_err(|e| {
        error!("Failed to get clock snapshot: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let settings = state.get_settings().map_err(|e| {
        error!("Failed to get settings: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(DisplayResponse {
        display: snapshot.display,
        flip_enabled: settings.flip_enabled,
        font: settings.font,
        theme: settings.theme,
    }))
}

/// Handle GET /status - Return the full clock status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let clock = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get clock snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let settings = match state.get_settings() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get settings: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock,
        settings,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
