//! Terminal rendering of clock snapshots

use std::str::FromStr;

use crate::state::ClockSnapshot;

const PROGRESS_WIDTH: usize = 20;

/// Output format of the terminal renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Text,
    Json,
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(RenderFormat::Text),
            "json" => Ok(RenderFormat::Json),
            other => Err(format!("unknown render format: {}", other)),
        }
    }
}

/// Draw a progress bar such as `[#####---------------]`
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One status line for the terminal
fn render_line(snapshot: &ClockSnapshot) -> String {
    let state = if snapshot.is_running {
        "running"
    } else if snapshot.is_paused {
        "paused"
    } else {
        "stopped"
    };

    let mut line = format!(
        "{} {:<9} {:<7}",
        snapshot.display.text, snapshot.mode, state
    );

    if let Some(pomodoro) = &snapshot.pomodoro {
        line.push_str(&format!(
            " {} | {} {} {:>3.0}%",
            pomodoro.phase_name,
            pomodoro.session_label,
            progress_bar(pomodoro.progress, PROGRESS_WIDTH),
            pomodoro.progress * 100.0
        ));
    }

    line
}

/// Render a snapshot in the requested format
pub fn render(snapshot: &ClockSnapshot, format: RenderFormat) -> Result<String, String> {
    match format {
        RenderFormat::Text => Ok(render_line(snapshot)),
        RenderFormat::Json => serde_json::to_string(snapshot)
            .map_err(|e| format!("Failed to serialize snapshot: {}", e)),
    }
}
