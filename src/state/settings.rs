//! Cosmetic settings: flip animation, sound, font, theme and background

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT: &str = "'Orbitron', monospace";
pub const DEFAULT_THEME: &str = "default";

/// Kind of uploaded background media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type; anything but `image/*` and `video/*` is rejected
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if essence.starts_with("image/") {
            Some(MediaKind::Image)
        } else if essence.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Uploaded background media
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub kind: MediaKind,
    pub content_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Transient message shown under the upload control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    /// Increments on every new message so a stale expiry leaves newer text alone
    pub seq: u64,
}

/// Cosmetic settings of the clock face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub flip_enabled: bool,
    pub sound_enabled: bool,
    pub font: String,
    pub theme: String,
    pub background: Option<Background>,
    pub status: Option<StatusMessage>,
    #[serde(skip)]
    next_status_seq: u64,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            flip_enabled: false,
            sound_enabled: true,
            font: DEFAULT_FONT.to_string(),
            theme: DEFAULT_THEME.to_string(),
            background: None,
            status: None,
            next_status_seq: 0,
        }
    }

    /// Set the font; blank input keeps the current one
    pub fn set_font(&mut self, font: &str) -> bool {
        let font = font.trim();
        if font.is_empty() {
            return false;
        }
        self.font = font.to_string();
        true
    }

    /// Set the theme; blank input keeps the current one
    pub fn set_theme(&mut self, theme: &str) -> bool {
        let theme = theme.trim();
        if theme.is_empty() {
            return false;
        }
        self.theme = theme.to_string();
        true
    }

    /// Store uploaded media. Unsupported types and empty uploads are ignored.
    pub fn set_background(&mut self, content_type: &str, data: Vec<u8>) -> Option<MediaKind> {
        if data.is_empty() {
            return None;
        }
        let kind = MediaKind::from_content_type(content_type)?;
        self.background = Some(Background {
            kind,
            content_type: content_type.trim().to_string(),
            size_bytes: data.len(),
            uploaded_at: Utc::now(),
            data,
        });
        Some(kind)
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Replace the status message and return its sequence number
    pub fn set_status(&mut self, text: impl Into<String>) -> u64 {
        self.next_status_seq += 1;
        self.status = Some(StatusMessage {
            text: text.into(),
            seq: self.next_status_seq,
        });
        self.next_status_seq
    }

    /// Clear the status message if it is still the one numbered `seq`
    pub fn clear_status_if(&mut self, seq: u64) -> bool {
        match &self.status {
            Some(status) if status.seq == seq => {
                self.status = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
