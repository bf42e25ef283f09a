//! Display formatting module
//!
//! Turns timer seconds into flip-clock digits and terminal output.

pub mod digits;
pub mod render;

// Re-export main types
pub use digits::{format_hms, split_digits, DigitBoard, FlipDigit, FLIP_DURATION_MS};
pub use render::{render, RenderFormat};
