//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod parse;
pub mod signals;

// Re-export main functions
pub use parse::{parse_int, value_as_count, value_as_int};
pub use signals::shutdown_signal;
