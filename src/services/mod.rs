//! External side effects module
//!
//! This module contains functions that reach outside the process, such as
//! playing the completion sound.

pub mod notifier;

// Re-export main functions
pub use notifier::play_notification;
