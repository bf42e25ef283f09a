//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod renderer;
pub mod status_expiry;
pub mod tick_engine;

// Re-export main functions
pub use renderer::renderer_task;
pub use status_expiry::{schedule_status_expiry, CLEAR_STATUS_TTL, UPLOAD_STATUS_TTL};
pub use tick_engine::tick_engine_task;
