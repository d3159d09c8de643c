//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;
pub mod display;

// Re-export main items
pub use countdown::{countdown_task, TickHandle, TICK_PERIOD};
pub use display::display_log_task;
