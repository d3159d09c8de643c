//! Tomato Timer - A work/break interval timer
//! 
//! This library provides a session/break countdown state machine, the
//! background task that ticks it once per second, audible cue backends and
//! an HTTP control surface.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine, TimerSnapshot};
pub use api::create_router;
pub use utils::{format_time, shutdown_signal};
