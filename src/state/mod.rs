//! State management module
//! 
//! This module contains the interval configuration, the countdown state
//! machine and the shared application state that serializes access to it.

pub mod interval_config;
pub mod timer_state;
pub mod engine;
pub mod app_state;

// Re-export main types
pub use interval_config::{Direction, IntervalConfig, IntervalType};
pub use timer_state::{Phase, Remaining, Status, TimerSnapshot, TimerState};
pub use engine::{TickOutcome, TimerEngine};
pub use app_state::AppState;
