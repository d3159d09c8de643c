//! External service module
//! 
//! This module contains the audible cue backends the timer signals on
//! phase switches and resets.

pub mod cue;

// Re-export main types
pub use cue::{CommandCue, CueSignals, SilentCue, TerminalBell};
