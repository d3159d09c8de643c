//! Timer state structure and management

use std::fmt;
use serde::{Deserialize, Serialize};

use super::{IntervalConfig, IntervalType};
use crate::utils::format_time;

/// Which interval is currently counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Session,
    Break,
}

impl Phase {
    /// The interval whose configured length this phase counts down
    pub fn interval(&self) -> IntervalType {
        match self {
            Phase::Session => IntervalType::Session,
            Phase::Break => IntervalType::Break,
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Phase {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Session => f.write_str("Session"),
            Phase::Break => f.write_str("Break"),
        }
    }
}

/// Whether a countdown is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Running,
}

/// Time left in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub minutes: u32,
    pub seconds: u32,
}

impl Remaining {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self { minutes, seconds }
    }

    /// Full length of an interval, with no seconds
    pub fn whole_minutes(minutes: u32) -> Self {
        Self::new(minutes, 0)
    }

    /// Read a remaining time back out of an `MM:SS` display string
    pub fn parse_display(display: &str) -> Result<Self, String> {
        let (minutes, seconds) = display
            .split_once(':')
            .ok_or_else(|| format!("Display '{}' has no ':' separator", display))?;

        let minutes = minutes
            .parse::<u32>()
            .map_err(|e| format!("Invalid minutes in '{}': {}", display, e))?;
        let seconds = seconds
            .parse::<u32>()
            .map_err(|e| format!("Invalid seconds in '{}': {}", display, e))?;

        if seconds > 59 {
            return Err(format!("Seconds out of range in '{}'", display));
        }

        Ok(Self::new(minutes, seconds))
    }

    /// Format as `MM:SS`
    pub fn display(&self) -> String {
        format_time(self.minutes, self.seconds)
    }
}

/// Phase, status and display of the countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub status: Status,
    /// Last published `MM:SS` value
    pub display: String,
    /// Resume point captured by the last pause, if any
    pub paused_at: Option<Remaining>,
}

impl TimerState {
    /// Create an idle session timer showing the configured session length
    pub fn new(config: &IntervalConfig) -> Self {
        Self {
            phase: Phase::Session,
            status: Status::Paused,
            display: Remaining::whole_minutes(config.session_minutes).display(),
            paused_at: None,
        }
    }

    /// Check if a countdown is active
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Check if the timer is paused
    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    /// Paused with no countdown started since the last reset
    pub fn is_idle(&self) -> bool {
        self.is_paused() && self.paused_at.is_none()
    }

    /// Point a countdown would start from: the captured resume point, or
    /// the configured length of the current phase.
    pub fn resume_point(&self, config: &IntervalConfig) -> Remaining {
        self.paused_at
            .unwrap_or_else(|| Remaining::whole_minutes(config.minutes_for(self.phase.interval())))
    }
}

/// Read-only view of the timer handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub is_paused: bool,
    pub display_time: String,
    pub session_length: u32,
    pub break_length: u32,
}

impl TimerSnapshot {
    pub fn new(timer: &TimerState, config: &IntervalConfig) -> Self {
        Self {
            phase: timer.phase,
            is_paused: timer.is_paused(),
            display_time: timer.display.clone(),
            session_length: config.session_minutes,
            break_length: config.break_minutes,
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        let config = IntervalConfig::new();
        Self::new(&TimerState::new(&config), &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_in_session() {
        let config = IntervalConfig::new();
        let timer = TimerState::new(&config);
        assert_eq!(timer.phase, Phase::Session);
        assert!(timer.is_idle());
        assert_eq!(timer.display, "25:00");
        assert_eq!(timer.resume_point(&config), Remaining::new(25, 0));
    }

    #[test]
    fn resume_point_prefers_paused_value() {
        let config = IntervalConfig::new();
        let mut timer = TimerState::new(&config);
        timer.paused_at = Some(Remaining::new(23, 17));
        assert!(!timer.is_idle());
        assert_eq!(timer.resume_point(&config), Remaining::new(23, 17));
    }

    #[test]
    fn parses_display_strings() {
        assert_eq!(Remaining::parse_display("25:00"), Ok(Remaining::new(25, 0)));
        assert_eq!(Remaining::parse_display("00:31"), Ok(Remaining::new(0, 31)));
        assert_eq!(Remaining::parse_display("60:00"), Ok(Remaining::new(60, 0)));
    }

    #[test]
    fn rejects_malformed_display() {
        assert!(Remaining::parse_display("2500").is_err());
        assert!(Remaining::parse_display("ab:00").is_err());
        assert!(Remaining::parse_display("10:75").is_err());
        assert!(Remaining::parse_display("-1:00").is_err());
    }

    #[test]
    fn phases_alternate() {
        assert_eq!(Phase::Session.next(), Phase::Break);
        assert_eq!(Phase::Break.next(), Phase::Session);
        assert_eq!(Phase::Break.interval(), IntervalType::Break);
        assert_eq!(Phase::Session.to_string(), "Session");
    }

    #[test]
    fn snapshot_serializes_display_fields_only() {
        let value = serde_json::to_value(TimerSnapshot::default()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["break_length", "display_time", "is_paused", "phase", "session_length"]
        );
        assert_eq!(value["phase"], "session");
    }

    #[test]
    fn default_snapshot_matches_initial_display() {
        let snapshot = TimerSnapshot::default();
        assert_eq!(snapshot.display_time, "25:00");
        assert!(snapshot.is_paused);
        assert_eq!((snapshot.session_length, snapshot.break_length), (25, 5));
    }
}
