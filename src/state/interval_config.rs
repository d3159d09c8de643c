//! Configurable session and break lengths

use std::{fmt, str::FromStr};

/// Default session length in minutes
pub const DEFAULT_SESSION_MINUTES: u32 = 25;
/// Default break length in minutes
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
/// Shortest allowed interval in minutes
pub const MIN_INTERVAL_MINUTES: u32 = 1;
/// Longest allowed interval in minutes
pub const MAX_INTERVAL_MINUTES: u32 = 60;

/// Which of the two intervals an adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalType {
    Session,
    Break,
}

impl FromStr for IntervalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(Self::Session),
            "break" => Ok(Self::Break),
            other => Err(format!("Unknown interval type: {}", other)),
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("session"),
            Self::Break => f.write_str("break"),
        }
    }
}

/// Direction of a one-minute adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increment" => Ok(Self::Increment),
            "decrement" => Ok(Self::Decrement),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
        }
    }
}

/// Session and break lengths in whole minutes, each kept within [1, 60]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalConfig {
    pub session_minutes: u32,
    pub break_minutes: u32,
}

impl IntervalConfig {
    /// Create a config with the 25/5 defaults
    pub fn new() -> Self {
        Self {
            session_minutes: DEFAULT_SESSION_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }

    /// Length of the given interval in minutes
    pub fn minutes_for(&self, interval: IntervalType) -> u32 {
        match interval {
            IntervalType::Session => self.session_minutes,
            IntervalType::Break => self.break_minutes,
        }
    }

    /// Move an interval one minute in the given direction.
    ///
    /// Returns the committed value, or `None` when the result would leave
    /// [1, 60], in which case nothing changes.
    pub fn adjust(&mut self, interval: IntervalType, direction: Direction) -> Option<u32> {
        let current = self.minutes_for(interval);
        let candidate = match direction {
            Direction::Increment => current.checked_add(1)?,
            Direction::Decrement => current.checked_sub(1)?,
        };

        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&candidate) {
            return None;
        }

        match interval {
            IntervalType::Session => self.session_minutes = candidate,
            IntervalType::Break => self.break_minutes = candidate,
        }
        Some(candidate)
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(session_minutes: u32, break_minutes: u32) -> IntervalConfig {
        IntervalConfig {
            session_minutes,
            break_minutes,
        }
    }

    #[test]
    fn defaults_are_twenty_five_and_five() {
        let config = IntervalConfig::new();
        assert_eq!(config.session_minutes, 25);
        assert_eq!(config.break_minutes, 5);
    }

    #[test]
    fn steps_by_one_inside_bounds() {
        for value in MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES {
            for interval in [IntervalType::Session, IntervalType::Break] {
                let mut config = config_with(value, value);
                if value < MAX_INTERVAL_MINUTES {
                    assert_eq!(config.adjust(interval, Direction::Increment), Some(value + 1));
                    assert_eq!(config.minutes_for(interval), value + 1);
                }

                let mut config = config_with(value, value);
                if value > MIN_INTERVAL_MINUTES {
                    assert_eq!(config.adjust(interval, Direction::Decrement), Some(value - 1));
                    assert_eq!(config.minutes_for(interval), value - 1);
                }
            }
        }
    }

    #[test]
    fn rejects_leaving_the_range() {
        let mut config = config_with(1, 60);
        assert_eq!(config.adjust(IntervalType::Session, Direction::Decrement), None);
        assert_eq!(config.adjust(IntervalType::Break, Direction::Increment), None);
        assert_eq!(config, config_with(1, 60));

        let mut config = config_with(60, 1);
        assert_eq!(config.adjust(IntervalType::Session, Direction::Increment), None);
        assert_eq!(config.adjust(IntervalType::Break, Direction::Decrement), None);
        assert_eq!(config, config_with(60, 1));
    }

    #[test]
    fn adjusting_one_interval_leaves_the_other() {
        let mut config = IntervalConfig::new();
        config.adjust(IntervalType::Break, Direction::Increment);
        assert_eq!(config, config_with(25, 6));
    }

    #[test]
    fn parses_route_names() {
        assert_eq!("session".parse::<IntervalType>(), Ok(IntervalType::Session));
        assert_eq!("break".parse::<IntervalType>(), Ok(IntervalType::Break));
        assert!("lunch".parse::<IntervalType>().is_err());
        assert_eq!("increment".parse::<Direction>(), Ok(Direction::Increment));
        assert_eq!("decrement".parse::<Direction>(), Ok(Direction::Decrement));
        assert!("sideways".parse::<Direction>().is_err());
    }
}
