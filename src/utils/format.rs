//! Time formatting for the countdown display

/// Render a `minutes:seconds` pair as a fixed-width `MM:SS` string.
///
/// Each side is left-padded with zeros to two digits. Wider values are
/// rendered as-is, so sixty minutes displays as `60:00`.
pub fn format_time(minutes: u32, seconds: u32) -> String {
    format!("{:02}:{:02}", minutes, seconds)
}
