//! Timestamp and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::config::{HOUR_MS, MINUTE_MS};

/// Formats a `Timestamp` in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Formats a millisecond duration as hours and minutes, e.g. `2h 30m`.
///
/// Anything under a minute is shown in seconds. Leftover seconds are dropped
/// once the duration reaches a minute.
///
/// ```rust
/// use cairn_core::display::HumanDuration;
///
/// assert_eq!(HumanDuration(9 * 3_600_000).to_string(), "9h");
/// assert_eq!(HumanDuration(150 * 60_000).to_string(), "2h 30m");
/// assert_eq!(HumanDuration(45 * 60_000).to_string(), "45m");
/// assert_eq!(HumanDuration(1_500).to_string(), "1s");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub u64);

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0;
        if ms < MINUTE_MS {
            return write!(f, "{}s", ms / 1_000);
        }

        let hours = ms / HOUR_MS;
        let minutes = (ms % HOUR_MS) / MINUTE_MS;
        match (hours, minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h {m}m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!(HumanDuration(0).to_string(), "0s");
        assert_eq!(HumanDuration(MINUTE_MS).to_string(), "1m");
        assert_eq!(HumanDuration(HOUR_MS + 59 * 1_000).to_string(), "1h");
        assert_eq!(HumanDuration(26 * HOUR_MS + 5 * MINUTE_MS).to_string(), "26h 5m");
    }
}
