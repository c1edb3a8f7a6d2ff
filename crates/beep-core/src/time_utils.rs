use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{BeepError, Result};

// ── ClockTime ─────────────────────────────────────────────────────────────────

/// The time column as written in the log, e.g. `"10:15"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockTime(String);

impl ClockTime {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `HH:MM` into a [`NaiveTime`].
    ///
    /// Exactly one `:` is allowed and both sides must be integers forming a
    /// valid wall-clock time.
    pub fn to_naive_time(&self) -> Result<NaiveTime> {
        let invalid = || BeepError::TimeParse(self.0.clone());

        let (hour, minute) = self.0.split_once(':').ok_or_else(invalid)?;
        if minute.contains(':') {
            return Err(invalid());
        }

        let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;
        let minute: u32 = minute.trim().parse().map_err(|_| invalid())?;

        NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
    }

    pub fn to_seconds(&self) -> Result<SecondsPastMidnight> {
        self.to_naive_time()
            .map(|t| SecondsPastMidnight(t.num_seconds_from_midnight()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── SecondsPastMidnight ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SecondsPastMidnight(u32);

impl SecondsPastMidnight {
    pub fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SecondsPastMidnight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// Time of an observation, in whichever form was requested at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TimeOfDay {
    Clock(ClockTime),
    Seconds(SecondsPastMidnight),
}

impl From<ClockTime> for TimeOfDay {
    fn from(t: ClockTime) -> Self {
        TimeOfDay::Clock(t)
    }
}

impl From<SecondsPastMidnight> for TimeOfDay {
    fn from(t: SecondsPastMidnight) -> Self {
        TimeOfDay::Seconds(t)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Clock(t) => t.fmt(f),
            TimeOfDay::Seconds(t) => t.fmt(f),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(s: &str) -> Result<u32> {
        ClockTime::new(s).to_seconds().map(|t| t.seconds())
    }

    #[test]
    fn test_to_seconds_basic() {
        assert_eq!(seconds("10:15").unwrap(), 36_900);
        assert_eq!(seconds("00:00").unwrap(), 0);
        assert_eq!(seconds("23:59").unwrap(), 86_340);
    }

    #[test]
    fn test_to_seconds_single_digit_hour() {
        assert_eq!(seconds("9:05").unwrap(), 32_700);
    }

    #[test]
    fn test_to_seconds_rejects_malformed() {
        for bad in ["", "1015", "10:15:00", "ab:cd", "24:00", "10:60", "-1:00"] {
            let err = seconds(bad).unwrap_err();
            assert!(matches!(err, BeepError::TimeParse(_)), "{bad}");
        }
    }

    #[test]
    fn test_time_of_day_display() {
        assert_eq!(TimeOfDay::from(ClockTime::new("10:15")).to_string(), "10:15");
        assert_eq!(
            TimeOfDay::from(SecondsPastMidnight::new(36_900)).to_string(),
            "36900"
        );
    }

    #[test]
    fn test_time_of_day_serializes_untagged() {
        let clock = serde_json::to_value(TimeOfDay::from(ClockTime::new("10:15"))).unwrap();
        assert_eq!(clock, serde_json::json!("10:15"));
        let secs = serde_json::to_value(TimeOfDay::from(SecondsPastMidnight::new(60))).unwrap();
        assert_eq!(secs, serde_json::json!(60));
    }
}
