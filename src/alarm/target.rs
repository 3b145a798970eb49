//! Spoken alarm times
//!
//! Accepts two 1-2 digit groups, optionally followed by `am` or `pm`,
//! anywhere in the utterance: "6 30 am", "18 45", "wake me at 7 15 pm".

use std::fmt;
use std::sync::OnceLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

static TIME_EXPRESSION: OnceLock<Regex> = OnceLock::new();

fn time_expression() -> &'static Regex {
    TIME_EXPRESSION.get_or_init(|| {
        Regex::new(r"([0-9]{1,2})\s*([0-9]{1,2})\s*(am|pm)?").expect("invalid alarm time regex")
    })
}

/// Errors produced while reading a spoken alarm time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlarmParseError {
    #[error("no time expression in {0:?}")]
    Unrecognized(String),

    #[error("{hour:02}:{minute:02} is not a valid time of day")]
    OutOfRange { hour: u32, minute: u32 },
}

/// A 24-hour wall-clock time an alarm waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmTarget {
    hour: u32,
    minute: u32,
}

impl AlarmTarget {
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmParseError> {
        if hour > 23 || minute > 59 {
            return Err(AlarmParseError::OutOfRange { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Parse a spoken time expression into a 24-hour target.
    ///
    /// `pm` adds twelve hours except at 12; `am` maps 12 to 0; without a
    /// marker the numbers are already 24-hour.
    pub fn parse(expression: &str) -> Result<Self, AlarmParseError> {
        let expression = expression.to_lowercase();
        let captures = time_expression()
            .captures(&expression)
            .ok_or_else(|| AlarmParseError::Unrecognized(expression.clone()))?;

        // Both groups are at most two ASCII digits
        let number = |i: usize| {
            captures
                .get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .ok_or_else(|| AlarmParseError::Unrecognized(expression.clone()))
        };
        let mut hour = number(1)?;
        let minute = number(2)?;

        match captures.get(3).map(|m| m.as_str()) {
            Some("pm") if hour != 12 => hour += 12,
            Some("am") if hour == 12 => hour = 0,
            _ => {}
        }

        Self::new(hour, minute)
    }

    /// Whether `time` falls inside the target minute
    pub fn matches(&self, time: NaiveTime) -> bool {
        time.hour() == self.hour && time.minute() == self.minute
    }
}

impl fmt::Display for AlarmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(expression: &str) -> String {
        AlarmTarget::parse(expression).unwrap().to_string()
    }

    #[test]
    fn test_morning_with_marker() {
        assert_eq!(parsed("6 30 am"), "06:30");
    }

    #[test]
    fn test_twenty_four_hour() {
        assert_eq!(parsed("18 45"), "18:45");
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(parsed("12 00 pm"), "12:00");
        assert_eq!(parsed("12 00 am"), "00:00");
    }

    #[test]
    fn test_afternoon_marker_adds_twelve() {
        assert_eq!(parsed("7 15 pm"), "19:15");
    }

    #[test]
    fn test_expression_inside_sentence() {
        assert_eq!(parsed("wake me at 5 05 AM please"), "05:05");
    }

    #[test]
    fn test_not_a_time() {
        assert_eq!(
            AlarmTarget::parse("not a time"),
            Err(AlarmParseError::Unrecognized("not a time".to_string()))
        );
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(
            AlarmTarget::parse("٦ ٣٠"),
            Err(AlarmParseError::Unrecognized("٦ ٣٠".to_string()))
        );
        assert_eq!(parsed("٦ then 6 30 am"), "06:30");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            AlarmTarget::parse("25 10"),
            Err(AlarmParseError::OutOfRange { hour: 25, minute: 10 })
        );
        assert!(AlarmTarget::parse("11 75").is_err());
    }

    #[test]
    fn test_matches_whole_minute() {
        let target = AlarmTarget::new(6, 30).unwrap();
        assert!(target.matches(NaiveTime::from_hms_opt(6, 30, 0).unwrap()));
        assert!(target.matches(NaiveTime::from_hms_opt(6, 30, 59).unwrap()));
        assert!(!target.matches(NaiveTime::from_hms_opt(6, 31, 0).unwrap()));
        assert!(!target.matches(NaiveTime::from_hms_opt(18, 30, 0).unwrap()));
    }
}
