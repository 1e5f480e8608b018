//! Shop opening hours.
//!
//! The backend stores hours as a display string such as
//! `"09:00 AM - 07:00 PM"`. [`OpeningHours`] renders that form and parses it
//! back for editing.

use core::fmt;

use chrono::NaiveTime;

const TIME_FORMAT: &str = "%I:%M %p";
const SEPARATOR: &str = " - ";

/// Errors that can occur when parsing an hours string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HoursError {
    /// The string is not `<open> - <close>`.
    #[error("hours must look like \"09:00 AM - 07:00 PM\", got {0:?}")]
    Malformed(String),
    /// One side is not a 12-hour clock time.
    #[error("invalid time {0:?}")]
    InvalidTime(String),
}

/// Daily opening and closing time of a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningHours {
    /// Create opening hours from two times.
    #[must_use]
    pub const fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    /// Parse the backend's `"hh:mm AM - hh:mm PM"` form.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError`] when the separator is missing or either side is
    /// not a 12-hour time.
    pub fn parse(s: &str) -> Result<Self, HoursError> {
        let (open, close) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| HoursError::Malformed(s.to_owned()))?;
        Ok(Self {
            open: parse_time(open)?,
            close: parse_time(close)?,
        })
    }

    /// Parse a time given on the command line, accepting `19:00` or `07:00 PM`.
    ///
    /// # Errors
    ///
    /// Returns [`HoursError::InvalidTime`] if neither form matches.
    pub fn parse_time(s: &str) -> Result<NaiveTime, HoursError> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M").or_else(|_| parse_time(s))
    }
}

impl Default for OpeningHours {
    /// 9 AM to 7 PM.
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.open.format(TIME_FORMAT),
            self.close.format(TIME_FORMAT)
        )
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, HoursError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
        .map_err(|_| HoursError::InvalidTime(s.trim().to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_nine_to_seven() {
        assert_eq!(OpeningHours::default().to_string(), "09:00 AM - 07:00 PM");
    }

    #[test]
    fn test_parse_backend_form() {
        let hours = OpeningHours::parse("08:30 AM - 06:15 PM").unwrap();
        assert_eq!(hours.open, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(hours.close, NaiveTime::from_hms_opt(18, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(matches!(
            OpeningHours::parse("9 to 5"),
            Err(HoursError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_time_accepts_both_clocks() {
        let expected = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        assert_eq!(OpeningHours::parse_time("19:00").unwrap(), expected);
        assert_eq!(OpeningHours::parse_time("07:00 PM").unwrap(), expected);
        assert!(OpeningHours::parse_time("late").is_err());
    }
}
