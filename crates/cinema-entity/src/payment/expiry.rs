//! `MM/YYYY` card expiration values.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// A card expiration month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CardExpiry {
    /// Four-digit year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u32,
}

/// Why an expiration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryParseError {
    /// Not of the form `MM/YYYY`.
    #[error("expiration must be in MM/YYYY format")]
    Format,
    /// Month outside 1..=12.
    #[error("expiration month must be between 01 and 12")]
    Month,
}

impl CardExpiry {
    /// A card is usable through the last day of its expiration month.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        (self.year, self.month) < (today.year(), today.month())
    }
}

impl FromStr for CardExpiry {
    type Err = ExpiryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 7 {
            return Err(ExpiryParseError::Format);
        }
        let (month, year) = s.split_once('/').ok_or(ExpiryParseError::Format)?;
        if month.len() != 2
            || year.len() != 4
            || !month.bytes().all(|b| b.is_ascii_digit())
            || !year.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ExpiryParseError::Format);
        }
        let month: u32 = month.parse().map_err(|_| ExpiryParseError::Format)?;
        let year: i32 = year.parse().map_err(|_| ExpiryParseError::Format)?;
        if !(1..=12).contains(&month) {
            return Err(ExpiryParseError::Month);
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for CardExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn test_parse_valid() {
        let e: CardExpiry = "03/2027".parse().unwrap();
        assert_eq!(e, CardExpiry { year: 2027, month: 3 });
        assert_eq!(e.to_string(), "03/2027");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert_eq!("3/2027".parse::<CardExpiry>(), Err(ExpiryParseError::Format));
        assert_eq!("03-2027".parse::<CardExpiry>(), Err(ExpiryParseError::Format));
        assert_eq!("ab/2027".parse::<CardExpiry>(), Err(ExpiryParseError::Format));
        assert_eq!("13/2027".parse::<CardExpiry>(), Err(ExpiryParseError::Month));
        assert_eq!("00/2027".parse::<CardExpiry>(), Err(ExpiryParseError::Month));
    }

    #[test]
    fn test_current_month_is_not_expired() {
        let e: CardExpiry = "10/2026".parse().unwrap();
        assert!(!e.is_expired(day(2026, 10, 31)));
        assert!(e.is_expired(day(2026, 11, 1)));
    }
}
