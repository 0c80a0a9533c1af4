//! Calendar dates in the BRF two-digit-year convention
//!
//! BRF files identify days as `DD.MM.YY`. The two-digit year is kept exactly
//! as written; it pivots into 2000-2099 only when arithmetic needs a real
//! calendar (durations, midnight rollover).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A date or time token that does not match its grammar
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid date (expected DD.MM.YY): '{0}'")]
    BadDate(String),

    #[error("invalid time of day (expected HH or HH:MM): '{0}'")]
    BadTime(String),

    #[error("invalid block range (expected HH:MM-HH:MM): '{0}'")]
    BadRange(String),

    #[error("unclosed tag list: '{0}'")]
    UnclosedTags(String),
}

/// A calendar date as written in a BRF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Wraps a real calendar date
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date
    pub fn to_naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the day of month (1-31)
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Returns the month (1-12)
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Returns the two-digit year as written in the file
    pub fn year(self) -> u32 {
        self.0.year().rem_euclid(100) as u32
    }

    /// Returns the following calendar day, crossing month and year boundaries
    pub fn succ(self) -> Self {
        Self(self.0.succ_opt().expect("calendar overflow"))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.day(), self.month(), self.year())
    }
}

impl FromStr for Date {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FormatError::BadDate(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(bad());
        }
        if parts
            .iter()
            .any(|p| p.is_empty() || p.len() > 2 || !p.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(bad());
        }

        let day: u32 = parts[0].parse().map_err(|_| bad())?;
        let month: u32 = parts[1].parse().map_err(|_| bad())?;
        let year: i32 = parts[2].parse().map_err(|_| bad())?;

        let date = NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(bad)?;
        Ok(Self(date))
    }
}
