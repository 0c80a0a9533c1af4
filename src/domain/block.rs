//! Worked time intervals
//!
//! A block is one contiguous stretch of worked time belonging to a single
//! day, possibly running past midnight into the next calendar date. Blocks
//! are immutable; edits replace them inside their day's collection.

use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use super::date::{Date, FormatError};

/// A half-open worked interval `[start, finish)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Block {
    start: NaiveDateTime,
    finish: NaiveDateTime,
}

impl Block {
    /// Builds a block from two explicit instants.
    ///
    /// The caller guarantees a non-empty interval.
    pub fn new(start: NaiveDateTime, finish: NaiveDateTime) -> Self {
        debug_assert!(finish > start, "block must have positive duration");
        Self { start, finish }
    }

    /// Parses a textual range (`HH[:MM]-HH[:MM]`) for the given day.
    ///
    /// A finish time of day at or before the start time of day means the
    /// block runs past midnight: `23:00-02:00` ends at 02:00 the next day.
    pub fn parse(text: &str, date: Date) -> Result<Self, FormatError> {
        let (from, to) = text
            .split_once('-')
            .ok_or_else(|| FormatError::BadRange(text.to_string()))?;

        let start_tod = parse_time(from)?;
        let finish_tod = parse_time(to)?;

        let finish_date = if finish_tod <= start_tod {
            date.succ()
        } else {
            date
        };

        Ok(Self {
            start: date.to_naive().and_time(start_tod),
            finish: finish_date.to_naive().and_time(finish_tod),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn finish(&self) -> NaiveDateTime {
        self.finish
    }

    /// Returns the length of the interval; always positive
    pub fn duration(&self) -> Duration {
        self.finish - self.start
    }

    /// True when the two intervals share at least one instant
    pub fn overlaps(&self, other: &Block) -> bool {
        self.start < other.finish && other.start < self.finish
    }

    /// True when one interval ends exactly where the other begins
    pub fn touches(&self, other: &Block) -> bool {
        self.finish == other.start || other.finish == self.start
    }

    /// True when the block ends on a later calendar day than it starts
    pub fn crosses_midnight(&self) -> bool {
        self.finish.date() > self.start.date()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start.hour(),
            self.start.minute(),
            self.finish.hour(),
            self.finish.minute()
        )
    }
}

fn parse_time(token: &str) -> Result<NaiveTime, FormatError> {
    let bad = || FormatError::BadTime(token.to_string());

    let (hh, mm) = token.split_once(':').unwrap_or((token, "00"));
    if hh.is_empty() || hh.len() > 2 || mm.is_empty() || mm.len() > 2 {
        return Err(bad());
    }
    if !hh.chars().chain(mm.chars()).all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }

    let hour: u32 = hh.parse().map_err(|_| bad())?;
    let minute: u32 = mm.parse().map_err(|_| bad())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(bad)
}
