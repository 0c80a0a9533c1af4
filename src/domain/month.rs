//! One calendar month's ordered set of days
//!
//! A month is backed by exactly one BRF file. Days are kept sorted by date
//! and unique per date; lookups go through `find_or_create_day` so edits can
//! never append a duplicate.

use chrono::{Duration, NaiveDateTime};

use super::date::Date;
use super::day::Day;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month with its days, sorted ascending by date
#[derive(Debug, Clone)]
pub struct Month {
    month: u32,
    year: i32,
    days: Vec<Day>,
}

impl Month {
    pub fn new(month: u32, year: i32) -> Self {
        debug_assert!((1..=12).contains(&month), "month out of range: {month}");
        Self {
            month,
            year,
            days: Vec::new(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Capitalized English name of this month
    pub fn name(&self) -> &'static str {
        Self::name_of(self.month)
    }

    /// Capitalized English name of a month number (1-12)
    pub fn name_of(month: u32) -> &'static str {
        MONTH_NAMES[month as usize - 1]
    }

    /// Returns the day for a date, inserting an empty one in sorted
    /// position when absent.
    pub fn find_or_create_day(&mut self, date: Date) -> &mut Day {
        match self.days.iter().position(|d| d.date() == date) {
            Some(i) => &mut self.days[i],
            None => {
                let at = self
                    .days
                    .iter()
                    .position(|d| d.date() > date)
                    .unwrap_or(self.days.len());
                self.days.insert(at, Day::new(date));
                &mut self.days[at]
            }
        }
    }

    /// Finds the day an instant falls on, if it is recorded
    pub fn day_at(&self, instant: NaiveDateTime) -> Option<&Day> {
        self.days.iter().find(|d| d.occurs_at(instant))
    }

    pub fn day_at_mut(&mut self, instant: NaiveDateTime) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.occurs_at(instant))
    }

    /// Re-merges every day's blocks and drops days that carry nothing.
    ///
    /// Heals hand-edited files whose blocks overlap or sit out of order.
    pub fn cleanup(&mut self) {
        for day in &mut self.days {
            day.normalize();
        }
        self.days.retain(|d| !d.is_empty());
        self.days.sort_by_key(|d| d.date());
    }

    /// Sum of all days' totals
    pub fn total(&self) -> Duration {
        self.days
            .iter()
            .fold(Duration::zero(), |acc, d| acc + d.total())
    }
}
