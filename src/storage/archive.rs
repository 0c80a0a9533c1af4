//! Month file archive
//!
//! The hours directory holds one BRF file per month, named
//! `<month>_<year>.txt` (e.g. `august_2026.txt`). A missing file
//! materializes as a banner-only file on first access, so every command
//! can assume the active month exists.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::domain::Month;

use super::brf::{format_month, parse_month};

/// Selects the month a clock instant belongs to.
///
/// Strictly after the hand-in day the clock rolls to the next month's file;
/// `shift` applies a `--previous`/`--next` step on top. Year boundaries wrap
/// in both directions.
pub fn active_month(today: NaiveDate, hand_in_day: u32, shift: i32) -> (u32, i32) {
    let (mut month, mut year) = (today.month(), today.year());
    if today.day() > hand_in_day {
        (month, year) = step(month, year, 1);
    }
    step(month, year, shift)
}

fn step(month: u32, year: i32, delta: i32) -> (u32, i32) {
    let idx = month as i32 - 1 + delta;
    (idx.rem_euclid(12) as u32 + 1, year + idx.div_euclid(12))
}

/// Access to the monthly BRF files under one hours directory
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the BRF file backing a month
    pub fn month_path(&self, month: u32, year: i32) -> PathBuf {
        self.dir
            .join(format!("{}_{}.txt", Month::name_of(month).to_lowercase(), year))
    }

    /// Reads and parses a month, creating a banner-only file when absent
    pub fn load(&self, month: u32, year: i32) -> Result<Month> {
        let path = self.month_path(month, year);
        if !path.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create hours directory: {}", self.dir.display())
            })?;
            fs::write(&path, format!("{} {}\n", Month::name_of(month), year))
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let parsed = parse_month(&text, month, year)
            .with_context(|| format!("Couldn't parse {}", path.display()))?;
        Ok(parsed)
    }

    /// Rewrites a month's file wholesale with its canonical rendering.
    ///
    /// Deliberately truncate-then-write, not temp-file-and-rename: the file
    /// is regenerated from memory on every edit and a torn write is
    /// recovered by re-running the command.
    pub fn store(&self, month: &Month) -> Result<()> {
        let path = self.month_path(month.month(), month.year());
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create hours directory: {}", self.dir.display())
        })?;
        fs::write(&path, format_month(month))
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Unparsed file contents of a month
    pub fn raw(&self, month: u32, year: i32) -> Result<String> {
        let path = self.month_path(month, year);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Copies a month's raw file to `dest`
    pub fn backup(&self, month: u32, year: i32, dest: &Path) -> Result<()> {
        let path = self.month_path(month, year);
        fs::copy(&path, dest).with_context(|| {
            format!("Failed to copy {} to {}", path.display(), dest.display())
        })?;
        Ok(())
    }
}
