//! Timecard - a plain-text punch clock
//!
//! Work time lives in one BRF ("brief report format") text file per month.
//! Each day's worked intervals are kept merged, sorted and non-overlapping
//! no matter how they are entered, and the file is rewritten canonically on
//! every edit.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Block, Date, Day, FormatError, Limits, Month};
