//! BRF ("brief report format") parsing and rendering
//!
//! One UTF-8 text file per month. The format is line oriented: an optional
//! `<Month> <Year>` banner, then one day per line:
//!
//! ```text
//! August 2026
//!
//! 03.08.26   [SUPPORT]   08:00-12:00   12:45-17:00   Total: 08:15
//! 04.08.26   09:00-18:30   Total: 09:30
//! ```
//!
//! Column alignment is cosmetic on input; rendering always emits the
//! canonical spacing. The trailing `Total:` field is derived and never
//! trusted on re-parse. Blocks may appear out of order or overlapping in a
//! hand-edited file; every range is fed through the day's merge algorithm,
//! so the parsed month always satisfies the non-overlap invariant.

use thiserror::Error;

use crate::domain::{Block, Date, FormatError, Month};

/// A line-level parse failure with its position and content.
///
/// Parsing rejects the whole file on the first malformed line; there is no
/// partial recovery.
#[derive(Debug, Error)]
#[error("could not parse line {line}: {content:?}")]
pub struct ParserError {
    /// 1-based line number
    pub line: usize,
    /// The offending line, verbatim
    pub content: String,
    #[source]
    pub source: FormatError,
}

/// Parses one BRF file's contents into a month.
///
/// `month` and `year` come from the caller (file name and clock); a
/// well-formed banner line is structurally insignificant and skipped.
pub fn parse_month(text: &str, month: u32, year: i32) -> Result<Month, ParserError> {
    let mut result = Month::new(month, year);
    let mut current: Option<Date> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let err = |source: FormatError| ParserError {
            line: idx + 1,
            content: raw.to_string(),
            source,
        };

        let mut tokens = line.split_whitespace().peekable();
        let Some(&first) = tokens.peek() else {
            continue;
        };

        let date = if let Ok(date) = first.parse::<Date>() {
            tokens.next();
            current = Some(date);
            date
        } else if let Some(date) = current {
            // continuation line for the previous day
            date
        } else if is_banner(line) {
            continue;
        } else {
            return Err(err(FormatError::BadDate(first.to_string())));
        };

        let day = result.find_or_create_day(date);
        while let Some(token) = tokens.next() {
            if token == "Total:" {
                // derived field, recomputed on render
                break;
            }
            if let Some(head) = token.strip_prefix('[') {
                let mut inner = head.to_string();
                while !inner.ends_with(']') {
                    match tokens.next() {
                        Some(next) => {
                            inner.push(' ');
                            inner.push_str(next);
                        }
                        None => return Err(err(FormatError::UnclosedTags(line.to_string()))),
                    }
                }
                inner.pop();
                day.extract_tags(&inner);
                continue;
            }
            day.add(Block::parse(token, date).map_err(err)?);
        }
    }

    Ok(result)
}

/// Renders a month canonically: banner, blank line, one line per day.
///
/// The output is a fixed point of parse-then-format: formatting a parsed
/// month and re-parsing it renders the identical text again.
pub fn format_month(month: &Month) -> String {
    let mut out = format!("{} {}\n", month.name(), month.year());
    if !month.days().is_empty() {
        out.push('\n');
    }
    for day in month.days() {
        out.push_str(&day.to_string());
        out.push('\n');
    }
    out
}

/// A banner is a bare `<Name> <Year>` line before any day line
fn is_banner(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(year), None) => {
            name.chars().all(|c| c.is_ascii_alphabetic())
                && year.len() == 4
                && year.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}
