//! Recording and subtracting worked time

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;

use super::app::Session;
use crate::domain::{Block, Date};

/// Admonitions for days that cross the configured limits
const LATE_NIGHT_NOTES: [&str; 6] = [
    "Get some sleep!",
    "You should go to bed.",
    "That can't be healthy.",
    "Work-life balance. Ever heard of it?",
    "Don't you have any hobbies?",
    "The average adult needs 7-8 hours of sleep.",
];

/// Picks which day an edit targets
#[derive(clap::Args)]
pub struct DaySelector {
    /// Edit yesterday's entry instead of today's
    #[arg(long, short = 'y', conflicts_with = "day")]
    pub yesterday: bool,

    /// Edit a specific day
    #[arg(long, short = 'd', value_name = "DD.MM.YY")]
    pub day: Option<String>,
}

impl DaySelector {
    fn resolve(&self, now: NaiveDateTime) -> Result<Date> {
        if let Some(s) = &self.day {
            return s
                .parse::<Date>()
                .with_context(|| format!("Invalid --day value: '{s}'"));
        }
        let date = if self.yesterday {
            now.date().pred_opt().context("calendar underflow")?
        } else {
            now.date()
        };
        Ok(Date::from_naive(date))
    }
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Time ranges to record (HH:MM-HH:MM, minutes optional)
    pub ranges: Vec<String>,

    #[command(flatten)]
    pub select: DaySelector,

    /// Comma separated tags to attach to the day
    #[arg(long, short = 't')]
    pub tags: Option<String>,

    /// Drop all tags from the day first
    #[arg(long)]
    pub clear_tags: bool,
}

#[derive(clap::Args)]
pub struct RemoveArgs {
    /// Time ranges to subtract (HH:MM-HH:MM, minutes optional)
    #[arg(required = true)]
    pub ranges: Vec<String>,

    #[command(flatten)]
    pub select: DaySelector,
}

pub fn add(session: &Session, args: &AddArgs) -> Result<()> {
    if args.ranges.is_empty() && args.tags.is_none() && !args.clear_tags {
        bail!("Nothing to record. Pass time ranges, --tags or --clear-tags.");
    }

    let date = args.select.resolve(session.now)?;
    let blocks = parse_ranges(&args.ranges, date)?;

    let mut month = session.archive.load(session.month, session.year)?;
    let day = month.find_or_create_day(date);
    if args.clear_tags {
        day.clear_tags();
    }
    if let Some(tags) = &args.tags {
        day.extract_tags(tags);
    }
    day.add_all(blocks);

    let line = day.to_string();
    let unhealthy = day.is_unhealthy(&session.config.limits);
    let note = LATE_NIGHT_NOTES
        [day.total().num_minutes().max(0) as usize % LATE_NIGHT_NOTES.len()];

    session.archive.store(&month)?;

    if session.output.is_json() {
        session.output.data(&serde_json::json!({
            "date": date.to_string(),
            "line": line,
            "unhealthy": unhealthy,
        }));
    } else {
        session.output.success(&line);
        if unhealthy {
            session.output.warn(note);
        }
    }
    Ok(())
}

pub fn remove(session: &Session, args: &RemoveArgs) -> Result<()> {
    let date = args.select.resolve(session.now)?;
    let blocks = parse_ranges(&args.ranges, date)?;

    let mut month = session.archive.load(session.month, session.year)?;
    let day = month.find_or_create_day(date);
    day.remove_all(blocks);
    let line = day.to_string();

    session.archive.store(&month)?;

    if session.output.is_json() {
        session.output.data(&serde_json::json!({
            "date": date.to_string(),
            "line": line,
        }));
    } else {
        session.output.success(&line);
    }
    Ok(())
}

fn parse_ranges(ranges: &[String], date: Date) -> Result<Vec<Block>> {
    ranges
        .iter()
        .map(|r| Block::parse(r, date).with_context(|| format!("Invalid block range: '{r}'")))
        .collect()
}
