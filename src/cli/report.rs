//! Month views (show, stats)

use anyhow::Result;
use chrono::Duration;
use serde_json::json;

use super::app::Session;
use crate::domain::{format_hhmm, Date, Day, Month};
use crate::storage::format_month;

pub fn show(session: &Session, raw: bool) -> Result<()> {
    if raw {
        session.archive.load(session.month, session.year)?;
        let text = session.archive.raw(session.month, session.year)?;
        print!("{text}");
        return Ok(());
    }

    let mut month = session.archive.load(session.month, session.year)?;
    // surface today even before the first punch of the day
    if session.shift == 0 && month.day_at(session.now).is_none() {
        month.find_or_create_day(Date::from_naive(session.now.date()));
    }

    if session.output.is_json() {
        session.output.data(&month_json(&month, session));
    } else {
        print!("{}", format_month(&month));
    }
    Ok(())
}

pub fn stats(session: &Session) -> Result<()> {
    let month = session.archive.load(session.month, session.year)?;
    let worked: Vec<&Day> = month
        .days()
        .iter()
        .filter(|d| !d.blocks().is_empty())
        .collect();
    let total = month.total();
    let mean = if worked.is_empty() {
        Duration::zero()
    } else {
        total / worked.len() as i32
    };
    let longest = worked.iter().max_by_key(|d| d.total());

    if session.output.is_json() {
        session.output.data(&json!({
            "month": month.month(),
            "year": month.year(),
            "days_worked": worked.len(),
            "total_minutes": total.num_minutes(),
            "total": format_hhmm(total),
            "mean_per_day": format_hhmm(mean),
            "longest_day": longest.map(|d| json!({
                "date": d.date().to_string(),
                "total": format_hhmm(d.total()),
            })),
        }));
    } else {
        println!("{} {}", month.name(), month.year());
        println!("{}", "=".repeat(40));
        println!();
        println!("Days worked:   {}", worked.len());
        println!("Month total:   {}", format_hhmm(total));
        println!("Mean per day:  {}", format_hhmm(mean));
        if let Some(day) = longest {
            println!("Longest day:   {} ({})", day.date(), format_hhmm(day.total()));
        }
    }
    Ok(())
}

fn month_json(month: &Month, session: &Session) -> serde_json::Value {
    json!({
        "month": month.month(),
        "year": month.year(),
        "total": format_hhmm(month.total()),
        "days": month
            .days()
            .iter()
            .map(|d| day_json(d, session))
            .collect::<Vec<_>>(),
    })
}

fn day_json(day: &Day, session: &Session) -> serde_json::Value {
    json!({
        "date": day.date().to_string(),
        "tags": day.tags(),
        "blocks": day.blocks().iter().map(ToString::to_string).collect::<Vec<_>>(),
        "total": format_hhmm(day.total()),
        "today": day.is_today(session.now),
    })
}
