//! Duration rendering for totals
//!
//! All derived totals display as `HH:MM`. Hours are not capped at 24, so a
//! month total like `163:30` renders as-is.

use chrono::Duration;

/// Renders a duration as zero-padded `HH:MM`, truncating seconds.
///
/// Negative durations clamp to `00:00`.
pub fn format_hhmm(total: Duration) -> String {
    let minutes = total.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
