//! One calendar day's merged blocks and tags
//!
//! The day owns the merge/subtract algorithm: its block list is always
//! sorted ascending by start and pairwise non-overlapping and non-touching,
//! no matter in which order blocks are added or removed.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::date::Date;
use super::totals::format_hhmm;

/// Policy thresholds for flagging suspicious days
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Flag a day once it exceeds this many worked hours
    pub max_day_hours: f64,

    /// Flag days with blocks running past midnight
    pub warn_past_midnight: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_day_hours: 12.0,
            warn_past_midnight: true,
        }
    }
}

/// A calendar date with its worked blocks and free-form tags
#[derive(Debug, Clone)]
pub struct Day {
    date: Date,
    blocks: Vec<Block>,
    tags: Vec<String>,
}

impl Day {
    pub fn new(date: Date) -> Self {
        Self {
            date,
            blocks: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    /// The merged blocks, sorted ascending by start
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lower-cased tags in first-seen order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// True when the day carries neither blocks nor tags
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.tags.is_empty()
    }

    /// Inserts a block, merging it with everything it overlaps or touches.
    ///
    /// All affected blocks collapse into a single span from the earliest
    /// start to the latest finish; a block already covered by an existing
    /// one therefore disappears into it, and a block bridging two stored
    /// blocks fuses all three.
    pub fn add(&mut self, block: Block) {
        let mut merged = block;
        let mut kept = Vec::with_capacity(self.blocks.len() + 1);

        for existing in self.blocks.drain(..) {
            if existing.overlaps(&merged) || existing.touches(&merged) {
                merged = Block::new(
                    merged.start().min(existing.start()),
                    merged.finish().max(existing.finish()),
                );
            } else {
                kept.push(existing);
            }
        }

        kept.push(merged);
        kept.sort();
        self.blocks = kept;
        self.check_invariants();
    }

    pub fn add_all(&mut self, blocks: impl IntoIterator<Item = Block>) {
        for block in blocks {
            self.add(block);
        }
    }

    /// Subtracts a range from every stored block it overlaps.
    ///
    /// Full containment deletes the stored block, an edge overlap clips it,
    /// and a range strictly inside it splits it in two. Removal cannot
    /// create new adjacencies, so no re-merge is needed.
    pub fn remove(&mut self, block: Block) {
        let mut kept = Vec::with_capacity(self.blocks.len() + 1);

        for existing in self.blocks.drain(..) {
            if !existing.overlaps(&block) {
                kept.push(existing);
                continue;
            }
            if existing.start() < block.start() {
                kept.push(Block::new(existing.start(), block.start()));
            }
            if block.finish() < existing.finish() {
                kept.push(Block::new(block.finish(), existing.finish()));
            }
        }

        kept.sort();
        self.blocks = kept;
        self.check_invariants();
    }

    pub fn remove_all(&mut self, blocks: impl IntoIterator<Item = Block>) {
        for block in blocks {
            self.remove(block);
        }
    }

    /// Re-feeds every block through the merge algorithm, healing block sets
    /// that were constructed outside of `add` (hand-edited files).
    pub fn normalize(&mut self) {
        let blocks = std::mem::take(&mut self.blocks);
        self.add_all(blocks);
    }

    /// Sum of all block durations
    pub fn total(&self) -> Duration {
        self.blocks
            .iter()
            .fold(Duration::zero(), |acc, b| acc + b.duration())
    }

    /// Splits a comma separated string into tags and unions them in.
    ///
    /// Tags are trimmed, lower-cased and deduplicated case-insensitively;
    /// re-adding an existing tag is a no-op.
    pub fn extract_tags(&mut self, text: &str) {
        for raw in text.split(',') {
            let tag = raw.trim().to_lowercase();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    /// Tags rendered upper-cased and comma-joined
    pub fn tags_str(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when the given instant falls on this day's date
    pub fn occurs_at(&self, instant: NaiveDateTime) -> bool {
        self.date == Date::from_naive(instant.date())
    }

    pub fn is_today(&self, now: NaiveDateTime) -> bool {
        self.occurs_at(now)
    }

    /// True when the day crosses one of the configured limits
    pub fn is_unhealthy(&self, limits: &Limits) -> bool {
        let cap = Duration::seconds((limits.max_day_hours * 3600.0).round() as i64);
        if self.total() > cap {
            return true;
        }
        limits.warn_past_midnight && self.blocks.iter().any(Block::crosses_midnight)
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.blocks
                .windows(2)
                .all(|w| w[0].finish() < w[1].start()),
            "day {} holds overlapping or touching blocks",
            self.date
        );
    }
}

impl fmt::Display for Day {
    /// Canonical BRF line: date, bracketed tags when present, blocks in
    /// ascending order, derived total
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = vec![self.date.to_string()];
        if !self.tags.is_empty() {
            fields.push(format!("[{}]", self.tags_str()));
        }
        fields.extend(self.blocks.iter().map(ToString::to_string));
        fields.push(format!("Total: {}", format_hhmm(self.total())));
        write!(f, "{}", fields.join("   "))
    }
}
