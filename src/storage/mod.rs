//! # Storage Layer
//!
//! Everything that touches the filesystem: the BRF text format, the monthly
//! file archive, and user configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Work time | BRF text, one file per month | `<hours_dir>/<month>_<year>.txt` |
//! | Config | TOML | `~/.config/timecard/config.toml` |
//!
//! Writes rewrite the month file wholesale (truncate-then-write); there is
//! no locking and no append path. The file is the source of truth - nothing
//! survives a run in memory.

mod archive;
mod brf;
mod config;

pub use archive::{active_month, Archive};
pub use brf::{format_month, parse_month, ParserError};
pub use config::{Config, ConfigError, OutputFormat as ConfigOutputFormat};
