//! Configuration handling
//!
//! A single global TOML file (`~/.config/timecard/config.toml` on Linux,
//! resolved via `directories`). Every field is optional and falls back to a
//! default, so a missing file behaves like a generated one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Limits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Default output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The commented template written by `generate` and `--reset`
const DEFAULT_CONFIG: &str = r#"# Timecard configuration

# Directory holding one BRF file per month
hours_dir = "~/hours"

# Day of month after which edits target the next month's file
hand_in_day = 20

# Editor for `timecard edit` (falls back to $VISUAL, then $EDITOR)
# editor = "vi"

# Default output format (text or json)
default_format = "text"

[limits]
# Flag a day once it exceeds this many worked hours
max_day_hours = 12.0

# Flag days with blocks running past midnight
warn_past_midnight = true
"#;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the monthly BRF files (`~` is expanded)
    pub hours_dir: String,

    /// Day of month after which the active month rolls forward
    pub hand_in_day: u32,

    /// Editor command for `timecard edit`
    pub editor: Option<String>,

    /// Output format used when no `--format` flag is given
    pub default_format: OutputFormat,

    /// Thresholds for flagging suspicious days
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hours_dir: "~/hours".to_string(),
            hand_in_day: 20,
            editor: None,
            default_format: OutputFormat::Text,
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_path = match Self::path() {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Returns the config file location, if a home directory is known
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "timecard", "timecard-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Writes the commented default template to the given path
    pub fn generate(path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }
        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// The hours directory with a leading `~` expanded
    pub fn hours_dir(&self) -> PathBuf {
        expand_home(&self.hours_dir)
    }

    /// The editor from config, environment, or `vi`
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.hours_dir, "~/hours");
        assert_eq!(config.hand_in_day, 20);
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.limits.max_day_hours, 12.0);
        assert!(config.limits.warn_past_midnight);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
hours_dir = "/srv/hours"
default_format = "json"

[limits]
max_day_hours = 10.0
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hours_dir, "/srv/hours");
        assert_eq!(config.default_format, OutputFormat::Json);
        assert_eq!(config.hand_in_day, 20);
        assert_eq!(config.limits.max_day_hours, 10.0);
        assert!(config.limits.warn_past_midnight);
    }

    #[test]
    fn default_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.hours_dir, Config::default().hours_dir);
        assert_eq!(config.hand_in_day, Config::default().hand_in_day);
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn absolute_hours_dir_is_untouched() {
        let config = Config {
            hours_dir: "/srv/hours".to_string(),
            ..Config::default()
        };
        assert_eq!(config.hours_dir(), PathBuf::from("/srv/hours"));
    }

    #[test]
    fn editor_falls_back_to_env() {
        let config = Config {
            editor: Some("code -w".to_string()),
            ..Config::default()
        };
        assert_eq!(config.editor(), "code -w");
    }
}
