//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{maintenance, record, report};
use crate::domain::Month;
use crate::storage::{active_month, Archive, Config, ConfigOutputFormat};

#[derive(Parser)]
#[command(name = "timecard")]
#[command(author, version, about = "Plain-text punch clock for monthly work reports")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Hours directory holding the monthly BRF files
    #[arg(long, global = true, env = "TIMECARD_HOURS_DIR")]
    pub hours_dir: Option<PathBuf>,

    /// Work on the previous month's file
    #[arg(long, short = 'p', global = true, conflicts_with = "next")]
    pub previous: bool,

    /// Work on the next month's file
    #[arg(long, short = 'n', global = true)]
    pub next: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record worked time ranges and tags on a day
    Add(record::AddArgs),

    /// Subtract time ranges from a day
    Remove(record::RemoveArgs),

    /// Print the month (the default command)
    Show {
        /// Print the raw file contents instead of the canonical rendering
        #[arg(long)]
        raw: bool,
    },

    /// Re-merge every day and rewrite the month's file canonically
    Fmt,

    /// Summarize the month
    Stats,

    /// Copy the month's file somewhere else
    Backup {
        /// Destination path
        dest: PathBuf,
    },

    /// Open the month's file in the configured editor
    Edit,

    /// Open the configuration file, generating it first when missing
    Config {
        /// Rewrite the configuration with commented defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Everything a command handler needs: resolved config, the archive, and
/// which month the invocation targets
pub(crate) struct Session<'a> {
    pub output: &'a Output,
    pub config: &'a Config,
    pub archive: Archive,
    pub month: u32,
    pub year: i32,
    pub shift: i32,
    pub now: NaiveDateTime,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli.format.unwrap_or(match config.default_format {
        ConfigOutputFormat::Text => OutputFormat::Text,
        ConfigOutputFormat::Json => OutputFormat::Json,
    });
    let output = Output::new(format, cli.verbose);
    output.verbose("timecard starting");

    let now = Local::now().naive_local();
    let shift = if cli.previous {
        -1
    } else if cli.next {
        1
    } else {
        0
    };
    let (month, year) = active_month(now.date(), config.hand_in_day, shift);

    let hours_dir = cli.hours_dir.clone().unwrap_or_else(|| config.hours_dir());
    output.verbose_ctx("archive", &format!("hours directory: {}", hours_dir.display()));
    output.verbose_ctx(
        "archive",
        &format!("active month: {} {}", Month::name_of(month), year),
    );

    let session = Session {
        output: &output,
        config: &config,
        archive: Archive::new(hours_dir),
        month,
        year,
        shift,
        now,
    };

    match cli.command.unwrap_or(Commands::Show { raw: false }) {
        Commands::Add(args) => record::add(&session, &args),
        Commands::Remove(args) => record::remove(&session, &args),
        Commands::Show { raw } => report::show(&session, raw),
        Commands::Fmt => maintenance::fmt(&session),
        Commands::Stats => report::stats(&session),
        Commands::Backup { dest } => maintenance::backup(&session, &dest),
        Commands::Edit => maintenance::edit(&session),
        Commands::Config { reset } => maintenance::config_cmd(&session, reset),
    }
}
