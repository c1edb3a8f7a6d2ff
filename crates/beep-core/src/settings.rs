use clap::Parser;
use std::path::PathBuf;

use crate::dates::ReferenceDate;
use crate::models::ReadOptions;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Cumulative beep counts from the Big Beep Theory log
#[derive(Parser, Debug, Clone)]
#[command(
    name = "big-beep",
    about = "Cumulative beep counts from the Big Beep Theory log",
    version
)]
pub struct Settings {
    /// Path to the beep CSV
    #[arg(long, default_value = "data/The Big Beep Theory - BEEP.csv")]
    pub data: PathBuf,

    /// Directory the figures are written to
    #[arg(long, default_value = "figures")]
    pub out_dir: PathBuf,

    /// Date mapped to day zero (YYYY-MM-DD)
    #[arg(long, default_value = "2022-05-09", value_parser = parse_reference_date)]
    pub reference_date: ReferenceDate,

    /// Keep `D/M/YY` day keys in the JSON dump instead of day offsets
    #[arg(long)]
    pub calendar_dates: bool,

    /// Convert times to seconds past midnight in the JSON dump
    #[arg(long)]
    pub absolute_times: bool,

    /// Print the normalised dataset as JSON on stdout
    #[arg(long)]
    pub dump_json: bool,

    /// Skip rendering the figures
    #[arg(long)]
    pub no_plots: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but from an explicit argument list.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Options for the dumped dataset. The figures always use day offsets.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            absolute_dates: !self.calendar_dates,
            absolute_times: self.absolute_times,
            reference: self.reference_date,
        }
    }
}

fn parse_reference_date(s: &str) -> Result<ReferenceDate, String> {
    s.parse::<ReferenceDate>().map_err(|e| e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
