//! CLI argument definitions for the `wpr` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use wpr_model::{DemandMode, PeriodMode};

#[derive(Parser)]
#[command(
    name = "wpr",
    version,
    about = "Weekly productivity report - notes handled per collaborator, day and week",
    long_about = "Build weekly productivity reports from a CSV/XLSX sheet or a spreadsheet share link.\n\n\
                  Prints the weekday grid, yearly totals and support tables, and exports\n\
                  the same figures as XLSX and PDF."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: <config dir>/wpr/config.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow collaborator names and demand text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate a table and print or export the report.
    Report(ReportArgs),

    /// Show how the table's headers resolve to report columns.
    Columns(SourceArgs),
}

#[derive(Parser)]
pub struct SourceArgs {
    /// CSV/XLSX path or share link (default: source.location from config).
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Worksheet name or zero-based index for workbooks.
    #[arg(long = "sheet", value_name = "SHEET")]
    pub sheet: Option<String>,

    /// Download timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Parser)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Reference date (DD/MM/YYYY or YYYY-MM-DD); defaults to the latest record.
    #[arg(long = "date", value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Period granularity.
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Restrict to one calendar year.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Start of an explicit range.
    #[arg(long = "from", value_name = "DATE", value_parser = parse_date, requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of an explicit range.
    #[arg(long = "to", value_name = "DATE", value_parser = parse_date, requires = "from")]
    pub to: Option<NaiveDate>,

    /// ISO week number (weekly mode).
    #[arg(long = "week", value_name = "N")]
    pub week: Option<u32>,

    /// Note types to keep (repeatable; TOTAL keeps all).
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Localities to keep (repeatable; TOTAL keeps all).
    #[arg(long = "locality", value_name = "LOCALITY")]
    pub localities: Vec<String>,

    /// Collaborators to chart (repeatable; default: top N of the period).
    #[arg(long = "collaborator", value_name = "NAME")]
    pub collaborators: Vec<String>,

    /// How many collaborators the chart picks by default.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// How many support tables to build by default.
    #[arg(long = "support-top", value_name = "N")]
    pub support_top: Option<usize>,

    /// Where support table demands come from.
    #[arg(long = "demand-mode", value_enum)]
    pub demand_mode: Option<DemandModeArg>,

    /// Manual demand tag, DATE:NAME=TAG (repeatable).
    #[arg(long = "demand", value_name = "DATE:NAME=TAG")]
    pub demands: Vec<String>,

    /// Write the spreadsheet export here.
    #[arg(long = "xlsx", value_name = "PATH")]
    pub xlsx: Option<PathBuf>,

    /// Write the PDF export here.
    #[arg(long = "pdf", value_name = "PATH")]
    pub pdf: Option<PathBuf>,

    /// Print the view model as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    wpr_common::parse_date_day_first(value).ok_or_else(|| format!("invalid date: {value}"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

impl From<ModeArg> for PeriodMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Weekly => PeriodMode::Weekly,
            ModeArg::Monthly => PeriodMode::Monthly,
            ModeArg::Yearly => PeriodMode::Yearly,
            ModeArg::Custom => PeriodMode::Custom,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DemandModeArg {
    Manual,
    Auto,
    Column,
}

impl From<DemandModeArg> for DemandMode {
    fn from(value: DemandModeArg) -> Self {
        match value {
            DemandModeArg::Manual => DemandMode::Manual,
            DemandModeArg::Auto => DemandMode::Auto,
            DemandModeArg::Column => DemandMode::Column,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
