//! CLI argument definitions for the voter warehouse importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use vw_warehouse::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(
    name = "voterwarehouse",
    version,
    about = "Voter Warehouse - Import state voter registration and history exports",
    long_about = "Import state voter registration and voter history exports into a warehouse.\n\n\
                  Reads the zip archives published by Florida, Georgia and North Carolina,\n\
                  normalizes dates, suppressed values and code lookups, and writes the rows\n\
                  in batched transactions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include voter row values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a state export archive.
    Import(ImportArgs),

    /// List supported states and their import types.
    States,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// State the archive was published by.
    #[arg(short = 's', long = "state", default_value = "Florida")]
    pub state: String,

    /// Kind of records in the archive (voters or histories).
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub import_type: String,

    /// Zip archive to import.
    #[arg(short = 'f', long = "file", value_name = "ZIP")]
    pub file: PathBuf,

    /// Warehouse configuration file.
    #[arg(short = 'c', long = "config", value_name = "YAML", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print the import summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
