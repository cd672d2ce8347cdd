//! CLI argument definitions for the CIN validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cin_model::ErrorId;

#[derive(Parser)]
#[command(
    name = "cin-validator",
    version,
    about = "Validate CIN census returns against the yearly rule sets",
    long_about = "Validate a Children in Need census return.\n\n\
                  Reads one CSV per census table from a folder, runs every rule of the\n\
                  selected census year and reports violations, queries and rules that\n\
                  could not run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a census folder.
    Validate(ValidateArgs),

    /// List the effective rules of a census year.
    Rules(RulesArgs),

    /// List the registered census years, oldest first.
    Rulesets,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder holding one CSV per census table (Header.csv, CINdetails.csv, ...).
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    /// Census year to validate against (default: latest).
    #[arg(long = "ruleset", value_name = "YEAR")]
    pub ruleset: Option<String>,

    /// Only report violations for this key, e.g. "child1, 2022-01-05, NA".
    ///
    /// Elements are split on "," and "NA" means absent, so a key whose values
    /// contain a comma or the literal text NA cannot be selected.
    #[arg(long = "error-id", value_name = "KEY")]
    pub error_id: Option<ErrorId>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Census year to list (default: latest).
    #[arg(long = "ruleset", value_name = "YEAR")]
    pub ruleset: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
