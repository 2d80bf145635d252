//! Command-line parsing for the monthly series extractor.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the extraction code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RiskLevel;
use crate::extract::DEFAULT_WINDOW_MONTHS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pfm", version, about = "Portfolio monthly series extractor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the trailing monthly series and print a full report.
    Extract(ExtractArgs),
    /// Print only the series JSON (`{"data":[...]}`) — useful for scripting.
    Json(ExtractArgs),
}

/// Common options for extraction.
#[derive(Debug, Parser, Clone)]
pub struct ExtractArgs {
    /// Time-series CSV export (must contain `Date` plus the risk-strategy columns).
    #[arg(short = 'c', long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Risk strategy selecting which column to extract.
    #[arg(short = 'r', long, value_enum)]
    pub risk_level: RiskLevel,

    /// Number of trailing complete months to report.
    #[arg(long, default_value_t = DEFAULT_WINDOW_MONTHS)]
    pub months: usize,

    /// Export the series JSON to a file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export the series to a two-column CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}
