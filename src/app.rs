//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the ingest + extraction pipeline
//! - prints the report or the series JSON
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ExtractArgs};
use crate::domain::ExtractConfig;
use crate::error::ExtractError;

pub mod pipeline;

/// Entry point for the `pfm` binary.
pub fn run() -> Result<(), ExtractError> {
    // We want `pfm --csv data.csv -r risk_averse` to behave like
    // `pfm extract --csv data.csv -r risk_averse`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Extract(args) => handle_extract(args, OutputMode::Full),
        Command::Json(args) => handle_extract(args, OutputMode::JsonOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    JsonOnly,
}

fn handle_extract(args: ExtractArgs, mode: OutputMode) -> Result<(), ExtractError> {
    let config = extract_config_from_args(&args);
    let run = pipeline::run_extract(&config)?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.extraction, run.rows_read, &config)
            );
        }
        OutputMode::JsonOnly => {
            let json = serde_json::to_string(&run.extraction.series)
                .map_err(|e| ExtractError::UpstreamRead(format!("Failed to encode JSON: {e}")))?;
            println!("{json}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::export::write_series_json(path, &run.extraction.series)?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_series_csv(path, &run.extraction.series)?;
    }

    Ok(())
}

pub fn extract_config_from_args(args: &ExtractArgs) -> ExtractConfig {
    ExtractConfig {
        csv_path: args.csv.clone(),
        risk_level: args.risk_level,
        window_months: args.months,
        export_json: args.export.clone(),
        export_csv: args.export_csv.clone(),
    }
}

/// Rewrite argv so `pfm <flags>` defaults to `pfm extract <flags>`.
///
/// Rules:
/// - `pfm --csv x -r y ...`    -> `pfm extract --csv x -r y ...`
/// - `pfm --help/--version/-h` -> unchanged (show top-level help/version)
/// - `pfm extract/json ...`    -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "extract" | "json");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "extract flags".
    if arg1.starts_with('-') {
        argv.insert(1, "extract".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
