//! Shared "extract pipeline" logic used by both output modes.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> extraction -> report/exports
//!
//! The CLI front-ends can then focus on presentation (report vs JSON).

use crate::domain::ExtractConfig;
use crate::error::ExtractError;
use crate::extract::{Extraction, extract_monthly};
use crate::io::ingest::load_observations;

/// All computed outputs of a single `pfm extract` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub extraction: Extraction,
    pub rows_read: usize,
}

/// Execute the full extraction pipeline and return the computed outputs.
pub fn run_extract(config: &ExtractConfig) -> Result<RunOutput, ExtractError> {
    // 1) Tokenize the CSV (collaborator; its failures propagate unchanged).
    let ingest = load_observations(&config.csv_path, config.risk_level)?;

    // 2) Run the pure extraction core.
    let extraction = extract_monthly(&ingest.rows, config.risk_level, config.window_months)?;

    Ok(RunOutput {
        extraction,
        rows_read: ingest.rows_read,
    })
}
