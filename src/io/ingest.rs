//! CSV ingest: tokenize the export into raw dated observations.
//!
//! This layer is deliberately dumb: it validates the schema (a `Date`
//! column plus the selected risk-strategy column must exist) and hands the
//! extractor one `DatedObservation` per row with the cell text untouched.
//! Date and value parsing live in the extractor so malformed data surfaces
//! with the right error kind and line number.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DatedObservation, RiskLevel};
use crate::error::ExtractError;

/// Column holding the observation date in every export.
pub const DATE_COLUMN: &str = "Date";

/// Ingest output: raw rows plus how many records the file held.
#[derive(Debug, Clone)]
pub struct IngestedRows {
    pub rows: Vec<DatedObservation>,
    pub rows_read: usize,
}

/// Load observations from a CSV file on disk.
pub fn load_observations(path: &Path, risk_level: RiskLevel) -> Result<IngestedRows, ExtractError> {
    let file = File::open(path).map_err(|e| {
        ExtractError::UpstreamRead(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_observations(file, risk_level)
}

/// Tokenize observations from any byte source (file, network body, fixture).
pub fn read_observations<R: Read>(
    reader: R,
    risk_level: RiskLevel,
) -> Result<IngestedRows, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ExtractError::UpstreamRead(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names = header_names(&headers);

    if !names.iter().any(|n| n == DATE_COLUMN) {
        return Err(ExtractError::Validation(format!(
            "CSV file must contain a `{DATE_COLUMN}` column."
        )));
    }
    let column = risk_level.column_name();
    if !names.iter().any(|n| n == column) {
        return Err(ExtractError::Validation(format!(
            "CSV file must contain a `{column}` column (risk level '{}').",
            risk_level.key()
        )));
    }

    let mut rows = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        // Tokenization failures come from the row source, not the core;
        // propagate unchanged.
        let record = result
            .map_err(|e| ExtractError::UpstreamRead(format!("CSV parse error at line {line}: {e}")))?;

        rows.push(to_observation(&record, &names, line));
    }

    Ok(IngestedRows { rows, rows_read })
}

fn to_observation(record: &StringRecord, names: &[String], line: usize) -> DatedObservation {
    let mut date = String::new();
    let mut columns = HashMap::with_capacity(names.len());

    for (idx, name) in names.iter().enumerate() {
        let cell = record.get(idx).unwrap_or("").trim();
        if name == DATE_COLUMN {
            date = cell.to_string();
        }
        columns.insert(name.clone(), cell.to_string());
    }

    DatedObservation { line, date, columns }
}

fn header_names(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(normalize_header_name).collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation would
    // incorrectly report a missing `Date` column.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Date,Dynamic Risk Averse,Dynamic Risk Neutral,Dynamic Risk Loving
2023-01-31,12.0,13.0,14.0
2023-02-28,9.0,9.5,10.0
";

    #[test]
    fn reads_rows_with_full_column_map() {
        let out = read_observations(CSV.as_bytes(), RiskLevel::RiskAverse).unwrap();
        assert_eq!(out.rows_read, 2);
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].line, 2);
        assert_eq!(out.rows[0].date, "2023-01-31");
        assert_eq!(out.rows[0].columns["Dynamic Risk Averse"], "12.0");
        assert_eq!(out.rows[1].columns["Dynamic Risk Loving"], "10.0");
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let csv = "\u{feff}Date,Dynamic Risk Neutral\n2023-01-31,5.0\n";
        let out = read_observations(csv.as_bytes(), RiskLevel::Moderate).unwrap();
        assert_eq!(out.rows[0].date, "2023-01-31");
    }

    #[test]
    fn missing_date_column_is_validation_error() {
        let csv = "Day,Dynamic Risk Averse\n2023-01-31,5.0\n";
        let err = read_observations(csv.as_bytes(), RiskLevel::RiskAverse).unwrap_err();
        assert!(matches!(err, ExtractError::Validation(_)));
    }

    #[test]
    fn missing_risk_column_is_validation_error() {
        let csv = "Date,Dynamic Risk Averse\n2023-01-31,5.0\n";
        let err = read_observations(csv.as_bytes(), RiskLevel::RiskLoving).unwrap_err();
        match err {
            ExtractError::Validation(msg) => assert!(msg.contains("Dynamic Risk Loving")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_upstream_read_error() {
        let err =
            load_observations(Path::new("/no/such/file.csv"), RiskLevel::RiskAverse).unwrap_err();
        assert!(matches!(err, ExtractError::UpstreamRead(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn short_records_are_tolerated() {
        // flexible(true): a truncated trailing row still tokenizes; the
        // extractor reports the missing value per-row.
        let csv = "Date,Dynamic Risk Averse\n2023-01-31,5.0\n2023-02-15\n";
        let out = read_observations(csv.as_bytes(), RiskLevel::RiskAverse).unwrap();
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[1].columns["Dynamic Risk Averse"], "");
    }
}
