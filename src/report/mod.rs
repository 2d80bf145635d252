//! Formatted terminal output for an extraction run.
//!
//! We keep formatting code in one place so:
//! - the extraction core stays clean and testable
//! - output changes are localized

use crate::domain::{ExtractConfig, MonthlySeries};
use crate::extract::Extraction;

/// How many row issues to print before truncating the list.
const MAX_ISSUES_SHOWN: usize = 10;

/// Format the full run summary (dataset stats + window + issues + table).
pub fn format_run_summary(extraction: &Extraction, rows_read: usize, config: &ExtractConfig) -> String {
    let mut out = String::new();

    out.push_str("=== pfm - Monthly Series Extract ===\n");
    out.push_str(&format!("Source: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Risk level: {} (column `{}`)\n",
        config.risk_level.display_name(),
        config.risk_level.column_name()
    ));
    out.push_str(&format!(
        "Rows: read={} | used={}\n",
        rows_read, extraction.rows_used
    ));
    out.push_str(&format!("Latest observation: {}\n", extraction.latest_date));

    if let Some(dropped) = extraction.dropped_incomplete {
        out.push_str(&format!(
            "Note: {dropped} dropped (last observation {} is not month-end).\n",
            extraction.latest_date
        ));
    }

    out.push_str(&format!(
        "Window: last {} of {} complete months -> {} point(s)\n",
        config.window_months,
        extraction.months_available,
        extraction.series.data.len()
    ));

    if !extraction.row_issues.is_empty() {
        out.push_str(&format!("\nRow issues ({}):\n", extraction.row_issues.len()));
        for issue in extraction.row_issues.iter().take(MAX_ISSUES_SHOWN) {
            out.push_str(&format!("- line {}: {}\n", issue.line, issue.message));
        }
        let hidden = extraction.row_issues.len().saturating_sub(MAX_ISSUES_SHOWN);
        if hidden > 0 {
            out.push_str(&format!("- ... and {hidden} more\n"));
        }
    }

    out.push('\n');
    out.push_str(&format_series_table(&extraction.series));
    out
}

/// Format the month/value table.
pub fn format_series_table(series: &MonthlySeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>14}\n", "month", "value"));
    out.push_str(&format!("{:-<10} {:-<14}\n", "", ""));
    for point in &series.data {
        // Display the value unrounded; the export contract forbids rounding
        // and the table should not disagree with the files.
        out.push_str(&format!("{:<10} {:>14}\n", point.name, point.value));
    }
    out
}
