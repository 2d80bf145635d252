//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during extraction
//! - exported to JSON/CSV
//! - consumed directly by a charting layer

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Which risk-strategy column to extract.
///
/// The key → source-column mapping is fixed; unknown keys are rejected,
/// never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[value(name = "risk_averse")]
    RiskAverse,
    #[value(name = "moderate")]
    Moderate,
    #[value(name = "risk_loving")]
    RiskLoving,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [
        RiskLevel::RiskAverse,
        RiskLevel::Moderate,
        RiskLevel::RiskLoving,
    ];

    /// Stable key used on the wire and the CLI.
    pub fn key(self) -> &'static str {
        match self {
            RiskLevel::RiskAverse => "risk_averse",
            RiskLevel::Moderate => "moderate",
            RiskLevel::RiskLoving => "risk_loving",
        }
    }

    /// CSV column holding this strategy's values.
    pub fn column_name(self) -> &'static str {
        match self {
            RiskLevel::RiskAverse => "Dynamic Risk Averse",
            RiskLevel::Moderate => "Dynamic Risk Neutral",
            RiskLevel::RiskLoving => "Dynamic Risk Loving",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::RiskAverse => "Risk Averse (Conservative)",
            RiskLevel::Moderate => "Risk Neutral (Balanced)",
            RiskLevel::RiskLoving => "Risk Loving (Aggressive)",
        }
    }

    /// Resolve a textual key. Unknown keys are a validation error.
    pub fn parse(key: &str) -> Result<RiskLevel, ExtractError> {
        RiskLevel::ALL
            .into_iter()
            .find(|r| r.key() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = RiskLevel::ALL.iter().map(|r| r.key()).collect();
                ExtractError::Validation(format!(
                    "Invalid risk level '{key}'. Must be one of: {}.",
                    known.join(", ")
                ))
            })
    }
}

/// A raw input row: an unparsed date plus the full column map.
///
/// Date and value parsing happen inside the extractor so that malformed
/// data surfaces with the right error kind and line number; the row source
/// only tokenizes.
#[derive(Debug, Clone)]
pub struct DatedObservation {
    /// 1-based source line, for diagnostics.
    pub line: usize,
    /// Raw date field text.
    pub date: String,
    /// Column name → raw cell text.
    pub columns: HashMap<String, String>,
}

/// A (year, month) grouping key.
///
/// Derives `Ord` on (year, month) so a `BTreeMap<MonthKey, _>` iterates in
/// calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> MonthKey {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Three-letter month abbreviation plus four-digit year, e.g. "Mar 2024".
    pub fn label(self) -> String {
        // Day 1 always exists for a key built from a real date.
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%b %Y").to_string(),
            None => format!("{:04}-{:02}", self.year, self.month),
        }
    }

    /// True calendar last day of this month (proleptic Gregorian; leap
    /// years via chrono).
    pub fn last_day(self) -> Option<NaiveDate> {
        let (ny, nm) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One calendar month's representative observation during aggregation.
///
/// Invariant: `date` is the latest qualifying observation date seen so far
/// for this month ("last observation wins").
#[derive(Debug, Clone)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub date: NaiveDate,
    pub value: f64,
}

/// One output data point, shaped for the charting consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub name: String,
    pub value: f64,
}

/// The windowed output series: `{"data":[{"name","value"},...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub data: Vec<MonthPoint>,
}

/// A row-level data-quality issue that did not abort the extraction.
#[derive(Debug, Clone)]
pub struct RowIssue {
    pub line: usize,
    pub message: String,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub csv_path: PathBuf,
    pub risk_level: RiskLevel,
    /// Number of trailing complete months to report.
    pub window_months: usize,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}
