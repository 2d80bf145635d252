//! Monthly series extraction (the core pipeline).
//!
//! Turns an arbitrary-length, arbitrarily-dated sequence of observations
//! into the trailing window of complete calendar months for one
//! risk-strategy column:
//!
//! `Validate → Sort → Aggregate → CheckTrailingCompleteness → Window&Format`
//!
//! Design goals:
//! - **Pure**: no I/O, no shared state; the row source is a collaborator
//! - **Row-level issue reporting** (skip bad values, but report what happened)
//! - **No silent coercion**: a month never reaches the output with a made-up value
//! - **Deterministic**: same rows in, same series out

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{
    DatedObservation, MonthBucket, MonthKey, MonthPoint, MonthlySeries, RiskLevel, RowIssue,
};
use crate::error::ExtractError;

/// Default reporting window (one year of complete months).
pub const DEFAULT_WINDOW_MONTHS: usize = 12;

/// Everything a single extraction run produced, beyond the series itself.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub series: MonthlySeries,
    /// Latest observation date in the whole dataset.
    pub latest_date: NaiveDate,
    /// Complete months available after the trailing-month check, before windowing.
    pub months_available: usize,
    /// Trailing month removed because its last observation fell short of month-end.
    pub dropped_incomplete: Option<MonthKey>,
    /// Rows whose selected-column value was missing or non-numeric.
    pub row_issues: Vec<RowIssue>,
    /// Rows that contributed a qualifying value to some bucket's race.
    pub rows_used: usize,
}

/// Run the full extraction over already-tokenized rows.
///
/// `window` is the maximum number of trailing complete months to return;
/// fewer is valid when the data spans less. Errors follow the taxonomy in
/// [`ExtractError`]; no partial output is ever returned.
pub fn extract_monthly(
    rows: &[DatedObservation],
    risk_level: RiskLevel,
    window: usize,
) -> Result<Extraction, ExtractError> {
    if rows.is_empty() {
        return Err(ExtractError::Validation(
            "No input rows to extract.".to_string(),
        ));
    }
    if window == 0 {
        return Err(ExtractError::Validation(
            "Window must be at least 1 month.".to_string(),
        ));
    }

    let sorted = sort_by_date(rows)?;
    let aggregated = aggregate_months(&sorted, risk_level);

    // The globally latest date decides trailing-month completeness, whether
    // or not that row carried a usable value.
    let latest_date = sorted
        .last()
        .map(|(date, _)| *date)
        .ok_or_else(|| ExtractError::Validation("No input rows to extract.".to_string()))?;

    let trailing = MonthKey::from_date(latest_date);
    let trailing_complete = trailing.last_day() == Some(latest_date);

    let mut observed = aggregated.observed;
    let dropped_incomplete = if trailing_complete {
        None
    } else {
        observed.remove(&trailing);
        Some(trailing)
    };

    let series = window_series(&observed, &aggregated.buckets, risk_level, window)?;

    Ok(Extraction {
        series,
        latest_date,
        months_available: observed.len(),
        dropped_incomplete,
        row_issues: aggregated.issues,
        rows_used: aggregated.rows_used,
    })
}

/// Parse every row's date and stable-sort ascending.
///
/// Stability matters: rows sharing a date keep their original relative
/// order, and aggregation only overwrites on a *strictly* later date, so
/// the first row of a duplicated date wins.
fn sort_by_date<'a>(
    rows: &'a [DatedObservation],
) -> Result<Vec<(NaiveDate, &'a DatedObservation)>, ExtractError> {
    let mut dated = Vec::with_capacity(rows.len());
    for row in rows {
        let date = parse_date(&row.date).map_err(|message| ExtractError::MalformedDate {
            line: row.line,
            message,
        })?;
        dated.push((date, row));
    }
    dated.sort_by_key(|(date, _)| *date);
    Ok(dated)
}

struct Aggregated {
    buckets: BTreeMap<MonthKey, MonthBucket>,
    /// Every month that appeared in the input, usable value or not.
    observed: BTreeSet<MonthKey>,
    issues: Vec<RowIssue>,
    rows_used: usize,
}

/// Single pass over the sorted rows, keeping one bucket per calendar month.
///
/// "Last observation wins": a bucket is overwritten only when the
/// observation's date is strictly later than the stored one. Rows whose
/// selected column is missing or non-numeric are skipped and reported;
/// they never coerce to zero.
fn aggregate_months(sorted: &[(NaiveDate, &DatedObservation)], risk_level: RiskLevel) -> Aggregated {
    let column = risk_level.column_name();

    let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    let mut observed = BTreeSet::new();
    let mut issues = Vec::new();
    let mut rows_used = 0usize;

    for &(date, row) in sorted {
        let key = MonthKey::from_date(date);
        observed.insert(key);

        let raw = row
            .columns
            .get(column)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());

        let Some(raw) = raw else {
            issues.push(RowIssue {
                line: row.line,
                message: format!("Missing `{column}` value."),
            });
            continue;
        };

        let Some(value) = parse_value(raw) else {
            issues.push(RowIssue {
                line: row.line,
                message: format!("Non-numeric `{column}` value '{raw}'."),
            });
            continue;
        };

        rows_used += 1;
        match buckets.get_mut(&key) {
            Some(bucket) if date <= bucket.date => {}
            Some(bucket) => {
                bucket.date = date;
                bucket.value = value;
            }
            None => {
                buckets.insert(key, MonthBucket { key, date, value });
            }
        }
    }

    Aggregated {
        buckets,
        observed,
        issues,
        rows_used,
    }
}

/// Take the final `window` months ascending and shape them for the consumer.
///
/// The window is taken over *observed* months: if a retained month has no
/// qualifying value at all, dropping it silently would shift the window and
/// hide data loss, so that is a hard error instead.
fn window_series(
    observed: &BTreeSet<MonthKey>,
    buckets: &BTreeMap<MonthKey, MonthBucket>,
    risk_level: RiskLevel,
    window: usize,
) -> Result<MonthlySeries, ExtractError> {
    let skip = observed.len().saturating_sub(window);

    let mut data = Vec::with_capacity(observed.len().min(window));
    for key in observed.iter().skip(skip) {
        let bucket = buckets.get(key).ok_or_else(|| {
            ExtractError::MalformedValue(format!(
                "No usable `{}` value for {} (every row in that month was malformed).",
                risk_level.column_name(),
                key.label()
            ))
        })?;
        data.push(MonthPoint {
            name: key.label(),
            value: bucket.value,
        });
    }

    Ok(MonthlySeries { data })
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm for these exports, but spreadsheet round-trips
    // produce a few common variants. Keep the accepted set small and
    // deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    let s = s.trim();
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_value(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
