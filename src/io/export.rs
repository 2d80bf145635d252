//! Export the windowed series to files.
//!
//! JSON matches the wire shape the charting layer consumes:
//! `{"data":[{"name":"Jan 2023","value":12.0},...]}`. CSV is meant to be
//! easy to open in spreadsheets or feed to downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::MonthlySeries;
use crate::error::ExtractError;

/// Write the series as pretty-printed JSON.
pub fn write_series_json(path: &Path, series: &MonthlySeries) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|e| {
        ExtractError::UpstreamRead(format!("Failed to create JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, series)
        .map_err(|e| ExtractError::UpstreamRead(format!("Failed to write JSON: {e}")))?;

    Ok(())
}

/// Write the series as a two-column CSV.
pub fn write_series_csv(path: &Path, series: &MonthlySeries) -> Result<(), ExtractError> {
    let mut file = File::create(path).map_err(|e| {
        ExtractError::UpstreamRead(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "month,value")
        .map_err(|e| ExtractError::UpstreamRead(format!("Failed to write CSV header: {e}")))?;

    for point in &series.data {
        // Values go out unchanged; no rounding.
        writeln!(file, "{},{}", point.name, point.value)
            .map_err(|e| ExtractError::UpstreamRead(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthPoint;

    #[test]
    fn json_shape_matches_consumer_contract() {
        let series = MonthlySeries {
            data: vec![
                MonthPoint { name: "Jan 2023".to_string(), value: 12.0 },
                MonthPoint { name: "Feb 2023".to_string(), value: 9.25 },
            ],
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["data"][0]["name"], "Jan 2023");
        assert_eq!(json["data"][0]["value"], 12.0);
        assert_eq!(json["data"][1]["value"], 9.25);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn series_round_trips_through_json() {
        let series = MonthlySeries {
            data: vec![MonthPoint { name: "Mar 2024".to_string(), value: 101.375 }],
        };
        let text = serde_json::to_string(&series).unwrap();
        let back: MonthlySeries = serde_json::from_str(&text).unwrap();
        assert_eq!(back, series);
    }
}
