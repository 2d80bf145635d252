//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the risk-strategy selector (`RiskLevel`)
//! - raw input rows (`DatedObservation`)
//! - aggregation state (`MonthKey`, `MonthBucket`)
//! - final output points (`MonthPoint`, `MonthlySeries`)

pub mod types;

pub use types::*;
