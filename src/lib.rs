//! `pf-monthly` library crate.
//!
//! The binary (`pfm`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., a future serving layer can call
//!   `extract::extract_monthly` directly)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod report;
