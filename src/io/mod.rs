//! Result export in machine-readable formats.

/// CSV and JSON writers for estimate output.
pub mod export;

pub use export::{export_projection_csv, export_report_json};
