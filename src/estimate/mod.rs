//! End-to-end benefit estimation built on the tariff and allocation models.

/// Scenario-driven monthly estimate.
pub mod pipeline;
/// Multi-year cumulative cost projection.
pub mod projection;
/// Formatted estimate report.
pub mod report;

pub use pipeline::{EstimateError, MonthlyEstimate, estimate_monthly, run_estimate};
pub use projection::{CumulativeProjection, YearPoint};
pub use report::EstimateReport;
