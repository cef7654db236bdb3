//! Multi-year extrapolation of the monthly cost figures.

use serde::Serialize;

/// Cumulative costs at the end of one projection year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    /// Year index, starting at 1.
    pub year: u32,
    /// Cumulative cost without the installation (yen).
    pub baseline_cost: f64,
    /// Cumulative net cost with the installation (yen).
    pub with_solar_cost: f64,
}

impl YearPoint {
    /// Cumulative benefit accrued by the end of this year (yen).
    pub fn cumulative_benefit(&self) -> f64 {
        self.baseline_cost - self.with_solar_cost
    }
}

/// Linear projection of the estimated month over a multi-year horizon.
///
/// Every year repeats the estimated month twelve times; there is no price
/// escalation, panel degradation, or discounting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeProjection {
    /// One point per year, in year order.
    pub years: Vec<YearPoint>,
}

impl CumulativeProjection {
    /// Extrapolates the monthly bill and net cost over `years` years.
    pub fn from_monthly(original_bill: f64, net_monthly_cost: f64, years: u32) -> Self {
        let years = (1..=years)
            .map(|year| YearPoint {
                year,
                baseline_cost: original_bill * 12.0 * f64::from(year),
                with_solar_cost: net_monthly_cost * 12.0 * f64::from(year),
            })
            .collect();
        Self { years }
    }

    /// Number of projected years.
    pub fn horizon_years(&self) -> u32 {
        self.years.last().map_or(0, |p| p.year)
    }

    /// Total benefit over the whole horizon: the cost difference at the
    /// final year.
    pub fn total_benefit(&self) -> f64 {
        self.years.last().map_or(0.0, YearPoint::cumulative_benefit)
    }
}
