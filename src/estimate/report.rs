//! Printable report combining the scenario, monthly estimate, and projection.

use std::fmt;

use serde::Serialize;

use crate::config::ScenarioConfig;

use super::pipeline::MonthlyEstimate;
use super::projection::CumulativeProjection;

/// Scenario inputs echoed at the top of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    /// Installed panel capacity (kW).
    pub panel_kw: f64,
    /// Assumed monthly generation (kWh).
    pub monthly_generation_kwh: f64,
    /// Usable battery capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Contracted amperage (A).
    pub contracted_amperage: u32,
    /// Export price (yen/kWh).
    pub sell_price_per_kwh: f64,
}

/// Complete output of one estimator run.
///
/// `Display` renders the sectioned text report; the whole struct also
/// serializes to JSON for machine consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub scenario: ScenarioSummary,
    pub monthly: MonthlyEstimate,
    pub projection: CumulativeProjection,
}

impl EstimateReport {
    pub fn new(
        scenario: &ScenarioConfig,
        monthly: MonthlyEstimate,
        projection: CumulativeProjection,
    ) -> Self {
        Self {
            scenario: ScenarioSummary {
                panel_kw: scenario.solar.panel_kw,
                monthly_generation_kwh: scenario.solar.monthly_generation_kwh,
                battery_capacity_kwh: scenario.battery.usable_capacity_kwh,
                contracted_amperage: scenario.billing.contracted_amperage,
                sell_price_per_kwh: scenario.solar.sell_price_per_kwh,
            },
            monthly,
            projection,
        }
    }
}

impl fmt::Display for EstimateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.scenario;
        let m = &self.monthly;

        writeln!(f, "--- Scenario ---")?;
        writeln!(
            f,
            "Panel:                {:.1} kW, {:.1} kWh/month generation",
            s.panel_kw, s.monthly_generation_kwh
        )?;
        writeln!(
            f,
            "Battery:              {:.1} kWh usable, {:.1} kWh/month effective cap",
            s.battery_capacity_kwh, m.battery_cap_kwh
        )?;
        writeln!(
            f,
            "Contract:             {} A, sell price {:.2} yen/kWh",
            s.contracted_amperage, s.sell_price_per_kwh
        )?;
        writeln!(f)?;

        writeln!(f, "--- Monthly Estimate ---")?;
        writeln!(f, "Original usage:       {:.1} kWh", m.original_usage_kwh)?;
        if m.below_base_fee {
            writeln!(
                f,
                "Note: original bill is below the base fee; usage clamped to zero"
            )?;
        }
        writeln!(f, "Original bill:        {:.2} yen", m.original_bill)?;
        writeln!(
            f,
            "Self-consumed day:    {:.1} kWh",
            m.allocation.self_consumed_day_kwh
        )?;
        writeln!(
            f,
            "Self-consumed night:  {:.1} kWh",
            m.allocation.self_consumed_night_kwh
        )?;
        writeln!(f, "Exported:             {:.1} kWh", m.allocation.exported_kwh)?;
        writeln!(f, "Post-install usage:   {:.1} kWh", m.post_usage_kwh)?;
        writeln!(f, "Post-install bill:    {:.2} yen", m.post_bill)?;
        writeln!(f, "Export revenue:       {:.2} yen", m.export_revenue)?;
        writeln!(f, "Net monthly cost:     {:.2} yen", m.net_monthly_cost)?;
        writeln!(f, "Monthly benefit:      {:.2} yen", m.monthly_benefit)?;
        writeln!(f)?;

        let horizon = self.projection.horizon_years();
        writeln!(f, "--- {horizon}-Year Projection ---")?;
        for point in &self.projection.years {
            // Keep the text report short; the CSV carries every year.
            if point.year == 1 || point.year % 5 == 0 || point.year == horizon {
                writeln!(
                    f,
                    "Year {:>2}:  baseline {:>12.0} yen   with solar {:>12.0} yen",
                    point.year, point.baseline_cost, point.with_solar_cost
                )?;
            }
        }
        write!(
            f,
            "Total projected benefit: {:.2} yen",
            self.projection.total_benefit()
        )
    }
}
