//! The estimation pipeline: bill to usage, allocation, and re-billing.

use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::allocation::{AllocationError, AllocationResult, SelfConsumptionModel};
use crate::config::ScenarioConfig;
use crate::tariff::{RateSchedule, TariffError};

use super::projection::CumulativeProjection;
use super::report::EstimateReport;

/// Monthly before-and-after figures for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyEstimate {
    /// Usage recovered from the original bill (kWh).
    pub original_usage_kwh: f64,
    /// Original monthly bill as supplied (yen).
    pub original_bill: f64,
    /// True when the original bill did not cover the base fee.
    pub below_base_fee: bool,
    /// How generation was split across day and night usage.
    pub allocation: AllocationResult,
    /// Effective monthly battery throughput cap (kWh).
    pub battery_cap_kwh: f64,
    /// Grid purchase after self-consumption (kWh).
    pub post_usage_kwh: f64,
    /// Monthly bill recomputed for the reduced purchase (yen).
    pub post_bill: f64,
    /// Income from the exported surplus (yen).
    pub export_revenue: f64,
    /// Post-install bill minus export revenue (yen).
    pub net_monthly_cost: f64,
    /// Bill reduction plus export revenue (yen).
    pub monthly_benefit: f64,
}

/// Computes the monthly before-and-after estimate for a scenario.
///
/// # Errors
///
/// Returns [`EstimateError`] when the tariff cannot be built from the
/// scenario, a conversion input is out of range, or the allocation model
/// rejects its parameters. Scenarios that pass
/// [`ScenarioConfig::validate`](crate::config::ScenarioConfig::validate)
/// do not hit these.
pub fn estimate_monthly(scenario: &ScenarioConfig) -> Result<MonthlyEstimate, EstimateError> {
    let schedule = RateSchedule::new(
        scenario.billing.contracted_amperage,
        [
            scenario.rates.tier1,
            scenario.rates.tier2,
            scenario.rates.tier3,
        ],
        scenario.rates.fuel_adjustment,
        scenario.rates.renewable_surcharge,
    )?;
    let model = SelfConsumptionModel::new(
        scenario.household.day_usage_share,
        scenario.solar.day_self_consumption_pct / 100.0,
        scenario.battery.usable_capacity_kwh,
        scenario.battery.efficiency,
        scenario.battery.cycles_per_month,
    )?;

    // 1. Invert the supplied bill into a baseline usage estimate.
    let inversion = schedule.usage_from_bill(scenario.billing.monthly_bill)?;

    // 2. Allocate generation across that usage.
    let allocation = model.allocate(
        inversion.usage_kwh,
        scenario.solar.monthly_generation_kwh,
    )?;

    // 3. Re-bill the residual grid purchase under the same schedule.
    let post_bill = schedule.bill_from_usage(allocation.residual_usage_kwh)?;

    // 4. Derive the economics.
    let export_revenue = allocation.exported_kwh * scenario.solar.sell_price_per_kwh;
    let net_monthly_cost = post_bill - export_revenue;
    let monthly_benefit = (scenario.billing.monthly_bill - post_bill) + export_revenue;

    Ok(MonthlyEstimate {
        original_usage_kwh: inversion.usage_kwh,
        original_bill: scenario.billing.monthly_bill,
        below_base_fee: inversion.below_base_fee,
        allocation,
        battery_cap_kwh: model.monthly_battery_cap_kwh(),
        post_usage_kwh: allocation.residual_usage_kwh,
        post_bill,
        export_revenue,
        net_monthly_cost,
        monthly_benefit,
    })
}

/// Runs the full pipeline for a scenario: monthly estimate plus the
/// multi-year projection, packaged as a printable report.
///
/// # Errors
///
/// Propagates any [`EstimateError`] from [`estimate_monthly`].
pub fn run_estimate(scenario: &ScenarioConfig) -> Result<EstimateReport, EstimateError> {
    let monthly = estimate_monthly(scenario)?;
    let projection = CumulativeProjection::from_monthly(
        monthly.original_bill,
        monthly.net_monthly_cost,
        scenario.projection.years,
    );
    Ok(EstimateReport::new(scenario, monthly, projection))
}

/// Failure anywhere in the estimation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// The rate schedule rejected the scenario or a conversion input.
    Tariff(TariffError),
    /// The self-consumption model rejected the scenario or its inputs.
    Allocation(AllocationError),
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tariff(e) => write!(f, "tariff: {e}"),
            Self::Allocation(e) => write!(f, "allocation: {e}"),
        }
    }
}

impl Error for EstimateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tariff(e) => Some(e),
            Self::Allocation(e) => Some(e),
        }
    }
}

impl From<TariffError> for EstimateError {
    fn from(e: TariffError) -> Self {
        Self::Tariff(e)
    }
}

impl From<AllocationError> for EstimateError {
    fn from(e: AllocationError) -> Self {
        Self::Allocation(e)
    }
}
