//! Monthly allocation of solar generation across day and night usage.
//!
//! The model splits household usage into a daytime and a nighttime share,
//! covers daytime usage directly from generation, shifts part of the excess
//! into the night through a battery, and exports whatever is left.

use std::error::Error;
use std::fmt;

use serde::Serialize;

/// How one month of generation was allocated (all kWh).
///
/// # Conservation
///
/// For any valid input, `self_consumed_total_kwh + exported_kwh` equals the
/// generation and `self_consumed_total_kwh + residual_usage_kwh` equals the
/// usage, with every field non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationResult {
    /// Generation consumed directly during the day.
    pub self_consumed_day_kwh: f64,
    /// Generation shifted through the battery into nighttime usage.
    pub self_consumed_night_kwh: f64,
    /// Sum of the day and night self-consumption.
    pub self_consumed_total_kwh: f64,
    /// Surplus generation exported to the grid.
    pub exported_kwh: f64,
    /// Usage still purchased from the grid after self-consumption.
    pub residual_usage_kwh: f64,
}

/// Parameters of the monthly self-consumption model.
///
/// Daytime usage is `usage * day_usage_share`; the rest is nighttime usage.
/// Direct daytime coverage is capped at `generation *
/// day_self_consumption_ratio`, and battery-shifted night coverage is capped
/// at the effective monthly throughput of the battery.
#[derive(Debug, Clone, Copy)]
pub struct SelfConsumptionModel {
    day_usage_share: f64,
    day_self_consumption_ratio: f64,
    battery_capacity_kwh: f64,
    battery_efficiency: f64,
    cycles_per_month: f64,
}

impl SelfConsumptionModel {
    /// Builds a model from its five parameters.
    ///
    /// # Arguments
    ///
    /// * `day_usage_share` - fraction of usage that falls during the day,
    ///   in `[0, 1]`
    /// * `day_self_consumption_ratio` - fraction of generation consumable
    ///   directly during the day, in `[0, 1]`
    /// * `battery_capacity_kwh` - usable battery capacity (kWh), >= 0
    /// * `battery_efficiency` - round-trip efficiency, in `(0, 1]`
    /// * `cycles_per_month` - full charge cycles per month, >= 0
    ///
    /// # Errors
    ///
    /// Returns the matching [`AllocationError`] variant when a parameter is
    /// out of range.
    pub fn new(
        day_usage_share: f64,
        day_self_consumption_ratio: f64,
        battery_capacity_kwh: f64,
        battery_efficiency: f64,
        cycles_per_month: f64,
    ) -> Result<Self, AllocationError> {
        if !(0.0..=1.0).contains(&day_usage_share) {
            return Err(AllocationError::DayShareOutOfRange(day_usage_share));
        }
        if !(0.0..=1.0).contains(&day_self_consumption_ratio) {
            return Err(AllocationError::RatioOutOfRange(day_self_consumption_ratio));
        }
        if battery_capacity_kwh < 0.0 {
            return Err(AllocationError::NegativeBatteryCapacity(battery_capacity_kwh));
        }
        if !(battery_efficiency > 0.0 && battery_efficiency <= 1.0) {
            return Err(AllocationError::EfficiencyOutOfRange(battery_efficiency));
        }
        if cycles_per_month < 0.0 {
            return Err(AllocationError::NegativeCycles(cycles_per_month));
        }
        Ok(Self {
            day_usage_share,
            day_self_consumption_ratio,
            battery_capacity_kwh,
            battery_efficiency,
            cycles_per_month,
        })
    }

    /// Effective monthly battery throughput (kWh): capacity derated by the
    /// round-trip efficiency, times the monthly cycle count.
    pub fn monthly_battery_cap_kwh(&self) -> f64 {
        self.battery_capacity_kwh * self.battery_efficiency * self.cycles_per_month
    }

    /// Allocates one month of generation against one month of usage.
    ///
    /// Daytime coverage is the tighter of daytime usage and directly
    /// consumable generation. Night coverage is the tightest of nighttime
    /// usage, the excess left after the day, and the monthly battery cap.
    /// Everything not consumed is exported.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NegativeUsage`] or
    /// [`AllocationError::NegativeGeneration`] for negative input.
    pub fn allocate(
        &self,
        usage_kwh: f64,
        generation_kwh: f64,
    ) -> Result<AllocationResult, AllocationError> {
        if usage_kwh < 0.0 {
            return Err(AllocationError::NegativeUsage(usage_kwh));
        }
        if generation_kwh < 0.0 {
            return Err(AllocationError::NegativeGeneration(generation_kwh));
        }

        let day_usage_kwh = usage_kwh * self.day_usage_share;
        let night_usage_kwh = usage_kwh - day_usage_kwh;

        // 1. Direct daytime coverage.
        let day_kwh = day_usage_kwh.min(generation_kwh * self.day_self_consumption_ratio);

        // 2. Battery-shifted night coverage from the remaining excess.
        let excess_kwh = generation_kwh - day_kwh;
        let night_kwh = night_usage_kwh
            .min(excess_kwh)
            .min(self.monthly_battery_cap_kwh());

        // 3. Export what the battery did not absorb; purchase what neither
        //    covered. Subtracting each term from its own min bound keeps
        //    every field non-negative in floating point.
        Ok(AllocationResult {
            self_consumed_day_kwh: day_kwh,
            self_consumed_night_kwh: night_kwh,
            self_consumed_total_kwh: day_kwh + night_kwh,
            exported_kwh: excess_kwh - night_kwh,
            residual_usage_kwh: (day_usage_kwh - day_kwh) + (night_usage_kwh - night_kwh),
        })
    }
}

/// Failures raised by model construction and allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Day usage share outside `[0, 1]`.
    DayShareOutOfRange(f64),
    /// Day self-consumption ratio outside `[0, 1]`.
    RatioOutOfRange(f64),
    /// Negative battery capacity.
    NegativeBatteryCapacity(f64),
    /// Battery efficiency outside `(0, 1]`.
    EfficiencyOutOfRange(f64),
    /// Negative monthly cycle count.
    NegativeCycles(f64),
    /// Negative monthly usage.
    NegativeUsage(f64),
    /// Negative monthly generation.
    NegativeGeneration(f64),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayShareOutOfRange(v) => {
                write!(f, "day usage share must be in [0, 1], got {v}")
            }
            Self::RatioOutOfRange(v) => {
                write!(f, "day self-consumption ratio must be in [0, 1], got {v}")
            }
            Self::NegativeBatteryCapacity(v) => {
                write!(f, "battery capacity must be non-negative, got {v} kWh")
            }
            Self::EfficiencyOutOfRange(v) => {
                write!(f, "battery efficiency must be in (0, 1], got {v}")
            }
            Self::NegativeCycles(v) => {
                write!(f, "cycles per month must be non-negative, got {v}")
            }
            Self::NegativeUsage(v) => {
                write!(f, "usage must be non-negative, got {v} kWh")
            }
            Self::NegativeGeneration(v) => {
                write!(f, "generation must be non-negative, got {v} kWh")
            }
        }
    }
}

impl Error for AllocationError {}
