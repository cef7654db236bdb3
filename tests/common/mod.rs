//! Shared test fixtures for integration tests.

use solar_estimate::allocation::SelfConsumptionModel;
use solar_estimate::tariff::RateSchedule;

/// Default rate schedule (30 A, standard tier rates, 4.80 fuel adjustment,
/// 3.49 renewable surcharge).
pub fn default_schedule() -> RateSchedule {
    RateSchedule::new(30, [30.0, 36.6, 40.69], 4.80, 3.49)
        .expect("default schedule should build")
}

/// Rate schedule with the standard tier rates but a different amperage.
pub fn schedule_for_amperage(amperage: u32) -> RateSchedule {
    RateSchedule::new(amperage, [30.0, 36.6, 40.69], 4.80, 3.49)
        .expect("schedule should build for a known amperage")
}

/// Default allocation model (30% day usage, 35% direct self-consumption,
/// 9.8 kWh battery at 88% efficiency, 30 cycles/month).
pub fn default_model() -> SelfConsumptionModel {
    SelfConsumptionModel::new(0.30, 0.35, 9.8, 0.88, 30.0)
        .expect("default model should build")
}

/// Allocation model without a battery; only daytime coverage applies.
pub fn batteryless_model() -> SelfConsumptionModel {
    SelfConsumptionModel::new(0.30, 0.35, 0.0, 0.88, 30.0)
        .expect("batteryless model should build")
}
