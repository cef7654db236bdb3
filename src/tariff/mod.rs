//! Residential tariff model: base fees, tiered rates, and bill conversion.

/// Bill-to-usage and usage-to-bill conversion.
pub mod billing;
/// Base-fee table and the tiered rate schedule.
pub mod schedule;

pub use billing::BillInversion;
pub use schedule::{CONTRACT_AMPERAGES, RateSchedule, TariffError, TierBand};
