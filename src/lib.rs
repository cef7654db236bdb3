//! Household solar and battery benefit estimator.
//!
//! Inverts a monthly electricity bill into a usage estimate under a tiered
//! rate schedule, allocates solar generation across day and night usage with
//! a battery throughput cap, and re-prices what is still bought from the
//! grid.

pub mod allocation;
pub mod config;
pub mod estimate;
pub mod io;
pub mod tariff;
