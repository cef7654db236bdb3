//! Contracted-capacity base fees and the tiered volumetric rate table.

use std::error::Error;
use std::fmt;

/// Contracted amperages recognized by the base-fee table (A).
pub const CONTRACT_AMPERAGES: [u32; 7] = [10, 15, 20, 30, 40, 50, 60];

/// Monthly base fee for each contracted amperage, in the same order as
/// [`CONTRACT_AMPERAGES`].
const BASE_FEES: [f64; 7] = [
    311.52, 467.28, 623.04, 934.56, 1246.08, 1557.60, 1869.12,
];

/// Usage span of the first tier (kWh).
pub const TIER1_SPAN_KWH: f64 = 120.0;
/// Usage span of the second tier (kWh); the tier ends at 300 kWh cumulative.
pub const TIER2_SPAN_KWH: f64 = 180.0;

/// Returns the monthly base fee for a contracted amperage.
///
/// # Errors
///
/// Returns [`TariffError::UnknownAmperage`] if the amperage is not one of
/// [`CONTRACT_AMPERAGES`]. The lookup never falls back to a zero fee.
pub fn base_fee(amperage: u32) -> Result<f64, TariffError> {
    CONTRACT_AMPERAGES
        .iter()
        .position(|&a| a == amperage)
        .map(|i| BASE_FEES[i])
        .ok_or(TariffError::UnknownAmperage(amperage))
}

/// One volumetric price band.
///
/// `span_kwh` is the usage the band covers; `None` marks the final,
/// unbounded band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBand {
    /// Width of the band (kWh), or `None` for the open-ended last band.
    pub span_kwh: Option<f64>,
    /// Effective per-kWh rate: nominal rate plus both adjustments.
    pub rate: f64,
}

/// A resolved residential tariff: monthly base fee plus an ordered
/// tier-band table.
///
/// Both conversion directions walk the same band table, so converting a
/// usage quantity to a bill and back recovers the original quantity up to
/// floating-point error.
///
/// # Examples
///
/// ```
/// use solar_estimate::tariff::RateSchedule;
///
/// let schedule = RateSchedule::new(30, [30.0, 36.6, 40.69], 4.80, 3.49).unwrap();
/// assert_eq!(schedule.base_fee(), 934.56);
///
/// let inversion = schedule.usage_from_bill(15_000.0).unwrap();
/// assert!((inversion.usage_kwh - 328.38).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateSchedule {
    base_fee: f64,
    bands: [TierBand; 3],
}

impl RateSchedule {
    /// Builds a schedule from a contracted amperage, the three nominal tier
    /// rates (tier order), and the two per-kWh adjustments that apply
    /// uniformly to every tier.
    ///
    /// # Errors
    ///
    /// * [`TariffError::UnknownAmperage`] if the amperage has no base fee.
    /// * [`TariffError::NonPositiveRate`] if any effective rate comes out
    ///   zero or negative, which can happen when the fuel adjustment is
    ///   sufficiently negative.
    pub fn new(
        amperage: u32,
        nominal_rates: [f64; 3],
        fuel_adjustment: f64,
        renewable_surcharge: f64,
    ) -> Result<Self, TariffError> {
        let base_fee = base_fee(amperage)?;
        let adjustment = fuel_adjustment + renewable_surcharge;
        let spans = [Some(TIER1_SPAN_KWH), Some(TIER2_SPAN_KWH), None];

        let mut bands = [TierBand { span_kwh: None, rate: 0.0 }; 3];
        for (i, (&nominal, span_kwh)) in nominal_rates.iter().zip(spans).enumerate() {
            let rate = nominal + adjustment;
            if rate <= 0.0 {
                return Err(TariffError::NonPositiveRate { tier: i + 1, rate });
            }
            bands[i] = TierBand { span_kwh, rate };
        }
        Ok(Self { base_fee, bands })
    }

    /// Monthly base fee for the contracted amperage.
    pub fn base_fee(&self) -> f64 {
        self.base_fee
    }

    /// Effective per-kWh rate of each tier, in tier order.
    pub fn effective_rates(&self) -> [f64; 3] {
        [self.bands[0].rate, self.bands[1].rate, self.bands[2].rate]
    }

    /// The ordered band table shared by both conversion directions.
    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }
}

/// Failures raised by schedule construction and bill conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum TariffError {
    /// Contracted amperage outside the base-fee table.
    UnknownAmperage(u32),
    /// An effective tier rate was zero or negative.
    NonPositiveRate { tier: usize, rate: f64 },
    /// Negative usage passed to the forward conversion.
    NegativeUsage(f64),
    /// Negative bill passed to the inverse conversion.
    NegativeBill(f64),
}

impl fmt::Display for TariffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAmperage(amperage) => write!(
                f,
                "unknown contracted amperage {amperage} A, expected one of: {}",
                CONTRACT_AMPERAGES.map(|a| a.to_string()).join(", ")
            ),
            Self::NonPositiveRate { tier, rate } => write!(
                f,
                "effective rate for tier {tier} is {rate} yen/kWh, must be positive"
            ),
            Self::NegativeUsage(kwh) => {
                write!(f, "usage must be non-negative, got {kwh} kWh")
            }
            Self::NegativeBill(amount) => {
                write!(f, "bill must be non-negative, got {amount} yen")
            }
        }
    }
}

impl Error for TariffError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_fee_matches_table() {
        assert_eq!(base_fee(10).unwrap(), 311.52);
        assert_eq!(base_fee(30).unwrap(), 934.56);
        assert_eq!(base_fee(60).unwrap(), 1869.12);
    }

    #[test]
    fn base_fee_scales_linearly_with_amperage() {
        // The table is 31.152 yen per ampere throughout.
        for &amperage in &CONTRACT_AMPERAGES {
            let fee = base_fee(amperage).unwrap();
            let per_amp = fee / f64::from(amperage);
            assert!(
                (per_amp - 31.152).abs() < 1e-9,
                "fee {fee} for {amperage} A is not 31.152 yen/A"
            );
        }
    }

    #[test]
    fn base_fee_rejects_unknown_amperage() {
        assert_eq!(base_fee(25), Err(TariffError::UnknownAmperage(25)));
        assert_eq!(base_fee(0), Err(TariffError::UnknownAmperage(0)));
    }

    #[test]
    fn new_applies_adjustments_to_every_tier() {
        let schedule = RateSchedule::new(30, [30.0, 36.6, 40.69], 4.80, 3.49).unwrap();
        let rates = schedule.effective_rates();
        assert!((rates[0] - 38.29).abs() < 1e-9);
        assert!((rates[1] - 44.89).abs() < 1e-9);
        assert!((rates[2] - 48.98).abs() < 1e-9);
    }

    #[test]
    fn new_rejects_unknown_amperage() {
        let err = RateSchedule::new(25, [30.0, 36.6, 40.69], 0.0, 0.0).unwrap_err();
        assert_eq!(err, TariffError::UnknownAmperage(25));
    }

    #[test]
    fn new_rejects_non_positive_effective_rate() {
        // A deeply negative fuel adjustment can push a tier to or below zero.
        let err = RateSchedule::new(30, [30.0, 36.6, 40.69], -31.0, 0.0).unwrap_err();
        match err {
            TariffError::NonPositiveRate { tier, rate } => {
                assert_eq!(tier, 1);
                assert!(rate <= 0.0);
            }
            other => panic!("expected NonPositiveRate, got {other:?}"),
        }
    }

    #[test]
    fn bands_carry_the_standard_spans() {
        let schedule = RateSchedule::new(40, [30.0, 36.6, 40.69], 0.0, 0.0).unwrap();
        let bands = schedule.bands();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0].span_kwh, Some(120.0));
        assert_eq!(bands[1].span_kwh, Some(180.0));
        assert_eq!(bands[2].span_kwh, None);
    }

    #[test]
    fn display_lists_known_amperages() {
        let message = TariffError::UnknownAmperage(25).to_string();
        assert!(message.contains("25 A"));
        assert!(message.contains("10, 15, 20, 30, 40, 50, 60"));
    }
}
