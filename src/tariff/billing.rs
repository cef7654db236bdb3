//! Bidirectional conversion between monthly bills and usage quantities.

use super::schedule::{RateSchedule, TariffError};

/// Result of inverting a monthly bill to a usage quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillInversion {
    /// Recovered monthly usage (kWh).
    pub usage_kwh: f64,
    /// True when the bill was too small to cover the base fee. Usage is
    /// reported as zero in that case rather than a negative quantity.
    pub below_base_fee: bool,
}

impl RateSchedule {
    /// Computes the monthly bill for a usage quantity: base fee plus the
    /// volumetric cost of each band the usage reaches into.
    ///
    /// Usage that lands exactly on a band boundary (120 or 300 kWh) is
    /// billed entirely within the lower band. The inverse direction resolves
    /// the same boundaries identically, so the two directions compose.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::NegativeUsage`] for negative input.
    pub fn bill_from_usage(&self, usage_kwh: f64) -> Result<f64, TariffError> {
        if usage_kwh < 0.0 {
            return Err(TariffError::NegativeUsage(usage_kwh));
        }
        let mut bill = self.base_fee();
        let mut remaining_kwh = usage_kwh;
        for band in self.bands() {
            let taken = match band.span_kwh {
                Some(span) => remaining_kwh.min(span),
                None => remaining_kwh,
            };
            bill += taken * band.rate;
            remaining_kwh -= taken;
            if remaining_kwh <= 0.0 {
                break;
            }
        }
        Ok(bill)
    }

    /// Recovers the usage quantity that would produce a given monthly bill.
    ///
    /// Walks the same band table as [`Self::bill_from_usage`]: after
    /// subtracting the base fee, each band is consumed whole while the
    /// remaining amount exceeds the band's full cost, and the final band is
    /// filled fractionally.
    ///
    /// A bill at or below the base fee yields zero usage; strictly below, it
    /// additionally sets [`BillInversion::below_base_fee`]. Neither case is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::NegativeBill`] for negative input.
    pub fn usage_from_bill(&self, bill: f64) -> Result<BillInversion, TariffError> {
        if bill < 0.0 {
            return Err(TariffError::NegativeBill(bill));
        }
        let remaining = bill - self.base_fee();
        if remaining <= 0.0 {
            return Ok(BillInversion {
                usage_kwh: 0.0,
                below_base_fee: remaining < 0.0,
            });
        }

        let mut remaining_amount = remaining;
        let mut usage_kwh = 0.0;
        for band in self.bands() {
            match band.span_kwh {
                // Band fully covered; move on with the cost of its whole span paid.
                Some(span) if remaining_amount > span * band.rate => {
                    usage_kwh += span;
                    remaining_amount -= span * band.rate;
                }
                // The bill runs out inside this band.
                _ => {
                    usage_kwh += remaining_amount / band.rate;
                    break;
                }
            }
        }
        Ok(BillInversion {
            usage_kwh,
            below_base_fee: false,
        })
    }
}
