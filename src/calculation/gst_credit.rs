//! GST/HST credit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{GstCreditConfig, YearConfig};
use crate::models::Household;

use super::common::{non_negative, phase_out, round_cents};
use super::stages::NetIncomeBreakdown;

/// The household's GST/HST credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstCreditResult {
    /// Whether the household qualifies.
    pub eligible: bool,
    /// Adult, spouse and child amounts.
    pub base_amount: Decimal,
    /// Supplement for single persons and single parents.
    pub single_supplement: Decimal,
    /// Income-based reduction.
    pub reduction: Decimal,
    /// Credit payable.
    pub amount: Decimal,
}

impl GstCreditResult {
    fn ineligible() -> Self {
        Self {
            eligible: false,
            base_amount: Decimal::ZERO,
            single_supplement: Decimal::ZERO,
            reduction: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// Computes the GST/HST credit for one year.
#[derive(Debug, Clone)]
pub struct GstCreditCalculator {
    config: GstCreditConfig,
}

impl GstCreditCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.gst_credit.clone(),
        }
    }

    /// Computes the credit.
    ///
    /// Applicants younger than the minimum age qualify only with a spouse or
    /// a child. A single parent's first child is credited the spouse amount.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> GstCreditResult {
        let c = &self.config;
        let is_couple = household.is_couple();
        let children = household.number_of_children();

        let eligible = household.primary().age() >= c.min_age || is_couple || children > 0;
        if !eligible {
            return GstCreditResult::ineligible();
        }

        let mut base_amount = c.adult_amount;
        let mut child_count = children;
        if is_couple {
            base_amount += c.spouse_amount;
        } else if children > 0 {
            base_amount += c.spouse_amount;
            child_count -= 1;
        }
        base_amount += c.child_amount * Decimal::from(child_count);

        let single_supplement = if is_couple {
            Decimal::ZERO
        } else if children > 0 {
            c.single_supplement_max
        } else {
            phase_out(
                income.family,
                c.single_supplement_phase_in_threshold,
                c.single_supplement_phase_in_rate,
            )
            .min(c.single_supplement_max)
        };

        let gross = base_amount + single_supplement;
        let reduction = phase_out(income.family, c.reduction_threshold, c.reduction_rate).min(gross);

        GstCreditResult {
            eligible,
            base_amount,
            single_supplement: round_cents(single_supplement),
            reduction: round_cents(reduction),
            amount: round_cents(non_negative(gross - reduction)),
        }
    }
}
