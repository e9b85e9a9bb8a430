//! Refundable medical expense supplements, federal and Quebec.
//!
//! Both regimes refund a share of medical expenses above a threshold tied to
//! family net income, require an adult with minimum work income, and are
//! reduced above a family income threshold. Only the federal threshold is
//! capped.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MedicalSupplementConfig, YearConfig};
use crate::models::{Household, Person};

use super::common::{excess_over, non_negative, phase_out, round_cents};
use super::income_tax::Jurisdiction;
use super::stages::NetIncomeBreakdown;

/// One jurisdiction's medical expense supplement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalSupplementResult {
    /// The jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// Whether an adult meets the work income condition.
    pub eligible: bool,
    /// Expenses above the income threshold.
    pub eligible_expenses: Decimal,
    /// Supplement before reduction.
    pub gross: Decimal,
    /// Income-based reduction.
    pub reduction: Decimal,
    /// Supplement payable.
    pub amount: Decimal,
}

/// Computes one jurisdiction's medical expense supplement for one year.
#[derive(Debug, Clone)]
pub struct MedicalSupplementCalculator {
    jurisdiction: Jurisdiction,
    config: MedicalSupplementConfig,
}

impl MedicalSupplementCalculator {
    /// The federal refundable medical expense supplement.
    pub fn federal(config: &YearConfig) -> Self {
        Self {
            jurisdiction: Jurisdiction::Federal,
            config: config.medical_supplement.federal.clone(),
        }
    }

    /// The Quebec refundable tax credit for medical expenses.
    pub fn quebec(config: &YearConfig) -> Self {
        Self {
            jurisdiction: Jurisdiction::Quebec,
            config: config.medical_supplement.quebec.clone(),
        }
    }

    /// Computes the supplement.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> MedicalSupplementResult {
        let c = &self.config;
        let eligible = household.adults().any(|adult| meets_work_income(adult, c));

        if !eligible || household.medical_expenses().is_zero() {
            return MedicalSupplementResult {
                jurisdiction: self.jurisdiction,
                eligible,
                eligible_expenses: Decimal::ZERO,
                gross: Decimal::ZERO,
                reduction: Decimal::ZERO,
                amount: Decimal::ZERO,
            };
        }

        let mut threshold = c.expense_threshold_rate * income.family;
        if let Some(cap) = c.expense_threshold_cap {
            threshold = threshold.min(cap);
        }
        let eligible_expenses = excess_over(household.medical_expenses(), threshold);
        let gross = (c.rate * eligible_expenses).min(c.max_supplement);
        let reduction = phase_out(income.family, c.reduction_threshold, c.reduction_rate).min(gross);

        MedicalSupplementResult {
            jurisdiction: self.jurisdiction,
            eligible,
            eligible_expenses: round_cents(eligible_expenses),
            gross: round_cents(gross),
            reduction: round_cents(reduction),
            amount: round_cents(non_negative(gross - reduction)),
        }
    }
}

/// Returns true when `person` meets the work income condition of `config`.
pub fn meets_work_income(person: &Person, config: &MedicalSupplementConfig) -> bool {
    person.earned_income() >= config.min_work_income
}
