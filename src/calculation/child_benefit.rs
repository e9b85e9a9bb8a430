//! Canada Child Benefit.
//!
//! Base amounts differ for children under 6 and aged 6 to 17. The reduction
//! has two phases, and both phase rates depend on the number of children
//! (the last column applies to four children or more).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ChildBenefitConfig, YearConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::Household;

use super::common::{excess_over, non_negative, round_cents};
use super::stages::NetIncomeBreakdown;

/// The household's Canada Child Benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildBenefitResult {
    /// Children under 6.
    pub children_under_six: usize,
    /// Children aged 6 to 17.
    pub children_six_to_seventeen: usize,
    /// Maximum benefit.
    pub gross: Decimal,
    /// Income-based reduction.
    pub reduction: Decimal,
    /// Benefit payable.
    pub amount: Decimal,
}

/// Computes the Canada Child Benefit for one year.
#[derive(Debug, Clone)]
pub struct ChildBenefitCalculator {
    config: ChildBenefitConfig,
}

impl ChildBenefitCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.child_benefit.clone(),
        }
    }

    /// Two-phase reduction for `children` children at `income`.
    ///
    /// Fails with [`EngineError::CalculationError`] when the parameters hold
    /// no rate column for the household.
    pub fn reduction(&self, children: usize, income: Decimal) -> EngineResult<Decimal> {
        let c = &self.config;
        if children == 0 {
            return Ok(Decimal::ZERO);
        }
        let rates = children
            .min(c.phase_one_rates.len())
            .checked_sub(1)
            .and_then(|column| {
                Some((c.phase_one_rates.get(column)?, c.phase_two_rates.get(column)?))
            });
        let Some((phase_one_rate, phase_two_rate)) = rates else {
            return Err(EngineError::CalculationError {
                program: "child_benefit".to_string(),
                message: format!("no reduction rates for {} children", children),
            });
        };

        let phase_one = income.min(c.second_threshold);
        Ok(*phase_one_rate * excess_over(phase_one, c.first_threshold)
            + *phase_two_rate * excess_over(income, c.second_threshold))
    }

    /// Computes the benefit.
    pub fn calculate(
        &self,
        household: &Household,
        income: &NetIncomeBreakdown,
    ) -> EngineResult<ChildBenefitResult> {
        let c = &self.config;
        let under_six = household.children_under(6);
        let older = household.number_of_children() - under_six;

        let gross = c.under_six_amount * Decimal::from(under_six)
            + c.six_to_seventeen_amount * Decimal::from(older);
        let reduction = self
            .reduction(household.number_of_children(), income.family)?
            .min(gross);

        Ok(ChildBenefitResult {
            children_under_six: under_six,
            children_six_to_seventeen: older,
            gross,
            reduction: round_cents(reduction),
            amount: round_cents(non_negative(gross - reduction)),
        })
    }
}
