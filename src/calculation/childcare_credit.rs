//! Quebec refundable tax credit for childcare expenses.
//!
//! Expenses for non-subsidized places are eligible up to a per-child limit
//! that depends on the child's age. The credit rate comes from the band of
//! the rate schedule containing family income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ChildcareCreditConfig, YearConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Child, ChildcareSubsidy, Household};

use super::brackets::band_rate;
use super::common::round_cents;
use super::stages::NetIncomeBreakdown;

/// Age below which the higher expense limit applies.
const UNDER_SEVEN: u32 = 7;

/// The household's childcare expense credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildcareCreditResult {
    /// Number of children with eligible expenses.
    pub eligible_children: usize,
    /// Eligible expenses after per-child limits.
    pub eligible_expenses: Decimal,
    /// Credit rate for the family income band.
    pub rate: Decimal,
    /// Credit payable.
    pub amount: Decimal,
}

/// Computes the childcare expense credit for one year.
#[derive(Debug, Clone)]
pub struct ChildcareCreditCalculator {
    config: ChildcareCreditConfig,
}

impl ChildcareCreditCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.childcare_credit.clone(),
        }
    }

    /// Eligible expenses for one child.
    pub fn eligible_expenses(&self, child: &Child) -> Decimal {
        let c = &self.config;
        if child.subsidy() == ChildcareSubsidy::Subsidized || child.age() > c.max_child_age {
            return Decimal::ZERO;
        }
        let limit = if child.age() < UNDER_SEVEN {
            c.under_seven_limit
        } else {
            c.seven_and_over_limit
        };
        child.childcare_expenses().min(limit)
    }

    /// Computes the credit.
    ///
    /// Fails with [`EngineError::CalculationError`] when no band of the
    /// schedule contains family income.
    pub fn calculate(
        &self,
        household: &Household,
        income: &NetIncomeBreakdown,
    ) -> EngineResult<ChildcareCreditResult> {
        let rate = band_rate(income.family, &self.config.rate_schedule).ok_or_else(|| {
            EngineError::CalculationError {
                program: "childcare_credit".to_string(),
                message: format!("no rate band contains family income {}", income.family),
            }
        })?;

        let per_child: Vec<Decimal> = household
            .children()
            .iter()
            .map(|child| self.eligible_expenses(child))
            .collect();
        let eligible_children = per_child.iter().filter(|e| !e.is_zero()).count();
        let eligible_expenses: Decimal = per_child.iter().copied().sum();

        Ok(ChildcareCreditResult {
            eligible_children,
            eligible_expenses,
            rate,
            amount: round_cents(rate * eligible_expenses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{HouseholdType, Person};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calculator() -> ChildcareCreditCalculator {
        ChildcareCreditCalculator::new(&ConfigLoader::embedded_year(2024).unwrap())
    }

    fn income(family: &str) -> NetIncomeBreakdown {
        NetIncomeBreakdown {
            individual: vec![dec(family)],
            family: dec(family),
            family_work_income: dec(family),
        }
    }

    fn household(children: Vec<Child>) -> Household {
        let person = Person::new(33, dec("1"), Decimal::ZERO, false).unwrap();
        Household::builder(HouseholdType::SingleParent, person)
            .children(children)
            .build()
            .unwrap()
    }

    fn child(age: u32, expenses: &str, subsidy: ChildcareSubsidy) -> Child {
        Child::new(age, dec(expenses), subsidy).unwrap()
    }

    #[test]
    fn test_low_income_rate() {
        let household = household(vec![child(3, "8000", ChildcareSubsidy::NonSubsidized)]);
        let result = calculator().calculate(&household, &income("20000")).unwrap();
        assert_eq!(result.rate, dec("0.78"));
        assert_eq!(result.amount, dec("6240.00"));
    }

    #[test]
    fn test_per_child_limits_by_age() {
        let household = household(vec![
            child(2, "15000", ChildcareSubsidy::NonSubsidized),
            child(9, "7000", ChildcareSubsidy::NonSubsidized),
        ]);
        // (11360 + 5745) × 70%
        let result = calculator().calculate(&household, &income("90000")).unwrap();
        assert_eq!(result.eligible_expenses, dec("17105"));
        assert_eq!(result.amount, dec("11973.50"));
    }

    #[test]
    fn test_subsidized_and_older_children_excluded() {
        let household = household(vec![
            child(4, "2500", ChildcareSubsidy::Subsidized),
            child(16, "3000", ChildcareSubsidy::NonSubsidized),
        ]);
        let result = calculator().calculate(&household, &income("40000")).unwrap();
        assert_eq!(result.eligible_children, 0);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_band_is_not_progressive() {
        // Every eligible dollar at the 67% band
        let household = household(vec![child(5, "10000", ChildcareSubsidy::NonSubsidized)]);
        let result = calculator().calculate(&household, &income("150000")).unwrap();
        assert_eq!(result.amount, dec("6700.00"));
    }

    #[test]
    fn test_missing_band_is_a_calculation_error() {
        let mut config = ConfigLoader::embedded_year(2024).unwrap();
        config.childcare_credit.rate_schedule.truncate(1);
        let calculator = ChildcareCreditCalculator::new(&config);
        let household = household(vec![]);

        match calculator.calculate(&household, &income("50000")) {
            Err(EngineError::CalculationError { program, .. }) => {
                assert_eq!(program, "childcare_credit");
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }
}
