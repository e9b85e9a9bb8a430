//! Quebec housing allowance (Allocation-logement).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{HousingAllowanceConfig, YearConfig};
use crate::models::Household;

use super::stages::NetIncomeBreakdown;

const MONTHS_PER_YEAR: u32 = 12;

/// The household's housing allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingAllowanceResult {
    /// Whether the household meets the composition, income and asset tests.
    pub eligible: bool,
    /// Share of family income spent on housing; `None` without income.
    pub effort_rate: Option<Decimal>,
    /// Monthly allowance of the selected tier.
    pub monthly_allowance: Decimal,
    /// Annual allowance.
    pub amount: Decimal,
}

impl HousingAllowanceResult {
    fn ineligible() -> Self {
        Self {
            eligible: false,
            effort_rate: None,
            monthly_allowance: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// Computes the housing allowance for one year.
#[derive(Debug, Clone)]
pub struct HousingAllowanceCalculator {
    config: HousingAllowanceConfig,
}

impl HousingAllowanceCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.housing_allowance.clone(),
        }
    }

    /// Maximum family income for the household's composition.
    pub fn income_limit(&self, household: &Household) -> Decimal {
        let limits = &self.config.max_income;
        if household.has_children() {
            limits.family
        } else if household.is_couple() {
            limits.couple
        } else {
            limits.single
        }
    }

    /// Computes the allowance.
    ///
    /// Without children, an adult must have reached the minimum age. The
    /// effort rate selects the highest tier whose minimum it reaches; a
    /// household with housing costs and no income lands in the top tier.
    /// An effort rate below every tier is ineligible.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> HousingAllowanceResult {
        let c = &self.config;
        let input = household.housing();

        let composition_ok = household.has_children()
            || household.adults().any(|a| a.age() >= c.min_age_without_children);
        if !composition_ok
            || input.annual_housing_cost.is_zero()
            || income.family > self.income_limit(household)
            || input.liquid_assets > c.liquid_asset_limit
        {
            return HousingAllowanceResult::ineligible();
        }

        let effort_rate = if income.family.is_zero() {
            None
        } else {
            Some(input.annual_housing_cost / income.family)
        };

        let tier = match effort_rate {
            Some(rate) => c.tiers.iter().rev().find(|t| rate >= t.min_effort),
            None => c.tiers.last(),
        };
        let effort_rate = effort_rate.map(|r| r.round_dp(4));
        let Some(tier) = tier else {
            return HousingAllowanceResult {
                effort_rate,
                ..HousingAllowanceResult::ineligible()
            };
        };
        let monthly_allowance = tier.monthly;

        HousingAllowanceResult {
            eligible: true,
            effort_rate,
            monthly_allowance,
            amount: monthly_allowance * Decimal::from(MONTHS_PER_YEAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{HouseholdType, HousingInput, Person};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calculator() -> HousingAllowanceCalculator {
        HousingAllowanceCalculator::new(&ConfigLoader::embedded_year(2024).unwrap())
    }

    fn income(family: &str) -> NetIncomeBreakdown {
        NetIncomeBreakdown {
            individual: vec![dec(family)],
            family: dec(family),
            family_work_income: Decimal::ZERO,
        }
    }

    fn single(age: u32, cost: &str) -> Household {
        let person = Person::new(age, Decimal::ZERO, dec("15000"), age >= 65).unwrap();
        let household_type = if age >= 65 {
            HouseholdType::RetiredSingle
        } else {
            HouseholdType::Single
        };
        Household::builder(household_type, person)
            .housing(HousingInput {
                annual_housing_cost: dec(cost),
                liquid_assets: Decimal::ZERO,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_effort_tiers() {
        let calc = calculator();
        // 5000 / 15000 = 33%
        let low = calc.calculate(&single(70, "5000"), &income("15000"));
        assert_eq!(low.monthly_allowance, dec("100"));
        assert_eq!(low.amount, dec("1200"));
        assert_eq!(low.effort_rate, Some(dec("0.3333")));

        // 9000 / 15000 = 60%
        let mid = calc.calculate(&single(70, "9000"), &income("15000"));
        assert_eq!(mid.monthly_allowance, dec("150"));

        // 12000 / 15000 = 80%
        let high = calc.calculate(&single(70, "12000"), &income("15000"));
        assert_eq!(high.monthly_allowance, dec("170"));
    }

    #[test]
    fn test_effort_below_first_tier_is_ineligible() {
        // 3000 / 15000 = 20%
        let result = calculator().calculate(&single(70, "3000"), &income("15000"));
        assert!(!result.eligible);
        assert_eq!(result.effort_rate, Some(dec("0.2")));
        assert_eq!(result.monthly_allowance, Decimal::ZERO);
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_young_single_without_children_is_ineligible() {
        let result = calculator().calculate(&single(30, "9000"), &income("15000"));
        assert!(!result.eligible);
    }

    #[test]
    fn test_income_above_limit_is_ineligible() {
        let result = calculator().calculate(&single(70, "9000"), &income("20700.01"));
        assert!(!result.eligible);
    }

    #[test]
    fn test_zero_income_lands_in_top_tier() {
        let result = calculator().calculate(&single(55, "6000"), &income("0"));
        assert_eq!(result.effort_rate, None);
        assert_eq!(result.monthly_allowance, dec("170"));
    }

    #[test]
    fn test_no_housing_cost_is_ineligible() {
        let result = calculator().calculate(&single(70, "0"), &income("10000"));
        assert!(!result.eligible);
    }
}
