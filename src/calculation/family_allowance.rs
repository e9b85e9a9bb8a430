//! Quebec family allowance (Allocation famille).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{FamilyAllowanceConfig, YearConfig};
use crate::models::Household;

use super::common::{phase_out, round_cents};
use super::stages::NetIncomeBreakdown;

/// The household's family allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyAllowanceResult {
    /// Number of children counted.
    pub eligible_children: usize,
    /// Maximum entitlement, single-parent supplement included.
    pub gross: Decimal,
    /// Entitlement floor, single-parent supplement included.
    pub minimum: Decimal,
    /// Income-based reduction.
    pub reduction: Decimal,
    /// Supplement for school supplies, never reduced.
    pub school_supplies: Decimal,
    /// Allowance payable.
    pub amount: Decimal,
}

/// Computes the family allowance for one year.
#[derive(Debug, Clone)]
pub struct FamilyAllowanceCalculator {
    config: FamilyAllowanceConfig,
}

impl FamilyAllowanceCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.family_allowance.clone(),
        }
    }

    /// Computes the allowance.
    ///
    /// The reduction applies to the sum of the per-child amounts and the
    /// single-parent supplement, and never takes the total below its floor.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> FamilyAllowanceResult {
        let c = &self.config;
        let children = household.number_of_children();
        if children == 0 {
            return FamilyAllowanceResult {
                eligible_children: 0,
                gross: Decimal::ZERO,
                minimum: Decimal::ZERO,
                reduction: Decimal::ZERO,
                school_supplies: Decimal::ZERO,
                amount: Decimal::ZERO,
            };
        }

        let count = Decimal::from(children);
        let mut gross = c.max_per_child * count;
        let mut minimum = c.min_per_child * count;
        let threshold = if household.is_couple() {
            c.couple_threshold
        } else {
            gross += c.single_parent_max;
            minimum += c.single_parent_min;
            c.single_parent_threshold
        };

        let reduction = phase_out(income.family, threshold, c.reduction_rate).min(gross - minimum);

        let school_age = household
            .children()
            .iter()
            .filter(|child| {
                (c.school_supplies_min_age..=c.school_supplies_max_age).contains(&child.age())
            })
            .count();
        let school_supplies = c.school_supplies_amount * Decimal::from(school_age);

        FamilyAllowanceResult {
            eligible_children: children,
            gross,
            minimum,
            reduction: round_cents(reduction),
            school_supplies,
            amount: round_cents(gross - reduction + school_supplies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Child, ChildcareSubsidy, HouseholdType, Person};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calculator() -> FamilyAllowanceCalculator {
        FamilyAllowanceCalculator::new(&ConfigLoader::embedded_year(2024).unwrap())
    }

    fn income(family: &str) -> NetIncomeBreakdown {
        NetIncomeBreakdown {
            individual: vec![dec(family)],
            family: dec(family),
            family_work_income: dec(family),
        }
    }

    fn child(age: u32) -> Child {
        Child::new(age, Decimal::ZERO, ChildcareSubsidy::NonSubsidized).unwrap()
    }

    fn couple_with(ages: &[u32]) -> Household {
        let primary = Person::new(38, dec("1"), Decimal::ZERO, false).unwrap();
        let spouse = Person::new(36, dec("1"), Decimal::ZERO, false).unwrap();
        Household::builder(HouseholdType::Couple, primary)
            .spouse(spouse)
            .children(ages.iter().map(|a| child(*a)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_children_gets_nothing() {
        let person = Person::new(30, dec("1"), Decimal::ZERO, false).unwrap();
        let household = Household::builder(HouseholdType::Single, person).build().unwrap();
        assert_eq!(calculator().calculate(&household, &income("10000")).amount, Decimal::ZERO);
    }

    #[test]
    fn test_couple_two_children_below_threshold() {
        // 2 × 2923 + one child aged 4-16 × 121
        let result = calculator().calculate(&couple_with(&[3, 8]), &income("50000"));
        assert_eq!(result.gross, dec("5846"));
        assert_eq!(result.school_supplies, dec("121"));
        assert_eq!(result.amount, dec("5967"));
    }

    #[test]
    fn test_couple_two_children_reduced() {
        // 5846 - (80000 - 62290) × 4% = 5137.60
        let result = calculator().calculate(&couple_with(&[2, 3]), &income("80000"));
        assert_eq!(result.reduction, dec("708.40"));
        assert_eq!(result.amount, dec("5137.60"));
    }

    #[test]
    fn test_reduction_stops_at_minimum() {
        let result = calculator().calculate(&couple_with(&[2, 3]), &income("500000"));
        assert_eq!(result.amount, dec("2326"));
    }

    #[test]
    fn test_single_parent_supplement() {
        let person = Person::new(30, dec("1"), Decimal::ZERO, false).unwrap();
        let household = Household::builder(HouseholdType::SingleParent, person)
            .child(child(1))
            .build()
            .unwrap();

        let result = calculator().calculate(&household, &income("30000"));
        assert_eq!(result.gross, dec("3949"));
        assert_eq!(result.minimum, dec("1573"));
        assert_eq!(result.amount, dec("3949"));
    }

    #[test]
    fn test_school_supplies_age_bounds() {
        let result = calculator().calculate(&couple_with(&[3, 4, 16, 17]), &income("0"));
        assert_eq!(result.school_supplies, dec("242"));
    }
}
