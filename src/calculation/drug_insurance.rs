//! Public prescription drug insurance (RAMQ) premium.
//!
//! Assessed once per household on combined income above an exemption
//! threshold that depends on couple status and the number of children.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{DrugInsuranceConfig, YearConfig};
use crate::models::Household;

use super::common::{excess_over, round_cents};

/// The household's RAMQ premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInsuranceResult {
    /// Exemption threshold applied.
    pub exemption_threshold: Decimal,
    /// Combined income above the threshold.
    pub excess_income: Decimal,
    /// Premium cap for the household.
    pub max_premium: Decimal,
    /// Premium payable.
    pub premium: Decimal,
}

/// Computes RAMQ premiums for one year.
#[derive(Debug, Clone)]
pub struct DrugInsuranceCalculator {
    config: DrugInsuranceConfig,
}

impl DrugInsuranceCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.drug_insurance.clone(),
        }
    }

    /// Returns the exemption threshold for a household composition.
    pub fn exemption_threshold(&self, is_couple: bool, children: usize) -> Decimal {
        let t = &self.config.exemption_thresholds;
        match (is_couple, children) {
            (false, 0) => t.single_no_child,
            (false, 1) => t.single_one_child,
            (false, _) => t.single_two_plus_children,
            (true, 0) => t.couple_no_child,
            (true, 1) => t.couple_one_child,
            (true, _) => t.couple_two_plus_children,
        }
    }

    /// Computes the household premium.
    pub fn calculate(&self, household: &Household) -> DrugInsuranceResult {
        let c = &self.config;
        let is_couple = household.is_couple();
        let threshold = self.exemption_threshold(is_couple, household.number_of_children());
        let tiers = if is_couple { &c.couple } else { &c.single };

        let excess = excess_over(household.total_income(), threshold);
        let first = excess.min(tiers.first_tier_width);
        let second = excess - first;
        let uncapped = tiers.first_tier_rate * first + tiers.second_tier_rate * second;

        let adults = Decimal::from(household.adults().count());
        let max_premium = c.max_premium_per_adult * adults;

        DrugInsuranceResult {
            exemption_threshold: threshold,
            excess_income: excess,
            max_premium,
            premium: round_cents(uncapped.min(max_premium)),
        }
    }
}
