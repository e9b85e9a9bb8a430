//! Employment Insurance premiums at the Quebec rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EmploymentInsuranceConfig, YearConfig};
use crate::models::Person;

use super::common::round_cents;

/// One person's EI premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentInsuranceResult {
    /// Insurable earnings, capped at the maximum.
    pub insurable_earnings: Decimal,
    /// Premium payable.
    pub premium: Decimal,
}

/// Computes EI premiums for one year.
#[derive(Debug, Clone)]
pub struct EmploymentInsuranceCalculator {
    config: EmploymentInsuranceConfig,
}

impl EmploymentInsuranceCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.employment_insurance.clone(),
        }
    }

    /// Computes the premium of one person.
    ///
    /// Only employment income is insurable. Premiums on insurable earnings at
    /// or below the minimum are refunded in full, so they resolve to zero here.
    pub fn calculate(&self, person: &Person) -> EmploymentInsuranceResult {
        let c = &self.config;
        let earnings = person.gross_work_income();

        if person.is_retired() || earnings <= c.min_insurable_earnings {
            return EmploymentInsuranceResult {
                insurable_earnings: Decimal::ZERO,
                premium: Decimal::ZERO,
            };
        }

        let insurable_earnings = earnings.min(c.max_insurable_earnings);
        let premium = round_cents((c.rate * insurable_earnings).min(c.max_contribution));

        EmploymentInsuranceResult {
            insurable_earnings,
            premium,
        }
    }
}
