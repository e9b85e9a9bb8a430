//! Quebec solidarity tax credit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{SolidarityConfig, YearConfig};
use crate::models::Household;

use super::common::{non_negative, phase_out, round_cents};
use super::stages::NetIncomeBreakdown;

/// The household's solidarity credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidarityResult {
    /// QST component: base, spouse and living-alone amounts.
    pub qst_component: Decimal,
    /// Housing component: base and per-child amounts.
    pub housing_component: Decimal,
    /// Reduction rate applied.
    pub reduction_rate: Decimal,
    /// Income-based reduction.
    pub reduction: Decimal,
    /// Credit payable.
    pub amount: Decimal,
}

/// Computes the solidarity credit for one year.
#[derive(Debug, Clone)]
pub struct SolidarityCalculator {
    config: SolidarityConfig,
}

impl SolidarityCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.solidarity.clone(),
        }
    }

    /// Computes the credit.
    ///
    /// The housing component applies only to households that declare a
    /// housing cost. The reduction rate is halved when only one component
    /// applies.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> SolidarityResult {
        let c = &self.config;

        let mut qst_component = c.qst_base;
        if household.is_couple() {
            qst_component += c.qst_spouse;
        }
        if household.lives_alone() {
            qst_component += c.qst_living_alone;
        }

        let housing_component = if household.housing().annual_housing_cost > Decimal::ZERO {
            c.housing_base + c.housing_per_child * Decimal::from(household.number_of_children())
        } else {
            Decimal::ZERO
        };

        let reduction_rate = if housing_component > Decimal::ZERO {
            c.reduction_rate
        } else {
            c.single_component_reduction_rate
        };
        let gross = qst_component + housing_component;
        let reduction = phase_out(income.family, c.reduction_threshold, reduction_rate).min(gross);

        SolidarityResult {
            qst_component,
            housing_component,
            reduction_rate,
            reduction: round_cents(reduction),
            amount: round_cents(non_negative(gross - reduction)),
        }
    }
}
