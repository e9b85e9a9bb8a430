//! Quebec last-resort financial assistance (social assistance).
//!
//! Benefits are set monthly: a base amount, allocations for adults with a
//! limited capacity for employment, and the participation allowance for
//! first-time applicants. Work income above a monthly exemption and all
//! other income reduce the benefit dollar for dollar. The monthly result is
//! annualized.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{SocialAssistanceConfig, YearConfig};
use crate::models::{EmploymentConstraint, Household};

use super::common::{ProgramPhase, excess_over, non_negative, round_cents};
use super::stages::NetIncomeBreakdown;

const MONTHS_PER_YEAR: u32 = 12;

/// The household's social assistance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAssistanceResult {
    /// Phase the benefit was computed in.
    pub phase: ProgramPhase,
    /// Monthly benefit before income reductions.
    pub monthly_gross: Decimal,
    /// Monthly income reduction.
    pub monthly_reduction: Decimal,
    /// Monthly benefit payable.
    pub monthly_benefit: Decimal,
    /// Annual benefit payable.
    pub amount: Decimal,
}

impl SocialAssistanceResult {
    fn ineligible() -> Self {
        Self {
            phase: ProgramPhase::Ineligible,
            monthly_gross: Decimal::ZERO,
            monthly_reduction: Decimal::ZERO,
            monthly_benefit: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// Computes social assistance for one year.
#[derive(Debug, Clone)]
pub struct SocialAssistanceCalculator {
    config: SocialAssistanceConfig,
    pension_age: u32,
}

impl SocialAssistanceCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.social_assistance.clone(),
            pension_age: config.old_age_security.eligibility_age,
        }
    }

    fn constraint_allocation(&self, constraint: EmploymentConstraint) -> Decimal {
        match constraint {
            EmploymentConstraint::None => Decimal::ZERO,
            EmploymentConstraint::Temporary => self.config.temporary_constraint_monthly,
            EmploymentConstraint::Severe => self.config.severe_constraint_monthly,
        }
    }

    /// Computes the benefit.
    ///
    /// Households whose primary adult has reached the OAS age, or whose
    /// liquid assets exceed the limit, are ineligible.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> SocialAssistanceResult {
        let c = &self.config;
        let input = household.social_assistance();
        let is_couple = household.is_couple();

        if household.primary().age() >= self.pension_age
            || input.liquid_assets > c.liquid_asset_limit.pick(is_couple)
        {
            return SocialAssistanceResult::ineligible();
        }

        let mut monthly_gross = c.base_monthly.pick(is_couple);
        monthly_gross += self.constraint_allocation(input.primary_constraint);
        if is_couple {
            monthly_gross += self.constraint_allocation(input.spouse_constraint);
        }

        let severe = input.primary_constraint == EmploymentConstraint::Severe
            || (is_couple && input.spouse_constraint == EmploymentConstraint::Severe);
        if input.first_time_applicant && !severe {
            monthly_gross += c.first_time_applicant_monthly;
        }
        if input.lives_with_parents && !is_couple {
            monthly_gross = non_negative(monthly_gross - c.lives_with_parents_reduction_monthly);
        }

        let months = Decimal::from(MONTHS_PER_YEAR);
        let work_income = income.family_work_income;
        let other_income = non_negative(household.total_income() - work_income);
        let monthly_reduction = excess_over(
            work_income / months,
            c.work_income_exemption_monthly.pick(is_couple),
        ) + other_income / months;

        let monthly_benefit = round_cents(non_negative(monthly_gross - monthly_reduction));
        let phase = if monthly_benefit.is_zero() {
            ProgramPhase::Zero
        } else if monthly_reduction > Decimal::ZERO {
            ProgramPhase::Reduction
        } else {
            ProgramPhase::Maximum
        };

        SocialAssistanceResult {
            phase,
            monthly_gross,
            monthly_reduction: round_cents(monthly_reduction),
            monthly_benefit,
            amount: monthly_benefit * months,
        }
    }
}
