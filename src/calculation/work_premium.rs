//! Quebec work premium.
//!
//! The premium grows with family work income above an exclusion threshold,
//! holds at its maximum, then is reduced with family net income. The
//! schedule depends on whether the household is a couple and has children.

use rust_decimal::Decimal;

use crate::config::{WorkPremiumConfig, WorkPremiumSchedule, YearConfig};
use crate::models::Household;

use super::common::{PhasedBenefitResult, phase_out};
use super::stages::NetIncomeBreakdown;

/// Computes the work premium for one year.
#[derive(Debug, Clone)]
pub struct WorkPremiumCalculator {
    config: WorkPremiumConfig,
}

impl WorkPremiumCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.work_premium.clone(),
        }
    }

    /// Returns the schedule for a household composition.
    pub fn schedule(&self, household: &Household) -> &WorkPremiumSchedule {
        let c = &self.config;
        match (household.is_couple(), household.has_children()) {
            (false, false) => &c.single,
            (true, false) => &c.couple,
            (false, true) => &c.single_parent,
            (true, true) => &c.couple_with_children,
        }
    }

    /// Computes the premium and the phase it was computed in.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::calculation::{
    ///     NetIncomeBreakdown, ProgramPhase, WorkPremiumCalculator,
    /// };
    /// use disposable_income_engine::config::ConfigLoader;
    /// use disposable_income_engine::models::{Household, HouseholdType, Person};
    /// use rust_decimal::Decimal;
    ///
    /// let config = ConfigLoader::embedded_year(2024).unwrap();
    /// let person = Person::new(30, Decimal::from(8_000), Decimal::ZERO, false).unwrap();
    /// let household = Household::builder(HouseholdType::Single, person).build().unwrap();
    /// let income = NetIncomeBreakdown {
    ///     individual: vec![Decimal::from(8_000)],
    ///     family: Decimal::from(8_000),
    ///     family_work_income: Decimal::from(8_000),
    /// };
    ///
    /// let result = WorkPremiumCalculator::new(&config).calculate(&household, &income);
    /// assert_eq!(result.phase, ProgramPhase::Growth);
    /// assert_eq!(result.amount, Decimal::from(504));
    /// ```
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> PhasedBenefitResult {
        let schedule = self.schedule(household);
        let reduction = phase_out(
            income.family,
            schedule.reduction_threshold,
            self.config.reduction_rate,
        );

        PhasedBenefitResult::grow_then_reduce(
            income.family_work_income,
            schedule.exclusion_threshold,
            schedule.rate,
            schedule.max_premium,
            reduction,
        )
    }
}
