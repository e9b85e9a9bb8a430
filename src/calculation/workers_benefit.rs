//! Canada Workers Benefit, with the parameters that apply to Quebec
//! residents.

use rust_decimal::Decimal;

use crate::config::{WorkersBenefitConfig, WorkersBenefitSchedule, YearConfig};
use crate::models::Household;

use super::common::{PhasedBenefitResult, phase_out};
use super::stages::NetIncomeBreakdown;

/// Computes the Canada Workers Benefit for one year.
#[derive(Debug, Clone)]
pub struct WorkersBenefitCalculator {
    config: WorkersBenefitConfig,
}

impl WorkersBenefitCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.workers_benefit.clone(),
        }
    }

    /// Single schedule for persons alone, family schedule otherwise.
    pub fn schedule(&self, household: &Household) -> &WorkersBenefitSchedule {
        if household.is_couple() || household.has_children() {
            &self.config.family
        } else {
            &self.config.single
        }
    }

    /// Computes the benefit and the phase it was computed in.
    ///
    /// A person alone must have reached the minimum age.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> PhasedBenefitResult {
        let c = &self.config;
        let alone = !household.is_couple() && !household.has_children();
        if alone && household.primary().age() < c.min_age {
            return PhasedBenefitResult::ineligible();
        }

        let schedule = self.schedule(household);
        let reduction = phase_out(income.family, schedule.reduction_threshold, c.reduction_rate);

        PhasedBenefitResult::grow_then_reduce(
            income.family_work_income,
            schedule.phase_in_start,
            schedule.phase_in_rate,
            schedule.max_benefit,
            reduction,
        )
    }
}
