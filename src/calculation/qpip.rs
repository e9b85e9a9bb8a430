//! Quebec Parental Insurance Plan (QPIP / RQAP) premiums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{QpipConfig, YearConfig};
use crate::models::Person;

use super::common::round_cents;

/// One person's QPIP premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QpipResult {
    /// Premium on employment income.
    pub employee_premium: Decimal,
    /// Premium on self-employment income.
    pub self_employed_premium: Decimal,
    /// Total premium.
    pub total: Decimal,
}

/// Computes QPIP premiums for one year.
#[derive(Debug, Clone)]
pub struct QpipCalculator {
    config: QpipConfig,
}

impl QpipCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.qpip.clone(),
        }
    }

    /// Computes the premium of one person.
    ///
    /// Employment and self-employment earnings share one insurable maximum,
    /// employment first. Nothing is payable when combined earnings are at or
    /// below the minimum, or when the person is retired.
    pub fn calculate(&self, person: &Person) -> QpipResult {
        let c = &self.config;
        if person.is_retired() || person.earned_income() <= c.min_earnings {
            return QpipResult {
                employee_premium: Decimal::ZERO,
                self_employed_premium: Decimal::ZERO,
                total: Decimal::ZERO,
            };
        }

        let employment_base = person.gross_work_income().min(c.max_insurable_earnings);
        let self_employed_base = person
            .self_employed_income()
            .min(c.max_insurable_earnings - employment_base);

        let employee_premium =
            round_cents((c.employee_rate * employment_base).min(c.max_contribution));
        let self_employed_premium = round_cents(c.self_employed_rate * self_employed_base);

        QpipResult {
            employee_premium,
            self_employed_premium,
            total: employee_premium + self_employed_premium,
        }
    }
}
