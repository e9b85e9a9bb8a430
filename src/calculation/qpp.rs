//! Quebec Pension Plan (QPP / RRQ) contributions.
//!
//! The plan has two tiers. The base tier applies the base rate to earnings
//! between the basic exemption and the maximum pensionable earnings (MPE);
//! the additional tier applies the additional rate to earnings between the
//! MPE and the additional maximum (YAMPE). Employment earnings are assessed
//! first and absorb the exemption; self-employment earnings fill whatever room
//! remains and pay both the employee and employer shares.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{QppConfig, YearConfig};
use crate::models::Person;

use super::common::{non_negative, round_cents};

/// One person's QPP contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QppResult {
    /// Earnings subject to the base tier (employment and self-employment).
    pub pensionable_earnings: Decimal,
    /// Base tier contribution.
    pub base_contribution: Decimal,
    /// Additional tier contribution.
    pub additional_contribution: Decimal,
    /// Total contribution.
    pub total: Decimal,
}

impl QppResult {
    fn zero() -> Self {
        Self {
            pensionable_earnings: Decimal::ZERO,
            base_contribution: Decimal::ZERO,
            additional_contribution: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Computes QPP contributions for one year.
#[derive(Debug, Clone)]
pub struct QppCalculator {
    config: QppConfig,
}

impl QppCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.qpp.clone(),
        }
    }

    /// Computes the contribution of one person.
    ///
    /// Retired persons contribute nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::calculation::QppCalculator;
    /// use disposable_income_engine::config::ConfigLoader;
    /// use disposable_income_engine::models::Person;
    /// use rust_decimal::Decimal;
    ///
    /// let config = ConfigLoader::embedded_year(2024).unwrap();
    /// let person = Person::new(35, Decimal::from(500_000), Decimal::ZERO, false).unwrap();
    /// let result = QppCalculator::new(&config).calculate(&person);
    /// assert_eq!(result.total, Decimal::from(4348));
    /// ```
    pub fn calculate(&self, person: &Person) -> QppResult {
        if person.is_retired() {
            return QppResult::zero();
        }

        let c = &self.config;
        let employment = person.gross_work_income();
        let combined = person.earned_income();

        let base_tier = |earnings: Decimal| {
            non_negative(earnings.min(c.max_pensionable_earnings) - c.basic_exemption)
        };
        let additional_tier = |earnings: Decimal| {
            non_negative(
                earnings.min(c.additional_max_pensionable_earnings) - c.max_pensionable_earnings,
            )
        };

        let base_employment = base_tier(employment);
        let base_self = base_tier(combined) - base_employment;
        let additional_employment = additional_tier(employment);
        let additional_self = additional_tier(combined) - additional_employment;

        let base_contribution = split_shares(
            c.base_rate,
            base_employment,
            base_self,
            c.max_contribution,
        );
        let additional_contribution = split_shares(
            c.additional_rate,
            additional_employment,
            additional_self,
            c.additional_max_contribution,
        );

        QppResult {
            pensionable_earnings: base_employment + base_self,
            base_contribution,
            additional_contribution,
            total: base_contribution + additional_contribution,
        }
    }
}

/// Employee share on employment earnings plus both shares on self-employment
/// earnings, each share capped at `max_share`.
fn split_shares(rate: Decimal, employment: Decimal, self_employed: Decimal, max_share: Decimal) -> Decimal {
    let employee = (rate * employment).min(max_share);
    let self_share = (rate * self_employed).min(max_share - employee);
    round_cents(employee + self_share * Decimal::TWO)
}
