//! Health Services Fund (FSS) contribution for individuals.
//!
//! Persons aged 65 or more contribute on their retirement and
//! self-employment income along a five-tier step function:
//!
//! | Income                        | Contribution                       |
//! |-------------------------------|------------------------------------|
//! | ≤ first threshold             | 0                                  |
//! | ≤ second threshold            | rate × (income − first)            |
//! | ≤ mid threshold               | base amount                        |
//! | ≤ ceiling                     | base + rate × (income − mid), capped |
//! | > ceiling                     | maximum                            |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{HealthServicesFundConfig, YearConfig};
use crate::models::Person;

use super::common::round_cents;

/// One person's FSS contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthServicesFundResult {
    /// Income subject to the contribution.
    pub assessed_income: Decimal,
    /// Contribution payable.
    pub contribution: Decimal,
}

/// Computes FSS contributions for one year.
#[derive(Debug, Clone)]
pub struct HealthServicesFundCalculator {
    config: HealthServicesFundConfig,
}

impl HealthServicesFundCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.health_services_fund.clone(),
        }
    }

    /// Computes the contribution of one person.
    pub fn calculate(&self, person: &Person) -> HealthServicesFundResult {
        let c = &self.config;
        if person.age() < c.min_age {
            return HealthServicesFundResult {
                assessed_income: Decimal::ZERO,
                contribution: Decimal::ZERO,
            };
        }

        let income = person.gross_retirement_income() + person.self_employed_income();
        let contribution = if income <= c.first_threshold {
            Decimal::ZERO
        } else if income <= c.second_threshold {
            c.rate * (income - c.first_threshold)
        } else if income <= c.mid_threshold {
            c.base_amount
        } else if income <= c.ceiling_threshold {
            (c.base_amount + c.rate * (income - c.mid_threshold)).min(c.max_amount)
        } else {
            c.max_amount
        };

        HealthServicesFundResult {
            assessed_income: income,
            contribution: round_cents(contribution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn contribution(age: u32, retirement: &str) -> Decimal {
        let config = ConfigLoader::embedded_year(2024).unwrap();
        let person = Person::new(age, Decimal::ZERO, dec(retirement), true).unwrap();
        HealthServicesFundCalculator::new(&config)
            .calculate(&person)
            .contribution
    }

    #[test]
    fn test_retired_70_with_20000() {
        assert_eq!(contribution(70, "20000"), dec("23.70"));
    }

    #[test]
    fn test_under_65_pays_nothing() {
        assert_eq!(contribution(64, "100000"), Decimal::ZERO);
    }

    #[test]
    fn test_each_tier() {
        assert_eq!(contribution(70, "17630"), Decimal::ZERO);
        assert_eq!(contribution(70, "32630"), dec("150.00"));
        assert_eq!(contribution(70, "50000"), dec("150"));
        assert_eq!(contribution(70, "67790"), dec("250.00"));
        assert_eq!(contribution(70, "142790"), dec("1000.00"));
        assert_eq!(contribution(70, "500000"), dec("1000"));
    }

    #[test]
    fn test_employment_income_is_not_assessed() {
        let config = ConfigLoader::embedded_year(2024).unwrap();
        let person = Person::new(67, dec("80000"), Decimal::ZERO, false).unwrap();
        let result = HealthServicesFundCalculator::new(&config).calculate(&person);
        assert_eq!(result.contribution, Decimal::ZERO);
    }

    #[test]
    fn test_self_employment_income_is_assessed() {
        let config = ConfigLoader::embedded_year(2024).unwrap();
        let person = Person::new(67, Decimal::ZERO, dec("10000"), false)
            .unwrap()
            .with_self_employed_income(dec("10000"))
            .unwrap();
        let result = HealthServicesFundCalculator::new(&config).calculate(&person);
        assert_eq!(result.assessed_income, dec("20000"));
        assert_eq!(result.contribution, dec("23.70"));
    }

    #[test]
    fn test_self_employment_alone_is_assessed_from_65() {
        let config = ConfigLoader::embedded_year(2024).unwrap();
        let calc = HealthServicesFundCalculator::new(&config);
        let self_employed = |age: u32, amount: &str| {
            Person::new(age, Decimal::ZERO, Decimal::ZERO, false)
                .unwrap()
                .with_self_employed_income(dec(amount))
                .unwrap()
        };

        let result = calc.calculate(&self_employed(66, "20000"));
        assert_eq!(result.assessed_income, dec("20000"));
        assert_eq!(result.contribution, dec("23.70"));
        assert_eq!(calc.calculate(&self_employed(66, "50000")).contribution, dec("150"));
        assert_eq!(calc.calculate(&self_employed(64, "50000")).contribution, Decimal::ZERO);
    }
}
