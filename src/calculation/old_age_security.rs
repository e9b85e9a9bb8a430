//! Old Age Security pension and Guaranteed Income Supplement.
//!
//! OAS is paid per adult aged 65 or more, quarter by quarter, at a higher
//! monthly amount from age 75. High individual net income triggers the
//! recovery tax, which reaches the full pension at the band's upper limit.
//!
//! GIS is layered on top for low-income recipients. Its income base excludes
//! OAS and part of employment income; couples are assessed on half their
//! combined base against the schedule for their spousal configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{GisSchedule, OldAgeSecurityConfig, YearConfig};
use crate::models::{Household, Person};

use super::common::{excess_over, non_negative, phase_out, round_cents};
use super::stages::NetIncomeBreakdown;

/// Spousal situation used to pick the GIS schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GisConfiguration {
    /// Single, widowed or divorced recipient.
    Single,
    /// Both spouses receive OAS.
    CoupleBothOas,
    /// Only one spouse receives OAS.
    CoupleOneOas,
}

/// One adult's OAS and GIS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OasRecipient {
    /// Age of the recipient.
    pub age: u32,
    /// Annual pension before recovery.
    pub gross_pension: Decimal,
    /// Recovery tax.
    pub recovery: Decimal,
    /// Pension kept after recovery.
    pub net_pension: Decimal,
    /// Guaranteed Income Supplement.
    pub gis: Decimal,
}

/// The household's OAS and GIS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OldAgeSecurityResult {
    /// Per recipient, in household order.
    pub recipients: Vec<OasRecipient>,
    /// GIS schedule applied, when any adult receives OAS.
    pub gis_configuration: Option<GisConfiguration>,
    /// Income base used for GIS, after exclusions.
    pub gis_income_base: Decimal,
    /// Total OAS kept after recovery.
    pub oas: Decimal,
    /// Total GIS.
    pub gis: Decimal,
    /// OAS plus GIS.
    pub amount: Decimal,
}

/// Computes OAS and GIS for one year.
#[derive(Debug, Clone)]
pub struct OldAgeSecurityCalculator {
    config: OldAgeSecurityConfig,
}

impl OldAgeSecurityCalculator {
    /// Binds the calculator to a year's parameters.
    pub fn new(config: &YearConfig) -> Self {
        Self {
            config: config.old_age_security.clone(),
        }
    }

    /// Annual OAS before recovery for a person of `age`.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::calculation::OldAgeSecurityCalculator;
    /// use disposable_income_engine::config::ConfigLoader;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let config = ConfigLoader::embedded_year(2024).unwrap();
    /// let calculator = OldAgeSecurityCalculator::new(&config);
    /// assert_eq!(calculator.annual_pension(64), Decimal::ZERO);
    /// assert_eq!(calculator.annual_pension(70), Decimal::from_str("8618.04").unwrap());
    /// ```
    pub fn annual_pension(&self, age: u32) -> Decimal {
        let c = &self.config;
        if age < c.eligibility_age {
            return Decimal::ZERO;
        }
        let older = age >= c.older_age;
        let months_per_quarter = Decimal::from(3);
        c.quarters
            .iter()
            .map(|q| if older { q.older } else { q.regular })
            .map(|monthly| monthly * months_per_quarter)
            .sum()
    }

    /// Recovery tax on `gross` for individual net income `income`.
    pub fn recovery(&self, age: u32, gross: Decimal, income: Decimal) -> Decimal {
        let c = &self.config;
        let upper_limit = if age >= c.older_age {
            c.recovery_upper_limit_older
        } else {
            c.recovery_upper_limit_regular
        };
        if income >= upper_limit {
            return gross;
        }
        phase_out(income, c.recovery_threshold, c.recovery_rate).min(gross)
    }

    /// Employment income left in the GIS base after the exemptions.
    fn gis_countable_income(&self, person: &Person, net_income: Decimal) -> Decimal {
        let gis = &self.config.gis;
        let earned = person.earned_income();
        let partial = excess_over(earned, gis.employment_full_exemption)
            .min(gis.employment_partial_exemption);
        let exempt =
            earned.min(gis.employment_full_exemption) + partial * gis.employment_partial_rate;
        non_negative(net_income - exempt)
    }

    fn gis_schedule(&self, configuration: GisConfiguration) -> &GisSchedule {
        let gis = &self.config.gis;
        match configuration {
            GisConfiguration::Single => &gis.single,
            GisConfiguration::CoupleBothOas => &gis.couple_both_oas,
            GisConfiguration::CoupleOneOas => &gis.couple_one_oas,
        }
    }

    /// Computes OAS and GIS for every eligible adult.
    pub fn calculate(&self, household: &Household, income: &NetIncomeBreakdown) -> OldAgeSecurityResult {
        let c = &self.config;
        let adults: Vec<&Person> = household.adults().collect();
        let recipients_count = adults
            .iter()
            .filter(|p| p.age() >= c.eligibility_age)
            .count();

        let gis_configuration = match (household.is_couple(), recipients_count) {
            (_, 0) => None,
            (false, _) => Some(GisConfiguration::Single),
            (true, 1) => Some(GisConfiguration::CoupleOneOas),
            (true, _) => Some(GisConfiguration::CoupleBothOas),
        };

        let combined_base: Decimal = adults
            .iter()
            .enumerate()
            .map(|(index, person)| self.gis_countable_income(person, income.for_adult(index)))
            .sum();
        let gis_income_base = if household.is_couple() {
            combined_base / Decimal::TWO
        } else {
            combined_base
        };

        let gis_per_recipient = match gis_configuration {
            Some(configuration) => {
                let schedule = self.gis_schedule(configuration);
                if combined_base >= schedule.income_cutoff {
                    Decimal::ZERO
                } else {
                    round_cents(non_negative(
                        schedule.max_annual - c.gis.reduction_rate * gis_income_base,
                    ))
                }
            }
            None => Decimal::ZERO,
        };

        let recipients: Vec<OasRecipient> = adults
            .iter()
            .enumerate()
            .filter(|(_, person)| person.age() >= c.eligibility_age)
            .map(|(index, person)| {
                let gross_pension = round_cents(self.annual_pension(person.age()));
                let recovery =
                    round_cents(self.recovery(person.age(), gross_pension, income.for_adult(index)));
                OasRecipient {
                    age: person.age(),
                    gross_pension,
                    recovery,
                    net_pension: gross_pension - recovery,
                    gis: gis_per_recipient,
                }
            })
            .collect();

        let oas = recipients.iter().map(|r| r.net_pension).sum();
        let gis = recipients.iter().map(|r| r.gis).sum();

        OldAgeSecurityResult {
            recipients,
            gis_configuration,
            gis_income_base,
            oas,
            gis,
            amount: oas + gis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::HouseholdType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn calculator() -> OldAgeSecurityCalculator {
        OldAgeSecurityCalculator::new(&ConfigLoader::embedded_year(2024).unwrap())
    }

    fn retired_single(age: u32, retirement: &str) -> Household {
        let person = Person::new(age, Decimal::ZERO, dec(retirement), true).unwrap();
        Household::builder(HouseholdType::RetiredSingle, person)
            .build()
            .unwrap()
    }

    fn income(individual: &[&str]) -> NetIncomeBreakdown {
        let individual: Vec<Decimal> = individual.iter().map(|a| dec(a)).collect();
        let family = individual.iter().copied().sum();
        NetIncomeBreakdown {
            individual,
            family,
            family_work_income: Decimal::ZERO,
        }
    }

    #[test]
    fn test_annual_pension_by_age_band() {
        let calc = calculator();
        assert_eq!(calc.annual_pension(65), dec("8618.04"));
        // 3 × (784.67 + 784.67 + 790.16 + 800.44)
        assert_eq!(calc.annual_pension(80), dec("9479.82"));
    }

    #[test]
    fn test_retired_single_70_with_20000() {
        // GIS: 10884 - 50% × 20000
        let result = calculator().calculate(&retired_single(70, "20000"), &income(&["20000"]));
        assert_eq!(result.gis_configuration, Some(GisConfiguration::Single));
        assert_eq!(result.oas, dec("8618.04"));
        assert_eq!(result.gis, dec("884.00"));
        assert_eq!(result.amount, dec("9502.04"));
    }

    #[test]
    fn test_gis_zero_at_cutoff() {
        let result = calculator().calculate(&retired_single(70, "21768"), &income(&["21768"]));
        assert_eq!(result.gis, Decimal::ZERO);
    }

    #[test]
    fn test_recovery_tax_partial_and_full() {
        let calc = calculator();
        // (100000 - 90997) × 15%
        let partial = calc.calculate(&retired_single(70, "100000"), &income(&["100000"]));
        assert_eq!(partial.recipients[0].recovery, dec("1350.45"));
        assert_eq!(partial.oas, dec("7267.59"));

        let full = calc.calculate(&retired_single(70, "148451"), &income(&["148451"]));
        assert_eq!(full.oas, Decimal::ZERO);
    }

    #[test]
    fn test_under_65_receives_nothing() {
        let person = Person::new(60, Decimal::ZERO, dec("10000"), true).unwrap();
        let household = Household::builder(HouseholdType::RetiredSingle, person)
            .build()
            .unwrap();
        let result = calculator().calculate(&household, &income(&["10000"]));
        assert_eq!(result.gis_configuration, None);
        assert!(result.recipients.is_empty());
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_employment_exemption_in_gis_base() {
        // Earned 12000: exempt 5000 + 50% × 7000, countable 3500
        let person = Person::new(67, dec("12000"), Decimal::ZERO, false).unwrap();
        let household = Household::builder(HouseholdType::Single, person).build().unwrap();
        let result = calculator().calculate(&household, &income(&["12000"]));
        assert_eq!(result.gis_income_base, dec("3500"));
        assert_eq!(result.gis, dec("9134.00"));
    }

    #[test]
    fn test_couple_both_receiving_oas() {
        let primary = Person::new(70, Decimal::ZERO, dec("8000"), true).unwrap();
        let spouse = Person::new(68, Decimal::ZERO, dec("4000"), true).unwrap();
        let household = Household::builder(HouseholdType::RetiredCouple, primary)
            .spouse(spouse)
            .build()
            .unwrap();

        // Half of 12000 combined: 7188 - 3000 each
        let result = calculator().calculate(&household, &income(&["8000", "4000"]));
        assert_eq!(result.gis_configuration, Some(GisConfiguration::CoupleBothOas));
        assert_eq!(result.recipients.len(), 2);
        assert_eq!(result.gis, dec("8376.00"));
        assert_eq!(result.oas, dec("17236.08"));
    }

    #[test]
    fn test_couple_with_one_recipient() {
        let primary = Person::new(66, Decimal::ZERO, dec("10000"), true).unwrap();
        let spouse = Person::new(60, dec("20000"), Decimal::ZERO, false).unwrap();
        let household = Household::builder(HouseholdType::Couple, primary)
            .spouse(spouse)
            .build()
            .unwrap();

        // Spouse countable: 20000 - (5000 + 5000) = 10000; half of 20000
        let result = calculator().calculate(&household, &income(&["10000", "20000"]));
        assert_eq!(result.gis_configuration, Some(GisConfiguration::CoupleOneOas));
        assert_eq!(result.recipients.len(), 1);
        assert_eq!(result.gis, dec("8044.00"));
    }
}
