//! Quebec and federal income tax.
//!
//! Both jurisdictions share one evaluator. They differ only in their bracket
//! tables, credit amounts, which optional credits they grant (living alone
//! for Quebec, the Canada employment amount for federal) and the abatement
//! rate (the federal Quebec abatement).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{IncomeTaxConfig, YearConfig};
use crate::models::{Household, Person};

use super::brackets::{marginal_rate, progressive_tax};
use super::common::{non_negative, round_cents};
use super::stages::ContributionTotals;

/// The taxing authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Revenu Québec.
    Quebec,
    /// Canada Revenue Agency.
    Federal,
}

/// One adult's income tax in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdultTax {
    /// Total income minus deductible contributions, floored at zero.
    pub taxable_income: Decimal,
    /// Progressive tax on taxable income.
    pub tax_before_credits: Decimal,
    /// Value of the non-refundable credits.
    pub non_refundable_credits: Decimal,
    /// Abatement applied to basic tax.
    pub abatement: Decimal,
    /// Tax payable.
    pub net_tax: Decimal,
    /// Rate of the bracket containing taxable income.
    pub marginal_rate: Decimal,
}

/// A household's income tax in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxResult {
    /// The jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// Per adult, primary first.
    pub adults: Vec<AdultTax>,
    /// Household tax payable.
    pub net_tax: Decimal,
}

/// Computes income tax for one jurisdiction and one year.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator {
    jurisdiction: Jurisdiction,
    config: IncomeTaxConfig,
}

impl IncomeTaxCalculator {
    /// Quebec income tax.
    pub fn quebec(config: &YearConfig) -> Self {
        Self {
            jurisdiction: Jurisdiction::Quebec,
            config: config.quebec_tax.clone(),
        }
    }

    /// Federal income tax, net of the Quebec abatement.
    pub fn federal(config: &YearConfig) -> Self {
        Self {
            jurisdiction: Jurisdiction::Federal,
            config: config.federal_tax.clone(),
        }
    }

    /// The jurisdiction this calculator applies.
    pub fn jurisdiction(&self) -> Jurisdiction {
        self.jurisdiction
    }

    /// Computes every adult's tax and the household total.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::calculation::{ContributionTotals, IncomeTaxCalculator};
    /// use disposable_income_engine::config::ConfigLoader;
    /// use disposable_income_engine::models::{Household, HouseholdType, Person};
    /// use rust_decimal::Decimal;
    ///
    /// let config = ConfigLoader::embedded_year(2024).unwrap();
    /// let person = Person::new(35, Decimal::from(15_000), Decimal::ZERO, false).unwrap();
    /// let household = Household::builder(HouseholdType::Single, person).build().unwrap();
    /// let deductions = ContributionTotals { deductions: vec![Decimal::ZERO], total: Decimal::ZERO };
    ///
    /// // Below the basic personal amount, no Quebec tax is payable.
    /// let result = IncomeTaxCalculator::quebec(&config).calculate(&household, &deductions);
    /// assert_eq!(result.net_tax, Decimal::ZERO);
    /// ```
    pub fn calculate(&self, household: &Household, contributions: &ContributionTotals) -> IncomeTaxResult {
        let lives_alone = household.lives_alone();
        let adults: Vec<AdultTax> = household
            .adults()
            .enumerate()
            .map(|(index, person)| {
                self.adult_tax(person, contributions.deduction_for(index), lives_alone)
            })
            .collect();
        let net_tax = adults.iter().map(|a| a.net_tax).sum();

        IncomeTaxResult {
            jurisdiction: self.jurisdiction,
            adults,
            net_tax,
        }
    }

    fn adult_tax(&self, person: &Person, deduction: Decimal, lives_alone: bool) -> AdultTax {
        let c = &self.config;
        let taxable_income = non_negative(person.total_income() - deduction);
        let tax_before_credits = progressive_tax(taxable_income, &c.brackets);
        let non_refundable_credits = self.credit_base(person, lives_alone) * c.lowest_rate();

        let basic_tax = non_negative(tax_before_credits - non_refundable_credits);
        let abatement = basic_tax * c.abatement_rate;

        AdultTax {
            taxable_income,
            tax_before_credits: round_cents(tax_before_credits),
            non_refundable_credits: round_cents(non_refundable_credits),
            abatement: round_cents(abatement),
            net_tax: round_cents(basic_tax - abatement),
            marginal_rate: marginal_rate(taxable_income, &c.brackets),
        }
    }

    /// Sum of the credit base amounts the person is entitled to.
    fn credit_base(&self, person: &Person, lives_alone: bool) -> Decimal {
        let c = &self.config;
        let mut base = c.basic_personal_amount;
        if person.age() >= c.age_threshold {
            base += c.age_amount;
        }
        base += person.gross_retirement_income().min(c.pension_income_amount);
        if lives_alone {
            base += c.living_alone_amount.unwrap_or(Decimal::ZERO);
        }
        if let Some(employment_amount) = c.employment_amount {
            base += person.gross_work_income().min(employment_amount);
        }
        base
    }
}
