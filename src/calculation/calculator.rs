//! The disposable income orchestrator.
//!
//! [`DisposableIncomeCalculator`] binds one instance of every program
//! calculator to a year's parameters and runs three stages in a fixed order:
//! contributions, taxes, transfers. Each stage is complete before the next
//! starts and only consumes the typed output of the stage before it.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::{ConfigLoader, YearConfig};
use crate::error::EngineResult;
use crate::models::{
    AdultContributions, CalculationResult, ContributionsResult, Household, TaxesResult,
    TransfersResult,
};

use super::child_benefit::ChildBenefitCalculator;
use super::childcare_credit::ChildcareCreditCalculator;
use super::drug_insurance::DrugInsuranceCalculator;
use super::employment_insurance::EmploymentInsuranceCalculator;
use super::family_allowance::FamilyAllowanceCalculator;
use super::gst_credit::GstCreditCalculator;
use super::health_services_fund::HealthServicesFundCalculator;
use super::housing_allowance::HousingAllowanceCalculator;
use super::income_tax::IncomeTaxCalculator;
use super::medical_supplement::MedicalSupplementCalculator;
use super::old_age_security::OldAgeSecurityCalculator;
use super::qpip::QpipCalculator;
use super::qpp::QppCalculator;
use super::social_assistance::SocialAssistanceCalculator;
use super::solidarity::SolidarityCalculator;
use super::stages::{ContributionTotals, NetIncomeBreakdown};
use super::work_premium::WorkPremiumCalculator;
use super::workers_benefit::WorkersBenefitCalculator;

/// Every program calculator bound to one tax year.
///
/// # Example
///
/// ```
/// use disposable_income_engine::calculation::DisposableIncomeCalculator;
/// use disposable_income_engine::models::{Household, HouseholdType, Person};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = DisposableIncomeCalculator::initialize(2024).unwrap();
/// let person = Person::new(70, Decimal::ZERO, Decimal::from(20_000), true).unwrap();
/// let household = Household::builder(HouseholdType::RetiredSingle, person).build().unwrap();
///
/// let result = calculator.calculate(&household).unwrap();
/// assert_eq!(result.contributions.health_services_fund, Decimal::from_str("23.70").unwrap());
/// assert_eq!(result.contributions.qpp, Decimal::ZERO);
///
/// assert!(DisposableIncomeCalculator::initialize(2019).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DisposableIncomeCalculator {
    tax_year: u16,
    qpp: QppCalculator,
    employment_insurance: EmploymentInsuranceCalculator,
    qpip: QpipCalculator,
    health_services_fund: HealthServicesFundCalculator,
    drug_insurance: DrugInsuranceCalculator,
    quebec_tax: IncomeTaxCalculator,
    federal_tax: IncomeTaxCalculator,
    solidarity: SolidarityCalculator,
    work_premium: WorkPremiumCalculator,
    family_allowance: FamilyAllowanceCalculator,
    child_benefit: ChildBenefitCalculator,
    gst_credit: GstCreditCalculator,
    workers_benefit: WorkersBenefitCalculator,
    old_age_security: OldAgeSecurityCalculator,
    federal_medical_supplement: MedicalSupplementCalculator,
    quebec_medical_supplement: MedicalSupplementCalculator,
    social_assistance: SocialAssistanceCalculator,
    childcare_credit: ChildcareCreditCalculator,
    housing_allowance: HousingAllowanceCalculator,
}

impl DisposableIncomeCalculator {
    /// Builds every calculator from the embedded parameters for `year`.
    ///
    /// Fails with [`crate::error::EngineError::UnsupportedTaxYear`] when no
    /// parameters exist for the year.
    pub fn initialize(year: u16) -> EngineResult<Self> {
        let config = ConfigLoader::embedded_year(year)?;
        Self::from_config(&config)
    }

    /// Builds every calculator from caller-supplied parameters.
    ///
    /// The parameters are validated first; an inconsistent document fails
    /// with [`crate::error::EngineError::InvalidConfig`].
    pub fn from_config(config: &YearConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            tax_year: config.tax_year,
            qpp: QppCalculator::new(config),
            employment_insurance: EmploymentInsuranceCalculator::new(config),
            qpip: QpipCalculator::new(config),
            health_services_fund: HealthServicesFundCalculator::new(config),
            drug_insurance: DrugInsuranceCalculator::new(config),
            quebec_tax: IncomeTaxCalculator::quebec(config),
            federal_tax: IncomeTaxCalculator::federal(config),
            solidarity: SolidarityCalculator::new(config),
            work_premium: WorkPremiumCalculator::new(config),
            family_allowance: FamilyAllowanceCalculator::new(config),
            child_benefit: ChildBenefitCalculator::new(config),
            gst_credit: GstCreditCalculator::new(config),
            workers_benefit: WorkersBenefitCalculator::new(config),
            old_age_security: OldAgeSecurityCalculator::new(config),
            federal_medical_supplement: MedicalSupplementCalculator::federal(config),
            quebec_medical_supplement: MedicalSupplementCalculator::quebec(config),
            social_assistance: SocialAssistanceCalculator::new(config),
            childcare_credit: ChildcareCreditCalculator::new(config),
            housing_allowance: HousingAllowanceCalculator::new(config),
        })
    }

    /// The tax year the calculators are bound to.
    pub fn tax_year(&self) -> u16 {
        self.tax_year
    }

    /// Runs contributions, taxes and transfers, and aggregates the result.
    pub fn calculate(&self, household: &Household) -> EngineResult<CalculationResult> {
        let gross_income = household.total_income();

        let contributions = self.contributions(household);
        debug!(
            tax_year = self.tax_year,
            total = %contributions.total,
            "Contributions stage complete"
        );

        let deductions = ContributionTotals::from_result(&contributions);
        let taxes = self.taxes(household, &deductions);
        let net_income = NetIncomeBreakdown::new(household, &deductions);
        debug!(
            tax_year = self.tax_year,
            total = %taxes.total,
            family_net_income = %net_income.family,
            "Taxes stage complete"
        );

        let transfers = self.transfers(household, &net_income)?;
        debug!(
            tax_year = self.tax_year,
            total = %transfers.total,
            "Transfers stage complete"
        );

        let disposable_income =
            gross_income - contributions.total - taxes.total + transfers.total;
        info!(
            tax_year = self.tax_year,
            household_type = ?household.household_type(),
            gross_income = %gross_income,
            disposable_income = %disposable_income,
            "Calculated disposable income"
        );

        Ok(CalculationResult {
            tax_year: self.tax_year,
            gross_income,
            contributions,
            taxes,
            net_income,
            transfers,
            disposable_income,
        })
    }

    fn contributions(&self, household: &Household) -> ContributionsResult {
        let adults: Vec<AdultContributions> = household
            .adults()
            .map(|person| {
                let qpp = self.qpp.calculate(person);
                let employment_insurance = self.employment_insurance.calculate(person);
                let qpip = self.qpip.calculate(person);
                let health_services_fund = self.health_services_fund.calculate(person);
                let deductible = qpp.total + employment_insurance.premium + qpip.total;
                AdultContributions {
                    total: deductible + health_services_fund.contribution,
                    qpp,
                    employment_insurance,
                    qpip,
                    health_services_fund,
                    deductible,
                }
            })
            .collect();

        let sum = |f: fn(&AdultContributions) -> Decimal| adults.iter().map(f).sum::<Decimal>();
        let qpp = sum(|a| a.qpp.total);
        let employment_insurance = sum(|a| a.employment_insurance.premium);
        let qpip = sum(|a| a.qpip.total);
        let health_services_fund = sum(|a| a.health_services_fund.contribution);
        let drug_insurance = self.drug_insurance.calculate(household);
        let total = qpp + employment_insurance + qpip + health_services_fund + drug_insurance.premium;

        ContributionsResult {
            adults,
            qpp,
            employment_insurance,
            qpip,
            health_services_fund,
            drug_insurance,
            total,
        }
    }

    fn taxes(&self, household: &Household, deductions: &ContributionTotals) -> TaxesResult {
        let quebec = self.quebec_tax.calculate(household, deductions);
        let federal = self.federal_tax.calculate(household, deductions);
        let total = quebec.net_tax + federal.net_tax;
        TaxesResult {
            quebec,
            federal,
            total,
        }
    }

    fn transfers(
        &self,
        household: &Household,
        income: &NetIncomeBreakdown,
    ) -> EngineResult<TransfersResult> {
        let mut transfers = TransfersResult {
            solidarity: self.solidarity.calculate(household, income),
            work_premium: self.work_premium.calculate(household, income),
            family_allowance: self.family_allowance.calculate(household, income),
            child_benefit: self.child_benefit.calculate(household, income)?,
            gst_credit: self.gst_credit.calculate(household, income),
            workers_benefit: self.workers_benefit.calculate(household, income),
            old_age_security: self.old_age_security.calculate(household, income),
            federal_medical_supplement: self.federal_medical_supplement.calculate(household, income),
            quebec_medical_supplement: self.quebec_medical_supplement.calculate(household, income),
            social_assistance: self.social_assistance.calculate(household, income),
            childcare_credit: self.childcare_credit.calculate(household, income)?,
            housing_allowance: self.housing_allowance.calculate(household, income),
            total: Decimal::ZERO,
        };
        transfers.total = transfers.amounts().iter().map(|(_, amount)| *amount).sum();
        Ok(transfers)
    }
}

/// Initializes the calculators for `year` and runs one calculation.
///
/// Nothing is cached between calls.
pub fn calculate_for_year(household: &Household, year: u16) -> EngineResult<CalculationResult> {
    DisposableIncomeCalculator::initialize(year)?.calculate(household)
}
