//! Calculation result models.
//!
//! A [`CalculationResult`] holds three groups, contributions, taxes and
//! transfers, each with per-program amounts, a detail record for programs
//! whose final number depends on intermediate quantities, and a group total.
//! The disposable income figure is derived from the group totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    ChildBenefitResult, ChildcareCreditResult, DrugInsuranceResult, EmploymentInsuranceResult,
    FamilyAllowanceResult, GstCreditResult, HealthServicesFundResult, HousingAllowanceResult,
    IncomeTaxResult, MedicalSupplementResult, NetIncomeBreakdown, OldAgeSecurityResult,
    PhasedBenefitResult, QpipResult, QppResult, SocialAssistanceResult, SolidarityResult,
};

/// Contributions of one adult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdultContributions {
    /// Quebec Pension Plan.
    pub qpp: QppResult,
    /// Employment Insurance.
    pub employment_insurance: EmploymentInsuranceResult,
    /// Quebec Parental Insurance Plan.
    pub qpip: QpipResult,
    /// Health Services Fund.
    pub health_services_fund: HealthServicesFundResult,
    /// QPP, EI and QPIP: the part deductible from taxable income.
    pub deductible: Decimal,
    /// Every contribution of this adult.
    pub total: Decimal,
}

/// The contributions group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionsResult {
    /// Per adult, primary first.
    pub adults: Vec<AdultContributions>,
    /// Household QPP.
    pub qpp: Decimal,
    /// Household EI.
    pub employment_insurance: Decimal,
    /// Household QPIP.
    pub qpip: Decimal,
    /// Household FSS.
    pub health_services_fund: Decimal,
    /// Household RAMQ premium.
    pub drug_insurance: DrugInsuranceResult,
    /// Every contribution of the household.
    pub total: Decimal,
}

/// The taxes group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxesResult {
    /// Quebec income tax.
    pub quebec: IncomeTaxResult,
    /// Federal income tax, net of the Quebec abatement.
    pub federal: IncomeTaxResult,
    /// Both jurisdictions.
    pub total: Decimal,
}

/// The transfers and credits group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransfersResult {
    /// Solidarity tax credit.
    pub solidarity: SolidarityResult,
    /// Work premium.
    pub work_premium: PhasedBenefitResult,
    /// Family allowance.
    pub family_allowance: FamilyAllowanceResult,
    /// Canada Child Benefit.
    pub child_benefit: ChildBenefitResult,
    /// GST/HST credit.
    pub gst_credit: GstCreditResult,
    /// Canada Workers Benefit.
    pub workers_benefit: PhasedBenefitResult,
    /// Old Age Security and Guaranteed Income Supplement.
    pub old_age_security: OldAgeSecurityResult,
    /// Federal medical expense supplement.
    pub federal_medical_supplement: MedicalSupplementResult,
    /// Quebec medical expense credit.
    pub quebec_medical_supplement: MedicalSupplementResult,
    /// Social assistance.
    pub social_assistance: SocialAssistanceResult,
    /// Childcare expense credit.
    pub childcare_credit: ChildcareCreditResult,
    /// Housing allowance.
    pub housing_allowance: HousingAllowanceResult,
    /// Every transfer and credit of the household.
    pub total: Decimal,
}

impl TransfersResult {
    /// Final amounts keyed by program name, in payment order.
    pub fn amounts(&self) -> [(&'static str, Decimal); 12] {
        [
            ("solidarity", self.solidarity.amount),
            ("work_premium", self.work_premium.amount),
            ("family_allowance", self.family_allowance.amount),
            ("child_benefit", self.child_benefit.amount),
            ("gst_credit", self.gst_credit.amount),
            ("workers_benefit", self.workers_benefit.amount),
            ("old_age_security", self.old_age_security.amount),
            ("federal_medical_supplement", self.federal_medical_supplement.amount),
            ("quebec_medical_supplement", self.quebec_medical_supplement.amount),
            ("social_assistance", self.social_assistance.amount),
            ("childcare_credit", self.childcare_credit.amount),
            ("housing_allowance", self.housing_allowance.amount),
        ]
    }
}

/// The complete result of one calculation.
///
/// # Example
///
/// ```
/// use disposable_income_engine::calculation::DisposableIncomeCalculator;
/// use disposable_income_engine::models::{Household, HouseholdType, Person};
/// use rust_decimal::Decimal;
///
/// let calculator = DisposableIncomeCalculator::initialize(2024).unwrap();
/// let person = Person::new(35, Decimal::from(50_000), Decimal::ZERO, false).unwrap();
/// let household = Household::builder(HouseholdType::Single, person).build().unwrap();
///
/// let result = calculator.calculate(&household).unwrap();
/// assert_eq!(
///     result.disposable_income,
///     result.gross_income - result.contributions.total - result.taxes.total
///         + result.transfers.total
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The tax year applied.
    pub tax_year: u16,
    /// Gross income of every adult.
    pub gross_income: Decimal,
    /// Contributions group.
    pub contributions: ContributionsResult,
    /// Taxes group.
    pub taxes: TaxesResult,
    /// Net incomes used to test transfers.
    pub net_income: NetIncomeBreakdown,
    /// Transfers and credits group.
    pub transfers: TransfersResult,
    /// Gross income − contributions − taxes + transfers.
    pub disposable_income: Decimal,
}
