//! Calculation logic for the disposable income engine.
//!
//! Every program has its own module with a calculator bound to one year's
//! parameters and a typed result. Contribution calculators take a person
//! (RAMQ takes the household); tax calculators take the household and the
//! deductible contributions; transfer calculators take the household and
//! its net incomes. [`DisposableIncomeCalculator`] runs them in that order.

mod brackets;
mod calculator;
mod child_benefit;
mod childcare_credit;
mod common;
mod drug_insurance;
mod employment_insurance;
mod family_allowance;
mod gst_credit;
mod health_services_fund;
mod housing_allowance;
mod income_tax;
mod medical_supplement;
mod old_age_security;
mod qpip;
mod qpp;
mod social_assistance;
mod solidarity;
mod stages;
mod work_premium;
mod workers_benefit;

pub use brackets::{band_rate, marginal_rate, progressive_tax};
pub use calculator::{DisposableIncomeCalculator, calculate_for_year};
pub use child_benefit::{ChildBenefitCalculator, ChildBenefitResult};
pub use childcare_credit::{ChildcareCreditCalculator, ChildcareCreditResult};
pub use common::{
    PhasedBenefitResult, ProgramPhase, excess_over, non_negative, phase_out, round_cents,
};
pub use drug_insurance::{DrugInsuranceCalculator, DrugInsuranceResult};
pub use employment_insurance::{EmploymentInsuranceCalculator, EmploymentInsuranceResult};
pub use family_allowance::{FamilyAllowanceCalculator, FamilyAllowanceResult};
pub use gst_credit::{GstCreditCalculator, GstCreditResult};
pub use health_services_fund::{HealthServicesFundCalculator, HealthServicesFundResult};
pub use housing_allowance::{HousingAllowanceCalculator, HousingAllowanceResult};
pub use income_tax::{AdultTax, IncomeTaxCalculator, IncomeTaxResult, Jurisdiction};
pub use medical_supplement::{
    MedicalSupplementCalculator, MedicalSupplementResult, meets_work_income,
};
pub use old_age_security::{
    GisConfiguration, OasRecipient, OldAgeSecurityCalculator, OldAgeSecurityResult,
};
pub use qpip::{QpipCalculator, QpipResult};
pub use qpp::{QppCalculator, QppResult};
pub use social_assistance::{SocialAssistanceCalculator, SocialAssistanceResult};
pub use solidarity::{SolidarityCalculator, SolidarityResult};
pub use stages::{ContributionTotals, NetIncomeBreakdown};
pub use work_premium::WorkPremiumCalculator;
pub use workers_benefit::WorkersBenefitCalculator;
