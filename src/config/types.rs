//! Configuration types for one tax year.
//!
//! This module contains the strongly-typed parameter structures that are
//! deserialized from the per-year YAML documents. Every section maps to one
//! program calculator; nothing here is mutated after loading.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A contiguous income range taxed (or looked up) at a single rate.
///
/// `max` is `None` only for the last, unbounded bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Lower bound of the bracket (exclusive except for the first bracket).
    pub min: Decimal,
    /// Upper bound of the bracket (inclusive), or `None` when unbounded.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// The rate applying inside this bracket.
    pub rate: Decimal,
}

impl Bracket {
    /// Returns true if `income` falls inside this bracket.
    pub fn contains(&self, income: Decimal) -> bool {
        let above_min = if self.min.is_zero() {
            income >= self.min
        } else {
            income > self.min
        };
        above_min && self.max.is_none_or(|max| income <= max)
    }
}

/// Quebec Pension Plan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QppConfig {
    /// Earnings below this amount are not pensionable.
    pub basic_exemption: Decimal,
    /// Maximum pensionable earnings (first tier ceiling).
    pub max_pensionable_earnings: Decimal,
    /// Additional maximum pensionable earnings (second tier ceiling).
    pub additional_max_pensionable_earnings: Decimal,
    /// Employee rate on first tier earnings.
    pub base_rate: Decimal,
    /// Employee rate on second tier earnings.
    pub additional_rate: Decimal,
    /// Maximum employee contribution for the first tier.
    pub max_contribution: Decimal,
    /// Maximum employee contribution for the second tier.
    pub additional_max_contribution: Decimal,
}

/// Employment Insurance parameters (Quebec rate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentInsuranceConfig {
    /// Maximum insurable earnings.
    pub max_insurable_earnings: Decimal,
    /// Employee premium rate.
    pub rate: Decimal,
    /// Maximum employee premium.
    pub max_contribution: Decimal,
    /// Insurable earnings at or below this amount pay nothing.
    pub min_insurable_earnings: Decimal,
}

/// Quebec Parental Insurance Plan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QpipConfig {
    /// Maximum insurable earnings, employment and self-employment combined.
    pub max_insurable_earnings: Decimal,
    /// Employee premium rate.
    pub employee_rate: Decimal,
    /// Self-employed premium rate.
    pub self_employed_rate: Decimal,
    /// Maximum employee premium.
    pub max_contribution: Decimal,
    /// Earnings at or below this amount pay nothing.
    pub min_earnings: Decimal,
}

/// Health Services Fund contribution parameters for individuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthServicesFundConfig {
    /// Only persons at least this old contribute.
    pub min_age: u32,
    /// Income at or below this amount pays nothing.
    pub first_threshold: Decimal,
    /// End of the first phase-in band.
    pub second_threshold: Decimal,
    /// Start of the second phase-in band.
    pub mid_threshold: Decimal,
    /// Income above which the maximum applies.
    pub ceiling_threshold: Decimal,
    /// Rate on the excess inside each band.
    pub rate: Decimal,
    /// Flat amount between the second and mid thresholds.
    pub base_amount: Decimal,
    /// Flat amount above the ceiling.
    pub max_amount: Decimal,
}

/// RAMQ exemption thresholds by family composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInsuranceThresholds {
    /// Single adult, no children.
    pub single_no_child: Decimal,
    /// Single adult, one child.
    pub single_one_child: Decimal,
    /// Single adult, two or more children.
    pub single_two_plus_children: Decimal,
    /// Couple, no children.
    pub couple_no_child: Decimal,
    /// Couple, one child.
    pub couple_one_child: Decimal,
    /// Couple, two or more children.
    pub couple_two_plus_children: Decimal,
}

/// Two-tier RAMQ premium rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInsuranceTiers {
    /// Width of the first tier of excess income.
    pub first_tier_width: Decimal,
    /// Rate on the first tier.
    pub first_tier_rate: Decimal,
    /// Rate beyond the first tier.
    pub second_tier_rate: Decimal,
}

/// Public prescription drug insurance (RAMQ) premium parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInsuranceConfig {
    /// Maximum premium per adult; a couple's cap is twice this amount.
    pub max_premium_per_adult: Decimal,
    /// Exemption thresholds.
    pub exemption_thresholds: DrugInsuranceThresholds,
    /// Tiers for single-adult households.
    pub single: DrugInsuranceTiers,
    /// Tiers for couples.
    pub couple: DrugInsuranceTiers,
}

/// Parameters of one income tax regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Progressive brackets, ascending and contiguous.
    pub brackets: Vec<Bracket>,
    /// Basic personal amount.
    pub basic_personal_amount: Decimal,
    /// Amount for persons aged `age_threshold` or more.
    pub age_amount: Decimal,
    /// Age at which the age amount applies.
    pub age_threshold: u32,
    /// Maximum pension income amount.
    pub pension_income_amount: Decimal,
    /// Amount for persons living alone, when the regime grants one.
    #[serde(default)]
    pub living_alone_amount: Option<Decimal>,
    /// Employment amount, when the regime grants one.
    #[serde(default)]
    pub employment_amount: Option<Decimal>,
    /// Share of tax payable abated (the federal Quebec abatement).
    pub abatement_rate: Decimal,
}

impl IncomeTaxConfig {
    /// The rate of the first bracket, used to value non-refundable credits.
    pub fn lowest_rate(&self) -> Decimal {
        self.brackets
            .first()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Quebec solidarity tax credit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidarityConfig {
    /// QST component for the individual.
    pub qst_base: Decimal,
    /// QST component for a spouse.
    pub qst_spouse: Decimal,
    /// QST supplement for a person living alone.
    pub qst_living_alone: Decimal,
    /// Housing component for the household.
    pub housing_base: Decimal,
    /// Housing component per dependent child.
    pub housing_per_child: Decimal,
    /// Family income above which the credit is reduced.
    pub reduction_threshold: Decimal,
    /// Reduction rate when both components apply.
    pub reduction_rate: Decimal,
    /// Reduction rate when a single component applies.
    pub single_component_reduction_rate: Decimal,
}

/// Work premium parameters for one family type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPremiumSchedule {
    /// Growth rate applied to work income above the exclusion threshold.
    pub rate: Decimal,
    /// Work income excluded before the premium starts growing.
    pub exclusion_threshold: Decimal,
    /// Maximum premium.
    pub max_premium: Decimal,
    /// Family income above which the premium is reduced.
    pub reduction_threshold: Decimal,
}

/// Quebec work premium parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPremiumConfig {
    /// Single person without children.
    pub single: WorkPremiumSchedule,
    /// Couple without children.
    pub couple: WorkPremiumSchedule,
    /// Single parent.
    pub single_parent: WorkPremiumSchedule,
    /// Couple with children.
    pub couple_with_children: WorkPremiumSchedule,
    /// Rate applied to family income above the reduction threshold.
    pub reduction_rate: Decimal,
}

/// Quebec family allowance parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyAllowanceConfig {
    /// Maximum amount per child.
    pub max_per_child: Decimal,
    /// Minimum amount per child.
    pub min_per_child: Decimal,
    /// Maximum single-parent supplement.
    pub single_parent_max: Decimal,
    /// Minimum single-parent supplement.
    pub single_parent_min: Decimal,
    /// Reduction threshold for couples.
    pub couple_threshold: Decimal,
    /// Reduction threshold for single parents.
    pub single_parent_threshold: Decimal,
    /// Reduction rate above the threshold.
    pub reduction_rate: Decimal,
    /// Supplement for the purchase of school supplies, per eligible child.
    pub school_supplies_amount: Decimal,
    /// Youngest age receiving the school supplies supplement.
    pub school_supplies_min_age: u32,
    /// Oldest age receiving the school supplies supplement.
    pub school_supplies_max_age: u32,
}

/// Canada Child Benefit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildBenefitConfig {
    /// Annual amount per child under 6.
    pub under_six_amount: Decimal,
    /// Annual amount per child aged 6 to 17.
    pub six_to_seventeen_amount: Decimal,
    /// Income where the first reduction phase starts.
    pub first_threshold: Decimal,
    /// Income where the second reduction phase starts.
    pub second_threshold: Decimal,
    /// First phase rates for 1, 2, 3 and 4+ children.
    pub phase_one_rates: Vec<Decimal>,
    /// Second phase rates for 1, 2, 3 and 4+ children.
    pub phase_two_rates: Vec<Decimal>,
}

/// GST/HST credit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstCreditConfig {
    /// Minimum age of the applicant.
    pub min_age: u32,
    /// Amount for the applicant.
    pub adult_amount: Decimal,
    /// Amount for a spouse (or the first child of a single parent).
    pub spouse_amount: Decimal,
    /// Amount per child.
    pub child_amount: Decimal,
    /// Maximum single supplement.
    pub single_supplement_max: Decimal,
    /// Net income above which the single supplement phases in.
    pub single_supplement_phase_in_threshold: Decimal,
    /// Phase-in rate of the single supplement.
    pub single_supplement_phase_in_rate: Decimal,
    /// Family income above which the credit is reduced.
    pub reduction_threshold: Decimal,
    /// Reduction rate.
    pub reduction_rate: Decimal,
}

/// Canada Workers Benefit parameters for one family type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersBenefitSchedule {
    /// Work income where the benefit starts phasing in.
    pub phase_in_start: Decimal,
    /// Phase-in rate.
    pub phase_in_rate: Decimal,
    /// Maximum benefit.
    pub max_benefit: Decimal,
    /// Family income above which the benefit is reduced.
    pub reduction_threshold: Decimal,
}

/// Canada Workers Benefit parameters (Quebec variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkersBenefitConfig {
    /// Minimum age of a single applicant.
    pub min_age: u32,
    /// Single person without children.
    pub single: WorkersBenefitSchedule,
    /// Couples and single parents.
    pub family: WorkersBenefitSchedule,
    /// Reduction rate.
    pub reduction_rate: Decimal,
}

/// Monthly OAS amounts for one quarter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OasQuarter {
    /// Monthly amount for ages 65 to 74.
    pub regular: Decimal,
    /// Monthly amount for ages 75 and over.
    pub older: Decimal,
}

/// GIS parameters for one spousal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GisSchedule {
    /// Maximum annual supplement per recipient.
    pub max_annual: Decimal,
    /// Income at or above which nothing is payable.
    pub income_cutoff: Decimal,
}

/// Guaranteed Income Supplement parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GisConfig {
    /// Reduction rate on the income base.
    pub reduction_rate: Decimal,
    /// Employment income fully excluded.
    pub employment_full_exemption: Decimal,
    /// Width of the partially excluded employment band.
    pub employment_partial_exemption: Decimal,
    /// Share of the partial band excluded.
    pub employment_partial_rate: Decimal,
    /// Single, widowed or divorced recipient.
    pub single: GisSchedule,
    /// Both spouses receive OAS.
    pub couple_both_oas: GisSchedule,
    /// Only one spouse receives OAS.
    pub couple_one_oas: GisSchedule,
}

/// Old Age Security pension parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OldAgeSecurityConfig {
    /// Age of eligibility.
    pub eligibility_age: u32,
    /// Age at which the higher amount applies.
    pub older_age: u32,
    /// Monthly amounts for the four quarters of the year.
    pub quarters: Vec<OasQuarter>,
    /// Individual net income above which the recovery tax applies.
    pub recovery_threshold: Decimal,
    /// Recovery tax rate.
    pub recovery_rate: Decimal,
    /// Income at which the pension is fully recovered, ages 65 to 74.
    pub recovery_upper_limit_regular: Decimal,
    /// Income at which the pension is fully recovered, ages 75 and over.
    pub recovery_upper_limit_older: Decimal,
    /// Guaranteed Income Supplement.
    pub gis: GisConfig,
}

/// Parameters of one refundable medical expense supplement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalSupplementConfig {
    /// Share of eligible expenses refunded.
    pub rate: Decimal,
    /// Maximum supplement.
    pub max_supplement: Decimal,
    /// Expenses below this share of family income are not eligible.
    pub expense_threshold_rate: Decimal,
    /// Cap on the expense threshold, when the regime has one.
    #[serde(default)]
    pub expense_threshold_cap: Option<Decimal>,
    /// Minimum work income of at least one adult.
    pub min_work_income: Decimal,
    /// Family income above which the supplement is reduced.
    pub reduction_threshold: Decimal,
    /// Reduction rate.
    pub reduction_rate: Decimal,
}

/// Federal and Quebec medical expense supplements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalSupplementsConfig {
    /// Federal refundable medical expense supplement.
    pub federal: MedicalSupplementConfig,
    /// Quebec refundable tax credit for medical expenses.
    pub quebec: MedicalSupplementConfig,
}

/// A pair of values keyed by the number of adults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ByAdults {
    /// One adult.
    pub single: Decimal,
    /// Two adults.
    pub couple: Decimal,
}

impl ByAdults {
    /// Picks the value for a couple or a single adult.
    pub fn pick(&self, is_couple: bool) -> Decimal {
        if is_couple { self.couple } else { self.single }
    }
}

/// Social assistance parameters (monthly amounts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialAssistanceConfig {
    /// Basic monthly benefit.
    pub base_monthly: ByAdults,
    /// Monthly allocation per adult with a temporarily limited capacity.
    pub temporary_constraint_monthly: Decimal,
    /// Monthly allocation per adult with a severely limited capacity.
    pub severe_constraint_monthly: Decimal,
    /// Monthly participation allowance for first-time applicants.
    pub first_time_applicant_monthly: Decimal,
    /// Monthly reduction for a single adult living with parents.
    pub lives_with_parents_reduction_monthly: Decimal,
    /// Monthly work income excluded from the benefit reduction.
    pub work_income_exemption_monthly: ByAdults,
    /// Liquid assets above which the household is ineligible.
    pub liquid_asset_limit: ByAdults,
}

/// Quebec refundable childcare expense tax credit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildcareCreditConfig {
    /// Oldest eligible child age.
    pub max_child_age: u32,
    /// Expense limit for a child under 7.
    pub under_seven_limit: Decimal,
    /// Expense limit for a child aged 7 or over.
    pub seven_and_over_limit: Decimal,
    /// Credit rate by family income band.
    pub rate_schedule: Vec<Bracket>,
}

/// Housing allowance income limits by household composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingIncomeLimits {
    /// Person without spouse or children.
    pub single: Decimal,
    /// Couple without children.
    pub couple: Decimal,
    /// Household with children.
    pub family: Decimal,
}

/// One housing allowance tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingTier {
    /// Minimum share of income spent on housing.
    pub min_effort: Decimal,
    /// Monthly allowance.
    pub monthly: Decimal,
}

/// Quebec housing allowance parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingAllowanceConfig {
    /// Households without children need an adult at least this old.
    pub min_age_without_children: u32,
    /// Maximum family income by composition.
    pub max_income: HousingIncomeLimits,
    /// Liquid assets above which the household is ineligible.
    pub liquid_asset_limit: Decimal,
    /// Effort-rate tiers, ascending.
    pub tiers: Vec<HousingTier>,
}

/// Every numeric parameter for one tax year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearConfig {
    /// The tax year these parameters apply to.
    pub tax_year: u16,
    /// Quebec Pension Plan.
    pub qpp: QppConfig,
    /// Employment Insurance.
    pub employment_insurance: EmploymentInsuranceConfig,
    /// Quebec Parental Insurance Plan.
    pub qpip: QpipConfig,
    /// Health Services Fund.
    pub health_services_fund: HealthServicesFundConfig,
    /// Prescription drug insurance.
    pub drug_insurance: DrugInsuranceConfig,
    /// Quebec income tax.
    pub quebec_tax: IncomeTaxConfig,
    /// Federal income tax.
    pub federal_tax: IncomeTaxConfig,
    /// Solidarity tax credit.
    pub solidarity: SolidarityConfig,
    /// Work premium.
    pub work_premium: WorkPremiumConfig,
    /// Family allowance.
    pub family_allowance: FamilyAllowanceConfig,
    /// Canada Child Benefit.
    pub child_benefit: ChildBenefitConfig,
    /// GST/HST credit.
    pub gst_credit: GstCreditConfig,
    /// Canada Workers Benefit.
    pub workers_benefit: WorkersBenefitConfig,
    /// Old Age Security and Guaranteed Income Supplement.
    pub old_age_security: OldAgeSecurityConfig,
    /// Medical expense supplements.
    pub medical_supplement: MedicalSupplementsConfig,
    /// Social assistance.
    pub social_assistance: SocialAssistanceConfig,
    /// Childcare expense credit.
    pub childcare_credit: ChildcareCreditConfig,
    /// Housing allowance.
    pub housing_allowance: HousingAllowanceConfig,
}

impl YearConfig {
    /// Checks the structural invariants every calculator relies on.
    ///
    /// Bracket tables must start at zero, be ascending and contiguous, and
    /// only the last bracket may be unbounded. Rates must lie in `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        let year = self.tax_year;

        validate_brackets(year, "quebec_tax.brackets", &self.quebec_tax.brackets)?;
        validate_brackets(year, "federal_tax.brackets", &self.federal_tax.brackets)?;
        validate_brackets(
            year,
            "childcare_credit.rate_schedule",
            &self.childcare_credit.rate_schedule,
        )?;

        let wp = &self.work_premium;
        let wb = &self.workers_benefit;
        let medical = &self.medical_supplement;
        let rates = [
            ("qpp.base_rate", self.qpp.base_rate),
            ("qpp.additional_rate", self.qpp.additional_rate),
            ("employment_insurance.rate", self.employment_insurance.rate),
            ("qpip.employee_rate", self.qpip.employee_rate),
            ("qpip.self_employed_rate", self.qpip.self_employed_rate),
            ("health_services_fund.rate", self.health_services_fund.rate),
            ("drug_insurance.single.first_tier_rate", self.drug_insurance.single.first_tier_rate),
            ("drug_insurance.single.second_tier_rate", self.drug_insurance.single.second_tier_rate),
            ("drug_insurance.couple.first_tier_rate", self.drug_insurance.couple.first_tier_rate),
            ("drug_insurance.couple.second_tier_rate", self.drug_insurance.couple.second_tier_rate),
            ("quebec_tax.abatement_rate", self.quebec_tax.abatement_rate),
            ("federal_tax.abatement_rate", self.federal_tax.abatement_rate),
            ("solidarity.reduction_rate", self.solidarity.reduction_rate),
            (
                "solidarity.single_component_reduction_rate",
                self.solidarity.single_component_reduction_rate,
            ),
            ("work_premium.single.rate", wp.single.rate),
            ("work_premium.couple.rate", wp.couple.rate),
            ("work_premium.single_parent.rate", wp.single_parent.rate),
            ("work_premium.couple_with_children.rate", wp.couple_with_children.rate),
            ("work_premium.reduction_rate", wp.reduction_rate),
            ("family_allowance.reduction_rate", self.family_allowance.reduction_rate),
            (
                "gst_credit.single_supplement_phase_in_rate",
                self.gst_credit.single_supplement_phase_in_rate,
            ),
            ("gst_credit.reduction_rate", self.gst_credit.reduction_rate),
            ("workers_benefit.single.phase_in_rate", wb.single.phase_in_rate),
            ("workers_benefit.family.phase_in_rate", wb.family.phase_in_rate),
            ("workers_benefit.reduction_rate", wb.reduction_rate),
            ("old_age_security.recovery_rate", self.old_age_security.recovery_rate),
            ("old_age_security.gis.reduction_rate", self.old_age_security.gis.reduction_rate),
            (
                "old_age_security.gis.employment_partial_rate",
                self.old_age_security.gis.employment_partial_rate,
            ),
            ("medical_supplement.federal.rate", medical.federal.rate),
            (
                "medical_supplement.federal.expense_threshold_rate",
                medical.federal.expense_threshold_rate,
            ),
            ("medical_supplement.federal.reduction_rate", medical.federal.reduction_rate),
            ("medical_supplement.quebec.rate", medical.quebec.rate),
            (
                "medical_supplement.quebec.expense_threshold_rate",
                medical.quebec.expense_threshold_rate,
            ),
            ("medical_supplement.quebec.reduction_rate", medical.quebec.reduction_rate),
        ];
        for (field, rate) in rates {
            validate_rate(year, field, rate)?;
        }

        let ccb_lists = [
            ("child_benefit.phase_one_rates", &self.child_benefit.phase_one_rates),
            ("child_benefit.phase_two_rates", &self.child_benefit.phase_two_rates),
        ];
        for (field, list) in ccb_lists {
            for (index, rate) in list.iter().enumerate() {
                validate_rate(year, &format!("{}[{}]", field, index), *rate)?;
            }
        }

        if self.qpp.additional_max_pensionable_earnings < self.qpp.max_pensionable_earnings {
            return Err(EngineError::invalid_config(
                year,
                "qpp.additional_max_pensionable_earnings",
                "must not be below max_pensionable_earnings",
            ));
        }

        let fss = &self.health_services_fund;
        if !(fss.first_threshold <= fss.second_threshold
            && fss.second_threshold <= fss.mid_threshold
            && fss.mid_threshold <= fss.ceiling_threshold)
        {
            return Err(EngineError::invalid_config(
                year,
                "health_services_fund",
                "thresholds must be ascending",
            ));
        }

        let ccb = &self.child_benefit;
        if ccb.phase_one_rates.is_empty() || ccb.phase_one_rates.len() != ccb.phase_two_rates.len()
        {
            return Err(EngineError::invalid_config(
                year,
                "child_benefit.phase_one_rates",
                "phase rate lists must be non-empty and of equal length",
            ));
        }
        if ccb.first_threshold > ccb.second_threshold {
            return Err(EngineError::invalid_config(
                year,
                "child_benefit.second_threshold",
                "must not be below first_threshold",
            ));
        }

        if self.old_age_security.quarters.len() != 4 {
            return Err(EngineError::invalid_config(
                year,
                "old_age_security.quarters",
                format!(
                    "expected 4 quarters, found {}",
                    self.old_age_security.quarters.len()
                ),
            ));
        }

        let tiers = &self.housing_allowance.tiers;
        if tiers.is_empty() || tiers.windows(2).any(|w| w[0].min_effort >= w[1].min_effort) {
            return Err(EngineError::invalid_config(
                year,
                "housing_allowance.tiers",
                "tiers must be non-empty and ascending by min_effort",
            ));
        }

        Ok(())
    }
}

fn validate_rate(year: u16, field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::invalid_config(
            year,
            field,
            format!("rate {} outside [0, 1]", rate),
        ));
    }
    Ok(())
}

fn validate_brackets(year: u16, field: &str, brackets: &[Bracket]) -> EngineResult<()> {
    let Some(first) = brackets.first() else {
        return Err(EngineError::invalid_config(year, field, "no brackets"));
    };
    if !first.min.is_zero() {
        return Err(EngineError::invalid_config(
            year,
            format!("{}[0]", field),
            "first bracket must start at 0",
        ));
    }

    let last = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        let at = format!("{}[{}]", field, index);
        validate_rate(year, &at, bracket.rate)?;

        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(EngineError::invalid_config(year, at, "max must exceed min"));
            }
            None if index != last => {
                return Err(EngineError::invalid_config(
                    year,
                    at,
                    "only the last bracket may be unbounded",
                ));
            }
            Some(_) if index == last => {
                return Err(EngineError::invalid_config(
                    year,
                    at,
                    "last bracket must be unbounded",
                ));
            }
            _ => {}
        }

        if let Some(next) = brackets.get(index + 1) {
            if bracket.max != Some(next.min) {
                return Err(EngineError::invalid_config(
                    year,
                    format!("{}[{}]", field, index + 1),
                    "brackets must be contiguous",
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(min: &str, max: Option<&str>, rate: &str) -> Bracket {
        Bracket {
            min: dec(min),
            max: max.map(dec),
            rate: dec(rate),
        }
    }

    #[test]
    fn test_bracket_contains_bounds() {
        let first = bracket("0", Some("100"), "0.1");
        let second = bracket("100", None, "0.2");

        assert!(first.contains(dec("0")));
        assert!(first.contains(dec("100")));
        assert!(!first.contains(dec("100.01")));
        assert!(!second.contains(dec("100")));
        assert!(second.contains(dec("100.01")));
        assert!(second.contains(dec("1000000")));
    }

    #[test]
    fn test_valid_brackets_pass() {
        let brackets = vec![
            bracket("0", Some("100"), "0.1"),
            bracket("100", Some("200"), "0.2"),
            bracket("200", None, "0.3"),
        ];
        assert!(validate_brackets(2024, "t", &brackets).is_ok());
    }

    #[test]
    fn test_gap_between_brackets_is_rejected() {
        let brackets = vec![
            bracket("0", Some("100"), "0.1"),
            bracket("150", None, "0.3"),
        ];
        match validate_brackets(2024, "t", &brackets) {
            Err(EngineError::InvalidConfig { field, message, .. }) => {
                assert_eq!(field, "t[1]");
                assert!(message.contains("contiguous"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_bounded_last_bracket_is_rejected() {
        let brackets = vec![bracket("0", Some("100"), "0.1")];
        assert!(validate_brackets(2024, "t", &brackets).is_err());
    }

    #[test]
    fn test_unbounded_middle_bracket_is_rejected() {
        let brackets = vec![bracket("0", None, "0.1"), bracket("100", None, "0.2")];
        assert!(validate_brackets(2024, "t", &brackets).is_err());
    }

    #[test]
    fn test_first_bracket_must_start_at_zero() {
        let brackets = vec![bracket("10", None, "0.1")];
        assert!(validate_brackets(2024, "t", &brackets).is_err());
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        assert!(validate_rate(2024, "r", dec("1.5")).is_err());
        assert!(validate_rate(2024, "r", dec("-0.01")).is_err());
        assert!(validate_rate(2024, "r", dec("0.2575")).is_ok());
    }

    #[test]
    fn test_every_rate_group_is_validated() {
        let cases: [(&str, fn(&mut YearConfig)); 9] = [
            ("child_benefit.phase_one_rates[1]", |c| {
                c.child_benefit.phase_one_rates[1] = dec("-0.1")
            }),
            ("child_benefit.phase_two_rates[0]", |c| {
                c.child_benefit.phase_two_rates[0] = dec("1.2")
            }),
            ("solidarity.single_component_reduction_rate", |c| {
                c.solidarity.single_component_reduction_rate = dec("7")
            }),
            ("gst_credit.single_supplement_phase_in_rate", |c| {
                c.gst_credit.single_supplement_phase_in_rate = dec("-3")
            }),
            ("work_premium.single_parent.rate", |c| {
                c.work_premium.single_parent.rate = dec("1.01")
            }),
            ("workers_benefit.family.phase_in_rate", |c| {
                c.workers_benefit.family.phase_in_rate = dec("-0.27")
            }),
            ("medical_supplement.quebec.expense_threshold_rate", |c| {
                c.medical_supplement.quebec.expense_threshold_rate = dec("3")
            }),
            ("old_age_security.gis.employment_partial_rate", |c| {
                c.old_age_security.gis.employment_partial_rate = dec("50")
            }),
            ("drug_insurance.couple.second_tier_rate", |c| {
                c.drug_insurance.couple.second_tier_rate = dec("-0.15")
            }),
        ];

        for (expected_field, corrupt) in cases {
            let mut config = ConfigLoader::embedded_year(2024).unwrap();
            corrupt(&mut config);
            match config.validate() {
                Err(EngineError::InvalidConfig { field, .. }) => {
                    assert_eq!(field, expected_field);
                }
                other => panic!("Expected InvalidConfig for {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_by_adults_pick() {
        let limits = ByAdults {
            single: dec("1500"),
            couple: dec("2500"),
        };
        assert_eq!(limits.pick(false), dec("1500"));
        assert_eq!(limits.pick(true), dec("2500"));
    }
}
