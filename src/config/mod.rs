//! Per-year parameter configuration.
//!
//! Each supported tax year has one YAML document holding every bracket table,
//! rate, threshold and cap. Documents are parsed into [`YearConfig`] values,
//! validated once, and never mutated.
//!
//! # Example
//!
//! ```
//! use disposable_income_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::embedded_year(2024).unwrap();
//! println!("Quebec brackets: {}", config.quebec_tax.brackets.len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Bracket, ByAdults, ChildBenefitConfig, ChildcareCreditConfig, DrugInsuranceConfig,
    DrugInsuranceThresholds, DrugInsuranceTiers, EmploymentInsuranceConfig,
    FamilyAllowanceConfig, GisConfig, GisSchedule, GstCreditConfig, HealthServicesFundConfig,
    HousingAllowanceConfig, HousingIncomeLimits, HousingTier, IncomeTaxConfig,
    MedicalSupplementConfig, MedicalSupplementsConfig, OasQuarter, OldAgeSecurityConfig,
    QpipConfig, QppConfig, SocialAssistanceConfig, SolidarityConfig, WorkPremiumConfig,
    WorkPremiumSchedule, WorkersBenefitConfig, WorkersBenefitSchedule, YearConfig,
};
