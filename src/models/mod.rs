//! Core data models for the disposable income engine.
//!
//! Inputs ([`Person`], [`Child`], [`Household`]) are validated at
//! construction and immutable afterwards. [`CalculationResult`] is the output
//! of one calculation.

mod calculation_result;
mod household;
mod person;

pub use calculation_result::{
    AdultContributions, CalculationResult, ContributionsResult, TaxesResult, TransfersResult,
};
pub use household::{
    EmploymentConstraint, Household, HouseholdBuilder, HouseholdType, HousingInput,
    SocialAssistanceInput,
};
pub use person::{Child, ChildcareSubsidy, MAX_CHILD_AGE, MAX_PERSON_AGE, Person};
