//! Request types for the disposable income API.
//!
//! The DTOs mirror the household model field for field but carry no
//! invariants; [`HouseholdRequest`] is converted with `TryFrom`, which runs
//! the same validation as [`HouseholdBuilder::build`](crate::models::HouseholdBuilder::build).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Child, ChildcareSubsidy, Household, HouseholdType, HousingInput, Person,
    SocialAssistanceInput,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The tax year whose parameters apply.
    pub tax_year: u16,
    /// The household to assess.
    pub household: HouseholdRequest,
}

/// Household information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdRequest {
    /// Composition of the household.
    pub household_type: HouseholdType,
    /// The primary adult.
    pub primary_person: PersonRequest,
    /// The second adult of a couple.
    #[serde(default)]
    pub spouse: Option<PersonRequest>,
    /// Dependent children.
    #[serde(default)]
    pub children: Vec<ChildRequest>,
    /// Declared number of children; must match `children` when present.
    #[serde(default)]
    pub num_children: Option<i64>,
    /// Eligible medical expenses of the household.
    #[serde(default)]
    pub medical_expenses: Decimal,
    /// Social assistance inputs.
    #[serde(default)]
    pub social_assistance: SocialAssistanceInput,
    /// Housing allowance inputs.
    #[serde(default)]
    pub housing: HousingInput,
}

/// Adult information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRequest {
    /// Age in years.
    pub age: u32,
    /// Gross employment income.
    #[serde(default)]
    pub gross_work_income: Decimal,
    /// Net self-employment income.
    #[serde(default)]
    pub self_employed_income: Decimal,
    /// Gross retirement income.
    #[serde(default)]
    pub gross_retirement_income: Decimal,
    /// Whether the person is retired.
    #[serde(default)]
    pub is_retired: bool,
}

/// Child information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRequest {
    /// Age in years.
    pub age: u32,
    /// Annual childcare expenses.
    #[serde(default)]
    pub childcare_expenses: Decimal,
    /// Subsidy category of the childcare place.
    #[serde(default)]
    pub subsidy: ChildcareSubsidy,
}

/// Prefixes the field of an [`EngineError::InvalidHousehold`] with `prefix`.
fn within(prefix: &str) -> impl Fn(EngineError) -> EngineError + '_ {
    move |error| match error {
        EngineError::InvalidHousehold { field, message } => EngineError::InvalidHousehold {
            field: format!("{}.{}", prefix, field),
            message,
        },
        other => other,
    }
}

impl PersonRequest {
    fn into_person(self, prefix: &str) -> EngineResult<Person> {
        Person::new(
            self.age,
            self.gross_work_income,
            self.gross_retirement_income,
            self.is_retired,
        )
        .and_then(|p| p.with_self_employed_income(self.self_employed_income))
        .map_err(within(prefix))
    }
}

impl TryFrom<ChildRequest> for Child {
    type Error = EngineError;

    fn try_from(req: ChildRequest) -> EngineResult<Self> {
        Child::new(req.age, req.childcare_expenses, req.subsidy)
    }
}

impl TryFrom<HouseholdRequest> for Household {
    type Error = EngineError;

    fn try_from(req: HouseholdRequest) -> EngineResult<Self> {
        let primary = req.primary_person.into_person("primary_person")?;
        let mut builder = Household::builder(req.household_type, primary)
            .medical_expenses(req.medical_expenses)
            .social_assistance(req.social_assistance)
            .housing(req.housing);

        if let Some(spouse) = req.spouse {
            builder = builder.spouse(spouse.into_person("spouse")?);
        }
        let children = req
            .children
            .into_iter()
            .map(Child::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        builder = builder.children(children);
        if let Some(count) = req.num_children {
            builder = builder.declared_children(count);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "tax_year": 2024,
            "household": {
                "household_type": "couple",
                "primary_person": { "age": 40, "gross_work_income": "60000" },
                "spouse": { "age": 38, "gross_work_income": "30000" },
                "children": [
                    { "age": 3, "childcare_expenses": "8000" },
                    { "age": 7, "subsidy": "subsidized" }
                ],
                "num_children": 2
            }
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.tax_year, 2024);
        assert_eq!(request.household.household_type, HouseholdType::Couple);
        assert_eq!(request.household.children.len(), 2);
        assert_eq!(request.household.children[1].subsidy, ChildcareSubsidy::Subsidized);

        let household = Household::try_from(request.household).unwrap();
        assert!(household.is_couple());
        assert_eq!(household.total_income(), dec("90000"));
        assert_eq!(household.total_childcare_expenses(), dec("8000"));
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let json = r#"{
            "household_type": "retired_single",
            "primary_person": { "age": 70, "gross_retirement_income": "20000", "is_retired": true }
        }"#;

        let request: HouseholdRequest = serde_json::from_str(json).unwrap();
        assert!(request.children.is_empty());
        assert_eq!(request.medical_expenses, Decimal::ZERO);
        assert_eq!(request.housing, HousingInput::default());

        let household = Household::try_from(request).unwrap();
        assert!(household.is_retired());
    }

    #[test]
    fn test_spouse_errors_are_prefixed() {
        let json = r#"{
            "household_type": "couple",
            "primary_person": { "age": 40 },
            "spouse": { "age": 38, "gross_work_income": "-5" }
        }"#;

        let request: HouseholdRequest = serde_json::from_str(json).unwrap();
        match Household::try_from(request) {
            Err(EngineError::InvalidHousehold { field, .. }) => {
                assert_eq!(field, "spouse.gross_work_income");
            }
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_child_count_is_rejected() {
        let json = r#"{
            "household_type": "single_parent",
            "primary_person": { "age": 30, "gross_work_income": "25000" },
            "children": [ { "age": 4 } ],
            "num_children": 2
        }"#;

        let request: HouseholdRequest = serde_json::from_str(json).unwrap();
        match Household::try_from(request) {
            Err(EngineError::InvalidHousehold { field, .. }) => {
                assert_eq!(field, "num_children");
            }
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }
}
