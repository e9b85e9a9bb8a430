//! Household model and its builder.
//!
//! A [`Household`] is the unit of assessment: one or two adults plus zero or
//! more children, with the extra inputs the social assistance and housing
//! allowance programs need. It can only be obtained through
//! [`HouseholdBuilder::build`], which enforces the structural invariants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::person::{non_negative, Child, Person};

/// The composition of a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    /// One adult living alone.
    Single,
    /// One adult with children.
    SingleParent,
    /// Two adults.
    Couple,
    /// One retired adult living alone.
    RetiredSingle,
    /// Two retired adults.
    RetiredCouple,
}

impl HouseholdType {
    /// Returns true for the two-adult household types.
    pub fn is_couple(self) -> bool {
        matches!(self, HouseholdType::Couple | HouseholdType::RetiredCouple)
    }

    /// Returns true for the retired household types.
    pub fn is_retired(self) -> bool {
        matches!(
            self,
            HouseholdType::RetiredSingle | HouseholdType::RetiredCouple
        )
    }
}

/// Capacity for employment, as assessed by the social assistance programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentConstraint {
    /// No limitation.
    #[default]
    None,
    /// Temporarily limited capacity.
    Temporary,
    /// Severely limited capacity.
    Severe,
}

/// Inputs used only by the social assistance calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SocialAssistanceInput {
    /// Constraint of the primary adult.
    #[serde(default)]
    pub primary_constraint: EmploymentConstraint,
    /// Constraint of the spouse, if any.
    #[serde(default)]
    pub spouse_constraint: EmploymentConstraint,
    /// Liquid assets of the household.
    #[serde(default)]
    pub liquid_assets: Decimal,
    /// Whether this is the household's first application.
    #[serde(default)]
    pub first_time_applicant: bool,
    /// Whether the (single) adult lives with their parents.
    #[serde(default)]
    pub lives_with_parents: bool,
}

/// Inputs used only by the housing allowance calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HousingInput {
    /// Annual rent or housing cost.
    #[serde(default)]
    pub annual_housing_cost: Decimal,
    /// Value of the household's liquid assets.
    #[serde(default)]
    pub liquid_assets: Decimal,
}

/// A validated household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    household_type: HouseholdType,
    primary: Person,
    spouse: Option<Person>,
    children: Vec<Child>,
    medical_expenses: Decimal,
    social_assistance: SocialAssistanceInput,
    housing: HousingInput,
}

impl Household {
    /// Starts building a household of the given type.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::models::{Household, HouseholdType, Person};
    /// use rust_decimal::Decimal;
    ///
    /// let primary = Person::new(35, Decimal::from(50_000), Decimal::ZERO, false).unwrap();
    /// let household = Household::builder(HouseholdType::Single, primary).build().unwrap();
    /// assert!(!household.is_couple());
    ///
    /// // A couple without a spouse is rejected.
    /// let primary = Person::new(35, Decimal::from(50_000), Decimal::ZERO, false).unwrap();
    /// assert!(Household::builder(HouseholdType::Couple, primary).build().is_err());
    /// ```
    pub fn builder(household_type: HouseholdType, primary: Person) -> HouseholdBuilder {
        HouseholdBuilder {
            household_type,
            primary,
            spouse: None,
            children: Vec::new(),
            declared_children: None,
            medical_expenses: Decimal::ZERO,
            social_assistance: SocialAssistanceInput::default(),
            housing: HousingInput::default(),
        }
    }

    /// The household composition.
    pub fn household_type(&self) -> HouseholdType {
        self.household_type
    }

    /// The primary adult.
    pub fn primary(&self) -> &Person {
        &self.primary
    }

    /// The spouse, present exactly for couple types.
    pub fn spouse(&self) -> Option<&Person> {
        self.spouse.as_ref()
    }

    /// The adults of the household, primary first.
    pub fn adults(&self) -> impl Iterator<Item = &Person> {
        std::iter::once(&self.primary).chain(self.spouse.as_ref())
    }

    /// The dependent children.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Number of dependent children.
    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }

    /// Number of children strictly younger than `age`.
    pub fn children_under(&self, age: u32) -> usize {
        self.children.iter().filter(|c| c.age() < age).count()
    }

    /// Medical expenses paid by the household.
    pub fn medical_expenses(&self) -> Decimal {
        self.medical_expenses
    }

    /// Social assistance inputs.
    pub fn social_assistance(&self) -> &SocialAssistanceInput {
        &self.social_assistance
    }

    /// Housing allowance inputs.
    pub fn housing(&self) -> &HousingInput {
        &self.housing
    }

    /// Returns true when the household has two adults.
    pub fn is_couple(&self) -> bool {
        self.household_type.is_couple()
    }

    /// Returns true for the retired household types.
    pub fn is_retired(&self) -> bool {
        self.household_type.is_retired()
    }

    /// Returns true when the household has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true when the only adult lives without a spouse.
    pub fn lives_alone(&self) -> bool {
        !self.is_couple()
    }

    /// Gross income of every adult combined.
    pub fn total_income(&self) -> Decimal {
        self.adults().map(Person::total_income).sum()
    }

    /// Employment and self-employment income of every adult combined.
    pub fn total_work_income(&self) -> Decimal {
        self.adults().map(Person::earned_income).sum()
    }

    /// Childcare expenses of every child combined.
    pub fn total_childcare_expenses(&self) -> Decimal {
        self.children.iter().map(Child::childcare_expenses).sum()
    }
}

/// Builder for [`Household`]; every check runs in [`HouseholdBuilder::build`].
#[derive(Debug, Clone)]
pub struct HouseholdBuilder {
    household_type: HouseholdType,
    primary: Person,
    spouse: Option<Person>,
    children: Vec<Child>,
    declared_children: Option<i64>,
    medical_expenses: Decimal,
    social_assistance: SocialAssistanceInput,
    housing: HousingInput,
}

impl HouseholdBuilder {
    /// Sets the spouse.
    pub fn spouse(mut self, spouse: Person) -> Self {
        self.spouse = Some(spouse);
        self
    }

    /// Adds one child.
    pub fn child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    /// Adds several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Child>) -> Self {
        self.children.extend(children);
        self
    }

    /// Records a caller-declared child count, checked against the child list.
    pub fn declared_children(mut self, count: i64) -> Self {
        self.declared_children = Some(count);
        self
    }

    /// Sets the household's medical expenses.
    pub fn medical_expenses(mut self, amount: Decimal) -> Self {
        self.medical_expenses = amount;
        self
    }

    /// Sets the social assistance inputs.
    pub fn social_assistance(mut self, input: SocialAssistanceInput) -> Self {
        self.social_assistance = input;
        self
    }

    /// Sets the housing allowance inputs.
    pub fn housing(mut self, input: HousingInput) -> Self {
        self.housing = input;
        self
    }

    /// Validates and builds the household.
    pub fn build(self) -> EngineResult<Household> {
        if let Some(count) = self.declared_children {
            if count < 0 {
                return Err(EngineError::invalid_household(
                    "num_children",
                    format!("must be >= 0, got {}", count),
                ));
            }
            if count as usize != self.children.len() {
                return Err(EngineError::invalid_household(
                    "num_children",
                    format!(
                        "declared {} children but {} were provided",
                        count,
                        self.children.len()
                    ),
                ));
            }
        }

        match (self.household_type.is_couple(), &self.spouse) {
            (true, None) => {
                return Err(EngineError::invalid_household(
                    "spouse",
                    format!("required for {:?} households", self.household_type),
                ));
            }
            (false, Some(_)) => {
                return Err(EngineError::invalid_household(
                    "spouse",
                    format!("not allowed for {:?} households", self.household_type),
                ));
            }
            _ => {}
        }

        if self.household_type.is_retired() {
            if !self.primary.is_retired() {
                return Err(EngineError::invalid_household(
                    "primary_person.is_retired",
                    format!("must be true for {:?} households", self.household_type),
                ));
            }
            if self.spouse.as_ref().is_some_and(|s| !s.is_retired()) {
                return Err(EngineError::invalid_household(
                    "spouse.is_retired",
                    format!("must be true for {:?} households", self.household_type),
                ));
            }
        }

        let medical_expenses = non_negative("medical_expenses", self.medical_expenses)?;
        non_negative(
            "social_assistance.liquid_assets",
            self.social_assistance.liquid_assets,
        )?;
        non_negative("housing.annual_housing_cost", self.housing.annual_housing_cost)?;
        non_negative("housing.liquid_assets", self.housing.liquid_assets)?;

        Ok(Household {
            household_type: self.household_type,
            primary: self.primary,
            spouse: self.spouse,
            children: self.children,
            medical_expenses,
            social_assistance: self.social_assistance,
            housing: self.housing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChildcareSubsidy;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn worker(age: u32, income: &str) -> Person {
        Person::new(age, dec(income), Decimal::ZERO, false).unwrap()
    }

    fn retiree(age: u32, income: &str) -> Person {
        Person::new(age, Decimal::ZERO, dec(income), true).unwrap()
    }

    fn child(age: u32, expenses: &str) -> Child {
        Child::new(age, dec(expenses), ChildcareSubsidy::NonSubsidized).unwrap()
    }

    fn field_of(result: EngineResult<Household>) -> String {
        match result {
            Err(EngineError::InvalidHousehold { field, .. }) => field,
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }

    #[test]
    fn test_couple_derived_properties() {
        let household = Household::builder(HouseholdType::Couple, worker(40, "60000"))
            .spouse(worker(38, "30000"))
            .child(child(3, "5000"))
            .child(child(9, "1200"))
            .build()
            .unwrap();

        assert!(household.is_couple());
        assert!(!household.is_retired());
        assert!(!household.lives_alone());
        assert_eq!(household.adults().count(), 2);
        assert_eq!(household.total_income(), dec("90000"));
        assert_eq!(household.total_work_income(), dec("90000"));
        assert_eq!(household.number_of_children(), 2);
        assert_eq!(household.children_under(6), 1);
        assert_eq!(household.total_childcare_expenses(), dec("6200"));
    }

    #[test]
    fn test_couple_without_spouse_is_rejected() {
        let result = Household::builder(HouseholdType::Couple, worker(40, "60000")).build();
        assert_eq!(field_of(result), "spouse");
    }

    #[test]
    fn test_single_with_spouse_is_rejected() {
        let result = Household::builder(HouseholdType::Single, worker(40, "60000"))
            .spouse(worker(40, "1"))
            .build();
        assert_eq!(field_of(result), "spouse");
    }

    #[test]
    fn test_retired_single_requires_retired_flag() {
        let result = Household::builder(HouseholdType::RetiredSingle, worker(70, "20000")).build();
        assert_eq!(field_of(result), "primary_person.is_retired");
    }

    #[test]
    fn test_retired_couple_requires_retired_spouse() {
        let result = Household::builder(HouseholdType::RetiredCouple, retiree(70, "20000"))
            .spouse(worker(66, "10000"))
            .build();
        assert_eq!(field_of(result), "spouse.is_retired");
    }

    #[test]
    fn test_negative_declared_children_is_rejected() {
        let result = Household::builder(HouseholdType::SingleParent, worker(30, "20000"))
            .declared_children(-1)
            .build();
        assert_eq!(field_of(result), "num_children");
    }

    #[test]
    fn test_declared_children_must_match_list() {
        let result = Household::builder(HouseholdType::SingleParent, worker(30, "20000"))
            .child(child(2, "0"))
            .declared_children(2)
            .build();
        assert_eq!(field_of(result), "num_children");

        let ok = Household::builder(HouseholdType::SingleParent, worker(30, "20000"))
            .child(child(2, "0"))
            .declared_children(1)
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_negative_medical_expenses_rejected() {
        let result = Household::builder(HouseholdType::Single, worker(30, "20000"))
            .medical_expenses(dec("-1"))
            .build();
        assert_eq!(field_of(result), "medical_expenses");
    }

    #[test]
    fn test_negative_housing_cost_rejected() {
        let result = Household::builder(HouseholdType::Single, worker(30, "20000"))
            .housing(HousingInput {
                annual_housing_cost: dec("-10"),
                liquid_assets: Decimal::ZERO,
            })
            .build();
        assert_eq!(field_of(result), "housing.annual_housing_cost");
    }

    #[test]
    fn test_negative_liquid_assets_rejected() {
        let result = Household::builder(HouseholdType::Single, worker(30, "20000"))
            .social_assistance(SocialAssistanceInput {
                liquid_assets: dec("-1"),
                ..Default::default()
            })
            .build();
        assert_eq!(field_of(result), "social_assistance.liquid_assets");
    }

    #[test]
    fn test_retired_couple_is_retired_and_couple() {
        let household = Household::builder(HouseholdType::RetiredCouple, retiree(70, "20000"))
            .spouse(retiree(68, "15000"))
            .build()
            .unwrap();
        assert!(household.is_retired());
        assert!(household.is_couple());
        assert_eq!(household.total_work_income(), Decimal::ZERO);
        assert_eq!(household.total_income(), dec("35000"));
    }

    #[test]
    fn test_household_type_serialization() {
        assert_eq!(
            serde_json::to_string(&HouseholdType::SingleParent).unwrap(),
            "\"single_parent\""
        );
        let t: HouseholdType = serde_json::from_str("\"retired_couple\"").unwrap();
        assert_eq!(t, HouseholdType::RetiredCouple);
    }
}
