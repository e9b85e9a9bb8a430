//! Person and child models.
//!
//! Both are immutable once constructed; constructors reject negative amounts
//! and out-of-range ages with [`EngineError::InvalidHousehold`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Oldest accepted age for an adult.
pub const MAX_PERSON_AGE: u32 = 120;

/// Oldest accepted age for a dependent child.
pub const MAX_CHILD_AGE: u32 = 17;

pub(crate) fn non_negative(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::invalid_household(
            field,
            format!("must be >= 0, got {}", amount),
        ));
    }
    Ok(amount)
}

/// An adult member of a household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    age: u32,
    gross_work_income: Decimal,
    self_employed_income: Decimal,
    gross_retirement_income: Decimal,
    is_retired: bool,
}

impl Person {
    /// Creates a person with employment and retirement income.
    ///
    /// # Examples
    ///
    /// ```
    /// use disposable_income_engine::models::Person;
    /// use rust_decimal::Decimal;
    ///
    /// let person = Person::new(35, Decimal::from(50_000), Decimal::ZERO, false).unwrap();
    /// assert_eq!(person.total_income(), Decimal::from(50_000));
    ///
    /// assert!(Person::new(35, Decimal::from(-1), Decimal::ZERO, false).is_err());
    /// ```
    pub fn new(
        age: u32,
        gross_work_income: Decimal,
        gross_retirement_income: Decimal,
        is_retired: bool,
    ) -> EngineResult<Self> {
        if age > MAX_PERSON_AGE {
            return Err(EngineError::invalid_household(
                "age",
                format!("must be between 0 and {}, got {}", MAX_PERSON_AGE, age),
            ));
        }
        Ok(Self {
            age,
            gross_work_income: non_negative("gross_work_income", gross_work_income)?,
            self_employed_income: Decimal::ZERO,
            gross_retirement_income: non_negative(
                "gross_retirement_income",
                gross_retirement_income,
            )?,
            is_retired,
        })
    }

    /// Returns a copy of this person with self-employment income.
    pub fn with_self_employed_income(self, self_employed_income: Decimal) -> EngineResult<Self> {
        Ok(Self {
            self_employed_income: non_negative("self_employed_income", self_employed_income)?,
            ..self
        })
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Gross employment income.
    pub fn gross_work_income(&self) -> Decimal {
        self.gross_work_income
    }

    /// Net self-employment income.
    pub fn self_employed_income(&self) -> Decimal {
        self.self_employed_income
    }

    /// Gross retirement income (pensions, annuities, RRIF withdrawals).
    pub fn gross_retirement_income(&self) -> Decimal {
        self.gross_retirement_income
    }

    /// Whether the person is flagged as retired.
    pub fn is_retired(&self) -> bool {
        self.is_retired
    }

    /// Employment plus self-employment income.
    pub fn earned_income(&self) -> Decimal {
        self.gross_work_income + self.self_employed_income
    }

    /// Sum of the three income fields.
    pub fn total_income(&self) -> Decimal {
        self.gross_work_income + self.self_employed_income + self.gross_retirement_income
    }
}

/// Whether a child's daycare place is subsidized (reduced-contribution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChildcareSubsidy {
    /// Reduced-contribution place; expenses do not qualify for the credit.
    Subsidized,
    /// Non-subsidized place.
    #[default]
    NonSubsidized,
}

/// A dependent child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Child {
    age: u32,
    childcare_expenses: Decimal,
    subsidy: ChildcareSubsidy,
}

impl Child {
    /// Creates a child aged 0 to 17.
    pub fn new(
        age: u32,
        childcare_expenses: Decimal,
        subsidy: ChildcareSubsidy,
    ) -> EngineResult<Self> {
        if age > MAX_CHILD_AGE {
            return Err(EngineError::invalid_household(
                "children.age",
                format!("must be between 0 and {}, got {}", MAX_CHILD_AGE, age),
            ));
        }
        Ok(Self {
            age,
            childcare_expenses: non_negative("children.childcare_expenses", childcare_expenses)?,
            subsidy,
        })
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Annual childcare expenses paid for this child.
    pub fn childcare_expenses(&self) -> Decimal {
        self.childcare_expenses
    }

    /// Subsidy category of the childcare place.
    pub fn subsidy(&self) -> ChildcareSubsidy {
        self.subsidy
    }
}
