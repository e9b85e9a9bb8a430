//! Typed values passed between calculation stages.
//!
//! The contributions stage produces [`ContributionTotals`], which the tax
//! stage consumes as deductions. The tax stage produces a
//! [`NetIncomeBreakdown`], which every transfer calculator consumes as its
//! income base. Adults are indexed primary first, spouse second.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ContributionsResult, Household};

use super::common::non_negative;

/// Deductible contributions per adult, handed from the contributions stage
/// to the tax stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionTotals {
    /// Deductible contributions (QPP + EI + QPIP) per adult.
    pub deductions: Vec<Decimal>,
    /// Every contribution of the household, deductible or not.
    pub total: Decimal,
}

impl ContributionTotals {
    /// Extracts the stage boundary values from the contributions result.
    pub fn from_result(result: &ContributionsResult) -> Self {
        Self {
            deductions: result.adults.iter().map(|a| a.deductible).collect(),
            total: result.total,
        }
    }

    /// Deduction of the adult at `index`; zero when absent.
    pub fn deduction_for(&self, index: usize) -> Decimal {
        self.deductions.get(index).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Net income per adult and for the family, handed to the transfer stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetIncomeBreakdown {
    /// Net income per adult: total income minus deductible contributions.
    pub individual: Vec<Decimal>,
    /// Sum of the adults' net incomes.
    pub family: Decimal,
    /// Employment and self-employment income of the family.
    pub family_work_income: Decimal,
}

impl NetIncomeBreakdown {
    /// Derives net incomes from the household and its deductions.
    pub fn new(household: &Household, contributions: &ContributionTotals) -> Self {
        let individual: Vec<Decimal> = household
            .adults()
            .enumerate()
            .map(|(index, adult)| {
                non_negative(adult.total_income() - contributions.deduction_for(index))
            })
            .collect();
        let family = individual.iter().copied().sum();

        Self {
            individual,
            family,
            family_work_income: household.total_work_income(),
        }
    }

    /// Net income of the adult at `index`; zero when absent.
    pub fn for_adult(&self, index: usize) -> Decimal {
        self.individual.get(index).copied().unwrap_or(Decimal::ZERO)
    }
}
