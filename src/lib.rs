//! Household disposable income engine for the Quebec/Canada tax-and-transfer system.
//!
//! Given a household (one or two adults, their incomes, and any children) and
//! a tax year, the engine computes payroll contributions, Quebec and federal
//! income taxes, and the federal and provincial transfers the household is
//! entitled to, then derives its disposable income:
//!
//! ```text
//! disposable = gross income − contributions − taxes + transfers
//! ```
//!
//! Year parameters live in YAML documents under `config/years/` and are
//! embedded in the binary; see [`config::ConfigLoader`]. The entry point is
//! [`calculation::DisposableIncomeCalculator`], and [`api`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
