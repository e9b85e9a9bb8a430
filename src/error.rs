//! Error types for the disposable income engine.
//!
//! Construction and configuration errors abort a calculation and carry enough
//! context (offending field, expected range) for the caller to fix the input.
//! Programs a household is not entitled to are not errors; they resolve to a
//! zero amount with an explicit phase.

use thiserror::Error;

/// The main error type for the disposable income engine.
///
/// # Example
///
/// ```
/// use disposable_income_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedTaxYear {
///     year: 2019,
///     supported: "2023, 2024, 2025".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Unsupported tax year 2019 (supported: 2023, 2024, 2025)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A household, person or child failed a structural check at construction.
    #[error("Invalid household field '{field}': {message}")]
    InvalidHousehold {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No configuration exists for the requested tax year.
    #[error("Unsupported tax year {year} (supported: {supported})")]
    UnsupportedTaxYear {
        /// The requested tax year.
        year: u16,
        /// The years that are configured.
        supported: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A year configuration parsed but holds inconsistent values.
    #[error("Invalid configuration for {year} at '{field}': {message}")]
    InvalidConfig {
        /// The tax year of the offending document.
        year: u16,
        /// Dotted path of the offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A calculator failed unexpectedly.
    #[error("Calculation error in {program}: {message}")]
    CalculationError {
        /// The program whose calculation failed.
        program: String,
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_household(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidHousehold {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(
        year: u16,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        EngineError::InvalidConfig {
            year,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
