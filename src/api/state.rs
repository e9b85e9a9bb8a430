//! Application state for the disposable income API.
//!
//! One calculator is built per configured year when the state is created, so
//! requests only look one up.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::calculation::DisposableIncomeCalculator;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    calculators: Arc<BTreeMap<u16, DisposableIncomeCalculator>>,
}

impl AppState {
    /// Creates the state, building a calculator for every year the loader holds.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        let mut calculators = BTreeMap::new();
        for year in config.supported_years() {
            let year_config = config.for_year(year)?;
            calculators.insert(year, DisposableIncomeCalculator::from_config(&year_config)?);
        }
        Ok(Self {
            config: Arc::new(config),
            calculators: Arc::new(calculators),
        })
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the calculator bound to `year`.
    pub fn calculator(&self, year: u16) -> EngineResult<&DisposableIncomeCalculator> {
        self.calculators
            .get(&year)
            .ok_or_else(|| EngineError::UnsupportedTaxYear {
                year,
                supported: self
                    .calculators
                    .keys()
                    .map(|y| y.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
