//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type, an explicit lookup table
//! from tax year to an immutable, validated [`YearConfig`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::YearConfig;

/// The year documents compiled into the crate, keyed by tax year.
const EMBEDDED_YEARS: &[(u16, &str)] = &[
    (2023, include_str!("../../config/years/2023.yaml")),
    (2024, include_str!("../../config/years/2024.yaml")),
    (2025, include_str!("../../config/years/2025.yaml")),
];

/// Loads and provides access to per-year parameters.
///
/// # Directory Structure
///
/// When loading from disk, the directory holds one YAML document per year:
/// ```text
/// config/years/
/// ├── 2023.yaml
/// ├── 2024.yaml
/// └── 2025.yaml
/// ```
///
/// # Example
///
/// ```
/// use disposable_income_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let config = loader.for_year(2024).unwrap();
/// assert_eq!(config.tax_year, 2024);
/// assert!(loader.for_year(1999).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    years: BTreeMap<u16, Arc<YearConfig>>,
}

impl ConfigLoader {
    /// Parses and validates every year document compiled into the crate.
    pub fn embedded() -> EngineResult<Self> {
        let mut years = BTreeMap::new();
        for (year, source) in EMBEDDED_YEARS {
            let config = Self::parse(&embedded_path(*year), source)?;
            Self::check_key(*year, &config)?;
            years.insert(*year, Arc::new(config));
        }
        Ok(Self { years })
    }

    /// Parses and validates the single embedded document for `year`.
    ///
    /// Unknown years fail with [`EngineError::UnsupportedTaxYear`].
    pub fn embedded_year(year: u16) -> EngineResult<YearConfig> {
        let source = EMBEDDED_YEARS
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, source)| *source)
            .ok_or_else(|| EngineError::UnsupportedTaxYear {
                year,
                supported: join_years(EMBEDDED_YEARS.iter().map(|(y, _)| *y)),
            })?;

        let config = Self::parse(&embedded_path(year), source)?;
        Self::check_key(year, &config)?;
        Ok(config)
    }

    /// Loads every `*.yaml` document from the specified directory.
    ///
    /// Each document is keyed by its own `tax_year` field; two documents
    /// for the same year are rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut years = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let path_str = path.display().to_string();
            let content = fs::read_to_string(&path).map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;
            let config = Self::parse(&path_str, &content)?;

            let year = config.tax_year;
            if years.insert(year, Arc::new(config)).is_some() {
                return Err(EngineError::invalid_config(
                    year,
                    "tax_year",
                    format!("duplicate document in {}", dir_str),
                ));
            }
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no year files found)", dir_str),
            });
        }

        Ok(Self { years })
    }

    /// Parses a YAML document and validates it.
    fn parse(path: &str, content: &str) -> EngineResult<YearConfig> {
        let config: YearConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        debug!(path, tax_year = config.tax_year, "Loaded year configuration");
        Ok(config)
    }

    fn check_key(year: u16, config: &YearConfig) -> EngineResult<()> {
        if config.tax_year != year {
            return Err(EngineError::invalid_config(
                year,
                "tax_year",
                format!("document declares {}", config.tax_year),
            ));
        }
        Ok(())
    }

    /// Returns the configuration for an exact tax year.
    pub fn for_year(&self, year: u16) -> EngineResult<Arc<YearConfig>> {
        self.years
            .get(&year)
            .cloned()
            .ok_or_else(|| EngineError::UnsupportedTaxYear {
                year,
                supported: join_years(self.years.keys().copied()),
            })
    }

    /// Returns the supported tax years in ascending order.
    pub fn supported_years(&self) -> Vec<u16> {
        self.years.keys().copied().collect()
    }
}

fn embedded_path(year: u16) -> String {
    format!("config/years/{}.yaml", year)
}

fn join_years(years: impl Iterator<Item = u16>) -> String {
    years
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
