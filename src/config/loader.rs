//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading screener
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineSettings, Parameters, ScreenerConfig, VariableCatalog};

/// Loads and provides access to screener configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/screener/
/// ├── engine.yaml       # Engine name, version and simulated year
/// ├── variables.yaml    # Engine variables and their units
/// └── parameters.yaml   # Program parameters the engine does not encode
/// ```
///
/// # Example
///
/// ```no_run
/// use eligibility_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/screener").unwrap();
/// println!("Engine: {} {}", loader.engine().name, loader.engine().version);
/// println!("Poverty guideline for 3: {}", loader.parameters().poverty_guideline(3));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScreenerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/screener")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A CCDF income limit names a state without a median income table
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let variables = Self::load_yaml::<VariableCatalog>(&path.join("variables.yaml"))?;

        let parameters_path = path.join("parameters.yaml");
        let parameters = Self::load_yaml::<Parameters>(&parameters_path)?;
        Self::validate_parameters(&parameters_path, &parameters)?;

        Ok(Self {
            config: ScreenerConfig::new(engine, variables, parameters),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_parameters(path: &Path, parameters: &Parameters) -> EngineResult<()> {
        let missing = parameters
            .ccdf_smi_percent
            .keys()
            .find(|state| !parameters.state_median_income.contains_key(*state));

        match missing {
            Some(state) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("ccdf_smi_percent lists {} without a state_median_income table", state),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineSettings {
        self.config.engine()
    }

    /// Returns the variable catalog.
    pub fn variables(&self) -> &VariableCatalog {
        self.config.variables()
    }

    /// Returns the program parameters.
    pub fn parameters(&self) -> &Parameters {
        self.config.parameters()
    }
}
