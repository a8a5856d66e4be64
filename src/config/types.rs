//! Configuration types for the screener.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::Unit;

/// Identifies the simulation engine and the year it simulates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Engine name, e.g. "policyengine-us".
    pub name: String,
    /// Engine version reported in results.
    pub version: String,
    /// The year simulated.
    pub period: i32,
}

impl EngineSettings {
    /// Creates engine settings.
    pub fn new(name: impl Into<String>, version: impl Into<String>, period: i32) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            period,
        }
    }
}

/// Every engine variable the calculators may use, with its unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCatalog {
    /// Variable name to unit.
    pub variables: HashMap<String, Unit>,
}

impl VariableCatalog {
    /// Adds a variable.
    pub fn with(mut self, field: &str, unit: Unit) -> Self {
        self.variables.insert(field.to_string(), unit);
        self
    }

    /// Returns the unit of `field`, if the engine defines it.
    pub fn unit_of(&self, field: &str) -> Option<Unit> {
        self.variables.get(field).copied()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Federal poverty guideline for the simulated year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PovertyGuideline {
    /// Guideline for a household of one.
    pub base: Decimal,
    /// Added for each person beyond the first.
    pub per_additional_person: Decimal,
}

/// Program parameters the engine does not encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Federal poverty guideline.
    pub federal_poverty_guideline: PovertyGuideline,
    /// Smallest monthly SNAP allotment.
    pub snap_minimum_allotment: Decimal,
    /// School days per year.
    pub school_days: u32,
    /// Lifeline income limit as a percent of the poverty guideline.
    pub lifeline_fpl_percent: Decimal,
    /// CCDF income limit as a percent of state median income, by state.
    #[serde(default)]
    pub ccdf_smi_percent: BTreeMap<String, Decimal>,
    /// Yearly state median income by state and household size.
    #[serde(default)]
    pub state_median_income: BTreeMap<String, BTreeMap<u32, Decimal>>,
}

impl Parameters {
    /// Returns the yearly poverty guideline for a household of `size`.
    ///
    /// # Example
    ///
    /// ```
    /// use eligibility_engine::config::{Parameters, PovertyGuideline};
    /// use rust_decimal::Decimal;
    ///
    /// let parameters = Parameters {
    ///     federal_poverty_guideline: PovertyGuideline {
    ///         base: Decimal::from(15060),
    ///         per_additional_person: Decimal::from(5380),
    ///     },
    ///     snap_minimum_allotment: Decimal::from(23),
    ///     school_days: 180,
    ///     lifeline_fpl_percent: Decimal::from(135),
    ///     ccdf_smi_percent: Default::default(),
    ///     state_median_income: Default::default(),
    /// };
    /// assert_eq!(parameters.poverty_guideline(3), Decimal::from(25820));
    /// ```
    pub fn poverty_guideline(&self, size: u32) -> Decimal {
        let guideline = &self.federal_poverty_guideline;
        let additional = Decimal::from(size.saturating_sub(1));
        guideline.base + guideline.per_additional_person * additional
    }

    /// Returns the state median income for a household of `size`.
    ///
    /// Households larger than the table use the largest size listed.
    pub fn state_median_income(&self, state: &str, size: u32) -> Option<Decimal> {
        self.state_median_income
            .get(state)?
            .range(..=size.max(1))
            .next_back()
            .map(|(_, income)| *income)
    }

    /// Returns the yearly CCDF income limit for a household of `size`.
    pub fn ccdf_income_limit(&self, state: &str, size: u32) -> Option<Decimal> {
        let percent = self.ccdf_smi_percent.get(state)?;
        let median = self.state_median_income(state, size)?;
        Some(median * percent / Decimal::ONE_HUNDRED)
    }

    /// Returns the yearly Lifeline income limit for a household of `size`.
    pub fn lifeline_income_limit(&self, size: u32) -> Decimal {
        self.poverty_guideline(size) * self.lifeline_fpl_percent / Decimal::ONE_HUNDRED
    }
}

/// The complete screener configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    engine: EngineSettings,
    variables: VariableCatalog,
    parameters: Parameters,
}

impl ScreenerConfig {
    /// Creates a ScreenerConfig from its component parts.
    pub fn new(engine: EngineSettings, variables: VariableCatalog, parameters: Parameters) -> Self {
        Self {
            engine,
            variables,
            parameters,
        }
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }

    /// Returns the variable catalog.
    pub fn variables(&self) -> &VariableCatalog {
        &self.variables
    }

    /// Returns the program parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
