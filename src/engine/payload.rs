//! Wire types exchanged with the microsimulation engine.
//!
//! The engine takes a household grouped by unit of calculation. Every entity
//! maps variable names to `{period: value}`; a `null` value asks the engine
//! to compute that variable.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engine entity key of the single SPM unit.
pub const SPM_UNIT_KEY: &str = "spm_unit";

/// Engine entity key of the household.
pub const HOUSEHOLD_KEY: &str = "household";

/// The unit of calculation a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// One household member.
    People,
    /// A tax filing unit.
    TaxUnits,
    /// The SPM unit used by food and cash assistance programs.
    SpmUnits,
    /// The whole household.
    Households,
}

impl Unit {
    /// Returns the engine's name for this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::People => "people",
            Unit::TaxUnits => "tax_units",
            Unit::SpmUnits => "spm_units",
            Unit::Households => "households",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single variable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// A boolean flag.
    Bool(bool),
    /// A code such as a state abbreviation or zip code.
    Text(String),
    /// A number, sent as a JSON number.
    Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
}

impl VariableValue {
    /// Returns the value as a number; booleans count as 0 or 1.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            VariableValue::Number(n) => Some(*n),
            VariableValue::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
            VariableValue::Text(_) => None,
        }
    }

    /// Returns the value as a flag; non-zero numbers count as true.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariableValue::Bool(b) => Some(*b),
            VariableValue::Number(n) => Some(!n.is_zero()),
            VariableValue::Text(_) => None,
        }
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

impl From<Decimal> for VariableValue {
    fn from(value: Decimal) -> Self {
        VariableValue::Number(value)
    }
}

impl From<u32> for VariableValue {
    fn from(value: u32) -> Self {
        VariableValue::Number(Decimal::from(value))
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

/// Values of one variable keyed by period.
pub type PeriodValues = BTreeMap<String, Option<VariableValue>>;

/// One member, tax unit, SPM unit or household in the engine payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Person keys belonging to a group entity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    /// Variable name to per-period values.
    #[serde(flatten)]
    pub variables: BTreeMap<String, PeriodValues>,
}

impl Entity {
    /// Creates a group entity with the given member keys.
    pub fn with_members(members: Vec<String>) -> Self {
        Self {
            members,
            variables: BTreeMap::new(),
        }
    }

    /// Returns the value of `field` for `period`, if one is present.
    pub fn get(&self, field: &str, period: &str) -> Option<&VariableValue> {
        self.variables
            .get(field)
            .and_then(|values| values.get(period))
            .and_then(Option::as_ref)
    }

    /// Returns true if `field` is present for `period`, with or without a value.
    pub fn has(&self, field: &str, period: &str) -> bool {
        self.variables
            .get(field)
            .is_some_and(|values| values.contains_key(period))
    }

    /// Sets `field` for `period`, replacing any previous entry.
    pub fn set(&mut self, field: &str, period: &str, value: VariableValue) {
        self.variables
            .entry(field.to_string())
            .or_default()
            .insert(period.to_string(), Some(value));
    }

    /// Requests `field` for `period` unless an input value is already present.
    pub fn request(&mut self, field: &str, period: &str) {
        self.variables
            .entry(field.to_string())
            .or_default()
            .entry(period.to_string())
            .or_insert(None);
    }

    /// Returns every `(field, period)` pair still waiting for a value.
    pub fn requested(&self) -> Vec<(&str, &str)> {
        self.variables
            .iter()
            .flat_map(|(field, values)| {
                values
                    .iter()
                    .filter(|(_, value)| value.is_none())
                    .map(move |(period, _)| (field.as_str(), period.as_str()))
            })
            .collect()
    }
}

/// A household as the engine sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineHousehold {
    /// Members keyed by member id.
    #[serde(default)]
    pub people: BTreeMap<String, Entity>,
    /// Tax units keyed `tax_unit`, `tax_unit_2`, ...
    #[serde(default)]
    pub tax_units: BTreeMap<String, Entity>,
    /// The SPM unit.
    #[serde(default)]
    pub spm_units: BTreeMap<String, Entity>,
    /// The household.
    #[serde(default)]
    pub households: BTreeMap<String, Entity>,
}

impl EngineHousehold {
    /// Returns the entities of one unit.
    pub fn entities(&self, unit: Unit) -> &BTreeMap<String, Entity> {
        match unit {
            Unit::People => &self.people,
            Unit::TaxUnits => &self.tax_units,
            Unit::SpmUnits => &self.spm_units,
            Unit::Households => &self.households,
        }
    }

    /// Returns the entities of one unit for modification.
    pub fn entities_mut(&mut self, unit: Unit) -> &mut BTreeMap<String, Entity> {
        match unit {
            Unit::People => &mut self.people,
            Unit::TaxUnits => &mut self.tax_units,
            Unit::SpmUnits => &mut self.spm_units,
            Unit::Households => &mut self.households,
        }
    }

    /// Returns one entity.
    pub fn entity(&self, unit: Unit, key: &str) -> Option<&Entity> {
        self.entities(unit).get(key)
    }

    /// Returns the value of `field` on one entity for `period`.
    pub fn value(&self, unit: Unit, key: &str, field: &str, period: &str) -> Option<&VariableValue> {
        self.entity(unit, key).and_then(|e| e.get(field, period))
    }
}

/// The body of one engine call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRequest {
    /// Inputs plus requested outputs.
    pub household: EngineHousehold,
}
