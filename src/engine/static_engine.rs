//! A table-backed engine for replays, tests and benchmarks.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::EngineSettings;
use crate::error::EngineResult;

use super::payload::{EngineHousehold, EngineRequest, Unit, VariableValue};
use super::simulation::SimulationEngine;

const UNITS: [Unit; 4] = [Unit::People, Unit::TaxUnits, Unit::SpmUnits, Unit::Households];

/// Answers requested outputs from a fixed table.
///
/// Lookups are keyed by unit, entity key and variable name. Anything not in
/// the table takes the default value if one is set and is otherwise left
/// unanswered.
///
/// # Example
///
/// ```
/// use eligibility_engine::config::EngineSettings;
/// use eligibility_engine::engine::{SimulationEngine, StaticEngine, Unit};
/// use rust_decimal::Decimal;
///
/// let engine = StaticEngine::new(EngineSettings::new("static", "1.0.0", 2024))
///     .with_value(Unit::SpmUnits, "spm_unit", "snap", Decimal::from(2400));
/// assert_eq!(engine.period(), 2024);
/// ```
#[derive(Debug, Clone)]
pub struct StaticEngine {
    settings: EngineSettings,
    values: BTreeMap<(Unit, String, String), VariableValue>,
    default: Option<VariableValue>,
}

impl StaticEngine {
    /// Creates an engine with an empty table.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            values: BTreeMap::new(),
            default: None,
        }
    }

    /// Replays the answers of a recorded engine response.
    pub fn replay(settings: EngineSettings, recorded: &EngineHousehold) -> Self {
        let period = settings.period.to_string();
        let mut engine = Self::new(settings);
        for unit in UNITS {
            for (key, entity) in recorded.entities(unit) {
                for field in entity.variables.keys() {
                    if let Some(value) = entity.get(field, &period) {
                        engine
                            .values
                            .insert((unit, key.clone(), field.clone()), value.clone());
                    }
                }
            }
        }
        engine
    }

    /// Adds one answer.
    pub fn with_value(
        mut self,
        unit: Unit,
        entity: &str,
        field: &str,
        value: impl Into<VariableValue>,
    ) -> Self {
        self.values
            .insert((unit, entity.to_string(), field.to_string()), value.into());
        self
    }

    /// Sets the answer for anything not in the table.
    pub fn with_default(mut self, value: impl Into<VariableValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn lookup(&self, unit: Unit, entity: &str, field: &str) -> Option<VariableValue> {
        self.values
            .get(&(unit, entity.to_string(), field.to_string()))
            .or(self.default.as_ref())
            .cloned()
    }
}

impl SimulationEngine for StaticEngine {
    fn version(&self) -> &str {
        &self.settings.version
    }

    fn period(&self) -> i32 {
        self.settings.period
    }

    fn calculate(&self, request: &EngineRequest) -> EngineResult<EngineHousehold> {
        let mut household = request.household.clone();
        let mut answered = 0usize;

        for unit in UNITS {
            for (key, entity) in household.entities_mut(unit).iter_mut() {
                for (field, values) in entity.variables.iter_mut() {
                    for value in values.values_mut().filter(|v| v.is_none()) {
                        *value = self.lookup(unit, key, field);
                        answered += usize::from(value.is_some());
                    }
                }
            }
        }

        debug!(engine = %self.settings.name, answered, "Static engine answered request");
        Ok(household)
    }
}
