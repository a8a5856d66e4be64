//! Simulation assembly and the engine boundary.
//!
//! [`SimulationBuilder`] turns a household into one engine request holding
//! every input and every requested output of the selected programs. The
//! engine is called once; the resulting [`Simulation`] is read-only and is
//! shared by every calculator in the run.

use rust_decimal::Decimal;
use tracing::debug;

use crate::dependencies::{Dependency, DependencyContext, DependencySet};
use crate::error::{EngineError, EngineResult};
use crate::models::Household;
use crate::tax_unit::TaxUnitStructure;

use super::payload::{
    EngineHousehold, EngineRequest, Entity, HOUSEHOLD_KEY, SPM_UNIT_KEY, Unit, VariableValue,
};

/// An external tax and benefit microsimulation engine.
pub trait SimulationEngine: Send + Sync {
    /// Version reported in screening results.
    fn version(&self) -> &str;

    /// The year simulated.
    fn period(&self) -> i32;

    /// Computes every requested output of `request`.
    ///
    /// The response carries the same entities as the request with the
    /// requested (`null`) values filled in.
    fn calculate(&self, request: &EngineRequest) -> EngineResult<EngineHousehold>;
}

/// Assembles the engine request for one household.
#[derive(Debug)]
pub struct SimulationBuilder<'a> {
    household: &'a Household,
    tax_units: &'a TaxUnitStructure,
    period: String,
    payload: EngineHousehold,
}

impl<'a> SimulationBuilder<'a> {
    /// Creates the entity skeleton: every member, every non-empty tax unit,
    /// one SPM unit and one household.
    pub fn new(household: &'a Household, tax_units: &'a TaxUnitStructure, period: i32) -> Self {
        let mut payload = EngineHousehold::default();
        let people: Vec<String> = household.members.iter().map(|m| m.id.to_string()).collect();

        for key in &people {
            payload.people.insert(key.clone(), Entity::default());
        }
        for (key, unit) in tax_units.units() {
            let members = unit.members().iter().map(ToString::to_string).collect();
            payload.tax_units.insert(key, Entity::with_members(members));
        }
        payload
            .spm_units
            .insert(SPM_UNIT_KEY.to_string(), Entity::with_members(people.clone()));
        payload
            .households
            .insert(HOUSEHOLD_KEY.to_string(), Entity::with_members(people));

        Self {
            household,
            tax_units,
            period: period.to_string(),
            payload,
        }
    }

    /// Resolves every input of `inputs` for every entity of its unit.
    ///
    /// Two resolvers sharing a field must agree; a different value for the
    /// same entity is a [`EngineError::ConflictingInput`].
    pub fn add_inputs(&mut self, inputs: &DependencySet) -> EngineResult<()> {
        for dependency in inputs.iter() {
            self.add_input(dependency)?;
        }
        Ok(())
    }

    fn add_input(&mut self, dependency: &dyn Dependency) -> EngineResult<()> {
        let unit = dependency.unit();
        let field = dependency.field();

        for (key, ctx) in contexts(self.household, self.tax_units, unit) {
            let Some(value) = dependency.value(&ctx) else {
                continue;
            };
            let entity = self.payload.entities_mut(unit).entry(key.clone()).or_default();
            match entity.get(field, &self.period) {
                Some(existing) if *existing != value => {
                    return Err(EngineError::ConflictingInput {
                        unit: unit.to_string(),
                        entity: key,
                        field: field.to_string(),
                    });
                }
                Some(_) => {}
                None => entity.set(field, &self.period, value),
            }
        }
        Ok(())
    }

    /// Requests every output of `outputs` on every entity of its unit.
    pub fn request_outputs(&mut self, outputs: &DependencySet) {
        for dependency in outputs.iter() {
            let field = dependency.field();
            for entity in self.payload.entities_mut(dependency.unit()).values_mut() {
                entity.request(field, &self.period);
            }
        }
    }

    /// Returns the assembled request.
    pub fn build(self) -> EngineRequest {
        EngineRequest {
            household: self.payload,
        }
    }

    /// Sends the assembled request to `engine`.
    pub fn run(self, engine: &dyn SimulationEngine) -> EngineResult<Simulation> {
        let period = self.period.clone();
        let request = self.build();
        debug!(
            people = request.household.people.len(),
            tax_units = request.household.tax_units.len(),
            "Calling simulation engine"
        );
        let response = engine.calculate(&request)?;
        Ok(Simulation::new(period, request, response))
    }
}

/// Pairs every entity key of `unit` with the context its resolvers see.
fn contexts<'a>(
    household: &'a Household,
    tax_units: &'a TaxUnitStructure,
    unit: Unit,
) -> Vec<(String, DependencyContext<'a>)> {
    match unit {
        Unit::People => household
            .members
            .iter()
            .map(|m| {
                (
                    m.id.to_string(),
                    DependencyContext::for_member(household, tax_units, m),
                )
            })
            .collect(),
        Unit::TaxUnits => tax_units
            .units()
            .into_iter()
            .map(|(key, tax_unit)| {
                (
                    key,
                    DependencyContext::for_tax_unit(household, tax_units, tax_unit),
                )
            })
            .collect(),
        Unit::SpmUnits => vec![(
            SPM_UNIT_KEY.to_string(),
            DependencyContext::for_household(household, tax_units),
        )],
        Unit::Households => vec![(
            HOUSEHOLD_KEY.to_string(),
            DependencyContext::for_household(household, tax_units),
        )],
    }
}

/// The request sent to the engine and its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    period: String,
    request: EngineRequest,
    response: EngineHousehold,
}

impl Simulation {
    /// Wraps a completed engine call.
    pub fn new(period: String, request: EngineRequest, response: EngineHousehold) -> Self {
        Self {
            period,
            request,
            response,
        }
    }

    /// The simulated period.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// The request that was sent.
    pub fn request(&self) -> &EngineRequest {
        &self.request
    }

    /// The engine's response.
    pub fn response(&self) -> &EngineHousehold {
        &self.response
    }

    /// Returns a computed value, or [`EngineError::MissingOutput`].
    pub fn output(&self, unit: Unit, entity: &str, field: &str) -> EngineResult<&VariableValue> {
        self.response
            .value(unit, entity, field, &self.period)
            .ok_or_else(|| EngineError::MissingOutput {
                unit: unit.to_string(),
                entity: entity.to_string(),
                field: field.to_string(),
            })
    }

    /// Returns a computed number.
    pub fn number(&self, unit: Unit, entity: &str, field: &str) -> EngineResult<Decimal> {
        self.output(unit, entity, field)?
            .as_decimal()
            .ok_or_else(|| unexpected(unit, entity, field))
    }

    /// Returns a computed flag.
    pub fn flag(&self, unit: Unit, entity: &str, field: &str) -> EngineResult<bool> {
        self.output(unit, entity, field)?
            .as_bool()
            .ok_or_else(|| unexpected(unit, entity, field))
    }
}

fn unexpected(unit: Unit, entity: &str, field: &str) -> EngineError {
    EngineError::UnexpectedOutputType {
        unit: unit.to_string(),
        entity: entity.to_string(),
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependencies::{
        AgeDependency, HouseholdStateCodeDependency, MA_STATE_CODE, OutputDependency,
        TX_STATE_CODE, TaxUnitHeadDependency,
    };
    use crate::models::{HouseholdMember, MemberId, Relationship};

    const WIC: OutputDependency = OutputDependency::person("wic");
    const SNAP: OutputDependency = OutputDependency::spm_unit("snap");

    fn household() -> Household {
        Household::new("screen-1", "MA", 2)
            .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 30))
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Child, 2))
    }

    #[test]
    fn test_skeleton_contains_every_entity() {
        let h = household();
        let structure = h.tax_unit_structure();
        let request = SimulationBuilder::new(&h, &structure, 2024).build();

        assert_eq!(request.household.people.len(), 2);
        assert_eq!(request.household.tax_units["tax_unit"].members, vec!["1", "2"]);
        assert_eq!(request.household.spm_units["spm_unit"].members, vec!["1", "2"]);
        assert!(request.household.households.contains_key("household"));
    }

    #[test]
    fn test_inputs_are_written_per_entity() {
        let h = household();
        let structure = h.tax_unit_structure();
        let mut builder = SimulationBuilder::new(&h, &structure, 2024);
        builder
            .add_inputs(&DependencySet::new().with(&AgeDependency).with(&TaxUnitHeadDependency))
            .unwrap();
        let request = builder.build();

        let people = &request.household.people;
        assert_eq!(people["1"].get("age", "2024"), Some(&VariableValue::from(30u32)));
        assert_eq!(people["2"].get("age", "2024"), Some(&VariableValue::from(2u32)));
        assert_eq!(
            people["2"].get("is_tax_unit_head", "2024"),
            Some(&VariableValue::Bool(false))
        );
    }

    #[test]
    fn test_agreeing_resolvers_share_a_field() {
        let h = household();
        let structure = h.tax_unit_structure();
        let mut builder = SimulationBuilder::new(&h, &structure, 2024);
        builder.add_inputs(&DependencySet::new().with(&MA_STATE_CODE)).unwrap();
        builder
            .add_inputs(&DependencySet::new().with(&HouseholdStateCodeDependency))
            .unwrap();
    }

    #[test]
    fn test_disagreeing_resolvers_conflict() {
        let h = household();
        let structure = h.tax_unit_structure();
        let mut builder = SimulationBuilder::new(&h, &structure, 2024);
        builder.add_inputs(&DependencySet::new().with(&MA_STATE_CODE)).unwrap();
        let result = builder.add_inputs(&DependencySet::new().with(&TX_STATE_CODE));

        match result {
            Err(EngineError::ConflictingInput { unit, entity, field }) => {
                assert_eq!(unit, "households");
                assert_eq!(entity, "household");
                assert_eq!(field, "state_code");
            }
            _ => panic!("Expected ConflictingInput error"),
        }
    }

    #[test]
    fn test_outputs_are_requested_on_every_entity() {
        let h = household();
        let structure = h.tax_unit_structure();
        let mut builder = SimulationBuilder::new(&h, &structure, 2024);
        builder.request_outputs(&DependencySet::new().with(&WIC).with(&SNAP));
        let request = builder.build();

        assert_eq!(request.household.people["1"].requested(), vec![("wic", "2024")]);
        assert_eq!(request.household.people["2"].requested(), vec![("wic", "2024")]);
        assert_eq!(request.household.spm_units["spm_unit"].requested(), vec![("snap", "2024")]);
    }

    #[test]
    fn test_simulation_reads_outputs() {
        let mut response = EngineHousehold::default();
        let mut person = Entity::default();
        person.set("wic", "2024", VariableValue::from(Decimal::from(600)));
        person.set("state_code", "2024", VariableValue::from("MA"));
        response.people.insert("1".to_string(), person);
        let simulation = Simulation::new("2024".to_string(), EngineRequest::default(), response);

        assert_eq!(simulation.number(Unit::People, "1", "wic").unwrap(), Decimal::from(600));
        assert!(simulation.flag(Unit::People, "1", "wic").unwrap());
        assert!(matches!(
            simulation.number(Unit::People, "2", "wic"),
            Err(EngineError::MissingOutput { .. })
        ));
        assert!(matches!(
            simulation.number(Unit::People, "1", "state_code"),
            Err(EngineError::UnexpectedOutputType { .. })
        ));
    }
}
