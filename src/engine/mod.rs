//! The boundary to the external microsimulation engine.
//!
//! The engine itself is a black box behind [`SimulationEngine`]. This module
//! owns the payload format, the one-pass assembly of a household into a
//! request, and [`StaticEngine`], a table-backed stand-in.

mod payload;
mod simulation;
mod static_engine;

pub use payload::{
    EngineHousehold, EngineRequest, Entity, HOUSEHOLD_KEY, PeriodValues, SPM_UNIT_KEY, Unit,
    VariableValue,
};
pub use simulation::{Simulation, SimulationBuilder, SimulationEngine};
pub use static_engine::StaticEngine;
