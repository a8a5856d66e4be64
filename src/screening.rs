//! Screening runs.
//!
//! A [`Screener`] evaluates a set of programs for one household: it
//! partitions the household into tax units, assembles one engine request
//! covering every selected program, calls the engine once, then lets each
//! calculator read its own result. A calculator that fails is recorded as a
//! [`ProgramOutcome::Failed`] and never stops the others.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculators::{CalculationContext, Calculator};
use crate::config::Parameters;
use crate::engine::{SimulationBuilder, SimulationEngine};
use crate::error::EngineResult;
use crate::models::{Household, ProgramOutcome, ScreeningResult, ScreeningWarning};
use crate::registry::{Jurisdiction, Registry};

/// Warning code for a household with no head.
pub const NO_HEAD_OF_HOUSEHOLD: &str = "NO_HEAD_OF_HOUSEHOLD";
/// Warning code for a declared size that differs from the member count.
pub const HOUSEHOLD_SIZE_MISMATCH: &str = "HOUSEHOLD_SIZE_MISMATCH";
/// Warning code for a state with no registered programs.
pub const UNSUPPORTED_STATE: &str = "UNSUPPORTED_STATE";

/// Runs screenings against one registry, parameter set and engine.
///
/// A screener holds no per-run state, so one instance can serve many
/// households, including from several threads.
///
/// # Example
///
/// ```no_run
/// use eligibility_engine::config::ConfigLoader;
/// use eligibility_engine::engine::StaticEngine;
/// use eligibility_engine::models::{Household, HouseholdMember, MemberId, Relationship};
/// use eligibility_engine::registry::Registry;
/// use eligibility_engine::screening::Screener;
///
/// let config = ConfigLoader::load("./config/screener").unwrap();
/// let registry = Registry::build(config.variables()).unwrap();
/// let engine = StaticEngine::new(config.engine().clone());
/// let screener = Screener::new(&registry, config.parameters(), &engine);
///
/// let household = Household::new("screen-1", "MA", 1)
///     .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 30));
/// let result = screener.screen_jurisdictions(&household).unwrap();
/// println!("New benefits worth {}", result.new_benefits_value());
/// ```
pub struct Screener<'a> {
    registry: &'a Registry,
    parameters: &'a Parameters,
    engine: &'a dyn SimulationEngine,
}

impl<'a> Screener<'a> {
    /// Creates a screener.
    pub fn new(
        registry: &'a Registry,
        parameters: &'a Parameters,
        engine: &'a dyn SimulationEngine,
    ) -> Self {
        Self {
            registry,
            parameters,
            engine,
        }
    }

    /// Screens `household` for the federal programs and those of its state.
    ///
    /// A state with no registered programs gets the federal programs and an
    /// `UNSUPPORTED_STATE` warning.
    pub fn screen_jurisdictions(&self, household: &Household) -> EngineResult<ScreeningResult> {
        let state = Jurisdiction::from_state_code(&household.state_code);

        let programs: Vec<&str> = self
            .registry
            .programs_for(Jurisdiction::Federal)
            .chain(state.into_iter().flat_map(|j| self.registry.programs_for(j)))
            .collect();

        let mut result = self.screen(household, &programs)?;
        if state.is_none() {
            warn!(
                screening_id = %result.screening_id,
                state = %household.state_code,
                "No state programs registered; screened federal programs only"
            );
            result.warnings.push(ScreeningWarning {
                code: UNSUPPORTED_STATE.to_string(),
                message: format!("No programs registered for state '{}'", household.state_code),
                severity: "low".to_string(),
            });
        }
        Ok(result)
    }

    /// Screens `household` for `programs`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ProgramNotFound`](crate::error::EngineError::ProgramNotFound)
    ///   if a program is not registered
    /// - [`EngineError::ConflictingInput`](crate::error::EngineError::ConflictingInput)
    ///   if two programs need different values for one input, such as
    ///   programs from two states
    /// - any error the engine returns
    ///
    /// A calculator that fails after the engine call is recorded as
    /// [`ProgramOutcome::Failed`] instead.
    pub fn screen(&self, household: &Household, programs: &[&str]) -> EngineResult<ScreeningResult> {
        let start_time = Instant::now();
        let screening_id = Uuid::new_v4();
        info!(
            screening_id = %screening_id,
            household_id = %household.id,
            programs = programs.len(),
            "Processing screening"
        );

        let mut calculators: Vec<(&str, Calculator)> = Vec::with_capacity(programs.len());
        for &program in programs {
            if calculators.iter().any(|(p, _)| *p == program) {
                continue;
            }
            calculators.push((program, self.registry.calculator(program)?));
        }

        let warnings = household_warnings(household);
        for warning in &warnings {
            warn!(screening_id = %screening_id, code = %warning.code, "{}", warning.message);
        }

        let tax_units = household.tax_unit_structure();
        let mut builder = SimulationBuilder::new(household, &tax_units, self.engine.period());
        for (_, calculator) in &calculators {
            builder.add_inputs(&calculator.pe_inputs())?;
        }
        for (_, calculator) in &calculators {
            builder.request_outputs(&calculator.pe_outputs());
        }
        let simulation = builder.run(self.engine)?;

        let ctx = CalculationContext {
            household,
            tax_units: &tax_units,
            simulation: &simulation,
            parameters: self.parameters,
        };

        let outcomes: Vec<ProgramOutcome> = calculators
            .iter()
            .map(|(program, calculator)| match calculator.evaluate(program, &ctx) {
                Ok(mut result) => {
                    result.already_has = household.has_benefit(program);
                    debug!(
                        screening_id = %screening_id,
                        program = %program,
                        value = %result.value,
                        already_has = result.already_has,
                        "Program evaluated"
                    );
                    ProgramOutcome::Evaluated(result)
                }
                Err(err) => {
                    warn!(
                        screening_id = %screening_id,
                        program = %program,
                        error = %err,
                        "Program calculation failed"
                    );
                    ProgramOutcome::Failed {
                        program: program.to_string(),
                        error: err.to_string(),
                    }
                }
            })
            .collect();

        let duration = start_time.elapsed();
        let result = ScreeningResult {
            screening_id,
            timestamp: Utc::now(),
            engine_version: self.engine.version().to_string(),
            period: self.engine.period(),
            household_id: household.id.clone(),
            programs: outcomes,
            warnings,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        };

        info!(
            screening_id = %screening_id,
            household_id = %household.id,
            eligible = result.new_benefits().count(),
            failed = result.failures().count(),
            new_benefits_value = %result.new_benefits_value(),
            duration_us = result.duration_us,
            "Screening completed"
        );
        Ok(result)
    }
}

fn household_warnings(household: &Household) -> Vec<ScreeningWarning> {
    let mut warnings = Vec::new();

    if household.head().is_none() {
        warnings.push(ScreeningWarning {
            code: NO_HEAD_OF_HOUSEHOLD.to_string(),
            message: "No head of household; tax unit roles default to false".to_string(),
            severity: "medium".to_string(),
        });
    }

    let members = household.members.len();
    if usize::try_from(household.household_size).is_ok_and(|size| size != members) {
        warnings.push(ScreeningWarning {
            code: HOUSEHOLD_SIZE_MISMATCH.to_string(),
            message: format!(
                "Household size is {} but {} members were provided",
                household.household_size, members
            ),
            severity: "low".to_string(),
        });
    }

    warnings
}
