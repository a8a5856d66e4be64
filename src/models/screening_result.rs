//! Screening result models.
//!
//! A [`ScreeningResult`] captures one screening run: every program that was
//! evaluated, the programs whose calculators failed, and the warnings raised
//! for incomplete household data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::Unit;

/// The value a program contributes for one member or unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityValue {
    /// Engine entity key, e.g. a member id or `tax_unit_2`.
    pub entity: String,
    /// Annual value for that entity.
    pub value: Decimal,
}

/// The evaluated result of one program.
///
/// # Example
///
/// ```
/// use eligibility_engine::engine::Unit;
/// use eligibility_engine::models::ProgramResult;
/// use rust_decimal::Decimal;
///
/// let result = ProgramResult::new("tx_snap", Unit::SpmUnits, Decimal::from(2400), vec![]);
/// assert!(result.eligible);
/// assert!(!result.already_has);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramResult {
    /// Program identifier, e.g. `ma_head_start`.
    pub program: String,
    /// The unit the program was calculated over.
    pub category: Unit,
    /// True when the annual value is positive.
    pub eligible: bool,
    /// Total annual value for the household.
    pub value: Decimal,
    /// Per-entity values making up `value`.
    pub breakdown: Vec<EntityValue>,
    /// True when the household declared it already receives this benefit.
    pub already_has: bool,
}

impl ProgramResult {
    /// Creates a result; eligibility follows from a positive value.
    pub fn new(
        program: impl Into<String>,
        category: Unit,
        value: Decimal,
        breakdown: Vec<EntityValue>,
    ) -> Self {
        Self {
            program: program.into(),
            category,
            eligible: value > Decimal::ZERO,
            value,
            breakdown,
            already_has: false,
        }
    }
}

/// The outcome of running one program's calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgramOutcome {
    /// The calculator produced a result.
    Evaluated(ProgramResult),
    /// The calculator failed; other programs were unaffected.
    Failed {
        /// Program identifier.
        program: String,
        /// Description of the failure.
        error: String,
    },
}

impl ProgramOutcome {
    /// Returns the program identifier.
    pub fn program(&self) -> &str {
        match self {
            ProgramOutcome::Evaluated(result) => &result.program,
            ProgramOutcome::Failed { program, .. } => program,
        }
    }

    /// Returns the result if the program was evaluated.
    pub fn result(&self) -> Option<&ProgramResult> {
        match self {
            ProgramOutcome::Evaluated(result) => Some(result),
            ProgramOutcome::Failed { .. } => None,
        }
    }
}

/// A warning raised for household data that could not be fully used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

/// The complete result of a screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Unique identifier for this run.
    pub screening_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the simulation engine that answered.
    pub engine_version: String,
    /// The simulation year.
    pub period: i32,
    /// Identifier of the screened household.
    pub household_id: String,
    /// One outcome per requested program, in request order.
    pub programs: Vec<ProgramOutcome>,
    /// Warnings raised while assembling the simulation.
    pub warnings: Vec<ScreeningWarning>,
    /// Duration of the run in microseconds.
    pub duration_us: u64,
}

impl ScreeningResult {
    /// Returns the outcome for `program`.
    pub fn program(&self, program: &str) -> Option<&ProgramOutcome> {
        self.programs.iter().find(|p| p.program() == program)
    }

    /// Returns every evaluated program result.
    pub fn evaluated(&self) -> impl Iterator<Item = &ProgramResult> {
        self.programs.iter().filter_map(ProgramOutcome::result)
    }

    /// Returns eligible programs the household does not already receive.
    pub fn new_benefits(&self) -> impl Iterator<Item = &ProgramResult> {
        self.evaluated().filter(|r| r.eligible && !r.already_has)
    }

    /// Sums the annual value of [`new_benefits`](Self::new_benefits).
    pub fn new_benefits_value(&self) -> Decimal {
        self.new_benefits().map(|r| r.value).sum()
    }

    /// Returns the programs whose calculator failed.
    pub fn failures(&self) -> impl Iterator<Item = &ProgramOutcome> {
        self.programs
            .iter()
            .filter(|p| matches!(p, ProgramOutcome::Failed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(programs: Vec<ProgramOutcome>) -> ScreeningResult {
        ScreeningResult {
            screening_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "test".to_string(),
            period: 2024,
            household_id: "screen-1".to_string(),
            programs,
            warnings: vec![],
            duration_us: 0,
        }
    }

    fn evaluated(program: &str, value: i64, already_has: bool) -> ProgramOutcome {
        let mut result = ProgramResult::new(program, Unit::SpmUnits, Decimal::from(value), vec![]);
        result.already_has = already_has;
        ProgramOutcome::Evaluated(result)
    }

    #[test]
    fn test_zero_value_is_not_eligible() {
        let result = ProgramResult::new("ma_wic", Unit::People, Decimal::ZERO, vec![]);
        assert!(!result.eligible);
    }

    #[test]
    fn test_new_benefits_skips_already_received_and_ineligible() {
        let result = sample(vec![
            evaluated("tx_snap", 2400, true),
            evaluated("tx_wic", 600, false),
            evaluated("tx_tanf", 0, false),
        ]);

        let programs: Vec<&str> = result.new_benefits().map(|r| r.program.as_str()).collect();
        assert_eq!(programs, vec!["tx_wic"]);
        assert_eq!(result.new_benefits_value(), Decimal::from(600));
    }

    #[test]
    fn test_failures_are_kept_beside_results() {
        let result = sample(vec![
            evaluated("tx_snap", 2400, false),
            ProgramOutcome::Failed {
                program: "tx_tanf".to_string(),
                error: "missing output".to_string(),
            },
        ]);

        assert_eq!(result.failures().count(), 1);
        assert_eq!(result.evaluated().count(), 1);
        assert!(result.program("tx_tanf").is_some_and(|p| p.result().is_none()));
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let outcome = ProgramOutcome::Failed {
            program: "tx_tanf".to_string(),
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["program"], "tx_tanf");
    }
}
