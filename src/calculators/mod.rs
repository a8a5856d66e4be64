//! Program calculators.
//!
//! A calculator binds one benefit program to the engine: the resolvers whose
//! fields must be filled in before the engine runs, the outputs it reads
//! back, and any local rule the engine does not encode.
//!
//! Calculators come in three categories, one trait each, matching the unit
//! the engine computes the program over. [`Calculator`] tags a boxed
//! calculator with its category.

mod co;
mod federal;
mod il;
mod ma;
mod nc;
mod shared;
mod tx;

use rust_decimal::Decimal;

use crate::config::Parameters;
use crate::dependencies::DependencySet;
use crate::engine::{HOUSEHOLD_KEY, SPM_UNIT_KEY, Simulation, Unit};
use crate::error::EngineResult;
use crate::models::{EntityValue, Household, HouseholdMember, ProgramResult};
use crate::tax_unit::{TaxUnit, TaxUnitStructure};

pub use co::PROGRAMS as CO_PROGRAMS;
pub use federal::PROGRAMS as FEDERAL_PROGRAMS;
pub use federal::{Cfsp, Chip, Ctc, Eitc, SchoolLunch, Ssi};
pub use il::PROGRAMS as IL_PROGRAMS;
pub use ma::PROGRAMS as MA_PROGRAMS;
pub use ma::{
    MaAca, MaCcdf, MaEarlyHeadStart, MaHeadStart, MaHeap, MaMassHealthLimited, MaMbta, MaSsp,
    MaTafdc,
};
pub use nc::PROGRAMS as NC_PROGRAMS;
pub use shared::{
    Lifeline, Medicaid, Snap, StateTanf, TaxCredit, Wic, snap_categorically_eligible,
};
pub use tx::PROGRAMS as TX_PROGRAMS;

/// Creates a fresh calculator.
pub type CalculatorFactory = fn() -> Calculator;

/// Program identifiers and factories registered by one jurisdiction.
pub type ProgramTable = &'static [(&'static str, CalculatorFactory)];

/// Everything a calculator may read while producing its value.
#[derive(Debug, Clone, Copy)]
pub struct CalculationContext<'a> {
    /// The household being screened.
    pub household: &'a Household,
    /// The household's tax units.
    pub tax_units: &'a TaxUnitStructure,
    /// The completed engine call.
    pub simulation: &'a Simulation,
    /// Locally-defined program parameters.
    pub parameters: &'a Parameters,
}

impl CalculationContext<'_> {
    /// Reads a person-level engine number.
    pub fn member_output(&self, member: &HouseholdMember, field: &str) -> EngineResult<Decimal> {
        self.simulation
            .number(Unit::People, &member.id.to_string(), field)
    }

    /// Reads a person-level engine flag.
    pub fn member_flag(&self, member: &HouseholdMember, field: &str) -> EngineResult<bool> {
        self.simulation
            .flag(Unit::People, &member.id.to_string(), field)
    }

    /// Reads a tax-unit-level engine number.
    pub fn tax_unit_output(&self, entity: &str, field: &str) -> EngineResult<Decimal> {
        self.simulation.number(Unit::TaxUnits, entity, field)
    }

    /// Reads an SPM-unit-level engine number.
    pub fn spm_output(&self, field: &str) -> EngineResult<Decimal> {
        self.simulation.number(Unit::SpmUnits, SPM_UNIT_KEY, field)
    }

    /// Reads a household-level engine number.
    pub fn household_output(&self, field: &str) -> EngineResult<Decimal> {
        self.simulation.number(Unit::Households, HOUSEHOLD_KEY, field)
    }
}

/// What every calculator declares about its engine binding.
pub trait ProgramCalculator: Send + Sync {
    /// The engine variable holding this program's value.
    fn pe_name(&self) -> &'static str;

    /// Resolvers that must be filled in before the engine runs.
    fn pe_inputs(&self) -> DependencySet;

    /// Resolvers read back from the engine.
    fn pe_outputs(&self) -> DependencySet;
}

/// A program computed once per household member.
pub trait MemberCalculator: ProgramCalculator {
    /// The member's yearly value; defaults to the engine value unchanged.
    fn member_value(
        &self,
        ctx: &CalculationContext<'_>,
        member: &HouseholdMember,
    ) -> EngineResult<Decimal> {
        ctx.member_output(member, self.pe_name())
    }
}

/// A program computed once per tax unit.
pub trait TaxUnitCalculator: ProgramCalculator {
    /// The unit's yearly value; defaults to the engine value unchanged.
    fn tax_unit_value(
        &self,
        ctx: &CalculationContext<'_>,
        entity: &str,
        _unit: &TaxUnit,
    ) -> EngineResult<Decimal> {
        ctx.tax_unit_output(entity, self.pe_name())
    }
}

/// A program computed once for the SPM unit.
pub trait SpmUnitCalculator: ProgramCalculator {
    /// The household's yearly value; defaults to the engine value unchanged.
    fn spm_unit_value(&self, ctx: &CalculationContext<'_>) -> EngineResult<Decimal> {
        ctx.spm_output(self.pe_name())
    }
}

/// A calculator tagged with its category.
pub enum Calculator {
    /// Runs per member.
    Member(Box<dyn MemberCalculator>),
    /// Runs per tax unit.
    TaxUnit(Box<dyn TaxUnitCalculator>),
    /// Runs once per household.
    SpmUnit(Box<dyn SpmUnitCalculator>),
}

impl Calculator {
    /// Wraps a member calculator.
    pub fn member(calculator: impl MemberCalculator + 'static) -> Self {
        Calculator::Member(Box::new(calculator))
    }

    /// Wraps a tax-unit calculator.
    pub fn tax_unit(calculator: impl TaxUnitCalculator + 'static) -> Self {
        Calculator::TaxUnit(Box::new(calculator))
    }

    /// Wraps an SPM-unit calculator.
    pub fn spm_unit(calculator: impl SpmUnitCalculator + 'static) -> Self {
        Calculator::SpmUnit(Box::new(calculator))
    }

    /// The unit this calculator runs over.
    pub fn category(&self) -> Unit {
        match self {
            Calculator::Member(_) => Unit::People,
            Calculator::TaxUnit(_) => Unit::TaxUnits,
            Calculator::SpmUnit(_) => Unit::SpmUnits,
        }
    }

    /// The engine variable holding the program's value.
    pub fn pe_name(&self) -> &'static str {
        match self {
            Calculator::Member(c) => c.pe_name(),
            Calculator::TaxUnit(c) => c.pe_name(),
            Calculator::SpmUnit(c) => c.pe_name(),
        }
    }

    /// Resolvers filled in before the engine runs.
    pub fn pe_inputs(&self) -> DependencySet {
        match self {
            Calculator::Member(c) => c.pe_inputs(),
            Calculator::TaxUnit(c) => c.pe_inputs(),
            Calculator::SpmUnit(c) => c.pe_inputs(),
        }
    }

    /// Resolvers read back from the engine.
    pub fn pe_outputs(&self) -> DependencySet {
        match self {
            Calculator::Member(c) => c.pe_outputs(),
            Calculator::TaxUnit(c) => c.pe_outputs(),
            Calculator::SpmUnit(c) => c.pe_outputs(),
        }
    }

    /// Computes the program's value for every entity of its category.
    pub fn evaluate(&self, program: &str, ctx: &CalculationContext<'_>) -> EngineResult<ProgramResult> {
        let breakdown = match self {
            Calculator::Member(c) => ctx
                .household
                .members
                .iter()
                .map(|m| {
                    Ok(EntityValue {
                        entity: m.id.to_string(),
                        value: c.member_value(ctx, m)?,
                    })
                })
                .collect::<EngineResult<Vec<_>>>()?,
            Calculator::TaxUnit(c) => ctx
                .tax_units
                .units()
                .into_iter()
                .map(|(key, unit)| {
                    let value = c.tax_unit_value(ctx, &key, unit)?;
                    Ok(EntityValue { entity: key, value })
                })
                .collect::<EngineResult<Vec<_>>>()?,
            Calculator::SpmUnit(c) => vec![EntityValue {
                entity: SPM_UNIT_KEY.to_string(),
                value: c.spm_unit_value(ctx)?,
            }],
        };

        let value = breakdown.iter().map(|e| e.value).sum();
        Ok(ProgramResult::new(program, self.category(), value, breakdown))
    }
}

impl std::fmt::Debug for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("category", &self.category())
            .field("pe_name", &self.pe_name())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builds calculation contexts over a [`StaticEngine`](crate::engine::StaticEngine).

    use super::*;
    use crate::config::EngineSettings;
    use crate::engine::{SimulationBuilder, StaticEngine};

    pub fn parameters() -> Parameters {
        let yaml = r#"
federal_poverty_guideline:
  base: 15060
  per_additional_person: 5380
snap_minimum_allotment: 23
school_days: 180
lifeline_fpl_percent: 135
ccdf_smi_percent:
  MA: 50
state_median_income:
  MA:
    1: 80000
    2: 100000
    3: 120000
    4: 140000
"#;
        serde_yaml::from_str(yaml).unwrap()
    }

    pub fn engine() -> StaticEngine {
        StaticEngine::new(EngineSettings::new("static", "test", 2024))
    }

    /// Runs `calculator` for `program` against `engine`.
    pub fn evaluate(
        program: &str,
        calculator: &Calculator,
        household: &Household,
        engine: &StaticEngine,
    ) -> EngineResult<ProgramResult> {
        let tax_units = household.tax_unit_structure();
        let mut builder = SimulationBuilder::new(household, &tax_units, 2024);
        builder.add_inputs(&calculator.pe_inputs())?;
        builder.request_outputs(&calculator.pe_outputs());
        let simulation = builder.run(engine)?;
        let parameters = parameters();
        let ctx = CalculationContext {
            household,
            tax_units: &tax_units,
            simulation: &simulation,
            parameters: &parameters,
        };
        calculator.evaluate(program, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{engine, evaluate};
    use super::*;
    use crate::models::{MemberId, Relationship};

    fn household() -> Household {
        Household::new("screen-1", "MA", 3)
            .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 30))
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Child, 3))
            .with_member(HouseholdMember::new(MemberId(3), Relationship::Child, 27))
    }

    #[test]
    fn test_category_follows_variant() {
        assert_eq!(Calculator::member(MaHeadStart).category(), Unit::People);
        assert_eq!(Calculator::tax_unit(Eitc).category(), Unit::TaxUnits);
        assert_eq!(Calculator::spm_unit(SchoolLunch).category(), Unit::SpmUnits);
    }

    #[test]
    fn test_member_calculator_sums_members() {
        let engine = engine()
            .with_value(Unit::People, "1", "head_start", Decimal::ZERO)
            .with_value(Unit::People, "2", "head_start", Decimal::from(10000))
            .with_value(Unit::People, "3", "head_start", Decimal::ZERO);

        let result = evaluate("ma_head_start", &Calculator::member(MaHeadStart), &household(), &engine).unwrap();
        assert_eq!(result.value, Decimal::from(10000));
        assert!(result.eligible);
        assert_eq!(result.breakdown.len(), 3);
        assert_eq!(result.breakdown[1].entity, "2");
    }

    #[test]
    fn test_tax_unit_calculator_covers_every_unit() {
        let engine = engine()
            .with_value(Unit::TaxUnits, "tax_unit", "eitc", Decimal::from(3000))
            .with_value(Unit::TaxUnits, "tax_unit_2", "eitc", Decimal::from(500));

        let result = evaluate("eitc", &Calculator::tax_unit(Eitc), &household(), &engine).unwrap();
        let entities: Vec<&str> = result.breakdown.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(entities, vec!["tax_unit", "tax_unit_2"]);
        assert_eq!(result.value, Decimal::from(3500));
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let result = evaluate("ma_head_start", &Calculator::member(MaHeadStart), &household(), &engine());
        assert!(matches!(result, Err(crate::error::EngineError::MissingOutput { .. })));
    }
}
