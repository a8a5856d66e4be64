//! The program registry.
//!
//! Each jurisdiction contributes a static table of program identifiers and
//! factories. [`Registry::build`] merges the tables in a fixed order and
//! validates every calculator against the engine's variable catalog, so a
//! misconfigured program fails at start-up instead of mid-screening.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculators::{
    CO_PROGRAMS, Calculator, CalculatorFactory, FEDERAL_PROGRAMS, IL_PROGRAMS, MA_PROGRAMS,
    NC_PROGRAMS, ProgramTable, TX_PROGRAMS,
};
use crate::config::VariableCatalog;
use crate::dependencies::DependencySet;
use crate::engine::Unit;
use crate::error::{EngineError, EngineResult};

/// The level of government whose rules a program follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Federal programs, available in every state.
    Federal,
    /// Colorado.
    Co,
    /// Illinois.
    Il,
    /// Massachusetts.
    Ma,
    /// North Carolina.
    Nc,
    /// Texas.
    Tx,
}

impl Jurisdiction {
    /// Every jurisdiction, in registration order.
    pub const ALL: [Jurisdiction; 6] = [
        Jurisdiction::Federal,
        Jurisdiction::Co,
        Jurisdiction::Il,
        Jurisdiction::Ma,
        Jurisdiction::Nc,
        Jurisdiction::Tx,
    ];

    /// Returns the state jurisdiction for a two-letter state code.
    ///
    /// # Example
    ///
    /// ```
    /// use eligibility_engine::registry::Jurisdiction;
    ///
    /// assert_eq!(Jurisdiction::from_state_code("ma"), Some(Jurisdiction::Ma));
    /// assert_eq!(Jurisdiction::from_state_code("WY"), None);
    /// ```
    pub fn from_state_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CO" => Some(Jurisdiction::Co),
            "IL" => Some(Jurisdiction::Il),
            "MA" => Some(Jurisdiction::Ma),
            "NC" => Some(Jurisdiction::Nc),
            "TX" => Some(Jurisdiction::Tx),
            _ => None,
        }
    }

    /// Returns the jurisdiction's name.
    pub fn as_str(self) -> &'static str {
        match self {
            Jurisdiction::Federal => "federal",
            Jurisdiction::Co => "co",
            Jurisdiction::Il => "il",
            Jurisdiction::Ma => "ma",
            Jurisdiction::Nc => "nc",
            Jurisdiction::Tx => "tx",
        }
    }

    /// The programs this jurisdiction registers.
    pub fn programs(self) -> ProgramTable {
        match self {
            Jurisdiction::Federal => FEDERAL_PROGRAMS,
            Jurisdiction::Co => CO_PROGRAMS,
            Jurisdiction::Il => IL_PROGRAMS,
            Jurisdiction::Ma => MA_PROGRAMS,
            Jurisdiction::Nc => NC_PROGRAMS,
            Jurisdiction::Tx => TX_PROGRAMS,
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated registry entry.
#[derive(Clone, Copy)]
pub struct RegisteredProgram {
    /// The jurisdiction that registered the program.
    pub jurisdiction: Jurisdiction,
    /// The unit the program is computed over.
    pub category: Unit,
    factory: CalculatorFactory,
}

impl RegisteredProgram {
    /// Creates a fresh calculator for one screening run.
    pub fn calculator(&self) -> Calculator {
        (self.factory)()
    }
}

impl fmt::Debug for RegisteredProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredProgram")
            .field("jurisdiction", &self.jurisdiction)
            .field("category", &self.category)
            .finish()
    }
}

/// Every registered program, keyed by program identifier.
///
/// # Example
///
/// ```no_run
/// use eligibility_engine::config::ConfigLoader;
/// use eligibility_engine::registry::{Jurisdiction, Registry};
///
/// let config = ConfigLoader::load("./config/screener").unwrap();
/// let registry = Registry::build(config.variables()).unwrap();
/// for program in registry.programs_for(Jurisdiction::Ma) {
///     println!("{}", program);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    programs: BTreeMap<String, RegisteredProgram>,
    order: Vec<String>,
}

impl Registry {
    /// Builds the registry from every jurisdiction's table.
    pub fn build(catalog: &VariableCatalog) -> EngineResult<Self> {
        let tables: Vec<(Jurisdiction, ProgramTable)> = Jurisdiction::ALL
            .iter()
            .map(|j| (*j, j.programs()))
            .collect();
        Self::from_tables(&tables, catalog)
    }

    /// Builds a registry from explicit tables, merged in order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DuplicateProgram`] if two tables share an identifier
    /// - [`EngineError::CategoryMismatch`] if an output is computed over a
    ///   different unit than the calculator's category
    /// - [`EngineError::UnknownVariable`] if a field is missing from `catalog`
    /// - [`EngineError::VariableUnitMismatch`] if a resolver's unit disagrees
    ///   with `catalog`
    pub fn from_tables(
        tables: &[(Jurisdiction, ProgramTable)],
        catalog: &VariableCatalog,
    ) -> EngineResult<Self> {
        let mut programs: BTreeMap<String, RegisteredProgram> = BTreeMap::new();
        let mut order = Vec::new();

        for (jurisdiction, table) in tables {
            for (program, factory) in table.iter() {
                if let Some(existing) = programs.get(*program) {
                    return Err(EngineError::DuplicateProgram {
                        program: program.to_string(),
                        first: existing.jurisdiction.to_string(),
                        second: jurisdiction.to_string(),
                    });
                }

                let calculator = factory();
                validate(program, &calculator, catalog)?;

                programs.insert(
                    program.to_string(),
                    RegisteredProgram {
                        jurisdiction: *jurisdiction,
                        category: calculator.category(),
                        factory: *factory,
                    },
                );
                order.push(program.to_string());
            }
        }

        Ok(Self { programs, order })
    }

    /// Returns the entry for `program`.
    pub fn get(&self, program: &str) -> Option<&RegisteredProgram> {
        self.programs.get(program)
    }

    /// Creates a fresh calculator for `program`.
    pub fn calculator(&self, program: &str) -> EngineResult<Calculator> {
        self.get(program)
            .map(RegisteredProgram::calculator)
            .ok_or_else(|| EngineError::ProgramNotFound {
                program: program.to_string(),
            })
    }

    /// Returns true if `program` is registered.
    pub fn contains(&self, program: &str) -> bool {
        self.programs.contains_key(program)
    }

    /// Every program identifier, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Programs registered by `jurisdiction`, in registration order.
    pub fn programs_for(&self, jurisdiction: Jurisdiction) -> impl Iterator<Item = &str> {
        self.all()
            .filter(move |p| self.programs[*p].jurisdiction == jurisdiction)
    }

    /// Programs computed over `category`, in registration order.
    pub fn programs_in(&self, category: Unit) -> impl Iterator<Item = &str> {
        self.all()
            .filter(move |p| self.programs[*p].category == category)
    }

    /// Per-member programs.
    pub fn member_programs(&self) -> impl Iterator<Item = &str> {
        self.programs_in(Unit::People)
    }

    /// Per-tax-unit programs.
    pub fn tax_unit_programs(&self) -> impl Iterator<Item = &str> {
        self.programs_in(Unit::TaxUnits)
    }

    /// Per-household programs.
    pub fn spm_unit_programs(&self) -> impl Iterator<Item = &str> {
        self.programs_in(Unit::SpmUnits)
    }

    /// Number of registered programs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn validate(program: &str, calculator: &Calculator, catalog: &VariableCatalog) -> EngineResult<()> {
    let category = calculator.category();
    let outputs = calculator.pe_outputs();

    for output in outputs.iter() {
        if output.unit() != category {
            return Err(EngineError::CategoryMismatch {
                program: program.to_string(),
                field: output.field().to_string(),
                expected: category.to_string(),
                found: output.unit().to_string(),
            });
        }
    }

    check_catalog(program, &calculator.pe_inputs(), catalog)?;
    check_catalog(program, &outputs, catalog)
}

fn check_catalog(program: &str, set: &DependencySet, catalog: &VariableCatalog) -> EngineResult<()> {
    for dependency in set.iter() {
        let field = dependency.field();
        match catalog.unit_of(field) {
            None => {
                return Err(EngineError::UnknownVariable {
                    program: program.to_string(),
                    field: field.to_string(),
                });
            }
            Some(unit) if unit != dependency.unit() => {
                return Err(EngineError::VariableUnitMismatch {
                    program: program.to_string(),
                    field: field.to_string(),
                    declared: dependency.unit().to_string(),
                    catalog: unit.to_string(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
