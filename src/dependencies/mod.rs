//! Dependency resolvers.
//!
//! A resolver computes exactly one engine variable for one member, tax unit,
//! SPM unit or household. Resolvers are stateless: [`Dependency::value`] is a
//! pure function of the household at call time, so they can be evaluated in
//! any order.
//!
//! Resolvers that only name an engine output return `None` from `value`; the
//! number is read back from the engine after it runs.

mod helpers;
mod household;
mod member;
mod spm;
mod tax_unit;

use std::fmt;

use crate::engine::{Unit, VariableValue};
use crate::models::{Household, HouseholdMember};
use crate::tax_unit::{TaxUnit, TaxUnitStructure};

pub use helpers::{
    ELDERLY_AGE, count_elderly_or_disabled, is_elderly, is_elderly_or_disabled,
    is_snap_ineligible_student,
};
pub use household::*;
pub use member::*;
pub use spm::*;
pub use tax_unit::*;

/// Everything a resolver may look at.
#[derive(Debug, Clone, Copy)]
pub struct DependencyContext<'a> {
    /// The household being screened.
    pub household: &'a Household,
    /// The household's tax units.
    pub tax_units: &'a TaxUnitStructure,
    /// The member, for person-level resolvers.
    pub member: Option<&'a HouseholdMember>,
    /// The tax unit, for tax-unit-level resolvers.
    pub tax_unit: Option<&'a TaxUnit>,
}

impl<'a> DependencyContext<'a> {
    /// Context for a person-level variable.
    pub fn for_member(
        household: &'a Household,
        tax_units: &'a TaxUnitStructure,
        member: &'a HouseholdMember,
    ) -> Self {
        Self {
            household,
            tax_units,
            member: Some(member),
            tax_unit: None,
        }
    }

    /// Context for a tax-unit-level variable.
    pub fn for_tax_unit(
        household: &'a Household,
        tax_units: &'a TaxUnitStructure,
        tax_unit: &'a TaxUnit,
    ) -> Self {
        Self {
            household,
            tax_units,
            member: None,
            tax_unit: Some(tax_unit),
        }
    }

    /// Context for an SPM-unit or household-level variable.
    pub fn for_household(household: &'a Household, tax_units: &'a TaxUnitStructure) -> Self {
        Self {
            household,
            tax_units,
            member: None,
            tax_unit: None,
        }
    }
}

/// A single engine variable and how to compute it.
pub trait Dependency: Send + Sync {
    /// The engine variable name.
    fn field(&self) -> &'static str;

    /// The unit the variable is defined over.
    fn unit(&self) -> Unit;

    /// Computes the value, or `None` when the engine supplies it.
    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue>;
}

/// A variable that is only ever read back from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDependency {
    field: &'static str,
    unit: Unit,
}

impl OutputDependency {
    /// A person-level output.
    pub const fn person(field: &'static str) -> Self {
        Self {
            field,
            unit: Unit::People,
        }
    }

    /// A tax-unit-level output.
    pub const fn tax_unit(field: &'static str) -> Self {
        Self {
            field,
            unit: Unit::TaxUnits,
        }
    }

    /// An SPM-unit-level output.
    pub const fn spm_unit(field: &'static str) -> Self {
        Self {
            field,
            unit: Unit::SpmUnits,
        }
    }
}

impl Dependency for OutputDependency {
    fn field(&self) -> &'static str {
        self.field
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn value(&self, _ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        None
    }
}

/// An ordered set of resolvers, unique by field.
///
/// # Examples
///
/// ```
/// use eligibility_engine::dependencies::{AgeDependency, DependencySet, IsDisabledDependency};
///
/// let set = DependencySet::new()
///     .with(&AgeDependency)
///     .with(&IsDisabledDependency)
///     .with(&AgeDependency);
/// assert_eq!(set.fields(), vec!["age", "is_disabled"]);
/// ```
#[derive(Clone, Default)]
pub struct DependencySet {
    dependencies: Vec<&'static dyn Dependency>,
}

impl DependencySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolver unless one with the same field is already present.
    pub fn with(mut self, dependency: &'static dyn Dependency) -> Self {
        self.insert(dependency);
        self
    }

    /// Adds every resolver in `dependencies`, in order.
    pub fn with_all(mut self, dependencies: &[&'static dyn Dependency]) -> Self {
        for dependency in dependencies {
            self.insert(*dependency);
        }
        self
    }

    /// Adds every resolver of another set.
    pub fn merge(mut self, other: &DependencySet) -> Self {
        for dependency in other.iter() {
            self.insert(dependency);
        }
        self
    }

    /// Inserts a resolver; returns false if its field was already present.
    pub fn insert(&mut self, dependency: &'static dyn Dependency) -> bool {
        if self.contains(dependency.field()) {
            return false;
        }
        self.dependencies.push(dependency);
        true
    }

    /// Returns true if a resolver for `field` is present.
    pub fn contains(&self, field: &str) -> bool {
        self.dependencies.iter().any(|d| d.field() == field)
    }

    /// Iterates the resolvers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Dependency> + '_ {
        self.dependencies.iter().copied()
    }

    /// Returns the field names in insertion order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.iter().map(|d| d.field()).collect()
    }

    /// Number of resolvers.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl fmt::Debug for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAP: OutputDependency = OutputDependency::spm_unit("snap");

    #[test]
    fn test_set_keeps_first_resolver_per_field() {
        let set = DependencySet::new()
            .with(&MA_STATE_CODE)
            .with(&HouseholdStateCodeDependency);

        assert_eq!(set.len(), 1);
        let household = Household::new("screen-1", "TX", 1);
        let tax_units = TaxUnitStructure::default();
        let ctx = DependencyContext::for_household(&household, &tax_units);
        let value = set.iter().next().and_then(|d| d.value(&ctx));
        assert_eq!(value, Some(VariableValue::from("MA")));
    }

    #[test]
    fn test_with_all_preserves_order() {
        let set = DependencySet::new().with_all(&[&IsPregnantDependency, &AgeDependency, &IsPregnantDependency]);
        assert_eq!(set.fields(), vec!["is_pregnant", "age"]);
    }

    #[test]
    fn test_merge_deduplicates() {
        let a = DependencySet::new().with(&AgeDependency);
        let b = DependencySet::new().with(&AgeDependency).with(&SNAP);
        let merged = a.merge(&b);
        assert_eq!(merged.fields(), vec!["age", "snap"]);
    }

    #[test]
    fn test_output_dependency_has_no_value() {
        let household = Household::new("screen-1", "MA", 1);
        let tax_units = TaxUnitStructure::default();
        let ctx = DependencyContext::for_household(&household, &tax_units);

        assert_eq!(SNAP.value(&ctx), None);
        assert_eq!(SNAP.unit(), Unit::SpmUnits);
        assert_eq!(SNAP.field(), "snap");
    }
}
