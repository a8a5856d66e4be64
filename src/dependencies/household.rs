//! Household-level resolvers.

use crate::engine::{Unit, VariableValue};

use super::{Dependency, DependencyContext};

/// State code fixed by the jurisdiction whose rules are being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodeDependency {
    state: &'static str,
}

impl StateCodeDependency {
    /// Creates a resolver that always answers `state`.
    pub const fn new(state: &'static str) -> Self {
        Self { state }
    }

    /// The state this resolver answers.
    pub fn state(&self) -> &'static str {
        self.state
    }
}

/// Colorado rules.
pub const CO_STATE_CODE: StateCodeDependency = StateCodeDependency::new("CO");
/// Illinois rules.
pub const IL_STATE_CODE: StateCodeDependency = StateCodeDependency::new("IL");
/// Massachusetts rules.
pub const MA_STATE_CODE: StateCodeDependency = StateCodeDependency::new("MA");
/// North Carolina rules.
pub const NC_STATE_CODE: StateCodeDependency = StateCodeDependency::new("NC");
/// Texas rules.
pub const TX_STATE_CODE: StateCodeDependency = StateCodeDependency::new("TX");

impl Dependency for StateCodeDependency {
    fn field(&self) -> &'static str {
        "state_code"
    }

    fn unit(&self) -> Unit {
        Unit::Households
    }

    fn value(&self, _ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        Some(VariableValue::from(self.state))
    }
}

/// State code of the household itself, for federal programs; always
/// uppercase so it agrees with the fixed state codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseholdStateCodeDependency;

impl Dependency for HouseholdStateCodeDependency {
    fn field(&self) -> &'static str {
        "state_code"
    }

    fn unit(&self) -> Unit {
        Unit::Households
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        Some(VariableValue::Text(ctx.household.state_code.trim().to_ascii_uppercase()))
    }
}

/// Zip code, when the household gave one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodeDependency;

impl Dependency for ZipCodeDependency {
    fn field(&self) -> &'static str {
        "zip_code"
    }

    fn unit(&self) -> Unit {
        Unit::Households
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        ctx.household
            .zipcode
            .as_deref()
            .map(VariableValue::from)
    }
}

/// County name, when the household gave one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountyDependency;

impl Dependency for CountyDependency {
    fn field(&self) -> &'static str {
        "county_str"
    }

    fn unit(&self) -> Unit {
        Unit::Households
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        ctx.household.county.as_deref().map(VariableValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Household;
    use crate::tax_unit::TaxUnitStructure;

    fn resolve(dep: &dyn Dependency, household: &Household) -> Option<VariableValue> {
        let tax_units = TaxUnitStructure::default();
        dep.value(&DependencyContext::for_household(household, &tax_units))
    }

    #[test]
    fn test_state_code_is_constant_per_jurisdiction() {
        let h = Household::new("screen-1", "TX", 1);
        assert_eq!(resolve(&MA_STATE_CODE, &h), Some(VariableValue::from("MA")));
        assert_eq!(resolve(&HouseholdStateCodeDependency, &h), Some(VariableValue::from("TX")));
        assert_eq!(MA_STATE_CODE.field(), HouseholdStateCodeDependency.field());
    }

    #[test]
    fn test_household_state_code_is_uppercased() {
        let h = Household::new("screen-1", "ma", 1);
        assert_eq!(resolve(&HouseholdStateCodeDependency, &h), resolve(&MA_STATE_CODE, &h));
    }

    #[test]
    fn test_missing_zip_code_is_left_to_the_engine() {
        let mut h = Household::new("screen-1", "MA", 1);
        assert_eq!(resolve(&ZipCodeDependency, &h), None);

        h.zipcode = Some("02101".to_string());
        assert_eq!(resolve(&ZipCodeDependency, &h), Some(VariableValue::from("02101")));
    }
}
