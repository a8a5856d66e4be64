//! SPM-unit-level resolvers.

use crate::engine::{Unit, VariableValue};
use crate::models::{ExpenseType, Period};

use super::{Dependency, DependencyContext, OutputDependency};

/// SNAP benefit value.
pub const SNAP: OutputDependency = OutputDependency::spm_unit("snap");
/// Colorado Works (TANF).
pub const CO_TANF: OutputDependency = OutputDependency::spm_unit("co_tanf");
/// Illinois TANF.
pub const IL_TANF: OutputDependency = OutputDependency::spm_unit("il_tanf");
/// North Carolina Work First (TANF).
pub const NC_TANF: OutputDependency = OutputDependency::spm_unit("nc_tanf");
/// Texas TANF.
pub const TX_TANF: OutputDependency = OutputDependency::spm_unit("tx_tanf");
/// Massachusetts TAFDC.
pub const MA_TAFDC: OutputDependency = OutputDependency::spm_unit("ma_tafdc");
/// Massachusetts EAEDC.
pub const MA_EAEDC: OutputDependency = OutputDependency::spm_unit("ma_eaedc");
/// Massachusetts home energy assistance.
pub const MA_LIHEAP: OutputDependency = OutputDependency::spm_unit("ma_liheap");
/// Daily school meal subsidy per child.
pub const SCHOOL_MEAL_DAILY_SUBSIDY: OutputDependency =
    OutputDependency::spm_unit("school_meal_daily_subsidy");
/// Lifeline phone discount.
pub const LIFELINE: OutputDependency = OutputDependency::spm_unit("lifeline");

fn yearly_expenses(ctx: &DependencyContext<'_>, types: &[ExpenseType]) -> Option<VariableValue> {
    Some(VariableValue::from(
        ctx.household.calc_expenses(Period::Yearly, types),
    ))
}

fn has_expense(ctx: &DependencyContext<'_>, types: &[ExpenseType]) -> Option<VariableValue> {
    Some(VariableValue::Bool(ctx.household.has_expense(types)))
}

/// Yearly rent, mortgage and homeowners insurance.
#[derive(Debug, Clone, Copy, Default)]
pub struct HousingCostDependency;

impl Dependency for HousingCostDependency {
    fn field(&self) -> &'static str {
        "housing_cost"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        yearly_expenses(
            ctx,
            &[
                ExpenseType::Rent,
                ExpenseType::Mortgage,
                ExpenseType::HomeownersInsurance,
            ],
        )
    }
}

/// Yearly child and dependent care costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildcareExpensesDependency;

impl Dependency for ChildcareExpensesDependency {
    fn field(&self) -> &'static str {
        "childcare_expenses"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        yearly_expenses(ctx, &[ExpenseType::ChildCare, ExpenseType::DependentCare])
    }
}

/// Yearly heating and cooling costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatingCoolingExpenseDependency;

impl Dependency for HeatingCoolingExpenseDependency {
    fn field(&self) -> &'static str {
        "heating_cooling_expense"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        yearly_expenses(ctx, &[ExpenseType::Heating, ExpenseType::Cooling])
    }
}

/// Pays for heating or cooling, at any amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasHeatingCoolingExpenseDependency;

impl Dependency for HasHeatingCoolingExpenseDependency {
    fn field(&self) -> &'static str {
        "has_heating_cooling_expense"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        has_expense(ctx, &[ExpenseType::Heating, ExpenseType::Cooling])
    }
}

/// Pays for telephone service, at any amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasPhoneExpenseDependency;

impl Dependency for HasPhoneExpenseDependency {
    fn field(&self) -> &'static str {
        "has_phone_expense"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        has_expense(ctx, &[ExpenseType::Telephone])
    }
}

/// Yearly internet service cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct BroadbandCostDependency;

impl Dependency for BroadbandCostDependency {
    fn field(&self) -> &'static str {
        "broadband_cost"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        yearly_expenses(ctx, &[ExpenseType::Internet])
    }
}

/// Assume an eligible household enrolls in SNAP.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakesUpSnapDependency;

impl Dependency for TakesUpSnapDependency {
    fn field(&self) -> &'static str {
        "takes_up_snap_if_eligible"
    }

    fn unit(&self) -> Unit {
        Unit::SpmUnits
    }

    fn value(&self, _ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        Some(VariableValue::Bool(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Frequency, Household};
    use crate::tax_unit::TaxUnitStructure;
    use rust_decimal::Decimal;

    fn resolve(dep: &dyn Dependency, household: &Household) -> VariableValue {
        let tax_units = TaxUnitStructure::default();
        dep.value(&DependencyContext::for_household(household, &tax_units))
            .unwrap()
    }

    #[test]
    fn test_housing_cost_sums_shelter_expenses() {
        let h = Household::new("screen-1", "MA", 1)
            .with_expense(Expense::new(ExpenseType::Rent, Decimal::from(1000), Frequency::Monthly))
            .with_expense(Expense::new(ExpenseType::HomeownersInsurance, Decimal::from(600), Frequency::Yearly))
            .with_expense(Expense::new(ExpenseType::Medical, Decimal::from(50), Frequency::Monthly));

        assert_eq!(resolve(&HousingCostDependency, &h), VariableValue::from(Decimal::from(12600)));
    }

    #[test]
    fn test_zero_heating_expense_still_counts() {
        let h = Household::new("screen-1", "MA", 1)
            .with_expense(Expense::new(ExpenseType::Heating, Decimal::ZERO, Frequency::Monthly));

        assert_eq!(resolve(&HasHeatingCoolingExpenseDependency, &h), VariableValue::Bool(true));
        assert_eq!(resolve(&HasPhoneExpenseDependency, &h), VariableValue::Bool(false));
    }

    #[test]
    fn test_takes_up_snap_is_constant() {
        let h = Household::new("screen-1", "MA", 1);
        assert_eq!(resolve(&TakesUpSnapDependency, &h), VariableValue::Bool(true));
    }
}
