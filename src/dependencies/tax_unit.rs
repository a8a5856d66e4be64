//! Tax-unit roles and tax-unit-level resolvers.

use rust_decimal::Decimal;

use crate::engine::{Unit, VariableValue};
use crate::models::{ExpenseType, Period};
use crate::tax_unit::TaxUnitRole;

use super::{Dependency, DependencyContext, OutputDependency};

/// Federal earned income tax credit.
pub const EITC: OutputDependency = OutputDependency::tax_unit("eitc");
/// Federal child tax credit.
pub const CTC: OutputDependency = OutputDependency::tax_unit("ctc_value");
/// Colorado earned income tax credit.
pub const CO_EITC: OutputDependency = OutputDependency::tax_unit("co_eitc");
/// Colorado child tax credit.
pub const CO_CTC: OutputDependency = OutputDependency::tax_unit("co_ctc");
/// Illinois earned income tax credit.
pub const IL_EITC: OutputDependency = OutputDependency::tax_unit("il_eitc");
/// Illinois child tax credit.
pub const IL_CTC: OutputDependency = OutputDependency::tax_unit("il_ctc");
/// Massachusetts earned income tax credit.
pub const MA_EITC: OutputDependency = OutputDependency::tax_unit("ma_eitc");
/// Massachusetts child and family tax credit.
pub const MA_CFC: OutputDependency = OutputDependency::tax_unit("ma_child_and_family_credit");
/// Premium tax credit on the marketplace.
pub const ACA_PTC: OutputDependency = OutputDependency::tax_unit("aca_ptc");

fn has_role(ctx: &DependencyContext<'_>, role: TaxUnitRole) -> Option<VariableValue> {
    let member = ctx.member?;
    Some(VariableValue::Bool(
        ctx.tax_units.role_of(member.id) == Some(role),
    ))
}

/// Heads the tax unit containing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxUnitHeadDependency;

impl Dependency for TaxUnitHeadDependency {
    fn field(&self) -> &'static str {
        "is_tax_unit_head"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        has_role(ctx, TaxUnitRole::Head)
    }
}

/// Spouse in the tax unit containing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxUnitSpouseDependency;

impl Dependency for TaxUnitSpouseDependency {
    fn field(&self) -> &'static str {
        "is_tax_unit_spouse"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        has_role(ctx, TaxUnitRole::Spouse)
    }
}

/// Dependent in the tax unit containing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxUnitDependentDependency;

impl Dependency for TaxUnitDependentDependency {
    fn field(&self) -> &'static str {
        "is_tax_unit_dependent"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        has_role(ctx, TaxUnitRole::Dependent)
    }
}

/// The three role resolvers every tax credit needs.
pub const TAX_UNIT_ROLES: &[&dyn Dependency] = &[
    &TaxUnitHeadDependency,
    &TaxUnitSpouseDependency,
    &TaxUnitDependentDependency,
];

/// Yearly child and dependent care costs, claimed by the primary unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxUnitChildcareExpensesDependency;

impl Dependency for TaxUnitChildcareExpensesDependency {
    fn field(&self) -> &'static str {
        "tax_unit_childcare_expenses"
    }

    fn unit(&self) -> Unit {
        Unit::TaxUnits
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        let unit = ctx.tax_unit?;
        let amount = if *unit == ctx.tax_units.primary {
            ctx.household.calc_expenses(
                Period::Yearly,
                &[ExpenseType::ChildCare, ExpenseType::DependentCare],
            )
        } else {
            Decimal::ZERO
        };
        Some(VariableValue::from(amount))
    }
}
