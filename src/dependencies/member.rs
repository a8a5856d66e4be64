//! Person-level resolvers.

use rust_decimal::Decimal;

use crate::engine::{Unit, VariableValue};
use crate::models::{DEFAULT_ADULT_AGE, ExpenseType, HouseholdMember, IncomeType, Period};

use super::helpers::{count_elderly_or_disabled, is_elderly_or_disabled, is_snap_ineligible_student};
use super::{Dependency, DependencyContext, OutputDependency};

/// WIC benefit value.
pub const WIC: OutputDependency = OutputDependency::person("wic");
/// Medicaid benefit value.
pub const MEDICAID: OutputDependency = OutputDependency::person("medicaid");
/// Whether the engine finds the member Medicaid-eligible.
pub const IS_MEDICAID_ELIGIBLE: OutputDependency = OutputDependency::person("is_medicaid_eligible");
/// CHIP benefit value.
pub const CHIP: OutputDependency = OutputDependency::person("chip");
/// SSI benefit value.
pub const SSI: OutputDependency = OutputDependency::person("ssi");
/// Commodity Supplemental Food Program value.
pub const CFSP: OutputDependency = OutputDependency::person("commodity_supplemental_food_program");
/// Head Start value.
pub const HEAD_START: OutputDependency = OutputDependency::person("head_start");
/// Early Head Start value.
pub const EARLY_HEAD_START: OutputDependency = OutputDependency::person("early_head_start");
/// Massachusetts state supplement to SSI.
pub const MA_STATE_SUPPLEMENT: OutputDependency = OutputDependency::person("ma_state_supplement");
/// Massachusetts child care subsidy value.
pub const MA_CHILD_CARE_SUBSIDY: OutputDependency = OutputDependency::person("ma_child_care_subsidy");
/// MassHealth Limited (emergency coverage) value.
pub const MA_MASS_HEALTH_LIMITED: OutputDependency = OutputDependency::person("ma_mass_health_limited");
/// Yearly savings from the MBTA reduced fare.
pub const MA_MBTA_REDUCED_FARE: OutputDependency = OutputDependency::person("ma_mbta_reduced_fare");

/// The income resolvers making up IRS gross income.
pub const IRS_GROSS_INCOME: &[&dyn Dependency] = &[
    &EmploymentIncomeDependency,
    &SelfEmploymentIncomeDependency,
    &RentalIncomeDependency,
    &PensionIncomeDependency,
    &SocialSecurityIncomeDependency,
];

fn annual_income(ctx: &DependencyContext<'_>, types: &[IncomeType]) -> Option<VariableValue> {
    ctx.member
        .map(|m| VariableValue::from(m.annual_income_of(types)))
}

fn member_flag(
    ctx: &DependencyContext<'_>,
    flag: impl Fn(&HouseholdMember) -> bool,
) -> Option<VariableValue> {
    ctx.member.map(|m| VariableValue::Bool(flag(m)))
}

/// Splits a yearly amount evenly without rounding; zero shares yield zero.
fn share(yearly: Decimal, shares: usize) -> Decimal {
    if shares == 0 {
        return Decimal::ZERO;
    }
    yearly / Decimal::from(shares)
}

/// Age in years.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDependency;

impl Dependency for AgeDependency {
    fn field(&self) -> &'static str {
        "age"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        ctx.member.map(|m| VariableValue::from(m.age))
    }
}

/// Short- or long-term disability.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsDisabledDependency;

impl Dependency for IsDisabledDependency {
    fn field(&self) -> &'static str {
        "is_disabled"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        member_flag(ctx, HouseholdMember::has_disability)
    }
}

/// Pregnancy; an unanswered question counts as not pregnant.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsPregnantDependency;

impl Dependency for IsPregnantDependency {
    fn field(&self) -> &'static str {
        "is_pregnant"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        member_flag(ctx, HouseholdMember::is_pregnant)
    }
}

/// Children expected from a current pregnancy: 1 if pregnant, else 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedChildrenPregnancyDependency;

impl Dependency for ExpectedChildrenPregnancyDependency {
    fn field(&self) -> &'static str {
        "current_pregnancies"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        ctx.member
            .map(|m| VariableValue::from(u32::from(m.is_pregnant())))
    }
}

/// Student status.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTimeStudentDependency;

impl Dependency for FullTimeStudentDependency {
    fn field(&self) -> &'static str {
        "is_full_time_student"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        member_flag(ctx, |m| m.student)
    }
}

/// Students barred from SNAP by the federal student rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsSnapIneligibleStudentDependency;

impl Dependency for IsSnapIneligibleStudentDependency {
    fn field(&self) -> &'static str {
        "is_snap_ineligible_student"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        member_flag(ctx, |m| is_snap_ineligible_student(ctx.household, m))
    }
}

/// Yearly wages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmploymentIncomeDependency;

impl Dependency for EmploymentIncomeDependency {
    fn field(&self) -> &'static str {
        "employment_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Wages])
    }
}

/// Yearly self-employment income.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfEmploymentIncomeDependency;

impl Dependency for SelfEmploymentIncomeDependency {
    fn field(&self) -> &'static str {
        "self_employment_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::SelfEmployment])
    }
}

/// Yearly rental income.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalIncomeDependency;

impl Dependency for RentalIncomeDependency {
    fn field(&self) -> &'static str {
        "rental_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Rental])
    }
}

/// Yearly pension and veterans' income combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct PensionIncomeDependency;

impl Dependency for PensionIncomeDependency {
    fn field(&self) -> &'static str {
        "taxable_pension_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Pension, IncomeType::Veteran])
    }
}

/// Yearly Social Security of every kind combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocialSecurityIncomeDependency;

impl Dependency for SocialSecurityIncomeDependency {
    fn field(&self) -> &'static str {
        "social_security"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(
            ctx,
            &[
                IncomeType::SsRetirement,
                IncomeType::SsDisability,
                IncomeType::SsSurvivor,
                IncomeType::SsDependent,
            ],
        )
    }
}

/// Yearly SSI the member already receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsiReportedDependency;

impl Dependency for SsiReportedDependency {
    fn field(&self) -> &'static str {
        "ssi_reported"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Ssi])
    }
}

/// Yearly cash assistance the member already receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TanfReportedDependency;

impl Dependency for TanfReportedDependency {
    fn field(&self) -> &'static str {
        "tanf_reported"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::CashAssistance])
    }
}

/// Yearly unemployment compensation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnemploymentIncomeDependency;

impl Dependency for UnemploymentIncomeDependency {
    fn field(&self) -> &'static str {
        "unemployment_compensation"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Unemployment])
    }
}

/// Yearly alimony received.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlimonyIncomeDependency;

impl Dependency for AlimonyIncomeDependency {
    fn field(&self) -> &'static str {
        "alimony_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Alimony])
    }
}

/// Yearly child support received.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildSupportIncomeDependency;

impl Dependency for ChildSupportIncomeDependency {
    fn field(&self) -> &'static str {
        "child_support_received"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::ChildSupport])
    }
}

/// Yearly interest and dividends.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvestmentIncomeDependency;

impl Dependency for InvestmentIncomeDependency {
    fn field(&self) -> &'static str {
        "taxable_interest_income"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        annual_income(ctx, &[IncomeType::Investment])
    }
}

/// Child support paid, split evenly across the declared household size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildSupportExpenseDependency;

impl Dependency for ChildSupportExpenseDependency {
    fn field(&self) -> &'static str {
        "child_support_expense"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        ctx.member?;
        let yearly = ctx
            .household
            .calc_expenses(Period::Yearly, &[ExpenseType::ChildSupport]);
        Some(VariableValue::from(share(
            yearly,
            ctx.household.household_size as usize,
        )))
    }
}

/// Property tax, split evenly across the adults; children carry none.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyTaxExpenseDependency;

impl Dependency for PropertyTaxExpenseDependency {
    fn field(&self) -> &'static str {
        "real_estate_taxes"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        let member = ctx.member?;
        if member.age < DEFAULT_ADULT_AGE {
            return Some(VariableValue::from(Decimal::ZERO));
        }
        let yearly = ctx
            .household
            .calc_expenses(Period::Yearly, &[ExpenseType::PropertyTax]);
        Some(VariableValue::from(share(
            yearly,
            ctx.household.num_adults(DEFAULT_ADULT_AGE),
        )))
    }
}

/// Out-of-pocket medical costs of an elderly or disabled member.
///
/// Shared medical expenses are split across every elderly or disabled
/// member; expenses attributed to this member are added in full. Everyone
/// else reports zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicalExpenseDependency;

impl Dependency for MedicalExpenseDependency {
    fn field(&self) -> &'static str {
        "medical_out_of_pocket_expenses"
    }

    fn unit(&self) -> Unit {
        Unit::People
    }

    fn value(&self, ctx: &DependencyContext<'_>) -> Option<VariableValue> {
        let member = ctx.member?;
        if !is_elderly_or_disabled(member) {
            return Some(VariableValue::from(Decimal::ZERO));
        }

        let medical = ctx
            .household
            .expenses
            .iter()
            .filter(|e| e.expense_type == ExpenseType::Medical);
        let (shared, own) = medical.fold((Decimal::ZERO, Decimal::ZERO), |(shared, own), e| {
            match e.member_id {
                None => (shared + e.annual_amount(), own),
                Some(id) if id == member.id => (shared, own + e.annual_amount()),
                Some(_) => (shared, own),
            }
        });

        let split = share(shared, count_elderly_or_disabled(ctx.household));
        Some(VariableValue::from(split + own))
    }
}
