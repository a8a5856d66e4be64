//! Federal programs, simulated under the household's own state.

use rust_decimal::Decimal;
use tracing::debug;

use crate::dependencies::*;
use crate::error::EngineResult;
use crate::models::{DEPENDENT_MAX_AGE, HouseholdMember};

use super::shared::{medicaid_inputs, tax_credit_inputs};
use super::{
    CalculationContext, Calculator, Lifeline, MemberCalculator, ProgramCalculator, ProgramTable,
    SpmUnitCalculator, TaxUnitCalculator,
};

/// Federal programs.
pub const PROGRAMS: ProgramTable = &[
    ("chip", || Calculator::member(Chip)),
    ("ssi", || Calculator::member(Ssi)),
    ("cfsp", || Calculator::member(Cfsp)),
    ("eitc", || Calculator::tax_unit(Eitc)),
    ("ctc", || Calculator::tax_unit(Ctc)),
    ("school_lunch", || Calculator::spm_unit(SchoolLunch)),
    ("lifeline", || Calculator::spm_unit(Lifeline::federal())),
];

/// Children's Health Insurance Program.
///
/// Members the engine finds Medicaid-eligible get 0, so coverage is not
/// counted twice.
#[derive(Debug, Clone, Copy)]
pub struct Chip;

impl ProgramCalculator for Chip {
    fn pe_name(&self) -> &'static str {
        CHIP.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        medicaid_inputs(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&CHIP).with(&IS_MEDICAID_ELIGIBLE)
    }
}

impl MemberCalculator for Chip {
    fn member_value(
        &self,
        ctx: &CalculationContext<'_>,
        member: &HouseholdMember,
    ) -> EngineResult<Decimal> {
        if ctx.member_flag(member, IS_MEDICAID_ELIGIBLE.field())? {
            debug!(member = %member.id, "CHIP suppressed for Medicaid-eligible member");
            return Ok(Decimal::ZERO);
        }
        ctx.member_output(member, self.pe_name())
    }
}

/// Supplemental Security Income.
#[derive(Debug, Clone, Copy)]
pub struct Ssi;

impl ProgramCalculator for Ssi {
    fn pe_name(&self) -> &'static str {
        SSI.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsDisabledDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&SsiReportedDependency)
            .with(&UnemploymentIncomeDependency)
            .with(&AlimonyIncomeDependency)
            .with(&ChildSupportIncomeDependency)
            .with(&InvestmentIncomeDependency)
            .with_all(TAX_UNIT_ROLES)
            .with(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&SSI)
    }
}

impl MemberCalculator for Ssi {}

/// Commodity Supplemental Food Program.
#[derive(Debug, Clone, Copy)]
pub struct Cfsp;

impl ProgramCalculator for Cfsp {
    fn pe_name(&self) -> &'static str {
        CFSP.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsPregnantDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&CFSP)
    }
}

impl MemberCalculator for Cfsp {}

/// Federal earned income tax credit.
#[derive(Debug, Clone, Copy)]
pub struct Eitc;

impl ProgramCalculator for Eitc {
    fn pe_name(&self) -> &'static str {
        EITC.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        tax_credit_inputs(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&EITC)
    }
}

impl TaxUnitCalculator for Eitc {}

/// Federal child tax credit.
#[derive(Debug, Clone, Copy)]
pub struct Ctc;

impl ProgramCalculator for Ctc {
    fn pe_name(&self) -> &'static str {
        CTC.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        tax_credit_inputs(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&CTC)
    }
}

impl TaxUnitCalculator for Ctc {}

/// Free and reduced-price school meals.
///
/// The engine answers a daily subsidy per child; the yearly value is that
/// subsidy times school days times the children aged 18 or under.
#[derive(Debug, Clone, Copy)]
pub struct SchoolLunch;

impl ProgramCalculator for SchoolLunch {
    fn pe_name(&self) -> &'static str {
        SCHOOL_MEAL_DAILY_SUBSIDY.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&SsiReportedDependency)
            .with(&TanfReportedDependency)
            .with(&HouseholdStateCodeDependency)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&SCHOOL_MEAL_DAILY_SUBSIDY)
    }
}

impl SpmUnitCalculator for SchoolLunch {
    fn spm_unit_value(&self, ctx: &CalculationContext<'_>) -> EngineResult<Decimal> {
        let children = ctx
            .household
            .members
            .iter()
            .filter(|m| m.age <= DEPENDENT_MAX_AGE)
            .count();
        if children == 0 {
            return Ok(Decimal::ZERO);
        }

        let daily = ctx.spm_output(self.pe_name())?;
        Ok(daily * Decimal::from(ctx.parameters.school_days) * Decimal::from(children))
    }
}
