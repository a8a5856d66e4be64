//! Massachusetts programs.

use rust_decimal::Decimal;
use tracing::debug;

use crate::dependencies::*;
use crate::error::{EngineError, EngineResult};
use crate::models::{DEFAULT_ADULT_AGE, HouseholdMember, IncomeFilter, Period};

use super::shared::{cash_assistance_inputs, medicaid_inputs};
use super::{
    CalculationContext, Calculator, MemberCalculator, Medicaid, ProgramCalculator, ProgramTable,
    Snap, SpmUnitCalculator, StateTanf, TaxCredit, TaxUnitCalculator, Wic,
};

/// Massachusetts programs.
pub const PROGRAMS: ProgramTable = &[
    ("ma_wic", || Calculator::member(Wic::new(&MA_STATE_CODE))),
    ("ma_ccdf", || Calculator::member(MaCcdf)),
    ("ma_mass_health", || Calculator::member(Medicaid::new(&MA_STATE_CODE))),
    ("ma_mass_health_limited", || Calculator::member(MaMassHealthLimited)),
    ("ma_mbta", || Calculator::member(MaMbta)),
    ("ma_ssp", || Calculator::member(MaSsp)),
    ("ma_head_start", || Calculator::member(MaHeadStart)),
    ("ma_early_head_start", || Calculator::member(MaEarlyHeadStart)),
    ("ma_maeitc", || Calculator::tax_unit(TaxCredit::new(&MA_STATE_CODE, &MA_EITC))),
    ("ma_cfc", || Calculator::tax_unit(TaxCredit::new(&MA_STATE_CODE, &MA_CFC))),
    ("ma_aca", || Calculator::tax_unit(MaAca)),
    ("ma_snap", || Calculator::spm_unit(Snap::new(&MA_STATE_CODE))),
    ("ma_tafdc", || Calculator::spm_unit(MaTafdc)),
    ("ma_eaedc", || Calculator::spm_unit(StateTanf::new(&MA_STATE_CODE, &MA_EAEDC))),
    ("ma_heap", || Calculator::spm_unit(MaHeap)),
];

/// The state whose median income sets the CCDF cap.
const CCDF_STATE: &str = "MA";

fn head_start_inputs() -> DependencySet {
    DependencySet::new()
        .with(&AgeDependency)
        .with(&MA_STATE_CODE)
        .with_all(IRS_GROSS_INCOME)
}

/// Head Start.
///
/// # Example
///
/// ```
/// use eligibility_engine::calculators::{MaHeadStart, ProgramCalculator};
///
/// assert_eq!(MaHeadStart.pe_name(), "head_start");
/// assert_eq!(MaHeadStart.pe_inputs().len(), 7);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MaHeadStart;

impl ProgramCalculator for MaHeadStart {
    fn pe_name(&self) -> &'static str {
        HEAD_START.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        head_start_inputs()
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&HEAD_START)
    }
}

impl MemberCalculator for MaHeadStart {}

/// Early Head Start.
#[derive(Debug, Clone, Copy)]
pub struct MaEarlyHeadStart;

impl ProgramCalculator for MaEarlyHeadStart {
    fn pe_name(&self) -> &'static str {
        EARLY_HEAD_START.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        head_start_inputs()
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&EARLY_HEAD_START)
    }
}

impl MemberCalculator for MaEarlyHeadStart {}

/// Child Care and Development Fund subsidy.
///
/// Household income above the configured share of the state median income
/// short-circuits to 0 without reading the engine.
#[derive(Debug, Clone, Copy)]
pub struct MaCcdf;

impl ProgramCalculator for MaCcdf {
    fn pe_name(&self) -> &'static str {
        MA_CHILD_CARE_SUBSIDY.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsDisabledDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&ChildcareExpensesDependency)
            .with(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_CHILD_CARE_SUBSIDY)
    }
}

impl MemberCalculator for MaCcdf {
    fn member_value(
        &self,
        ctx: &CalculationContext<'_>,
        member: &HouseholdMember,
    ) -> EngineResult<Decimal> {
        let household = ctx.household;
        let limit = ctx
            .parameters
            .ccdf_income_limit(CCDF_STATE, household.household_size)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("no CCDF income limit configured for {}", CCDF_STATE),
            })?;

        let income = household.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]);
        if income > limit {
            debug!(member = %member.id, income = %income, limit = %limit, "CCDF income above limit");
            return Ok(Decimal::ZERO);
        }

        ctx.member_output(member, self.pe_name())
    }
}

/// MassHealth Limited, emergency coverage for members who do not qualify
/// for full MassHealth. Reads the same inputs as MassHealth.
#[derive(Debug, Clone, Copy)]
pub struct MaMassHealthLimited;

impl ProgramCalculator for MaMassHealthLimited {
    fn pe_name(&self) -> &'static str {
        MA_MASS_HEALTH_LIMITED.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        medicaid_inputs(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_MASS_HEALTH_LIMITED)
    }
}

impl MemberCalculator for MaMassHealthLimited {}

/// MBTA reduced fare for seniors, riders with a disability and low-income
/// riders.
#[derive(Debug, Clone, Copy)]
pub struct MaMbta;

impl ProgramCalculator for MaMbta {
    fn pe_name(&self) -> &'static str {
        MA_MBTA_REDUCED_FARE.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsDisabledDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_MBTA_REDUCED_FARE)
    }
}

impl MemberCalculator for MaMbta {}

/// State supplement to SSI.
#[derive(Debug, Clone, Copy)]
pub struct MaSsp;

impl ProgramCalculator for MaSsp {
    fn pe_name(&self) -> &'static str {
        MA_STATE_SUPPLEMENT.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsDisabledDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(&SsiReportedDependency)
            .with(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_STATE_SUPPLEMENT)
    }
}

impl MemberCalculator for MaSsp {}

/// Marketplace premium tax credit.
#[derive(Debug, Clone, Copy)]
pub struct MaAca;

impl ProgramCalculator for MaAca {
    fn pe_name(&self) -> &'static str {
        ACA_PTC.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsPregnantDependency)
            .with_all(IRS_GROSS_INCOME)
            .with_all(TAX_UNIT_ROLES)
            .with(&ZipCodeDependency)
            .with(&CountyDependency)
            .with(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&ACA_PTC)
    }
}

impl TaxUnitCalculator for MaAca {}

/// Transitional Aid to Families with Dependent Children.
///
/// Only households with a child under 19 or a pregnant member can qualify.
#[derive(Debug, Clone, Copy)]
pub struct MaTafdc;

impl ProgramCalculator for MaTafdc {
    fn pe_name(&self) -> &'static str {
        MA_TAFDC.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        cash_assistance_inputs(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_TAFDC)
    }
}

impl SpmUnitCalculator for MaTafdc {
    fn spm_unit_value(&self, ctx: &CalculationContext<'_>) -> EngineResult<Decimal> {
        let has_child_or_pregnancy = ctx
            .household
            .members
            .iter()
            .any(|m| m.age < DEFAULT_ADULT_AGE || m.is_pregnant());
        if !has_child_or_pregnancy {
            debug!("TAFDC requires a child or a pregnant member");
            return Ok(Decimal::ZERO);
        }

        ctx.spm_output(self.pe_name())
    }
}

/// Home Energy Assistance Program.
#[derive(Debug, Clone, Copy)]
pub struct MaHeap;

impl ProgramCalculator for MaHeap {
    fn pe_name(&self) -> &'static str {
        MA_LIHEAP.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with_all(IRS_GROSS_INCOME)
            .with(&HousingCostDependency)
            .with(&HasHeatingCoolingExpenseDependency)
            .with(&HeatingCoolingExpenseDependency)
            .with(&MA_STATE_CODE)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MA_LIHEAP)
    }
}

impl SpmUnitCalculator for MaHeap {}

#[cfg(test)]
mod tests {
    use super::super::test_support::{engine, evaluate};
    use super::*;
    use crate::engine::Unit;
    use crate::models::{Frequency, Household, IncomeStream, IncomeType, MemberId, Relationship};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn parent_and_toddler(monthly_wages: i64) -> Household {
        Household::new("screen-ma", "MA", 2)
            .with_member(
                HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 29).with_income(
                    IncomeStream::new(IncomeType::Wages, dec(monthly_wages), Frequency::Monthly),
                ),
            )
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Child, 2))
    }

    #[test]
    fn test_head_start_has_seven_inputs() {
        let fields = MaHeadStart.pe_inputs().fields();
        assert_eq!(
            fields,
            vec![
                "age",
                "state_code",
                "employment_income",
                "self_employment_income",
                "rental_income",
                "taxable_pension_income",
                "social_security",
            ]
        );
        assert_eq!(MaEarlyHeadStart.pe_inputs().fields(), fields);
        assert_eq!(MaEarlyHeadStart.pe_outputs().fields(), vec!["early_head_start"]);
    }

    #[test]
    fn test_ccdf_below_limit_reads_engine() {
        let engine = engine()
            .with_value(Unit::People, "1", "ma_child_care_subsidy", Decimal::ZERO)
            .with_value(Unit::People, "2", "ma_child_care_subsidy", dec(15000));

        let result = evaluate("ma_ccdf", &Calculator::member(MaCcdf), &parent_and_toddler(3000), &engine).unwrap();
        assert_eq!(result.value, dec(15000));
    }

    #[test]
    fn test_ccdf_above_limit_is_zero() {
        // Limit for two people is 50% of 100000
        let engine = engine().with_default(dec(15000));

        let result = evaluate("ma_ccdf", &Calculator::member(MaCcdf), &parent_and_toddler(4500), &engine).unwrap();
        assert_eq!(result.value, Decimal::ZERO);
        assert!(!result.eligible);
    }

    #[test]
    fn test_tafdc_without_children_is_zero() {
        let household = Household::new("screen-ma", "MA", 1)
            .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 40));
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "ma_tafdc", dec(5000));

        let result = evaluate("ma_tafdc", &Calculator::spm_unit(MaTafdc), &household, &engine).unwrap();
        assert_eq!(result.value, Decimal::ZERO);
    }

    #[test]
    fn test_tafdc_with_pregnancy_reads_engine() {
        let household = Household::new("screen-ma", "MA", 1).with_member(
            HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 24).pregnant(true),
        );
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "ma_tafdc", dec(5000));

        let result = evaluate("ma_tafdc", &Calculator::spm_unit(MaTafdc), &household, &engine).unwrap();
        assert_eq!(result.value, dec(5000));
    }

    #[test]
    fn test_mass_health_limited_reads_own_output() {
        assert_eq!(MaMassHealthLimited.pe_inputs().fields(), Medicaid::new(&MA_STATE_CODE).pe_inputs().fields());
        assert_eq!(MaMassHealthLimited.pe_outputs().fields(), vec!["ma_mass_health_limited"]);

        let engine = engine()
            .with_value(Unit::People, "1", "ma_mass_health_limited", dec(1200))
            .with_value(Unit::People, "2", "ma_mass_health_limited", Decimal::ZERO);
        let result = evaluate(
            "ma_mass_health_limited",
            &Calculator::member(MaMassHealthLimited),
            &parent_and_toddler(2000),
            &engine,
        )
        .unwrap();
        assert_eq!(result.value, dec(1200));
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn test_mbta_sums_member_savings() {
        assert_eq!(MaMbta.pe_outputs().fields(), vec!["ma_mbta_reduced_fare"]);

        let engine = engine()
            .with_value(Unit::People, "1", "ma_mbta_reduced_fare", dec(540))
            .with_value(Unit::People, "2", "ma_mbta_reduced_fare", Decimal::ZERO);
        let result = evaluate("ma_mbta", &Calculator::member(MaMbta), &parent_and_toddler(1500), &engine).unwrap();
        assert_eq!(result.value, dec(540));
        assert!(result.eligible);
    }

    #[test]
    fn test_program_table_categories() {
        let members = PROGRAMS
            .iter()
            .filter(|(_, factory)| factory().category() == Unit::People)
            .count();
        assert_eq!(members, 8);
        assert_eq!(PROGRAMS.len(), 15);
    }
}
