//! Program bindings reused across jurisdictions.
//!
//! SNAP, WIC, Medicaid, TANF, state tax credits and Lifeline are the same
//! engine program in every state; only the state code handed to the engine
//! and, for TANF and tax credits, the output variable change.

use rust_decimal::Decimal;
use tracing::debug;

use crate::dependencies::*;
use crate::error::EngineResult;
use crate::models::{Benefit, Household, IncomeFilter, IncomeType, Period};

use super::{
    CalculationContext, MemberCalculator, ProgramCalculator, SpmUnitCalculator, TaxUnitCalculator,
};

/// Months in the SNAP benefit year.
const SNAP_MONTHS: u32 = 12;

/// Benefits whose receipt confers SNAP categorical eligibility.
const SNAP_CATEGORICAL_BENEFITS: [Benefit; 2] = [Benefit::Tanf, Benefit::Ssi];

/// Income types whose receipt confers SNAP categorical eligibility.
const SNAP_CATEGORICAL_INCOME: [IncomeFilter; 2] = [
    IncomeFilter::Type(IncomeType::CashAssistance),
    IncomeFilter::Type(IncomeType::Ssi),
];

/// Benefits whose receipt makes a household Lifeline-eligible at any income.
const LIFELINE_QUALIFYING_BENEFITS: [Benefit; 3] = [Benefit::Snap, Benefit::Medicaid, Benefit::Ssi];

/// Returns true if the household is categorically eligible for SNAP.
///
/// A household qualifies when it declares TANF or SSI, or when any member
/// reports cash-assistance or SSI income.
///
/// # Example
///
/// ```
/// use eligibility_engine::calculators::snap_categorically_eligible;
/// use eligibility_engine::models::{Benefit, Household};
///
/// let household = Household::new("screen-1", "CO", 1);
/// assert!(!snap_categorically_eligible(&household));
/// assert!(snap_categorically_eligible(&household.with_benefit(Benefit::Tanf)));
/// ```
pub fn snap_categorically_eligible(household: &Household) -> bool {
    SNAP_CATEGORICAL_BENEFITS
        .iter()
        .any(|b| household.benefits.contains(b))
        || household.calc_gross_income(Period::Yearly, &SNAP_CATEGORICAL_INCOME, &[]) > Decimal::ZERO
}

fn snap_inputs(state: &'static dyn Dependency) -> DependencySet {
    DependencySet::new()
        .with(&AgeDependency)
        .with(&IsDisabledDependency)
        .with(&IsSnapIneligibleStudentDependency)
        .with_all(IRS_GROSS_INCOME)
        .with(&SsiReportedDependency)
        .with(&TanfReportedDependency)
        .with(&UnemploymentIncomeDependency)
        .with(&AlimonyIncomeDependency)
        .with(&ChildSupportIncomeDependency)
        .with(&InvestmentIncomeDependency)
        .with(&ChildSupportExpenseDependency)
        .with(&MedicalExpenseDependency)
        .with(&PropertyTaxExpenseDependency)
        .with(&HousingCostDependency)
        .with(&ChildcareExpensesDependency)
        .with(&HasHeatingCoolingExpenseDependency)
        .with(&HeatingCoolingExpenseDependency)
        .with(&HasPhoneExpenseDependency)
        .with(&TakesUpSnapDependency)
        .with(state)
}

/// Supplemental Nutrition Assistance Program.
#[derive(Debug, Clone, Copy)]
pub struct Snap {
    state: &'static StateCodeDependency,
}

impl Snap {
    /// SNAP under `state`'s rules.
    pub const fn new(state: &'static StateCodeDependency) -> Self {
        Self { state }
    }
}

impl ProgramCalculator for Snap {
    fn pe_name(&self) -> &'static str {
        SNAP.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        snap_inputs(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&SNAP)
    }
}

impl SpmUnitCalculator for Snap {
    fn spm_unit_value(&self, ctx: &CalculationContext<'_>) -> EngineResult<Decimal> {
        let value = ctx.spm_output(self.pe_name())?;
        if !snap_categorically_eligible(ctx.household) {
            return Ok(value);
        }

        let minimum = ctx.parameters.snap_minimum_allotment * Decimal::from(SNAP_MONTHS);
        if value < minimum {
            debug!(
                state = self.state.state(),
                engine_value = %value,
                minimum = %minimum,
                "SNAP categorical eligibility raised benefit to minimum allotment"
            );
            return Ok(minimum);
        }
        Ok(value)
    }
}

/// Women, Infants and Children nutrition.
#[derive(Debug, Clone, Copy)]
pub struct Wic {
    state: &'static StateCodeDependency,
}

impl Wic {
    /// WIC under `state`'s rules.
    pub const fn new(state: &'static StateCodeDependency) -> Self {
        Self { state }
    }
}

impl ProgramCalculator for Wic {
    fn pe_name(&self) -> &'static str {
        WIC.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with(&AgeDependency)
            .with(&IsPregnantDependency)
            .with(&ExpectedChildrenPregnancyDependency)
            .with_all(IRS_GROSS_INCOME)
            .with(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&WIC)
    }
}

impl MemberCalculator for Wic {}

/// Medicaid, including state-branded programs such as MassHealth.
#[derive(Debug, Clone, Copy)]
pub struct Medicaid {
    state: &'static StateCodeDependency,
}

impl Medicaid {
    /// Medicaid under `state`'s rules.
    pub const fn new(state: &'static StateCodeDependency) -> Self {
        Self { state }
    }
}

/// Inputs the engine's Medicaid rules read; shared with CHIP.
pub(crate) fn medicaid_inputs(state: &'static dyn Dependency) -> DependencySet {
    DependencySet::new()
        .with(&AgeDependency)
        .with(&IsDisabledDependency)
        .with(&IsPregnantDependency)
        .with(&ExpectedChildrenPregnancyDependency)
        .with_all(IRS_GROSS_INCOME)
        .with(&SsiReportedDependency)
        .with_all(TAX_UNIT_ROLES)
        .with(state)
}

impl ProgramCalculator for Medicaid {
    fn pe_name(&self) -> &'static str {
        MEDICAID.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        medicaid_inputs(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&MEDICAID)
    }
}

impl MemberCalculator for Medicaid {}

/// Cash assistance computed over the SPM unit: TANF and its state variants.
#[derive(Debug, Clone, Copy)]
pub struct StateTanf {
    state: &'static StateCodeDependency,
    output: &'static OutputDependency,
}

impl StateTanf {
    /// Cash assistance under `state`'s rules, read from `output`.
    pub const fn new(state: &'static StateCodeDependency, output: &'static OutputDependency) -> Self {
        Self { state, output }
    }
}

/// Inputs the engine's cash-assistance rules read.
pub(crate) fn cash_assistance_inputs(state: &'static dyn Dependency) -> DependencySet {
    DependencySet::new()
        .with(&AgeDependency)
        .with(&IsPregnantDependency)
        .with(&IsDisabledDependency)
        .with_all(IRS_GROSS_INCOME)
        .with(&UnemploymentIncomeDependency)
        .with(&ChildSupportIncomeDependency)
        .with(&AlimonyIncomeDependency)
        .with(&SsiReportedDependency)
        .with(&HousingCostDependency)
        .with(&ChildcareExpensesDependency)
        .with(state)
}

impl ProgramCalculator for StateTanf {
    fn pe_name(&self) -> &'static str {
        self.output.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        cash_assistance_inputs(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(self.output)
    }
}

impl SpmUnitCalculator for StateTanf {}

/// A refundable tax credit computed per tax unit.
#[derive(Clone, Copy)]
pub struct TaxCredit {
    state: &'static dyn Dependency,
    output: &'static OutputDependency,
}

impl TaxCredit {
    /// A credit under the rules `state` selects, read from `output`.
    pub const fn new(state: &'static dyn Dependency, output: &'static OutputDependency) -> Self {
        Self { state, output }
    }
}

/// Inputs the engine's tax credit rules read.
pub(crate) fn tax_credit_inputs(state: &'static dyn Dependency) -> DependencySet {
    DependencySet::new()
        .with(&AgeDependency)
        .with(&IsDisabledDependency)
        .with(&FullTimeStudentDependency)
        .with_all(IRS_GROSS_INCOME)
        .with(&InvestmentIncomeDependency)
        .with(&UnemploymentIncomeDependency)
        .with_all(TAX_UNIT_ROLES)
        .with(&TaxUnitChildcareExpensesDependency)
        .with(state)
}

impl ProgramCalculator for TaxCredit {
    fn pe_name(&self) -> &'static str {
        self.output.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        tax_credit_inputs(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(self.output)
    }
}

impl TaxUnitCalculator for TaxCredit {}

impl std::fmt::Debug for TaxCredit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxCredit")
            .field("output", &self.output.field())
            .finish()
    }
}

/// Lifeline phone and broadband discount.
///
/// The engine value is kept when the household declares SNAP, Medicaid or
/// SSI; otherwise household income above the Lifeline share of the poverty
/// guideline yields 0.
#[derive(Clone, Copy)]
pub struct Lifeline {
    state: &'static dyn Dependency,
}

impl Lifeline {
    /// Lifeline under the rules of the household's own state.
    pub const fn federal() -> Self {
        Self {
            state: &HouseholdStateCodeDependency,
        }
    }

    /// Lifeline under `state`'s rules.
    pub const fn new(state: &'static StateCodeDependency) -> Self {
        Self { state }
    }
}

impl ProgramCalculator for Lifeline {
    fn pe_name(&self) -> &'static str {
        LIFELINE.field()
    }

    fn pe_inputs(&self) -> DependencySet {
        DependencySet::new()
            .with_all(IRS_GROSS_INCOME)
            .with(&SsiReportedDependency)
            .with(&HasPhoneExpenseDependency)
            .with(&BroadbandCostDependency)
            .with(self.state)
    }

    fn pe_outputs(&self) -> DependencySet {
        DependencySet::new().with(&LIFELINE)
    }
}

impl SpmUnitCalculator for Lifeline {
    fn spm_unit_value(&self, ctx: &CalculationContext<'_>) -> EngineResult<Decimal> {
        let household = ctx.household;
        let qualifies_by_benefit = LIFELINE_QUALIFYING_BENEFITS
            .iter()
            .any(|b| household.benefits.contains(b));

        if !qualifies_by_benefit {
            let income = household.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]);
            let limit = ctx.parameters.lifeline_income_limit(household.household_size);
            if income > limit {
                debug!(income = %income, limit = %limit, "Lifeline income above limit");
                return Ok(Decimal::ZERO);
            }
        }

        ctx.spm_output(self.pe_name())
    }
}

impl std::fmt::Debug for Lifeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifeline")
            .field("state", &self.state.field())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::Calculator;
    use super::super::test_support::{engine, evaluate};
    use super::*;
    use crate::engine::Unit;
    use crate::models::{Frequency, HouseholdMember, IncomeStream, MemberId, Relationship};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn household(state: &str) -> Household {
        Household::new("screen-1", state, 2)
            .with_member(HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 34))
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Child, 5))
    }

    #[test]
    fn test_snap_passes_engine_value_through() {
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "snap", dec(4800));
        let snap = Calculator::spm_unit(Snap::new(&CO_STATE_CODE));

        let result = evaluate("co_snap", &snap, &household("CO"), &engine).unwrap();
        assert_eq!(result.value, dec(4800));
    }

    #[test]
    fn test_snap_categorical_eligibility_raises_to_minimum() {
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "snap", Decimal::ZERO);
        let snap = Calculator::spm_unit(Snap::new(&CO_STATE_CODE));
        let household = household("CO").with_benefit(Benefit::Tanf);

        let result = evaluate("co_snap", &snap, &household, &engine).unwrap();
        assert_eq!(result.value, dec(276));
        assert!(result.eligible);
    }

    #[test]
    fn test_snap_categorical_eligibility_keeps_larger_engine_value() {
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "snap", dec(3000));
        let snap = Calculator::spm_unit(Snap::new(&CO_STATE_CODE));
        let household = household("CO").with_benefit(Benefit::Ssi);

        let result = evaluate("co_snap", &snap, &household, &engine).unwrap();
        assert_eq!(result.value, dec(3000));
    }

    #[test]
    fn test_cash_assistance_income_confers_categorical_eligibility() {
        let mut household = household("IL");
        household.members[0] = household.members[0].clone().with_income(IncomeStream::new(
            IncomeType::CashAssistance,
            dec(300),
            Frequency::Monthly,
        ));
        assert!(snap_categorically_eligible(&household));
        assert!(!snap_categorically_eligible(&self::household("IL")));
    }

    #[test]
    fn test_snap_inputs_include_state_once() {
        let inputs = Snap::new(&MA_STATE_CODE).pe_inputs();
        assert_eq!(
            inputs.fields().iter().filter(|f| **f == "state_code").count(),
            1
        );
        assert!(inputs.contains("takes_up_snap_if_eligible"));
    }

    #[test]
    fn test_state_tanf_reads_its_own_output() {
        let tanf = StateTanf::new(&TX_STATE_CODE, &TX_TANF);
        assert_eq!(tanf.pe_name(), "tx_tanf");
        assert_eq!(tanf.pe_outputs().fields(), vec!["tx_tanf"]);

        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "tx_tanf", dec(1200));
        let result = evaluate("tx_tanf", &Calculator::spm_unit(tanf), &household("TX"), &engine).unwrap();
        assert_eq!(result.value, dec(1200));
    }

    #[test]
    fn test_wic_sums_members() {
        let engine = engine()
            .with_value(Unit::People, "1", "wic", Decimal::ZERO)
            .with_value(Unit::People, "2", "wic", dec(600));
        let wic = Calculator::member(Wic::new(&NC_STATE_CODE));

        let result = evaluate("nc_wic", &wic, &household("NC"), &engine).unwrap();
        assert_eq!(result.value, dec(600));
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn test_tax_credit_uses_given_output() {
        let credit = TaxCredit::new(&IL_STATE_CODE, &IL_EITC);
        assert_eq!(credit.pe_name(), "il_eitc");
        assert!(credit.pe_inputs().contains("is_tax_unit_head"));
    }

    #[test]
    fn test_lifeline_income_above_limit_is_zero() {
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "lifeline", dec(111));
        let mut household = household("TX");
        household.members[0] = household.members[0].clone().with_income(IncomeStream::new(
            IncomeType::Wages,
            dec(5000),
            Frequency::Monthly,
        ));

        let lifeline = Calculator::spm_unit(Lifeline::new(&TX_STATE_CODE));
        let result = evaluate("tx_lifeline", &lifeline, &household, &engine).unwrap();
        assert_eq!(result.value, Decimal::ZERO);
        assert!(!result.eligible);

        let household = household.with_benefit(Benefit::Snap);
        let result = evaluate("tx_lifeline", &lifeline, &household, &engine).unwrap();
        assert_eq!(result.value, dec(111));
    }

    #[test]
    fn test_lifeline_low_income_reads_engine() {
        let engine = engine().with_value(Unit::SpmUnits, "spm_unit", "lifeline", dec(111));
        let lifeline = Calculator::spm_unit(Lifeline::federal());

        let result = evaluate("lifeline", &lifeline, &household("CO"), &engine).unwrap();
        assert_eq!(result.value, dec(111));
    }
}
