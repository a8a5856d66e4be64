//! Household (screen) model.
//!
//! The household is the read-only input to a screening run: its members and
//! their income streams, shared expenses and the benefits it already receives.
//! Everything here is derived on demand; nothing is cached.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax_unit::{self, RelationshipMap, TaxUnit, TaxUnitStructure};

use super::{
    Benefit, Expense, ExpenseType, HouseholdMember, IncomeFilter, IncomeType, MemberId, Period,
};

/// Members at or above this age are counted by [`Household::num_adults`] by default.
pub const DEFAULT_ADULT_AGE: u32 = 19;

/// Oldest age at which anyone can be claimed as a dependent.
pub const DEPENDENT_MAX_AGE: u32 = 18;

/// Oldest age at which a student can be claimed as a dependent.
pub const STUDENT_DEPENDENT_MAX_AGE: u32 = 23;

/// A household being screened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Identifier of the screening session.
    pub id: String,
    /// Two-letter state code, e.g. "MA".
    pub state_code: String,
    /// Zip code of the home.
    #[serde(default)]
    pub zipcode: Option<String>,
    /// County of the home.
    #[serde(default)]
    pub county: Option<String>,
    /// Declared household size, which may exceed the members entered so far.
    pub household_size: u32,
    /// Household members.
    #[serde(default)]
    pub members: Vec<HouseholdMember>,
    /// Shared expenses.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// Benefits the household already receives.
    #[serde(default)]
    pub benefits: BTreeSet<Benefit>,
}

impl Household {
    /// Creates an empty household.
    pub fn new(id: impl Into<String>, state_code: impl Into<String>, household_size: u32) -> Self {
        Self {
            id: id.into(),
            state_code: state_code.into(),
            zipcode: None,
            county: None,
            household_size,
            members: Vec::new(),
            expenses: Vec::new(),
            benefits: BTreeSet::new(),
        }
    }

    /// Adds a member.
    pub fn with_member(mut self, member: HouseholdMember) -> Self {
        self.members.push(member);
        self
    }

    /// Adds an expense.
    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Declares that the household already receives a benefit.
    pub fn with_benefit(mut self, benefit: Benefit) -> Self {
        self.benefits.insert(benefit);
        self
    }

    /// Returns the head of household, if one has been entered.
    pub fn head(&self) -> Option<&HouseholdMember> {
        self.members.iter().find(|m| m.is_head())
    }

    /// Returns the member with the given id.
    pub fn member(&self, id: MemberId) -> Option<&HouseholdMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Sums the household's income selected by `filters`, minus `exclude`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eligibility_engine::models::*;
    /// use rust_decimal::Decimal;
    ///
    /// let household = Household::new("screen-1", "TX", 2).with_member(
    ///     HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 35).with_income(
    ///         IncomeStream::new(IncomeType::Wages, Decimal::from(2000), Frequency::Monthly),
    ///     ),
    /// );
    /// assert_eq!(
    ///     household.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned], &[]),
    ///     Decimal::from(24000)
    /// );
    /// ```
    pub fn calc_gross_income(
        &self,
        period: Period,
        filters: &[IncomeFilter],
        exclude: &[IncomeType],
    ) -> Decimal {
        self.members
            .iter()
            .map(|m| m.calc_gross_income(period, filters, exclude))
            .sum()
    }

    /// Sums the expenses of the given types.
    pub fn calc_expenses(&self, period: Period, types: &[ExpenseType]) -> Decimal {
        let yearly: Decimal = self
            .expenses
            .iter()
            .filter(|e| types.contains(&e.expense_type))
            .map(Expense::annual_amount)
            .sum();
        period.from_yearly(yearly)
    }

    /// Returns true if any expense of the given types exists, even at zero.
    pub fn has_expense(&self, types: &[ExpenseType]) -> bool {
        self.expenses.iter().any(|e| types.contains(&e.expense_type))
    }

    /// Counts members aged `min_age` or older.
    pub fn num_adults(&self, min_age: u32) -> usize {
        self.members.iter().filter(|m| m.age >= min_age).count()
    }

    /// Returns true if the household already receives the benefit `program` provides.
    pub fn has_benefit(&self, program: &str) -> bool {
        Benefit::for_program(program).is_some_and(|b| self.benefits.contains(&b))
    }

    /// Returns true if `member` can be claimed as a dependent of the head.
    ///
    /// The member must not be the head or spouse, must be 18 or younger, a
    /// student aged 23 or younger, or disabled, and must not earn more than
    /// half of the combined income of the member and the rest of the household.
    pub fn is_dependent(&self, member: &HouseholdMember) -> bool {
        if member.is_head() || member.is_spouse() {
            return false;
        }

        let age_qualifies = member.age <= DEPENDENT_MAX_AGE
            || (member.student && member.age <= STUDENT_DEPENDENT_MAX_AGE)
            || member.has_disability();
        if !age_qualifies {
            return false;
        }

        let own = member.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]);
        let others: Decimal = self
            .members
            .iter()
            .filter(|m| m.id != member.id)
            .map(|m| m.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]))
            .sum();

        own * Decimal::TWO <= own + others
    }

    /// Returns the couples in the household keyed by both partners.
    pub fn relationship_map(&self) -> RelationshipMap {
        tax_unit::relationship_map(self)
    }

    /// Partitions the household into its primary and secondary tax units.
    pub fn tax_unit_structure(&self) -> TaxUnitStructure {
        tax_unit::partition(self)
    }

    /// Returns the first secondary tax unit, or an empty unit if there is none.
    pub fn other_tax_unit_structure(&self) -> TaxUnit {
        self.tax_unit_structure()
            .secondary
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, IncomeStream, Relationship};

    fn wages(amount: i64) -> IncomeStream {
        IncomeStream::new(IncomeType::Wages, Decimal::from(amount), Frequency::Monthly)
    }

    fn head(age: u32) -> HouseholdMember {
        HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, age)
    }

    fn household() -> Household {
        Household::new("screen-1", "TX", 2)
    }

    #[test]
    fn test_calc_gross_income_earned_yearly() {
        let h = household().with_member(head(35).with_income(wages(2000)));
        assert_eq!(
            h.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned], &[]),
            Decimal::from(24000)
        );
        assert_eq!(
            h.calc_gross_income(Period::Monthly, &[IncomeFilter::Earned], &[]),
            Decimal::from(2000)
        );
    }

    #[test]
    fn test_calc_gross_income_all_types_no_double_count() {
        let h = household().with_member(
            head(35)
                .with_income(wages(2000))
                .with_income(IncomeStream::new(IncomeType::Alimony, Decimal::from(500), Frequency::Monthly)),
        );
        let all = h.calc_gross_income(
            Period::Yearly,
            &[IncomeFilter::All, IncomeFilter::Earned, IncomeFilter::Unearned],
            &[],
        );
        assert_eq!(all, Decimal::from(30000));
    }

    #[test]
    fn test_calc_gross_income_zero_income() {
        let h = household().with_member(head(35));
        assert_eq!(
            h.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned], &[]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_calc_gross_income_sums_members() {
        let h = household()
            .with_member(head(35).with_income(wages(2000)))
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Spouse, 30).with_income(wages(1500)));
        assert_eq!(
            h.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]),
            Decimal::from(42000)
        );
    }

    #[test]
    fn test_calc_expenses_multiple_types() {
        let h = household()
            .with_expense(Expense::new(ExpenseType::Rent, Decimal::from(1000), Frequency::Monthly))
            .with_expense(Expense::new(ExpenseType::Mortgage, Decimal::from(500), Frequency::Monthly))
            .with_expense(Expense::new(ExpenseType::PropertyTax, Decimal::from(3600), Frequency::Yearly));

        assert_eq!(
            h.calc_expenses(Period::Yearly, &[ExpenseType::Rent, ExpenseType::Mortgage]),
            Decimal::from(18000)
        );
        assert_eq!(
            h.calc_expenses(Period::Yearly, &[ExpenseType::PropertyTax]),
            Decimal::from(3600)
        );
        assert_eq!(
            h.calc_expenses(Period::Monthly, &[ExpenseType::Rent]),
            Decimal::from(1000)
        );
    }

    #[test]
    fn test_has_expense_counts_zero_amounts() {
        let h = household().with_expense(Expense::new(ExpenseType::Heating, Decimal::ZERO, Frequency::Monthly));
        assert!(h.has_expense(&[ExpenseType::Heating]));
        assert!(h.has_expense(&[ExpenseType::Heating, ExpenseType::Cooling]));
        assert!(!h.has_expense(&[ExpenseType::Cooling]));
    }

    #[test]
    fn test_num_adults_thresholds() {
        let h = household()
            .with_member(head(35))
            .with_member(HouseholdMember::new(MemberId(2), Relationship::Child, 18))
            .with_member(HouseholdMember::new(MemberId(3), Relationship::Child, 10));

        assert_eq!(h.num_adults(DEFAULT_ADULT_AGE), 1);
        assert_eq!(h.num_adults(18), 2);
        assert_eq!(Household::new("empty", "TX", 1).num_adults(DEFAULT_ADULT_AGE), 0);
    }

    #[test]
    fn test_has_benefit_maps_program_to_declared_benefit() {
        let h = household().with_benefit(Benefit::Snap);
        assert!(h.has_benefit("tx_snap"));
        assert!(!h.has_benefit("ma_head_start"));
        assert!(!h.has_benefit("not_a_program"));
    }

    #[test]
    fn test_is_dependent_age_boundaries() {
        let h = household().with_member(head(35));
        let at = |age: u32, student: bool| {
            let mut m = HouseholdMember::new(MemberId(2), Relationship::Child, age);
            m.student = student;
            h.is_dependent(&m)
        };

        assert!(at(10, false));
        assert!(at(18, false));
        assert!(!at(19, false));
        assert!(at(21, true));
        assert!(at(23, true));
        assert!(!at(24, true));
    }

    #[test]
    fn test_is_dependent_disabled_with_low_income() {
        let disabled = HouseholdMember::new(MemberId(2), Relationship::Child, 25)
            .disabled()
            .with_income(IncomeStream::new(IncomeType::Ssi, Decimal::from(800), Frequency::Monthly));
        let h = household()
            .with_member(head(35).with_income(wages(4000)))
            .with_member(disabled.clone());

        assert!(h.is_dependent(&disabled));
    }

    #[test]
    fn test_is_dependent_false_when_income_exceeds_half() {
        let child = HouseholdMember::new(MemberId(2), Relationship::Child, 17).with_income(wages(2000));
        let h = household()
            .with_member(head(35).with_income(wages(1000)))
            .with_member(child.clone());

        assert!(!h.is_dependent(&child));
    }

    #[test]
    fn test_is_dependent_false_for_head_and_spouse() {
        let spouse = HouseholdMember::new(MemberId(2), Relationship::Spouse, 17);
        let h = household().with_member(head(16)).with_member(spouse.clone());

        assert!(!h.is_dependent(&head(16)));
        assert!(!h.is_dependent(&spouse));
    }
}
