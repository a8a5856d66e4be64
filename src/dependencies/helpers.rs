//! Eligibility rules shared by several resolvers.

use rust_decimal::Decimal;

use crate::models::{Household, HouseholdMember, IncomeFilter, Period};

/// Members at or above this age are treated as elderly.
pub const ELDERLY_AGE: u32 = 60;

/// Students younger than this are never SNAP-ineligible students.
const SNAP_STUDENT_MIN_AGE: u32 = 18;

/// Students this age or older are exempt from the SNAP student rule.
const SNAP_STUDENT_EXEMPT_AGE: u32 = 50;

/// Parents of a child younger than this are exempt from the SNAP student rule.
const SNAP_STUDENT_CHILD_AGE: u32 = 6;

/// Returns true if the member is elderly.
pub fn is_elderly(member: &HouseholdMember) -> bool {
    member.age >= ELDERLY_AGE
}

/// Returns true if the member is elderly or has any disability.
pub fn is_elderly_or_disabled(member: &HouseholdMember) -> bool {
    is_elderly(member) || member.has_disability()
}

/// Counts the elderly or disabled members of the household.
pub fn count_elderly_or_disabled(household: &Household) -> usize {
    household
        .members
        .iter()
        .filter(|m| is_elderly_or_disabled(m))
        .count()
}

/// Returns true if the member is a student barred from SNAP.
///
/// Students aged 18 to 49 are ineligible unless they are disabled, have
/// earned income, or are the head or spouse caring for a child under 6.
pub fn is_snap_ineligible_student(household: &Household, member: &HouseholdMember) -> bool {
    if !member.student {
        return false;
    }

    if member.age < SNAP_STUDENT_MIN_AGE || member.age >= SNAP_STUDENT_EXEMPT_AGE {
        return false;
    }

    if member.has_disability() {
        return false;
    }

    if member.calc_gross_income(Period::Yearly, &[IncomeFilter::Earned], &[]) > Decimal::ZERO {
        return false;
    }

    let parent_of_young_child = (member.is_head() || member.is_spouse())
        && household
            .members
            .iter()
            .any(|m| m.age < SNAP_STUDENT_CHILD_AGE);

    !parent_of_young_child
}
