//! Household data model and screening results.
//!
//! The household side is read-only input to a screening run; every query on
//! it is derived from members, income streams, expenses and declared benefits.

mod benefit;
mod expense;
mod household;
mod income;
mod member;
mod screening_result;

pub use benefit::Benefit;
pub use expense::{Expense, ExpenseType};
pub use household::{
    DEFAULT_ADULT_AGE, DEPENDENT_MAX_AGE, Household, STUDENT_DEPENDENT_MAX_AGE,
};
pub use income::{Frequency, IncomeCategory, IncomeFilter, IncomeStream, IncomeType, Period};
pub use member::{HouseholdMember, MemberId, Relationship};
pub use screening_result::{
    EntityValue, ProgramOutcome, ProgramResult, ScreeningResult, ScreeningWarning,
};
