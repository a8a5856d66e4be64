//! Household expense model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Frequency, MemberId};

/// The kind of a household expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseType {
    /// Rent paid for the home.
    Rent,
    /// Mortgage payments.
    Mortgage,
    /// Property taxes.
    PropertyTax,
    /// Homeowners or renters insurance.
    HomeownersInsurance,
    /// Out-of-pocket medical costs.
    Medical,
    /// Child support paid to someone outside the household.
    ChildSupport,
    /// Child care costs.
    ChildCare,
    /// Care for a disabled or elderly dependent.
    DependentCare,
    /// Heating costs.
    Heating,
    /// Cooling costs.
    Cooling,
    /// Electricity bills.
    Electricity,
    /// Water and sewer bills.
    Water,
    /// Telephone service.
    Telephone,
    /// Internet service.
    Internet,
}

/// An expense paid by the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The kind of expense.
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    /// The amount per `frequency`.
    pub amount: Decimal,
    /// How often the amount is paid.
    pub frequency: Frequency,
    /// The member the expense is paid for, when it is not shared.
    #[serde(default)]
    pub member_id: Option<MemberId>,
}

impl Expense {
    /// Creates an unattributed household expense.
    pub fn new(expense_type: ExpenseType, amount: Decimal, frequency: Frequency) -> Self {
        Self {
            expense_type,
            amount,
            frequency,
            member_id: None,
        }
    }

    /// Attributes the expense to a single member.
    pub fn for_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    /// Returns the yearly amount of this expense.
    pub fn annual_amount(&self) -> Decimal {
        self.frequency.annualize(self.amount, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_amount() {
        let expense = Expense::new(ExpenseType::Rent, Decimal::from(1000), Frequency::Monthly);
        assert_eq!(expense.annual_amount(), Decimal::from(12000));
    }

    #[test]
    fn test_deserialize_expense_without_member() {
        let json = r#"{"type": "propertyTax", "amount": "3600", "frequency": "yearly"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.expense_type, ExpenseType::PropertyTax);
        assert_eq!(expense.member_id, None);
        assert_eq!(expense.annual_amount(), Decimal::from(3600));
    }

    #[test]
    fn test_for_member_sets_attribution() {
        let expense = Expense::new(ExpenseType::Medical, Decimal::from(50), Frequency::Monthly).for_member(MemberId(4));
        assert_eq!(expense.member_id, Some(MemberId(4)));
    }
}
