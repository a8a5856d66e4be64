//! Household member model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IncomeFilter, IncomeStream, IncomeType, Period};

/// Identifier of a household member, unique within a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member's relationship to the head of household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relationship {
    /// The head of household.
    HeadOfHousehold,
    /// Married spouse of the head.
    Spouse,
    /// Unmarried partner of the head.
    DomesticPartner,
    /// Child of the head.
    Child,
    /// Step-child of the head.
    StepChild,
    /// Foster child of the head.
    FosterChild,
    /// Grandchild of the head.
    GrandChild,
    /// Parent of the head.
    Parent,
    /// Grandparent of the head.
    GrandParent,
    /// Brother or sister of the head.
    SisterOrBrother,
    /// Any other relative.
    RelatedOther,
    /// Anyone unrelated to the head.
    UnrelatedOther,
}

/// A person in the household being screened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Identifier used as the engine's person key.
    pub id: MemberId,
    /// Relationship to the head of household.
    pub relationship: Relationship,
    /// Age in years.
    pub age: u32,
    /// Short-term disability.
    #[serde(default)]
    pub disabled: bool,
    /// Long-term disability.
    #[serde(default)]
    pub long_term_disability: bool,
    /// Enrolled as a student.
    #[serde(default)]
    pub student: bool,
    /// Pregnancy status; unanswered is `None`.
    #[serde(default)]
    pub pregnant: Option<bool>,
    /// Whether the member reported having income.
    #[serde(default)]
    pub has_income: bool,
    /// Income streams belonging to this member.
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
}

impl HouseholdMember {
    /// Creates a member with no flags set and no income.
    ///
    /// # Examples
    ///
    /// ```
    /// use eligibility_engine::models::{HouseholdMember, MemberId, Relationship};
    ///
    /// let head = HouseholdMember::new(MemberId(1), Relationship::HeadOfHousehold, 35);
    /// assert!(head.is_head());
    /// assert!(!head.has_disability());
    /// ```
    pub fn new(id: MemberId, relationship: Relationship, age: u32) -> Self {
        Self {
            id,
            relationship,
            age,
            disabled: false,
            long_term_disability: false,
            student: false,
            pregnant: None,
            has_income: false,
            income_streams: Vec::new(),
        }
    }

    /// Adds an income stream and marks the member as having income.
    pub fn with_income(mut self, stream: IncomeStream) -> Self {
        self.has_income = true;
        self.income_streams.push(stream);
        self
    }

    /// Marks the member as a student.
    pub fn student(mut self) -> Self {
        self.student = true;
        self
    }

    /// Marks the member as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Sets the pregnancy answer.
    pub fn pregnant(mut self, pregnant: bool) -> Self {
        self.pregnant = Some(pregnant);
        self
    }

    /// Returns true for either a short-term or a long-term disability.
    pub fn has_disability(&self) -> bool {
        self.disabled || self.long_term_disability
    }

    /// Returns true if the member is pregnant; unanswered counts as not pregnant.
    pub fn is_pregnant(&self) -> bool {
        self.pregnant.unwrap_or(false)
    }

    /// Returns true if the member is the head of household.
    pub fn is_head(&self) -> bool {
        self.relationship == Relationship::HeadOfHousehold
    }

    /// Returns true if the member is the head's spouse or domestic partner.
    pub fn is_spouse(&self) -> bool {
        matches!(
            self.relationship,
            Relationship::Spouse | Relationship::DomesticPartner
        )
    }

    /// Sums this member's income streams selected by `filters`, minus `exclude`.
    pub fn calc_gross_income(
        &self,
        period: Period,
        filters: &[IncomeFilter],
        exclude: &[IncomeType],
    ) -> Decimal {
        let yearly: Decimal = self
            .income_streams
            .iter()
            .filter(|s| s.is_selected(filters, exclude))
            .map(IncomeStream::annual_amount)
            .sum();
        period.from_yearly(yearly)
    }

    /// Sums the yearly amounts of the given income types.
    pub fn annual_income_of(&self, types: &[IncomeType]) -> Decimal {
        self.income_streams
            .iter()
            .filter(|s| types.contains(&s.income_type))
            .map(IncomeStream::annual_amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn member(relationship: Relationship) -> HouseholdMember {
        HouseholdMember::new(MemberId(1), relationship, 35)
    }

    #[test]
    fn test_has_disability_short_term() {
        let m = member(Relationship::HeadOfHousehold).disabled();
        assert!(m.has_disability());
    }

    #[test]
    fn test_has_disability_long_term() {
        let mut m = member(Relationship::HeadOfHousehold);
        m.long_term_disability = true;
        assert!(m.has_disability());
    }

    #[test]
    fn test_has_disability_none() {
        assert!(!member(Relationship::HeadOfHousehold).has_disability());
    }

    #[test]
    fn test_is_spouse_for_spouse_and_partner() {
        assert!(member(Relationship::Spouse).is_spouse());
        assert!(member(Relationship::DomesticPartner).is_spouse());
        assert!(!member(Relationship::HeadOfHousehold).is_spouse());
        assert!(!member(Relationship::Child).is_spouse());
    }

    #[test]
    fn test_is_head_only_for_head() {
        assert!(member(Relationship::HeadOfHousehold).is_head());
        assert!(!member(Relationship::Parent).is_head());
    }

    #[test]
    fn test_unanswered_pregnancy_is_false() {
        assert!(!member(Relationship::Child).is_pregnant());
        assert!(member(Relationship::Spouse).pregnant(true).is_pregnant());
    }

    #[test]
    fn test_calc_gross_income_all_types() {
        let m = member(Relationship::HeadOfHousehold)
            .with_income(IncomeStream::new(IncomeType::Wages, Decimal::from(2000), Frequency::Monthly))
            .with_income(IncomeStream::new(IncomeType::Ssi, Decimal::from(800), Frequency::Monthly));

        assert_eq!(
            m.calc_gross_income(Period::Yearly, &[IncomeFilter::All], &[]),
            Decimal::from(33600)
        );
        assert_eq!(
            m.calc_gross_income(Period::Monthly, &[IncomeFilter::Earned], &[]),
            Decimal::from(2000)
        );
    }

    #[test]
    fn test_calc_gross_income_with_exclude() {
        let m = member(Relationship::HeadOfHousehold)
            .with_income(IncomeStream::new(IncomeType::CashAssistance, Decimal::from(300), Frequency::Monthly))
            .with_income(IncomeStream::new(IncomeType::Alimony, Decimal::from(500), Frequency::Monthly));

        let result = m.calc_gross_income(
            Period::Yearly,
            &[IncomeFilter::Unearned],
            &[IncomeType::CashAssistance],
        );
        assert_eq!(result, Decimal::from(6000));
    }

    #[test]
    fn test_deserialize_member_defaults() {
        let json = r#"{"id": 7, "relationship": "grandParent", "age": 65}"#;
        let m: HouseholdMember = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, MemberId(7));
        assert_eq!(m.relationship, Relationship::GrandParent);
        assert_eq!(m.pregnant, None);
        assert!(m.income_streams.is_empty());
    }
}
