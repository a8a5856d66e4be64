//! Income stream model and frequency handling.
//!
//! Income streams belong to one household member. Every stream can be
//! annualized, and aggregates are converted to the requested [`Period`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of weeks used to annualize hourly and weekly amounts.
const WEEKS_PER_YEAR: i64 = 52;

/// Whether an income type counts as earned or unearned income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    /// Income from work.
    Earned,
    /// Everything else.
    Unearned,
}

/// The kind of an income stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeType {
    /// Wages and salary.
    Wages,
    /// Net self-employment income.
    SelfEmployment,
    /// Rental income.
    Rental,
    /// Pension or retirement account distributions.
    Pension,
    /// Veterans' benefits.
    Veteran,
    /// Social Security retirement.
    #[serde(rename = "sSRetirement")]
    SsRetirement,
    /// Social Security disability (SSDI).
    #[serde(rename = "sSDisability")]
    SsDisability,
    /// Social Security survivor benefits.
    #[serde(rename = "sSSurvivor")]
    SsSurvivor,
    /// Social Security dependent benefits.
    #[serde(rename = "sSDependent")]
    SsDependent,
    /// Supplemental Security Income.
    #[serde(rename = "sSI")]
    Ssi,
    /// Alimony received.
    Alimony,
    /// Cash assistance such as TANF.
    CashAssistance,
    /// Child support received.
    ChildSupport,
    /// Unemployment compensation.
    Unemployment,
    /// Workers' compensation.
    WorkersComp,
    /// Interest and dividends.
    Investment,
    /// Cash gifts.
    Gifts,
    /// Payments from a boarder or roommate.
    Boarder,
    /// Deferred compensation.
    DeferredComp,
}

impl IncomeType {
    /// Returns whether this income type is earned or unearned.
    pub fn category(self) -> IncomeCategory {
        match self {
            IncomeType::Wages | IncomeType::SelfEmployment => IncomeCategory::Earned,
            _ => IncomeCategory::Unearned,
        }
    }
}

/// How often an amount is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Paid per hour worked; annualized using the stream's weekly hours.
    Hourly,
    /// Every week.
    Weekly,
    /// Every two weeks.
    Biweekly,
    /// Twice a month.
    Semimonthly,
    /// Once a month.
    Monthly,
    /// Once a year.
    Yearly,
}

impl Frequency {
    /// Returns how many times per year an amount at this frequency is paid.
    ///
    /// Hourly amounts have no fixed count; see [`annualize`](Self::annualize).
    pub fn periods_per_year(self) -> Option<Decimal> {
        match self {
            Frequency::Hourly => None,
            Frequency::Weekly => Some(Decimal::from(WEEKS_PER_YEAR)),
            Frequency::Biweekly => Some(Decimal::from(26)),
            Frequency::Semimonthly => Some(Decimal::from(24)),
            Frequency::Monthly => Some(Decimal::from(12)),
            Frequency::Yearly => Some(Decimal::ONE),
        }
    }

    /// Converts an amount paid at this frequency to a yearly amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use eligibility_engine::models::Frequency;
    /// use rust_decimal::Decimal;
    ///
    /// let yearly = Frequency::Monthly.annualize(Decimal::from(500), None);
    /// assert_eq!(yearly, Decimal::from(6000));
    /// ```
    pub fn annualize(self, amount: Decimal, weekly_hours: Option<Decimal>) -> Decimal {
        match self.periods_per_year() {
            Some(periods) => amount * periods,
            None => amount * weekly_hours.unwrap_or(Decimal::ZERO) * Decimal::from(WEEKS_PER_YEAR),
        }
    }
}

/// The period an aggregate amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Per month.
    Monthly,
    /// Per year.
    Yearly,
}

impl Period {
    /// Converts a yearly amount into this period.
    pub fn from_yearly(self, yearly: Decimal) -> Decimal {
        match self {
            Period::Yearly => yearly,
            Period::Monthly => yearly / Decimal::from(12),
        }
    }
}

/// Selects which income streams an aggregate includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFilter {
    /// Every income type.
    All,
    /// Earned income types only.
    Earned,
    /// Unearned income types only.
    Unearned,
    /// A single income type.
    Type(IncomeType),
}

impl IncomeFilter {
    /// Returns true if `income_type` is selected by this filter.
    pub fn matches(self, income_type: IncomeType) -> bool {
        match self {
            IncomeFilter::All => true,
            IncomeFilter::Earned => income_type.category() == IncomeCategory::Earned,
            IncomeFilter::Unearned => income_type.category() == IncomeCategory::Unearned,
            IncomeFilter::Type(t) => t == income_type,
        }
    }
}

/// A recurring income received by a household member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStream {
    /// The kind of income.
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    /// The amount per `frequency`.
    pub amount: Decimal,
    /// How often the amount is received.
    pub frequency: Frequency,
    /// Hours worked per week, used by hourly streams.
    #[serde(default)]
    pub hours_worked: Option<Decimal>,
}

impl IncomeStream {
    /// Creates a stream with a fixed frequency.
    pub fn new(income_type: IncomeType, amount: Decimal, frequency: Frequency) -> Self {
        Self {
            income_type,
            amount,
            frequency,
            hours_worked: None,
        }
    }

    /// Returns the yearly amount of this stream.
    pub fn annual_amount(&self) -> Decimal {
        self.frequency.annualize(self.amount, self.hours_worked)
    }

    /// Returns true if the stream is selected by any filter and not excluded.
    pub fn is_selected(&self, filters: &[IncomeFilter], exclude: &[IncomeType]) -> bool {
        !exclude.contains(&self.income_type) && filters.iter().any(|f| f.matches(self.income_type))
    }
}
