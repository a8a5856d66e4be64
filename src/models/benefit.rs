//! Benefits a household already receives.

use serde::{Deserialize, Serialize};

/// Prefixes of state program identifiers.
const STATE_PREFIXES: [&str; 5] = ["co_", "il_", "ma_", "nc_", "tx_"];

/// A benefit the household declared it already receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benefit {
    /// Supplemental Nutrition Assistance Program.
    Snap,
    /// Cash assistance for families (TANF and state equivalents).
    Tanf,
    /// Emergency aid for elders, disabled and children.
    Eaedc,
    /// Women, Infants and Children nutrition.
    Wic,
    /// Head Start.
    HeadStart,
    /// Early Head Start.
    EarlyHeadStart,
    /// Medicaid and state equivalents.
    Medicaid,
    /// Children's Health Insurance Program.
    Chip,
    /// Supplemental Security Income and state supplements.
    Ssi,
    /// Earned income tax credits.
    Eitc,
    /// Child tax credits.
    Ctc,
    /// Lifeline phone discount.
    Lifeline,
    /// Child care subsidies.
    ChildCare,
    /// Home energy assistance.
    Liheap,
    /// Free or reduced-price school meals.
    SchoolLunch,
    /// Commodity Supplemental Food Program.
    Cfsp,
    /// Premium tax credits on the health insurance marketplace.
    AcaSubsidies,
}

impl Benefit {
    /// Maps a program identifier to the benefit it provides.
    ///
    /// # Examples
    ///
    /// ```
    /// use eligibility_engine::models::Benefit;
    ///
    /// assert_eq!(Benefit::for_program("tx_snap"), Some(Benefit::Snap));
    /// assert_eq!(Benefit::for_program("ma_head_start"), Some(Benefit::HeadStart));
    /// assert_eq!(Benefit::for_program("unknown"), None);
    /// ```
    pub fn for_program(program: &str) -> Option<Benefit> {
        let name = STATE_PREFIXES
            .iter()
            .find_map(|prefix| program.strip_prefix(prefix))
            .unwrap_or(program);

        let benefit = match name {
            "snap" => Benefit::Snap,
            "tanf" | "tafdc" => Benefit::Tanf,
            "eaedc" => Benefit::Eaedc,
            "wic" => Benefit::Wic,
            "head_start" => Benefit::HeadStart,
            "early_head_start" => Benefit::EarlyHeadStart,
            "medicaid" | "mass_health" => Benefit::Medicaid,
            "chip" => Benefit::Chip,
            "ssi" | "ssp" => Benefit::Ssi,
            "eitc" | "maeitc" => Benefit::Eitc,
            "ctc" | "cfc" => Benefit::Ctc,
            "lifeline" => Benefit::Lifeline,
            "ccdf" => Benefit::ChildCare,
            "heap" => Benefit::Liheap,
            "school_lunch" => Benefit::SchoolLunch,
            "cfsp" => Benefit::Cfsp,
            "aca" => Benefit::AcaSubsidies,
            _ => return None,
        };
        Some(benefit)
    }
}
