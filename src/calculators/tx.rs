//! Texas programs.
//!
//! Texas has no state income tax, so `tx_eitc` is the federal credit
//! simulated under Texas rules.

use crate::dependencies::{EITC, TX_STATE_CODE, TX_TANF};

use super::{Calculator, Lifeline, ProgramTable, Snap, StateTanf, TaxCredit, Wic};

/// Texas programs.
pub const PROGRAMS: ProgramTable = &[
    ("tx_wic", || Calculator::member(Wic::new(&TX_STATE_CODE))),
    ("tx_eitc", || Calculator::tax_unit(TaxCredit::new(&TX_STATE_CODE, &EITC))),
    ("tx_snap", || Calculator::spm_unit(Snap::new(&TX_STATE_CODE))),
    ("tx_tanf", || Calculator::spm_unit(StateTanf::new(&TX_STATE_CODE, &TX_TANF))),
    ("tx_lifeline", || Calculator::spm_unit(Lifeline::new(&TX_STATE_CODE))),
];
