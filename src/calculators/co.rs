//! Colorado programs.

use crate::dependencies::{CO_CTC, CO_EITC, CO_STATE_CODE, CO_TANF};

use super::{Calculator, Medicaid, ProgramTable, Snap, StateTanf, TaxCredit, Wic};

/// Colorado programs.
pub const PROGRAMS: ProgramTable = &[
    ("co_wic", || Calculator::member(Wic::new(&CO_STATE_CODE))),
    ("co_medicaid", || Calculator::member(Medicaid::new(&CO_STATE_CODE))),
    ("co_eitc", || Calculator::tax_unit(TaxCredit::new(&CO_STATE_CODE, &CO_EITC))),
    ("co_ctc", || Calculator::tax_unit(TaxCredit::new(&CO_STATE_CODE, &CO_CTC))),
    ("co_snap", || Calculator::spm_unit(Snap::new(&CO_STATE_CODE))),
    ("co_tanf", || Calculator::spm_unit(StateTanf::new(&CO_STATE_CODE, &CO_TANF))),
];
