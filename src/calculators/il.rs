//! Illinois programs.

use crate::dependencies::{IL_CTC, IL_EITC, IL_STATE_CODE, IL_TANF};

use super::{Calculator, Medicaid, ProgramTable, Snap, StateTanf, TaxCredit, Wic};

/// Illinois programs.
pub const PROGRAMS: ProgramTable = &[
    ("il_wic", || Calculator::member(Wic::new(&IL_STATE_CODE))),
    ("il_medicaid", || Calculator::member(Medicaid::new(&IL_STATE_CODE))),
    ("il_eitc", || Calculator::tax_unit(TaxCredit::new(&IL_STATE_CODE, &IL_EITC))),
    ("il_ctc", || Calculator::tax_unit(TaxCredit::new(&IL_STATE_CODE, &IL_CTC))),
    ("il_snap", || Calculator::spm_unit(Snap::new(&IL_STATE_CODE))),
    ("il_tanf", || Calculator::spm_unit(StateTanf::new(&IL_STATE_CODE, &IL_TANF))),
];
