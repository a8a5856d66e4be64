//! North Carolina programs.

use crate::dependencies::{NC_STATE_CODE, NC_TANF};

use super::{Calculator, Medicaid, ProgramTable, Snap, StateTanf, Wic};

/// North Carolina programs.
pub const PROGRAMS: ProgramTable = &[
    ("nc_wic", || Calculator::member(Wic::new(&NC_STATE_CODE))),
    ("nc_medicaid", || Calculator::member(Medicaid::new(&NC_STATE_CODE))),
    ("nc_snap", || Calculator::spm_unit(Snap::new(&NC_STATE_CODE))),
    ("nc_tanf", || Calculator::spm_unit(StateTanf::new(&NC_STATE_CODE, &NC_TANF))),
];
