//! Error type for the out-of-circuit side (witness building, program
//! validation). The circuit itself has a single failure mode, an
//! unsatisfiable constraint system; errors here are raised before synthesis
//! so an honest prover never reaches that state with bad inputs.

use thiserror::Error;

use crate::constants::{MAX_COLS, MAX_GROUPS, MAX_HANDLERS, MAX_OPS, MAX_ROWS};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("row bound {0} exceeds MAX_ROWS = {MAX_ROWS}")]
    RowBound(usize),

    #[error("column index {0} out of range (MAX_COLS = {MAX_COLS})")]
    ColumnIndex(usize),

    #[error("column window [{start}, {start}+{len}) exceeds MAX_COLS = {MAX_COLS}")]
    ColumnWindow { start: usize, len: usize },

    #[error("program has {0} handlers, circuit supports {MAX_HANDLERS}")]
    TooManyHandlers(usize),

    #[error("handler has {0} ops, circuit supports {MAX_OPS}")]
    TooManyOps(usize),

    #[error("grouping produced {0} distinct keys, circuit supports {MAX_GROUPS}")]
    TooManyGroups(usize),

    #[error("unknown opcode {0}")]
    UnknownOpcode(u64),
}
