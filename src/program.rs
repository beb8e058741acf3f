//! Program authoring types.
//!
//! A program is what the prover publishes: up to MAX_HANDLERS handlers, each
//! with a contiguous column window and up to MAX_OPS operations. These types
//! describe the program in host terms; [`crate::witness::build_assignment`]
//! lowers them to the field-element public-input encoding.

use crate::constants::{OP_COUNT, OP_MERKLE16, OP_NOOP, OP_SUM_COL, OP_SUM_COL_BY};
use crate::error::QueryError;

/// The five operations an op slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Opcode {
    #[default]
    Noop,
    Merkle16,
    Count,
    SumCol,
    SumColBy,
}

impl Opcode {
    /// Wire value published as the opcode public input.
    pub const fn code(self) -> u64 {
        match self {
            Opcode::Noop => OP_NOOP,
            Opcode::Merkle16 => OP_MERKLE16,
            Opcode::Count => OP_COUNT,
            Opcode::SumCol => OP_SUM_COL,
            Opcode::SumColBy => OP_SUM_COL_BY,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, QueryError> {
        match code {
            OP_NOOP => Ok(Opcode::Noop),
            OP_MERKLE16 => Ok(Opcode::Merkle16),
            OP_COUNT => Ok(Opcode::Count),
            OP_SUM_COL => Ok(Opcode::SumCol),
            OP_SUM_COL_BY => Ok(Opcode::SumColBy),
            other => Err(QueryError::UnknownOpcode(other)),
        }
    }
}

/// One op slot: the opcode plus its (colX, colY) arguments.
///
/// colY is only meaningful for SUM_COL_BY (the key column); the other ops
/// ignore it and conventionally publish 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpSpec {
    pub opcode: Opcode,
    pub col_x: usize,
    pub col_y: usize,
}

impl OpSpec {
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn merkle16() -> Self {
        Self { opcode: Opcode::Merkle16, col_x: 0, col_y: 0 }
    }

    pub fn count() -> Self {
        Self { opcode: Opcode::Count, col_x: 0, col_y: 0 }
    }

    pub fn sum_col(col: usize) -> Self {
        Self { opcode: Opcode::SumCol, col_x: col, col_y: 0 }
    }

    pub fn sum_col_by(value_col: usize, key_col: usize) -> Self {
        Self { opcode: Opcode::SumColBy, col_x: value_col, col_y: key_col }
    }
}

/// One handler: a column window plus its op sequence (missing slots are
/// NOOPs).
#[derive(Debug, Clone, Default)]
pub struct HandlerSpec {
    pub start_index: usize,
    pub num_cols: usize,
    pub ops: Vec<OpSpec>,
}

impl HandlerSpec {
    pub fn new(start_index: usize, num_cols: usize) -> Self {
        Self { start_index, num_cols, ops: Vec::new() }
    }

    pub fn with_op(mut self, op: OpSpec) -> Self {
        self.ops.push(op);
        self
    }
}

/// A full program: the active handler prefix.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub handlers: Vec<HandlerSpec>,
}

impl Program {
    pub fn new(handlers: Vec<HandlerSpec>) -> Self {
        Self { handlers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_round_trips_through_wire_codes() {
        for opcode in [
            Opcode::Noop,
            Opcode::Merkle16,
            Opcode::Count,
            Opcode::SumCol,
            Opcode::SumColBy,
        ] {
            assert_eq!(Opcode::from_code(opcode.code()).unwrap(), opcode);
        }
        assert!(Opcode::from_code(42).is_err());
    }
}
