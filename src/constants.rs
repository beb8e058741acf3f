//! Compile-time parameters shared by the circuit, the native evaluator, the
//! witness builder and the CLI. Everything that must not drift between the
//! in-circuit and out-of-circuit code paths lives here or in
//! [`crate::poseidon2::round_constants`].

/// Upper bound on active rows.
pub const MAX_ROWS: usize = 256;

/// Number of columns in the matrix.
pub const MAX_COLS: usize = 16;

/// Upper bound on distinct group keys per SUM_COL_BY op.
pub const MAX_GROUPS: usize = 32;

/// Operations per handler.
pub const MAX_OPS: usize = 4;

/// Program handlers.
pub const MAX_HANDLERS: usize = 4;

/// Flattened matrix size, `flat[col * MAX_ROWS + row]`.
pub const TOTAL_ITEMS: usize = MAX_COLS * MAX_ROWS;

/// Branching factor of the item commitment tree.
pub const MERKLE_ARITY: usize = 16;

/// log16(TOTAL_ITEMS): levels of 16-ary folding from 4096 leaves to the root.
pub const N_LEVELS: usize = 3;

/// Bit width for row-index comparisons (covers MAX_ROWS = 256).
pub const ROW_INDEX_BITS: usize = 16;

/// Bit width for column/group-index comparisons (covers indices <= 32).
pub const COL_INDEX_BITS: usize = 8;

/// Opcode wire values. These are part of the public-input encoding and must
/// match the values the program author publishes.
pub const OP_NOOP: u64 = 0;
pub const OP_MERKLE16: u64 = 1000;
pub const OP_COUNT: u64 = 2000;
pub const OP_SUM_COL: u64 = 2001;
pub const OP_SUM_COL_BY: u64 = 3000;
