//! Assignment construction for honest provers.
//!
//! [`build_assignment`] validates a (matrix, NR, program) triple, evaluates
//! every op with the native evaluator, and fills the public-input arrays
//! according to the result-slot conventions: scalar ops put their output in
//! group slot 0 with zeros elsewhere and `numGroups = 0`; NOOP publishes all
//! zeros; SUM_COL_BY publishes per-group sums, the keys verbatim in the same
//! order, and the actual group count.

use ark_bn254::Fr;
use ark_ff::Zero;

use crate::circuit::QueryCircuit;
use crate::constants::{MAX_COLS, MAX_GROUPS, MAX_HANDLERS, MAX_OPS, MAX_ROWS};
use crate::error::QueryError;
use crate::evaluator;
use crate::program::{Opcode, Program};

/// The private table: MAX_COLS columns of MAX_ROWS field elements.
#[derive(Clone, Debug)]
pub struct Matrix {
    data: Box<[[Fr; MAX_ROWS]; MAX_COLS]>,
}

impl Matrix {
    pub fn new() -> Self {
        Self { data: Box::new([[Fr::zero(); MAX_ROWS]; MAX_COLS]) }
    }

    pub fn get(&self, col: usize, row: usize) -> Fr {
        self.data[col][row]
    }

    pub fn set(&mut self, col: usize, row: usize, value: Fr) {
        self.data[col][row] = value;
    }

    pub(crate) fn columns(&self) -> &[[Fr; MAX_ROWS]; MAX_COLS] {
        &self.data
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-op digest of a SUM_COL_BY publication, alongside the circuit claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDigest {
    pub handler: usize,
    pub op: usize,
    /// Binary Poseidon2 fold over the (key, sum) pairs, in published order.
    pub root: Fr,
}

/// A satisfying assignment plus the publication digests derived from it.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub circuit: QueryCircuit,
    pub group_digests: Vec<GroupDigest>,
}

/// Lower a program over a matrix into a satisfying circuit assignment,
/// computing every claimed result with the native evaluator.
#[tracing::instrument(skip_all, name = "witness::build_assignment")]
pub fn build_assignment(
    matrix: &Matrix,
    nr: usize,
    program: &Program,
) -> Result<Assignment, QueryError> {
    if nr > MAX_ROWS {
        return Err(QueryError::RowBound(nr));
    }
    if program.handlers.len() > MAX_HANDLERS {
        return Err(QueryError::TooManyHandlers(program.handlers.len()));
    }

    let mut circuit = QueryCircuit {
        nr: Fr::from(nr as u64),
        num_handlers: Fr::from(program.handlers.len() as u64),
        items: Box::new(*matrix.columns()),
        ..QueryCircuit::default()
    };
    let mut group_digests = Vec::new();

    for (h, handler) in program.handlers.iter().enumerate() {
        if handler.start_index + handler.num_cols > MAX_COLS {
            return Err(QueryError::ColumnWindow {
                start: handler.start_index,
                len: handler.num_cols,
            });
        }
        if handler.ops.len() > MAX_OPS {
            return Err(QueryError::TooManyOps(handler.ops.len()));
        }

        circuit.handler_ncs[h] = Fr::from(handler.num_cols as u64);
        circuit.handler_start_index[h] = Fr::from(handler.start_index as u64);

        for (op, spec) in handler.ops.iter().enumerate() {
            circuit.op_codes[h][op] = Fr::from(spec.opcode.code());

            match spec.opcode {
                Opcode::Noop => {}
                Opcode::Merkle16 => {
                    let flat = evaluator::flat_window(
                        matrix,
                        nr,
                        handler.start_index,
                        handler.num_cols,
                    );
                    circuit.results[h][op][0] = evaluator::merkle16_root(&flat);
                }
                Opcode::Count => {
                    circuit.results[h][op][0] = evaluator::count(nr);
                }
                Opcode::SumCol => {
                    if spec.col_x >= MAX_COLS {
                        return Err(QueryError::ColumnIndex(spec.col_x));
                    }
                    circuit.op_args[h][op][0] = Fr::from(spec.col_x as u64);
                    circuit.results[h][op][0] = evaluator::sum_col(matrix, spec.col_x, nr);
                }
                Opcode::SumColBy => {
                    if spec.col_x >= MAX_COLS {
                        return Err(QueryError::ColumnIndex(spec.col_x));
                    }
                    if spec.col_y >= MAX_COLS {
                        return Err(QueryError::ColumnIndex(spec.col_y));
                    }
                    circuit.op_args[h][op][0] = Fr::from(spec.col_x as u64);
                    circuit.op_args[h][op][1] = Fr::from(spec.col_y as u64);

                    let keys = evaluator::group_keys(matrix, spec.col_y, nr);
                    if keys.len() > MAX_GROUPS {
                        return Err(QueryError::TooManyGroups(keys.len()));
                    }
                    let sums = evaluator::sum_col_by(matrix, spec.col_x, spec.col_y, nr, &keys);

                    circuit.num_groups[h][op] = Fr::from(keys.len() as u64);
                    for (g, (key, sum)) in keys.iter().zip(sums.iter()).enumerate() {
                        circuit.group_keys[h][op][g] = *key;
                        circuit.results[h][op][g] = *sum;
                    }
                    group_digests.push(GroupDigest {
                        handler: h,
                        op,
                        root: evaluator::ssz_key_value(&keys, &sums),
                    });
                }
            }
        }
    }

    Ok(Assignment { circuit, group_digests })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{HandlerSpec, OpSpec};

    fn demo_matrix() -> Matrix {
        let mut matrix = Matrix::new();
        for row in 0..64 {
            matrix.set(0, row, Fr::from(row as u64 + 1));
            matrix.set(1, row, Fr::from((row % 10) as u64 + 1));
            matrix.set(2, row, Fr::from((row % 5) as u64 + 1));
        }
        matrix
    }

    #[test]
    fn scalar_ops_fill_slot_zero_only() {
        let program = Program::new(vec![HandlerSpec::new(0, 4)
            .with_op(OpSpec::count())
            .with_op(OpSpec::sum_col(1))]);
        let assignment = build_assignment(&demo_matrix(), 64, &program).unwrap();
        let circuit = &assignment.circuit;

        assert_eq!(circuit.results[0][0][0], Fr::from(64u64));
        assert_eq!(circuit.results[0][1][0], Fr::from(340u64));
        for g in 1..MAX_GROUPS {
            assert_eq!(circuit.results[0][0][g], Fr::zero());
            assert_eq!(circuit.results[0][1][g], Fr::zero());
        }
        assert_eq!(circuit.num_groups[0][0], Fr::zero());
        assert!(assignment.group_digests.is_empty());
    }

    #[test]
    fn sum_col_by_publishes_keys_sums_and_digest() {
        let program = Program::new(vec![
            HandlerSpec::new(0, 4).with_op(OpSpec::sum_col_by(1, 2))
        ]);
        let assignment = build_assignment(&demo_matrix(), 64, &program).unwrap();
        let circuit = &assignment.circuit;

        assert_eq!(circuit.num_groups[0][0], Fr::from(5u64));
        for g in 0..5 {
            assert_eq!(circuit.group_keys[0][0][g], Fr::from(g as u64 + 1));
        }
        let keys: Vec<Fr> = (1..=5u64).map(Fr::from).collect();
        let sums: Vec<Fr> = (0..5).map(|g| circuit.results[0][0][g]).collect();
        assert_eq!(assignment.group_digests.len(), 1);
        assert_eq!(
            assignment.group_digests[0].root,
            evaluator::ssz_key_value(&keys, &sums)
        );
    }

    #[test]
    fn capacity_violations_are_rejected() {
        let matrix = demo_matrix();
        assert!(matches!(
            build_assignment(&matrix, MAX_ROWS + 1, &Program::default()),
            Err(QueryError::RowBound(_))
        ));

        let wide = Program::new(vec![HandlerSpec::new(12, 8)]);
        assert!(matches!(
            build_assignment(&matrix, 64, &wide),
            Err(QueryError::ColumnWindow { .. })
        ));

        let bad_col = Program::new(vec![
            HandlerSpec::new(0, 4).with_op(OpSpec::sum_col(MAX_COLS))
        ]);
        assert!(matches!(
            build_assignment(&matrix, 64, &bad_col),
            Err(QueryError::ColumnIndex(_))
        ));
    }

    #[test]
    fn too_many_distinct_keys_are_rejected() {
        let mut matrix = Matrix::new();
        for row in 0..(MAX_GROUPS + 1) {
            matrix.set(2, row, Fr::from(row as u64));
        }
        let program = Program::new(vec![
            HandlerSpec::new(0, 4).with_op(OpSpec::sum_col_by(1, 2))
        ]);
        assert!(matches!(
            build_assignment(&matrix, MAX_GROUPS + 1, &program),
            Err(QueryError::TooManyGroups(_))
        ));
    }
}
