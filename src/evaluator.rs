//! Native twins of the in-circuit operators.
//!
//! The witness builder derives claimed results with these functions; the
//! honest-prover satisfiability property is exactly that these outputs match
//! what the constraint gadgets compute from the same matrix. This module also
//! hosts the SSZ publication digest for grouped results: a binary Poseidon2
//! fold over (key, sum) pair hashes, zero-padded to `max(2,
//! next_power_of_two(n))`.

use ark_bn254::Fr;
use ark_ff::{PrimeField, Zero};
use rayon::prelude::*;

use crate::constants::{MAX_COLS, MAX_ROWS, MERKLE_ARITY, N_LEVELS, TOTAL_ITEMS};
use crate::poseidon2;
use crate::witness::Matrix;

/// The flat masked view a handler commits to:
/// `flat[c * MAX_ROWS + r] = matrix[c][r]` inside the active window, else 0.
pub fn flat_window(matrix: &Matrix, nr: usize, start: usize, nc: usize) -> Vec<Fr> {
    let mut flat = vec![Fr::zero(); TOTAL_ITEMS];
    for col in start..(start + nc).min(MAX_COLS) {
        for row in 0..nr.min(MAX_ROWS) {
            flat[col * MAX_ROWS + row] = matrix.get(col, row);
        }
    }
    flat
}

/// 16-ary Merkle root over a flat view of TOTAL_ITEMS leaves.
#[tracing::instrument(skip_all, name = "evaluator::merkle16_root")]
pub fn merkle16_root(leaves: &[Fr]) -> Fr {
    assert_eq!(leaves.len(), TOTAL_ITEMS);
    let mut level = leaves.to_vec();
    for _ in 0..N_LEVELS {
        level = level
            .par_chunks(MERKLE_ARITY)
            .map(poseidon2::hash)
            .collect();
    }
    level[0]
}

/// COUNT output: the row-mask population, i.e. NR itself for NR <= MAX_ROWS.
pub fn count(nr: usize) -> Fr {
    Fr::from(nr as u64)
}

/// SUM_COL output: plain sum of `matrix[col][r]` over active rows.
pub fn sum_col(matrix: &Matrix, col: usize, nr: usize) -> Fr {
    (0..nr).map(|row| matrix.get(col, row)).sum()
}

/// Distinct values of the key column among active rows, ascending by integer
/// representative. This is the canonical key order an honest prover publishes.
pub fn group_keys(matrix: &Matrix, col_y: usize, nr: usize) -> Vec<Fr> {
    let mut keys: Vec<Fr> = Vec::new();
    for row in 0..nr {
        let key = matrix.get(col_y, row);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.sort_by_key(|k| k.into_bigint());
    keys
}

/// SUM_COL_BY output: per-key sums of column X grouped by column Y, in the
/// order of `keys`. Rows whose key is absent from `keys` contribute nowhere
/// (the circuit rejects such assignments; honest callers pass the full key
/// set from [`group_keys`]).
pub fn sum_col_by(matrix: &Matrix, col_x: usize, col_y: usize, nr: usize, keys: &[Fr]) -> Vec<Fr> {
    let mut sums = vec![Fr::zero(); keys.len()];
    for row in 0..nr {
        let key = matrix.get(col_y, row);
        if let Some(g) = keys.iter().position(|k| *k == key) {
            sums[g] += matrix.get(col_x, row);
        }
    }
    sums
}

/// Binary Poseidon2 fold with zero padding to `max(2, next_power_of_two(n))`.
/// A single-element input is padded to length 2 and folded once.
pub fn ssz_encode(values: &[Fr]) -> Fr {
    let padded_size = values.len().next_power_of_two().max(2);
    let mut level = values.to_vec();
    level.resize(padded_size, Fr::zero());
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| poseidon2::hash_two(pair[0], pair[1]))
            .collect();
    }
    level[0]
}

/// Publication digest for grouped results: hash each (key, sum) pair, then
/// [`ssz_encode`] the pair hashes.
pub fn ssz_key_value(keys: &[Fr], sums: &[Fr]) -> Fr {
    assert_eq!(keys.len(), sums.len());
    let pairs: Vec<Fr> = keys
        .iter()
        .zip(sums.iter())
        .map(|(k, s)| poseidon2::hash_two(*k, *s))
        .collect();
    ssz_encode(&pairs)
}
