//! Width-2 Poseidon2 permutation over the BN254 scalar field, composed in
//! Merkle-Damgard mode.
//!
//! Parameters: 6 full rounds, 50 partial rounds, x^5 S-box, external matrix
//! [[2, 1], [1, 2]], internal matrix [[2, 1], [1, 3]]. The hasher chains the
//! permutation with an all-zero initial state: absorbing `x` maps
//! `chain <- permute([chain, x])[0]`, and the digest is the chain after the
//! last absorption.
//!
//! [`constraints`] contains the in-circuit twin; both read the round-constant
//! table in [`round_constants`] so they cannot drift apart.

pub mod constraints;
pub mod round_constants;

use ark_bn254::Fr;
use ark_ff::{AdditiveGroup, Field};

use self::round_constants::{EXTERNAL_ROUND_CONSTANTS, INTERNAL_ROUND_CONSTANTS};

/// Permutation state width.
pub const WIDTH: usize = 2;

/// Number of full (external) rounds, split evenly around the partial rounds.
pub const FULL_ROUNDS: usize = 6;

/// Number of partial (internal) rounds.
pub const PARTIAL_ROUNDS: usize = 50;

#[inline]
fn sbox(x: Fr) -> Fr {
    let x2 = x.square();
    let x4 = x2.square();
    x4 * x
}

/// External linear layer: (s0, s1) <- (2*s0 + s1, s0 + 2*s1).
#[inline]
fn mat_external(state: &mut [Fr; WIDTH]) {
    let sum = state[0] + state[1];
    state[0] += sum;
    state[1] += sum;
}

/// Internal linear layer: (s0, s1) <- (2*s0 + s1, s0 + 3*s1).
#[inline]
fn mat_internal(state: &mut [Fr; WIDTH]) {
    let sum = state[0] + state[1];
    state[0] += sum;
    state[1].double_in_place();
    state[1] += sum;
}

/// Poseidon2 permutation in place.
pub fn permute(state: &mut [Fr; WIDTH]) {
    // Initial external linear layer, then rF/2 full, rP partial, rF/2 full.
    mat_external(state);

    for constants in EXTERNAL_ROUND_CONSTANTS.iter().take(FULL_ROUNDS / 2) {
        state[0] += constants[0];
        state[1] += constants[1];
        state[0] = sbox(state[0]);
        state[1] = sbox(state[1]);
        mat_external(state);
    }

    for constant in INTERNAL_ROUND_CONSTANTS.iter() {
        state[0] += constant;
        state[0] = sbox(state[0]);
        mat_internal(state);
    }

    for constants in EXTERNAL_ROUND_CONSTANTS.iter().skip(FULL_ROUNDS / 2) {
        state[0] += constants[0];
        state[1] += constants[1];
        state[0] = sbox(state[0]);
        state[1] = sbox(state[1]);
        mat_external(state);
    }
}

/// One Merkle-Damgard compression step: absorb `input` into `chain`.
#[inline]
pub fn compress(chain: Fr, input: Fr) -> Fr {
    let mut state = [chain, input];
    permute(&mut state);
    state[0]
}

/// Hash an input sequence, one element per compression, zero initial chain.
pub fn hash(inputs: &[Fr]) -> Fr {
    inputs.iter().fold(Fr::from(0u64), |chain, x| compress(chain, *x))
}

/// Two-input call pattern used by the binary SSZ tree and key/value pairing.
#[inline]
pub fn hash_two(x: Fr, y: Fr) -> Fr {
    compress(compress(Fr::from(0u64), x), y)
}

/// Sixteen-input call pattern used by the 16-ary item commitment tree.
pub fn hash16(inputs: &[Fr; 16]) -> Fr {
    hash(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::UniformRand;
    use ark_std::test_rng;

    #[test]
    fn round_constant_tables_match_round_counts() {
        assert_eq!(EXTERNAL_ROUND_CONSTANTS.len(), FULL_ROUNDS);
        assert_eq!(INTERNAL_ROUND_CONSTANTS.len(), PARTIAL_ROUNDS);
    }

    #[test]
    fn permutation_is_deterministic_and_nontrivial() {
        let mut a = [Fr::from(1u64), Fr::from(2u64)];
        let mut b = [Fr::from(1u64), Fr::from(2u64)];
        permute(&mut a);
        permute(&mut b);
        assert_eq!(a, b);
        assert_ne!(a, [Fr::from(1u64), Fr::from(2u64)]);
    }

    #[test]
    fn hash_depends_on_order_and_arity() {
        let x = Fr::from(7u64);
        let y = Fr::from(11u64);
        assert_ne!(hash_two(x, y), hash_two(y, x));
        assert_ne!(hash(&[x]), hash(&[x, Fr::from(0u64)]));
    }

    #[test]
    fn hash16_matches_incremental_absorption() {
        let mut rng = test_rng();
        let inputs: [Fr; 16] = core::array::from_fn(|_| Fr::rand(&mut rng));
        let mut chain = Fr::from(0u64);
        for x in &inputs {
            chain = compress(chain, *x);
        }
        assert_eq!(hash16(&inputs), chain);
    }
}
