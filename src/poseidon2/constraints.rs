//! In-circuit twin of the native Poseidon2 hasher.
//!
//! Reads the same round-constant table and mirrors the permutation step by
//! step over [`FpVar`]. The linear layers cost nothing (linear combinations);
//! each S-box costs three multiplication constraints.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::SynthesisError;

use super::round_constants::{EXTERNAL_ROUND_CONSTANTS, INTERNAL_ROUND_CONSTANTS};
use super::{FULL_ROUNDS, WIDTH};

fn sbox(x: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let x2 = x.square()?;
    let x4 = x2.square()?;
    Ok(&x4 * x)
}

fn mat_external(state: &mut [FpVar<Fr>; WIDTH]) {
    let sum = &state[0] + &state[1];
    state[0] = &state[0] + &sum;
    state[1] = &state[1] + &sum;
}

fn mat_internal(state: &mut [FpVar<Fr>; WIDTH]) {
    let sum = &state[0] + &state[1];
    state[0] = &state[0] + &sum;
    state[1] = &state[1] + &state[1] + &sum;
}

/// Poseidon2 permutation over circuit variables.
pub fn permute(state: &mut [FpVar<Fr>; WIDTH]) -> Result<(), SynthesisError> {
    mat_external(state);

    for constants in EXTERNAL_ROUND_CONSTANTS.iter().take(FULL_ROUNDS / 2) {
        state[0] = &state[0] + constants[0];
        state[1] = &state[1] + constants[1];
        state[0] = sbox(&state[0])?;
        state[1] = sbox(&state[1])?;
        mat_external(state);
    }

    for constant in INTERNAL_ROUND_CONSTANTS.iter() {
        state[0] = &state[0] + *constant;
        state[0] = sbox(&state[0])?;
        mat_internal(state);
    }

    for constants in EXTERNAL_ROUND_CONSTANTS.iter().skip(FULL_ROUNDS / 2) {
        state[0] = &state[0] + constants[0];
        state[1] = &state[1] + constants[1];
        state[0] = sbox(&state[0])?;
        state[1] = sbox(&state[1])?;
        mat_external(state);
    }

    Ok(())
}

/// One Merkle-Damgard compression step over circuit variables.
pub fn compress(chain: &FpVar<Fr>, input: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let mut state = [chain.clone(), input.clone()];
    permute(&mut state)?;
    let [out, _] = state;
    Ok(out)
}

/// Hash an input sequence, one element per compression, zero initial chain.
pub fn hash(inputs: &[FpVar<Fr>]) -> Result<FpVar<Fr>, SynthesisError> {
    let mut chain = FpVar::<Fr>::zero();
    for x in inputs {
        chain = compress(&chain, x)?;
    }
    Ok(chain)
}

/// Two-input call pattern (SSZ tree, key/value pairing).
pub fn hash_two(x: &FpVar<Fr>, y: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let chain = compress(&FpVar::<Fr>::zero(), x)?;
    compress(&chain, y)
}

/// Sixteen-input call pattern (16-ary item commitment tree).
pub fn hash16(inputs: &[FpVar<Fr>]) -> Result<FpVar<Fr>, SynthesisError> {
    debug_assert_eq!(inputs.len(), 16);
    hash(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poseidon2;
    use ark_ff::UniformRand;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_r1cs_std::R1CSVar;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_std::test_rng;

    fn alloc(cs: &ark_relations::r1cs::ConstraintSystemRef<Fr>, values: &[Fr]) -> Vec<FpVar<Fr>> {
        values
            .iter()
            .map(|v| FpVar::new_witness(cs.clone(), || Ok(*v)).unwrap())
            .collect()
    }

    #[test]
    fn gadget_agrees_with_native_width_two() {
        let mut rng = test_rng();
        let cs = ConstraintSystem::<Fr>::new_ref();
        let x = Fr::rand(&mut rng);
        let y = Fr::rand(&mut rng);
        let vars = alloc(&cs, &[x, y]);
        let digest = hash_two(&vars[0], &vars[1]).unwrap();
        assert_eq!(digest.value().unwrap(), poseidon2::hash_two(x, y));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn gadget_agrees_with_native_width_sixteen() {
        let mut rng = test_rng();
        let cs = ConstraintSystem::<Fr>::new_ref();
        let inputs: [Fr; 16] = core::array::from_fn(|_| Fr::rand(&mut rng));
        let vars = alloc(&cs, &inputs);
        let digest = hash16(&vars).unwrap();
        assert_eq!(digest.value().unwrap(), poseidon2::hash16(&inputs));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn gadget_agrees_with_native_on_long_sequences() {
        let mut rng = test_rng();
        let cs = ConstraintSystem::<Fr>::new_ref();
        for len in [1usize, 3, 5] {
            let inputs: Vec<Fr> = (0..len).map(|_| Fr::rand(&mut rng)).collect();
            let vars = alloc(&cs, &inputs);
            let digest = hash(&vars).unwrap();
            assert_eq!(digest.value().unwrap(), poseidon2::hash(&inputs));
        }
        assert!(cs.is_satisfied().unwrap());
    }
}
