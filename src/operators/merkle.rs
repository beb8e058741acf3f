use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::SynthesisError;

use crate::constants::{MERKLE_ARITY, N_LEVELS, TOTAL_ITEMS};
use crate::poseidon2::constraints as poseidon2_gadget;

/// Masked 16-ary Merkle root over the flat item view.
///
/// Masked-out positions are hashed as zero, so the root commits to the data
/// and to the (NR, StartIndex, NC) window shape at once.
pub fn merkle16_root(
    items: &[FpVar<Fr>],
    mask: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    debug_assert_eq!(items.len(), TOTAL_ITEMS);
    debug_assert_eq!(mask.len(), TOTAL_ITEMS);

    let mut level: Vec<FpVar<Fr>> = items
        .iter()
        .zip(mask.iter())
        .map(|(item, m)| item * m)
        .collect();

    for _ in 0..N_LEVELS {
        let mut next = Vec::with_capacity(level.len() / MERKLE_ARITY);
        for chunk in level.chunks(MERKLE_ARITY) {
            next.push(poseidon2_gadget::hash16(chunk)?);
        }
        level = next;
    }

    debug_assert_eq!(level.len(), 1);
    Ok(level.pop().expect("root level is non-empty"))
}
