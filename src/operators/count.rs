use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::SynthesisError;

use crate::gadgets::masked_sum;

/// Population of the row mask. Equals NR whenever NR <= MAX_ROWS.
pub fn count(row_mask: &[FpVar<Fr>]) -> Result<FpVar<Fr>, SynthesisError> {
    masked_sum(row_mask, row_mask)
}
