use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::SynthesisError;

use crate::constants::{COL_INDEX_BITS, MAX_GROUPS, MAX_ROWS};
use crate::gadgets::{is_equal, less_than, selector};

/// Per-group sums produced by [`sum_column_by_group`]. Slots `g >= numGroups`
/// are zero by construction.
pub struct GroupSums(pub Vec<FpVar<Fr>>);

/// Grouped sum of column X keyed by column Y against public group keys.
///
/// Each active row must match exactly one of the first `num_groups` keys;
/// the check is gated by `num_groups` itself, so op slots that are not
/// SUM_COL_BY disable it by publishing `num_groups = 0`:
///
///   (totalMatches[r] - rowMask[r]) * numGroups = 0
///
/// Matches are additionally gated by the group mask, so an active row can
/// never be absorbed by a key slot beyond `num_groups`.
pub fn sum_column_by_group(
    items: &[Vec<FpVar<Fr>>],
    col_x: &FpVar<Fr>,
    col_y: &FpVar<Fr>,
    row_mask: &[FpVar<Fr>],
    group_keys: &[FpVar<Fr>],
    num_groups: &FpVar<Fr>,
) -> Result<GroupSums, SynthesisError> {
    debug_assert_eq!(group_keys.len(), MAX_GROUPS);

    let group_mask: Vec<FpVar<Fr>> = (0..MAX_GROUPS)
        .map(|g| less_than(&FpVar::constant(Fr::from(g as u64)), num_groups, COL_INDEX_BITS))
        .collect::<Result<_, _>>()?;

    let mut values_x = Vec::with_capacity(MAX_ROWS);
    let mut values_y = Vec::with_capacity(MAX_ROWS);
    for row in 0..MAX_ROWS {
        let row_values: Vec<FpVar<Fr>> =
            items.iter().map(|col| col[row].clone()).collect();
        values_x.push(selector(&row_values, col_x)?);
        values_y.push(selector(&row_values, col_y)?);
    }

    let mut sums = vec![FpVar::<Fr>::zero(); MAX_GROUPS];
    let zero = FpVar::<Fr>::zero();

    for row in 0..MAX_ROWS {
        let masked_x = &values_x[row] * &row_mask[row];
        let mut total_matches = FpVar::<Fr>::zero();

        for g in 0..MAX_GROUPS {
            let hit = is_equal(&values_y[row], &group_keys[g])?;
            let matched = &hit * &group_mask[g];
            sums[g] += &masked_x * &matched;
            total_matches += matched;
        }

        (total_matches - &row_mask[row]).mul_equals(num_groups, &zero)?;
    }

    Ok(GroupSums(sums))
}
