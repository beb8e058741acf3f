use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::SynthesisError;

use crate::constants::MAX_ROWS;
use crate::gadgets::{masked_sum, selector};

/// Masked sum of a dynamically selected column.
///
/// `col_index` is a circuit variable; each row pays one O(MAX_COLS) selector.
/// An out-of-range index selects 0 everywhere, so the sum degrades to 0
/// rather than failing.
pub fn sum_column(
    items: &[Vec<FpVar<Fr>>],
    col_index: &FpVar<Fr>,
    row_mask: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut column = Vec::with_capacity(MAX_ROWS);
    for row in 0..MAX_ROWS {
        let row_values: Vec<FpVar<Fr>> =
            items.iter().map(|col| col[row].clone()).collect();
        column.push(selector(&row_values, col_index)?);
    }
    masked_sum(&column, row_mask)
}
