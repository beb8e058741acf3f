//! Primitive constraint gadgets: range-bounded comparison, dynamic selection
//! and mask construction.
//!
//! Everything here is generic over the field; the operators instantiate these
//! at BN254's scalar field. All selection is expressed as linear combinations
//! over equality indicators so the constraint topology never depends on
//! witness data.

use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_r1cs_std::R1CSVar;
use ark_relations::r1cs::SynthesisError;

use crate::constants::{COL_INDEX_BITS, MAX_COLS, MAX_ROWS, ROW_INDEX_BITS, TOTAL_ITEMS};

/// Decompose `x` into `num_bits` little-endian booleans and enforce the
/// recomposition. Values outside `[0, 2^num_bits)` leave the recomposition
/// constraint unsatisfiable.
fn to_bits_bounded<F: PrimeField>(
    x: &FpVar<F>,
    num_bits: usize,
) -> Result<Vec<Boolean<F>>, SynthesisError> {
    let cs = x.cs();
    let mut bits = Vec::with_capacity(num_bits);
    for i in 0..num_bits {
        bits.push(Boolean::new_witness(cs.clone(), || {
            Ok(x.value()?.into_bigint().get_bit(i))
        })?);
    }

    let mut recomposed = FpVar::<F>::zero();
    let mut coeff = F::one();
    for bit in &bits {
        recomposed += FpVar::from(bit.clone()) * coeff;
        coeff.double_in_place();
    }
    recomposed.enforce_equal(x)?;

    Ok(bits)
}

/// Strict comparison: returns 1 iff `a < b`, else 0.
///
/// Both operands must fit in `bits` bits; the gadget range-decomposes
/// `(b - a) + (2^bits - 1)` into `bits + 1` bits and returns the top bit.
/// Out-of-range operands make the decomposition unsatisfiable.
pub fn less_than<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    bits: usize,
) -> Result<FpVar<F>, SynthesisError> {
    let shift = F::from((1u64 << bits) - 1);
    let diff = b - a + shift;
    let decomposed = to_bits_bounded(&diff, bits + 1)?;
    Ok(FpVar::from(decomposed[bits].clone()))
}

/// Equality indicator as a field element: 1 iff `a == b`, else 0.
pub fn is_equal<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
) -> Result<FpVar<F>, SynthesisError> {
    Ok(FpVar::from(a.is_eq(b)?))
}

/// Dynamic selection: `sum_i arr[i] * [index == i]`.
///
/// An out-of-range `index` selects nothing and yields 0; callers that need a
/// definite selection must constrain the index elsewhere.
pub fn selector<F: PrimeField>(
    arr: &[FpVar<F>],
    index: &FpVar<F>,
) -> Result<FpVar<F>, SynthesisError> {
    let mut acc = FpVar::<F>::zero();
    for (i, value) in arr.iter().enumerate() {
        let hit = is_equal(index, &FpVar::constant(F::from(i as u64)))?;
        acc += value * &hit;
    }
    Ok(acc)
}

/// Row activity mask: `mask[i] = [i < nr]` over MAX_ROWS entries.
pub fn row_mask<F: PrimeField>(nr: &FpVar<F>) -> Result<Vec<FpVar<F>>, SynthesisError> {
    (0..MAX_ROWS)
        .map(|i| less_than(&FpVar::constant(F::from(i as u64)), nr, ROW_INDEX_BITS))
        .collect()
}

/// Column window mask: `mask[c] = [c >= start] * [c < start + nc]`.
pub fn column_mask_with_start<F: PrimeField>(
    start: &FpVar<F>,
    nc: &FpVar<F>,
) -> Result<Vec<FpVar<F>>, SynthesisError> {
    let end = start + nc;
    (0..MAX_COLS)
        .map(|c| {
            // c >= start  <=>  start < c + 1
            let ge_start = less_than(start, &FpVar::constant(F::from(c as u64 + 1)), COL_INDEX_BITS)?;
            let lt_end = less_than(&FpVar::constant(F::from(c as u64)), &end, COL_INDEX_BITS)?;
            Ok(&ge_start * &lt_end)
        })
        .collect()
}

/// Outer product of row and column masks in flat layout
/// `flat[col * MAX_ROWS + row]`.
pub fn flat_mask<F: PrimeField>(
    row_mask: &[FpVar<F>],
    col_mask: &[FpVar<F>],
) -> Result<Vec<FpVar<F>>, SynthesisError> {
    let mut flat = Vec::with_capacity(TOTAL_ITEMS);
    for col in col_mask.iter() {
        for row in row_mask.iter() {
            flat.push(col * row);
        }
    }
    Ok(flat)
}

/// Flatten the column-major matrix into `flat[col * MAX_ROWS + row]`.
pub fn flatten<F: PrimeField>(items: &[Vec<FpVar<F>>]) -> Vec<FpVar<F>> {
    let mut flat = Vec::with_capacity(TOTAL_ITEMS);
    for column in items.iter() {
        flat.extend(column.iter().cloned());
    }
    flat
}

/// `sum_i values[i] * mask[i]`.
pub fn masked_sum<F: PrimeField>(
    values: &[FpVar<F>],
    mask: &[FpVar<F>],
) -> Result<FpVar<F>, SynthesisError> {
    debug_assert_eq!(values.len(), mask.len());
    let mut acc = FpVar::<F>::zero();
    for (value, m) in values.iter().zip(mask.iter()) {
        acc += value * m;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_relations::r1cs::ConstraintSystem;

    fn witness(cs: &ark_relations::r1cs::ConstraintSystemRef<Fr>, v: u64) -> FpVar<Fr> {
        FpVar::new_witness(cs.clone(), || Ok(Fr::from(v))).unwrap()
    }

    #[test]
    fn less_than_truth_table() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let cases = [(0u64, 1u64, 1u64), (1, 0, 0), (5, 5, 0), (200, 255, 1), (255, 200, 0)];
        for (a, b, expected) in cases {
            let out = less_than(&witness(&cs, a), &witness(&cs, b), 16).unwrap();
            assert_eq!(out.value().unwrap(), Fr::from(expected), "{a} < {b}");
        }
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn less_than_rejects_out_of_range_operands() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        // 300 does not fit in 8 bits: b - a + 255 overflows the 9-bit window.
        let _ = less_than(&witness(&cs, 300), &witness(&cs, 1), 8).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn selector_picks_by_index_and_zeroes_out_of_range() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let arr: Vec<FpVar<Fr>> = (0..4).map(|i| witness(&cs, 10 + i)).collect();
        let picked = selector(&arr, &witness(&cs, 2)).unwrap();
        assert_eq!(picked.value().unwrap(), Fr::from(12u64));
        let missed = selector(&arr, &witness(&cs, 9)).unwrap();
        assert_eq!(missed.value().unwrap(), Fr::from(0u64));
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn row_mask_counts_active_prefix() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let mask = row_mask(&witness(&cs, 64)).unwrap();
        for (i, bit) in mask.iter().enumerate() {
            let expected = if i < 64 { 1u64 } else { 0 };
            assert_eq!(bit.value().unwrap(), Fr::from(expected));
        }
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn column_mask_covers_window() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let mask = column_mask_with_start(&witness(&cs, 3), &witness(&cs, 5)).unwrap();
        for (c, bit) in mask.iter().enumerate() {
            let expected = if (3..8).contains(&c) { 1u64 } else { 0 };
            assert_eq!(bit.value().unwrap(), Fr::from(expected), "col {c}");
        }
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn masked_sum_ignores_masked_out_entries() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let values: Vec<FpVar<Fr>> = [3u64, 5, 7].iter().map(|v| witness(&cs, *v)).collect();
        let mask: Vec<FpVar<Fr>> = [1u64, 0, 1].iter().map(|v| witness(&cs, *v)).collect();
        let sum = masked_sum(&values, &mask).unwrap();
        assert_eq!(sum.value().unwrap(), Fr::from(10u64));
        assert!(cs.is_satisfied().unwrap());
    }
}
