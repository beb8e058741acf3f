//! The query-verification relation.
//!
//! [`QueryCircuit`] binds the public program (per-handler opcode sequences,
//! arguments, group keys and claimed results) to the private matrix and row
//! bound. Every operator is evaluated for every op slot; an opcode-indexed
//! linear combination selects the claimed output, and all assertions are
//! gated by the handler mask in the canonical `(lhs - rhs) * enable = 0`
//! form so inactive handlers are left entirely unconstrained.

use ark_bn254::Fr;
use ark_ff::Zero;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::constants::{
    COL_INDEX_BITS, MAX_COLS, MAX_GROUPS, MAX_HANDLERS, MAX_OPS, MAX_ROWS, OP_COUNT, OP_MERKLE16,
    OP_NOOP, OP_SUM_COL, OP_SUM_COL_BY,
};
use crate::gadgets::{column_mask_with_start, flat_mask, flatten, is_equal, less_than, row_mask};
use crate::operators::{count, merkle16_root, sum_column, sum_column_by_group, GroupSums};

/// Full assignment for one proving session.
///
/// Field order of the public members mirrors the verifier-facing input
/// layout; [`QueryCircuit::public_inputs`] flattens them in exactly the order
/// `generate_constraints` allocates them.
#[derive(Clone, Debug)]
pub struct QueryCircuit {
    // Public inputs.
    pub handler_ncs: [Fr; MAX_HANDLERS],
    pub handler_start_index: [Fr; MAX_HANDLERS],
    pub op_codes: [[Fr; MAX_OPS]; MAX_HANDLERS],
    pub op_args: [[[Fr; 2]; MAX_OPS]; MAX_HANDLERS],
    pub results: [[[Fr; MAX_GROUPS]; MAX_OPS]; MAX_HANDLERS],
    pub group_keys: [[[Fr; MAX_GROUPS]; MAX_OPS]; MAX_HANDLERS],
    pub num_groups: [[Fr; MAX_OPS]; MAX_HANDLERS],
    pub num_handlers: Fr,

    // Private inputs, shared across handlers.
    pub nr: Fr,
    pub items: Box<[[Fr; MAX_ROWS]; MAX_COLS]>,
}

impl Default for QueryCircuit {
    fn default() -> Self {
        Self {
            handler_ncs: [Fr::zero(); MAX_HANDLERS],
            handler_start_index: [Fr::zero(); MAX_HANDLERS],
            op_codes: [[Fr::zero(); MAX_OPS]; MAX_HANDLERS],
            op_args: [[[Fr::zero(); 2]; MAX_OPS]; MAX_HANDLERS],
            results: [[[Fr::zero(); MAX_GROUPS]; MAX_OPS]; MAX_HANDLERS],
            group_keys: [[[Fr::zero(); MAX_GROUPS]; MAX_OPS]; MAX_HANDLERS],
            num_groups: [[Fr::zero(); MAX_OPS]; MAX_HANDLERS],
            num_handlers: Fr::zero(),
            nr: Fr::zero(),
            items: Box::new([[Fr::zero(); MAX_ROWS]; MAX_COLS]),
        }
    }
}

impl QueryCircuit {
    /// The Groth16 instance vector, in allocation order.
    pub fn public_inputs(&self) -> Vec<Fr> {
        let mut inputs = Vec::new();
        inputs.extend_from_slice(&self.handler_ncs);
        inputs.extend_from_slice(&self.handler_start_index);
        for h in 0..MAX_HANDLERS {
            inputs.extend_from_slice(&self.op_codes[h]);
        }
        for h in 0..MAX_HANDLERS {
            for op in 0..MAX_OPS {
                inputs.extend_from_slice(&self.op_args[h][op]);
            }
        }
        for h in 0..MAX_HANDLERS {
            for op in 0..MAX_OPS {
                inputs.extend_from_slice(&self.results[h][op]);
            }
        }
        for h in 0..MAX_HANDLERS {
            for op in 0..MAX_OPS {
                inputs.extend_from_slice(&self.group_keys[h][op]);
            }
        }
        for h in 0..MAX_HANDLERS {
            inputs.extend_from_slice(&self.num_groups[h]);
        }
        inputs.push(self.num_handlers);
        inputs
    }
}

impl ConstraintSynthesizer<Fr> for QueryCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // Public inputs, in the fixed verifier layout.
        let handler_ncs: Vec<FpVar<Fr>> = self
            .handler_ncs
            .iter()
            .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
            .collect::<Result<_, _>>()?;
        let handler_start: Vec<FpVar<Fr>> = self
            .handler_start_index
            .iter()
            .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
            .collect::<Result<_, _>>()?;

        let mut op_codes = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let row: Vec<FpVar<Fr>> = self.op_codes[h]
                .iter()
                .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
                .collect::<Result<_, _>>()?;
            op_codes.push(row);
        }

        let mut op_args = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let mut per_op = Vec::with_capacity(MAX_OPS);
            for op in 0..MAX_OPS {
                let pair: Vec<FpVar<Fr>> = self.op_args[h][op]
                    .iter()
                    .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
                    .collect::<Result<_, _>>()?;
                per_op.push(pair);
            }
            op_args.push(per_op);
        }

        let mut results = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let mut per_op = Vec::with_capacity(MAX_OPS);
            for op in 0..MAX_OPS {
                let groups: Vec<FpVar<Fr>> = self.results[h][op]
                    .iter()
                    .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
                    .collect::<Result<_, _>>()?;
                per_op.push(groups);
            }
            results.push(per_op);
        }

        let mut group_keys = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let mut per_op = Vec::with_capacity(MAX_OPS);
            for op in 0..MAX_OPS {
                let keys: Vec<FpVar<Fr>> = self.group_keys[h][op]
                    .iter()
                    .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
                    .collect::<Result<_, _>>()?;
                per_op.push(keys);
            }
            group_keys.push(per_op);
        }

        let mut num_groups = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let row: Vec<FpVar<Fr>> = self.num_groups[h]
                .iter()
                .map(|v| FpVar::new_input(cs.clone(), || Ok(*v)))
                .collect::<Result<_, _>>()?;
            num_groups.push(row);
        }

        let num_handlers = FpVar::new_input(cs.clone(), || Ok(self.num_handlers))?;

        // Private inputs.
        let nr = FpVar::new_witness(cs.clone(), || Ok(self.nr))?;
        let mut items: Vec<Vec<FpVar<Fr>>> = Vec::with_capacity(MAX_COLS);
        for col in 0..MAX_COLS {
            let column: Vec<FpVar<Fr>> = self.items[col]
                .iter()
                .map(|v| FpVar::new_witness(cs.clone(), || Ok(*v)))
                .collect::<Result<_, _>>()?;
            items.push(column);
        }

        // The row mask is shared by every handler and operator; the flat item
        // view is shared too, but each handler gets a fresh flat mask.
        let rows = row_mask(&nr)?;
        let flat_items = flatten(&items);

        let handler_mask: Vec<FpVar<Fr>> = (0..MAX_HANDLERS)
            .map(|h| {
                less_than(
                    &FpVar::constant(Fr::from(h as u64)),
                    &num_handlers,
                    COL_INDEX_BITS,
                )
            })
            .collect::<Result<_, _>>()?;

        let mut merkle_roots = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let cols = column_mask_with_start(&handler_start[h], &handler_ncs[h])?;
            let mask = flat_mask(&rows, &cols)?;
            merkle_roots.push(merkle16_root(&flat_items, &mask)?);
        }

        let count_result = count(&rows)?;

        let mut sum_results = Vec::with_capacity(MAX_HANDLERS);
        let mut sum_by_results: Vec<Vec<GroupSums>> = Vec::with_capacity(MAX_HANDLERS);
        for h in 0..MAX_HANDLERS {
            let mut sums = Vec::with_capacity(MAX_OPS);
            let mut grouped = Vec::with_capacity(MAX_OPS);
            for op in 0..MAX_OPS {
                sums.push(sum_column(&items, &op_args[h][op][0], &rows)?);
                grouped.push(sum_column_by_group(
                    &items,
                    &op_args[h][op][0],
                    &op_args[h][op][1],
                    &rows,
                    &group_keys[h][op],
                    &num_groups[h][op],
                )?);
            }
            sum_results.push(sums);
            sum_by_results.push(grouped);
        }

        // Opcode multiplexing and result assertions.
        let zero = FpVar::<Fr>::zero();
        for h in 0..MAX_HANDLERS {
            for op in 0..MAX_OPS {
                let code = &op_codes[h][op];
                let is_noop = is_equal(code, &FpVar::constant(Fr::from(OP_NOOP)))?;
                let is_merkle = is_equal(code, &FpVar::constant(Fr::from(OP_MERKLE16)))?;
                let is_count = is_equal(code, &FpVar::constant(Fr::from(OP_COUNT)))?;
                let is_sum = is_equal(code, &FpVar::constant(Fr::from(OP_SUM_COL)))?;
                let is_sum_by = is_equal(code, &FpVar::constant(Fr::from(OP_SUM_COL_BY)))?;

                // Active handlers must select exactly one valid opcode.
                let indicator_sum = &is_noop + &is_merkle + &is_count + &is_sum + &is_sum_by;
                (indicator_sum - FpVar::one()).mul_equals(&handler_mask[h], &zero)?;

                let scalar_part = &merkle_roots[h] * &is_merkle
                    + &count_result * &is_count
                    + &sum_results[h][op] * &is_sum;

                for g in 0..MAX_GROUPS {
                    let sum_by_part = &sum_by_results[h][op].0[g] * &is_sum_by;
                    let computed = if g == 0 {
                        // NOOP contributes 0, so NOOP slots must claim zero.
                        &scalar_part + &sum_by_part
                    } else {
                        sum_by_part
                    };
                    (computed - &results[h][op][g]).mul_equals(&handler_mask[h], &zero)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_input_vector_length_matches_layout() {
        let circuit = QueryCircuit::default();
        let expected = MAX_HANDLERS // ncs
            + MAX_HANDLERS // start index
            + MAX_HANDLERS * MAX_OPS // op codes
            + MAX_HANDLERS * MAX_OPS * 2 // op args
            + MAX_HANDLERS * MAX_OPS * MAX_GROUPS // results
            + MAX_HANDLERS * MAX_OPS * MAX_GROUPS // group keys
            + MAX_HANDLERS * MAX_OPS // num groups
            + 1; // num handlers
        assert_eq!(circuit.public_inputs().len(), expected);
    }
}
