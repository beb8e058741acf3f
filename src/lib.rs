//! Zero-knowledge verification of analytical queries over a private table.
//!
//! A prover holds a private `MAX_COLS x MAX_ROWS` matrix of BN254 scalar field
//! elements and publishes a program (per-handler opcode sequences) together with
//! the claimed results of executing that program over the first `NR` rows. The
//! [`circuit::QueryCircuit`] relation constrains the claimed results to be
//! exactly what honest execution produces; any Groth16-style back end can then
//! turn a satisfying witness into a succinct proof.
//!
//! The crate is split the same way the relation is layered:
//!
//! - [`poseidon2`] — the fixed-parameter Poseidon2 permutation and its
//!   Merkle-Damgard hasher, in native and in-circuit variants that share one
//!   round-constant table.
//! - [`gadgets`] — range-bounded comparison, equality selection and mask
//!   construction over [`FpVar`](ark_r1cs_std::fields::fp::FpVar).
//! - [`operators`] — the four query operators (MERKLE16, COUNT, SUM_COL,
//!   SUM_COL_BY) expressed as constraint sub-circuits.
//! - [`circuit`] — the envelope binding public program/results to the private
//!   matrix, with strict opcode validation and handler masking.
//! - [`evaluator`] — native twins of every operator, used to derive honest
//!   claimed results and the SSZ publication digest.
//! - [`program`] / [`witness`] — authoring types and the assignment builder
//!   that turns (matrix, NR, program) into a satisfying circuit instance.

pub mod circuit;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod gadgets;
pub mod operators;
pub mod poseidon2;
pub mod program;
pub mod witness;

pub use circuit::QueryCircuit;
pub use error::QueryError;
pub use program::{HandlerSpec, OpSpec, Opcode, Program};
pub use witness::{build_assignment, Matrix};
