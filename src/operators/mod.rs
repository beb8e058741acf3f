//! The four query operators as constraint sub-circuits.
//!
//! Every operator is evaluated unconditionally for every op slot (one Merkle
//! root per handler); the envelope in [`crate::circuit`] selects among their
//! outputs by opcode. Skipping an operator based on witness data would make
//! the constraint topology data-dependent and the proving key unstable.

mod count;
mod merkle;
mod sum;
mod sum_by;

pub use count::count;
pub use merkle::merkle16_root;
pub use sum::sum_column;
pub use sum_by::{sum_column_by_group, GroupSums};
