//! Electrical distribution models.
//!
//! - [`BranchCircuit`]: one load and its installation to a conductor, breaker
//!   and derating summary.
//! - [`Feeder`]: a set of loads to feeder conductors, main protection and an
//!   equipment grounding conductor.
//!
//! Both are generic over [`Standard`](crate::support::electrical::Standard)
//! and never fail: inputs are validated when they are constructed.

mod branch_circuit;
mod feeder;

pub use branch_circuit::{BranchCircuit, BranchCircuitInput};
pub use feeder::{Feeder, FeederDesign, FeederInput};
