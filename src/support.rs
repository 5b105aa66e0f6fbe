//! Supporting building blocks for circuit sizing.
//!
//! - [`constraint`]: Type-level numeric invariants used to validate inputs.
//! - [`units`]: [`uom`] extensions for per-length conductor impedance.
//! - [`electrical`]: Loads, installation conditions, code tables and the
//!   selection and aggregation algorithms behind the models.

pub mod constraint;
pub mod electrical;
pub mod units;
