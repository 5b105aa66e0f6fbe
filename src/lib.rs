//! # Circuit Sizing
//!
//! Code-compliant branch circuit and feeder sizing, exposed as
//! [Twine](https://github.com/isentropic-dev/twine) models.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] adapters for branch circuits and feeders.
//! - [`support`]: The sizing toolkit the models delegate to: validated inputs,
//!   code tables, and the selection and aggregation algorithms.
//!
//! ## Electrical codes
//!
//! Sizing rules are pluggable through
//! [`support::electrical::standard::Standard`]. Two implementations ship with
//! the crate:
//!
//! 1. **NEC**: AWG/kcmil copper, Table 310.16 ampacities, 240.6(A) breakers,
//!    motor and continuous-load multipliers, 250.122 grounding conductors
//! 2. **IEC**: metric copper per IEC 60364-5-52, IEC 60898 breakers,
//!    IEC 61439-1 diversity and IEC 60364-5-54 protective conductors
//!
//! Note: Modules in [`support`] are part of the public API, but their APIs are
//! not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
