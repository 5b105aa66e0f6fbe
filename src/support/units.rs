//! Extensions to [`uom`] for conductor impedance.
//!
//! This crate uses [`uom`] for all physical units at its API boundary
//! (power, voltage, current, length, temperature). Conductor tables, however,
//! quote resistance and reactance *per unit length* (Ω per 1000 ft in NEC
//! Chapter 9 Table 9, Ω per km in IEC 60228), a quantity [`uom`] does not
//! define. [`LinearResistance`] fills that gap so voltage drop can be written
//! as a dimensionally checked product.
//!
//! ```
//! use circuit_sizing::support::units::{LinearResistance, per_length};
//! use uom::si::{
//!     electric_current::ampere,
//!     electric_potential::volt,
//!     f64::{ElectricCurrent, ElectricPotential, Length},
//!     length::{foot, kilometer},
//! };
//!
//! let r: LinearResistance = per_length(1.2, Length::new::<kilometer>(1.0));
//! let run = Length::new::<kilometer>(0.5);
//! let drop: ElectricPotential = r * run * ElectricCurrent::new::<ampere>(10.0);
//! assert!((drop.get::<volt>() - 6.0).abs() < 1e-9);
//!
//! // The same resistance quoted per 1000 ft.
//! let per_kft = per_length(1.2 * 0.3048, Length::new::<foot>(1000.0));
//! assert!((per_kft - r).abs() < r * 1e-12);
//! ```

mod quantities;

pub use quantities::{LinearResistance, per_length};
