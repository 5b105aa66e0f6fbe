//! Branch circuit and feeder sizing toolkit.
//!
//! # Overview
//!
//! A branch circuit connects one [`Load`] to its overcurrent device through
//! conductors run under some [`Installation`] conditions. Sizing it means
//! choosing the smallest conductor whose ampacity, after [`Derating`] for
//! ambient temperature and grouping, carries the load and whose voltage drop
//! stays within a limit, plus a standard breaker that protects it.
//! A feeder aggregates many loads and may need parallel conductor runs.
//!
//! The rules and tables differ by electrical code, so they sit behind the
//! [`Standard`] trait:
//!
//! - [`Nec`]: AWG/kcmil conductors with 75 °C terminations ([`AwgSize`])
//! - [`Iec`]: metric conductors with IEC 60898 breakers ([`MetricSize`])
//!
//! Selections never fail once inputs are constructed. A load no tabulated
//! size can carry yields [`CableSelection::Exceeded`], and a feeder beyond
//! the parallel-run search yields [`RunConfiguration::Custom`].
//!
//! # Example
//!
//! ```
//! use circuit_sizing::support::electrical::{
//!     DemandFactor, Installation, Load, Phases, Raceway,
//!     standard::{Nec, Standard},
//! };
//! use uom::si::{
//!     electric_current::ampere,
//!     electric_potential::volt,
//!     f64::{ElectricCurrent, ElectricPotential, Length},
//!     length::meter,
//! };
//!
//! let pump = Load::from_current(
//!     "Pump",
//!     ElectricCurrent::new::<ampere>(27.0),
//!     ElectricPotential::new::<volt>(480.0),
//!     Phases::Three,
//!     0.85,
//! )?
//! .motor();
//! let installation = Installation::new(Length::new::<meter>(40.0), Raceway::Steel)?;
//!
//! let nec = Nec::default();
//! let branch = nec.select(&pump, &installation);
//! assert!(branch.size().is_some());
//!
//! let feeder = nec.feeder_conductors(&[pump.with_quantity(4)?], DemandFactor::default());
//! let main = nec.main_protection(&feeder);
//! assert!(main.rating() >= feeder.total_current);
//! # Ok::<(), circuit_sizing::support::electrical::InputError>(())
//! ```

mod breaker;
mod config;
mod derating;
mod error;
mod feeder;
mod installation;
mod load;
mod selection;
pub mod standard;
mod voltage_drop;

pub use breaker::{Breaker, BreakerNote, BreakerSelection, MOTOR_BREAKER_MAX, MOTOR_BREAKER_MIN};
pub use config::{ConfigError, SizingConfig};
pub use derating::Derating;
pub use error::InputError;
pub use feeder::{
    DemandFactor, FeederResult, LARGEST_MOTOR_SURCHARGE, LoadBreakdown, RunConfiguration,
};
pub use installation::{ConductorMaterial, Installation, InsulationRating, Raceway};
pub use load::{CONTINUOUS_MULTIPLIER, Load, Phases};
pub use selection::{CableReport, CableSelection, SelectedCable, SelectionResult};
pub use standard::{AwgSize, GroundingConductor, Iec, MetricSize, Nec, Standard};
pub use voltage_drop::{ConductorImpedance, UNDEFINED_DROP_PERCENT, voltage_drop};
