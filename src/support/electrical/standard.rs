//! Electrical code strategies.
//!
//! A [`Standard`] bundles one code's tables and rules behind a common
//! selection contract. [`Nec`] follows the US National Electrical Code;
//! [`Iec`] follows IEC 60364 with IEC 60898 breakers. Each implementation is
//! self-contained over its own constant tables and holds only an immutable
//! [`SizingConfig`], so a single instance may be shared across threads.

mod iec;
mod nec;

use std::fmt::{Debug, Display};

use tracing::debug;
use uom::si::{electric_current::ampere, ratio::percent};

pub use iec::{Iec, MetricSize};
pub use nec::{AwgSize, Nec};

use super::{
    Breaker, BreakerSelection, CableReport, Derating, FeederResult, Installation, Load, Phases,
    SelectionResult, SizingConfig, feeder::DemandFactor,
};

/// An equipment grounding (protective) conductor.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundingConductor<S> {
    pub size: S,
    pub reference: String,
}

/// Conductor and protective device selection under one electrical code.
pub trait Standard {
    /// Conductor size designation, ordered from smallest to largest.
    type Size: Copy + Ord + Debug + Display;

    /// Short name of the code, e.g. `"NEC"`.
    fn name(&self) -> &'static str;

    /// Limits this instance was built with.
    fn config(&self) -> &SizingConfig;

    /// Temperature and grouping derating for a circuit in `installation`.
    fn derating(&self, installation: &Installation, phases: Phases) -> Derating;

    /// Overcurrent protection for a branch circuit.
    fn select_breaker(&self, load: &Load) -> BreakerSelection;

    /// Smallest conductor meeting ampacity and voltage-drop requirements.
    fn select_cable(&self, load: &Load, installation: &Installation) -> CableReport<Self::Size>;

    /// Complete branch circuit design with reproducible notes.
    fn select(&self, load: &Load, installation: &Installation) -> SelectionResult<Self::Size> {
        let breaker = self.select_breaker(load);
        let report = self.select_cable(load, installation);

        let cable = match report.selection.selected() {
            Some(cable) => {
                debug!(
                    standard = self.name(),
                    load = load.name(),
                    size = %cable.size,
                    breaker = breaker.rating().get::<ampere>(),
                    "branch circuit selected"
                );
                format!(
                    "{} ({}), ampacity {:.1} A, voltage drop {:.2}%",
                    cable.size,
                    installation.insulation().conductor_type(),
                    cable.ampacity.get::<ampere>(),
                    cable.voltage_drop.get::<percent>(),
                )
            }
            None => "conductor: exceeded, no tabulated size qualifies".to_owned(),
        };

        let breaker_note = match breaker.note {
            Some(note) => format!("{} ({note})", breaker.breaker),
            None => breaker.breaker.to_string(),
        };

        let notes = format!(
            "{}: {cable}; derating {}; breaker {breaker_note}; {}; {}",
            self.name(),
            report.derating,
            report.reference,
            breaker.reference,
        );

        SelectionResult {
            cable: report.selection,
            derating: report.derating,
            breaker,
            notes,
        }
    }

    /// Aggregated feeder current and its conductor configuration.
    fn feeder_conductors(
        &self,
        loads: &[Load],
        demand_factor: DemandFactor,
    ) -> FeederResult<Self::Size>;

    /// Main overcurrent protection for a feeder.
    fn main_protection(&self, feeder: &FeederResult<Self::Size>) -> BreakerSelection;

    /// Equipment grounding conductor for a circuit.
    fn grounding_conductor(
        &self,
        phase: Self::Size,
        breaker: &Breaker,
    ) -> GroundingConductor<Self::Size>;
}
