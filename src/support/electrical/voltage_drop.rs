use uom::si::{
    f64::{ElectricCurrent, ElectricPotential, Length, Ratio},
    ratio::percent,
};

use crate::support::units::LinearResistance;

use super::Phases;

/// Voltage drop reported for a conductor size with no impedance data.
///
/// Large enough to fail any sensible limit, so such sizes are never selected
/// on voltage-drop grounds.
pub const UNDEFINED_DROP_PERCENT: f64 = 999.0;

/// Per-length resistance and reactance of one conductor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorImpedance {
    pub resistance: LinearResistance,
    pub reactance: LinearResistance,
}

impl ConductorImpedance {
    /// Effective impedance `R·cos θ + X·sin θ` with `θ = acos(pf)`.
    #[must_use]
    pub fn effective(&self, power_factor: f64) -> LinearResistance {
        let theta = power_factor.acos();
        self.resistance * theta.cos() + self.reactance * theta.sin()
    }
}

/// Percent voltage drop over a one-way run.
///
/// `k · I · Z · L / V`, with `k` from [`Phases::drop_factor`].
/// Returns [`UNDEFINED_DROP_PERCENT`] when `impedance` is `None`.
#[must_use]
pub fn voltage_drop(
    current: ElectricCurrent,
    impedance: Option<ConductorImpedance>,
    length: Length,
    voltage: ElectricPotential,
    phases: Phases,
    power_factor: f64,
) -> Ratio {
    let Some(impedance) = impedance else {
        return Ratio::new::<percent>(UNDEFINED_DROP_PERCENT);
    };

    let drop: ElectricPotential =
        impedance.effective(power_factor) * length * current * phases.drop_factor();
    drop / voltage
}
