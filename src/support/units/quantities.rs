use uom::{
    si::{
        ISQ, Quantity, SI,
        electrical_resistance::ohm,
        f64::{ElectricalResistance, Length},
    },
    typenum::{N2, N3, P1, Z0},
};

/// Resistance or reactance per unit conductor length, Ω/m in SI.
pub type LinearResistance = Quantity<ISQ<P1, P1, N3, N2, Z0, Z0, Z0>, SI<f64>, f64>;

/// Builds a [`LinearResistance`] from a tabulated value in ohms per `length`.
///
/// Tables quote impedance per reference length (1000 ft, 1 km), so the
/// reference length is passed alongside the raw value.
#[must_use]
pub fn per_length(ohms: f64, length: Length) -> LinearResistance {
    ElectricalResistance::new::<ohm>(ohms) / length
}
