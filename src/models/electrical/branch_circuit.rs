use std::convert::Infallible;

use twine_core::Model;

use crate::support::electrical::{Installation, Load, SelectionResult, Standard};

/// A single load and the conditions its conductors are installed under.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchCircuitInput {
    pub load: Load,
    pub installation: Installation,
}

/// Sizes a branch circuit under the electrical code `S`.
///
/// ```
/// use circuit_sizing::{
///     models::electrical::{BranchCircuit, BranchCircuitInput},
///     support::electrical::{AwgSize, Installation, Load, Nec, Phases, Raceway},
/// };
/// use twine_core::Model;
/// use uom::si::{
///     electric_potential::volt,
///     f64::{ElectricPotential, Length, Power},
///     length::meter,
///     power::watt,
/// };
///
/// let model = BranchCircuit::new(Nec::default());
/// let input = BranchCircuitInput {
///     load: Load::new(
///         "Heater",
///         Power::new::<watt>(5000.0),
///         ElectricPotential::new::<volt>(220.0),
///         Phases::Single,
///         0.9,
///     )?
///     .continuous(),
///     installation: Installation::new(Length::new::<meter>(10.0), Raceway::NonMagnetic)?,
/// };
///
/// let Ok(result) = model.call(&input);
/// assert_eq!(result.size(), Some(AwgSize::Awg10));
/// # Ok::<(), circuit_sizing::support::electrical::InputError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BranchCircuit<S> {
    standard: S,
}

impl<S: Standard> BranchCircuit<S> {
    #[must_use]
    pub fn new(standard: S) -> Self {
        Self { standard }
    }

    #[must_use]
    pub fn standard(&self) -> &S {
        &self.standard
    }
}

impl<S: Standard> Model for BranchCircuit<S> {
    type Input = BranchCircuitInput;
    type Output = SelectionResult<S::Size>;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.standard.select(&input.load, &input.installation))
    }
}
