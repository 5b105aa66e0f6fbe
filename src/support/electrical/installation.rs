use std::fmt;

use uom::si::{
    f64::{Length, ThermodynamicTemperature},
    thermodynamic_temperature::degree_celsius,
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive};

use super::InputError;

/// Raceway enclosing the conductors.
///
/// Magnetic raceways raise conductor reactance. Aluminum conduit is
/// non-magnetic and uses the same impedance data as PVC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Raceway {
    #[default]
    NonMagnetic,
    Steel,
    Aluminum,
}

impl Raceway {
    #[must_use]
    pub fn is_magnetic(self) -> bool {
        matches!(self, Self::Steel)
    }
}

/// Conductor metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ConductorMaterial {
    #[default]
    Copper,
}

/// Temperature rating of the conductor insulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum InsulationRating {
    /// 60 °C, e.g. TW.
    C60,
    /// 75 °C, e.g. THWN.
    #[default]
    C75,
    /// 90 °C, e.g. THHN/THWN-2.
    C90,
}

impl InsulationRating {
    /// Rated conductor temperature in degrees Celsius.
    #[must_use]
    pub fn celsius(self) -> u8 {
        match self {
            Self::C60 => 60,
            Self::C75 => 75,
            Self::C90 => 90,
        }
    }

    /// Representative conductor type label.
    #[must_use]
    pub fn conductor_type(self) -> &'static str {
        match self {
            Self::C60 => "TW (60°C)",
            Self::C75 => "THWN (75°C)",
            Self::C90 => "THHN/THWN-2 (90°C)",
        }
    }
}

impl fmt::Display for InsulationRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.conductor_type())
    }
}

/// Physical installation conditions of a circuit run.
///
/// Created with [`Installation::new`] and refined with the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installation {
    length: Length,
    raceway: Raceway,
    ambient: ThermodynamicTemperature,
    conductor_count: u32,
    material: ConductorMaterial,
    insulation: InsulationRating,
}

impl Installation {
    /// Default number of current-carrying conductors in the raceway.
    pub const DEFAULT_CONDUCTOR_COUNT: u32 = 3;

    /// Ambient temperature assumed until [`Installation::with_ambient`] is called.
    pub const DEFAULT_AMBIENT_CELSIUS: f64 = 30.0;

    /// Creates an installation at 30 °C ambient with three copper conductors
    /// insulated for 75 °C.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the length is negative or NaN.
    pub fn new(length: Length, raceway: Raceway) -> Result<Self, InputError> {
        let length = NonNegative::new(length)
            .map_err(InputError::field("length"))?
            .into_inner();

        Ok(Self {
            length,
            raceway,
            ambient: ThermodynamicTemperature::new::<degree_celsius>(
                Self::DEFAULT_AMBIENT_CELSIUS,
            ),
            conductor_count: Self::DEFAULT_CONDUCTOR_COUNT,
            material: ConductorMaterial::default(),
            insulation: InsulationRating::default(),
        })
    }

    /// Sets the ambient temperature around the raceway.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the temperature is NaN.
    pub fn with_ambient(self, ambient: ThermodynamicTemperature) -> Result<Self, InputError> {
        if ambient.get::<degree_celsius>().is_nan() {
            return Err(InputError::field("ambient_temperature")(
                ConstraintError::NotANumber,
            ));
        }
        Ok(Self { ambient, ..self })
    }

    /// Sets the number of current-carrying conductors sharing the raceway.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `count` is zero.
    pub fn with_conductor_count(self, count: u32) -> Result<Self, InputError> {
        let count = StrictlyPositive::new(count).map_err(InputError::field("conductor_count"))?;
        Ok(Self {
            conductor_count: count.into_inner(),
            ..self
        })
    }

    #[must_use]
    pub fn with_insulation(self, insulation: InsulationRating) -> Self {
        Self { insulation, ..self }
    }

    #[must_use]
    pub fn with_material(self, material: ConductorMaterial) -> Self {
        Self { material, ..self }
    }

    /// One-way run length.
    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn raceway(&self) -> Raceway {
        self.raceway
    }

    #[must_use]
    pub fn ambient(&self) -> ThermodynamicTemperature {
        self.ambient
    }

    /// Ambient in °C, rounded to the micro-degree.
    ///
    /// `uom` stores temperatures in kelvin, so 30 °C reads back as
    /// 30.000000000000004 or similar, which would fall into the wrong band
    /// of an integer-keyed correction table.
    pub(crate) fn ambient_celsius(&self) -> f64 {
        (self.ambient.get::<degree_celsius>() * 1e6).round() / 1e6
    }

    #[must_use]
    pub fn conductor_count(&self) -> u32 {
        self.conductor_count
    }

    #[must_use]
    pub fn material(&self) -> ConductorMaterial {
        self.material
    }

    #[must_use]
    pub fn insulation(&self) -> InsulationRating {
        self.insulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::length::meter;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn defaults() {
        let installation = Installation::new(Length::new::<meter>(10.0), Raceway::Steel).unwrap();

        assert_eq!(installation.conductor_count(), 3);
        assert_eq!(installation.material(), ConductorMaterial::Copper);
        assert_eq!(installation.insulation(), InsulationRating::C75);
        assert!(installation.raceway().is_magnetic());
        assert!((installation.ambient_celsius() - 30.0).abs() < 1e-9);

        let hot = installation.with_ambient(celsius(45.0)).unwrap();
        assert!((hot.ambient_celsius() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Installation::new(Length::new::<meter>(-1.0), Raceway::NonMagnetic),
            Err(InputError::Invalid {
                field: "length",
                source: ConstraintError::Negative
            })
        ));

        let installation = Installation::new(Length::new::<meter>(0.0), Raceway::Aluminum).unwrap();
        assert!(matches!(
            installation.with_ambient(celsius(f64::NAN)),
            Err(InputError::Invalid {
                field: "ambient_temperature",
                source: ConstraintError::NotANumber
            })
        ));
        assert!(installation.with_conductor_count(0).is_err());
        assert!(!installation.raceway().is_magnetic());
    }

    #[test]
    fn insulation_labels() {
        assert_eq!(InsulationRating::C60.to_string(), "TW (60°C)");
        assert_eq!(InsulationRating::C75.celsius(), 75);
        assert_eq!(InsulationRating::C90.conductor_type(), "THHN/THWN-2 (90°C)");
        assert!(InsulationRating::C60 < InsulationRating::C90);
    }
}
