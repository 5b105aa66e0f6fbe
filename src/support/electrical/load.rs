use uom::si::f64::{ElectricCurrent, ElectricPotential, Power};

use crate::support::constraint::{StrictlyPositive, UnitIntervalLowerOpen};

use super::InputError;

/// Multiplier applied to continuous loads (operating three hours or more).
pub const CONTINUOUS_MULTIPLIER: f64 = 1.25;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Supply phase arrangement of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phases {
    Single,
    Three,
}

impl Phases {
    /// Number of phase conductors.
    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Three => 3,
        }
    }

    /// Ratio between apparent power and the `V·I` product: 1 or √3.
    #[must_use]
    pub fn line_factor(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Three => SQRT_3,
        }
    }

    /// Round-trip conductor factor used in voltage-drop calculations.
    #[must_use]
    pub fn drop_factor(self) -> f64 {
        match self {
            Self::Single => 2.0,
            Self::Three => 1.732,
        }
    }
}

impl TryFrom<u8> for Phases {
    type Error = InputError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(Self::Single),
            3 => Ok(Self::Three),
            other => Err(InputError::UnsupportedPhases(other)),
        }
    }
}

/// An electrical load served by a branch circuit.
///
/// A load is an immutable value: construct it with [`Load::new`] (or
/// [`Load::from_current`] for loads rated in amperes) and refine it with the
/// builder methods. Every numeric invariant is checked on construction.
///
/// # Example
///
/// ```
/// use circuit_sizing::support::electrical::{Load, Phases};
/// use uom::si::{
///     electric_current::ampere,
///     electric_potential::volt,
///     f64::{ElectricPotential, Power},
///     power::watt,
/// };
///
/// let heater = Load::new(
///     "Heater",
///     Power::new::<watt>(5000.0),
///     ElectricPotential::new::<volt>(220.0),
///     Phases::Single,
///     0.9,
/// )?
/// .continuous();
///
/// // 5000 / (220 · 0.9) = 25.25 A, carried at 125 % for a continuous load.
/// assert!((heater.base_current().get::<ampere>() - 25.2525).abs() < 1e-3);
/// assert!((heater.design_current().get::<ampere>() - 31.5657).abs() < 1e-3);
/// # Ok::<(), circuit_sizing::support::electrical::InputError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Load {
    name: String,
    power: Power,
    voltage: ElectricPotential,
    phases: Phases,
    power_factor: f64,
    continuous: bool,
    motor: bool,
    quantity: u32,
    current: Option<ElectricCurrent>,
}

impl Load {
    /// Creates a load from its real power.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the power or voltage is not strictly
    /// positive, or if the power factor lies outside `(0, 1]`.
    pub fn new(
        name: impl Into<String>,
        power: Power,
        voltage: ElectricPotential,
        phases: Phases,
        power_factor: f64,
    ) -> Result<Self, InputError> {
        let power = StrictlyPositive::new(power).map_err(InputError::field("power"))?;
        let voltage = StrictlyPositive::new(voltage).map_err(InputError::field("voltage"))?;
        let power_factor =
            UnitIntervalLowerOpen::new(power_factor).map_err(InputError::field("power_factor"))?;

        Ok(Self {
            name: name.into(),
            power: power.into_inner(),
            voltage: voltage.into_inner(),
            phases,
            power_factor: power_factor.into_inner(),
            continuous: false,
            motor: false,
            quantity: 1,
            current: None,
        })
    }

    /// Creates a load entered in amperes.
    ///
    /// The current becomes the load's explicit current, and the equivalent
    /// real power `I · V · (1 or √3) · pf` is recorded alongside it.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the current or voltage is not strictly
    /// positive, or if the power factor lies outside `(0, 1]`.
    pub fn from_current(
        name: impl Into<String>,
        current: ElectricCurrent,
        voltage: ElectricPotential,
        phases: Phases,
        power_factor: f64,
    ) -> Result<Self, InputError> {
        let current = StrictlyPositive::new(current)
            .map_err(InputError::field("current"))?
            .into_inner();
        StrictlyPositive::new(voltage).map_err(InputError::field("voltage"))?;
        UnitIntervalLowerOpen::new(power_factor).map_err(InputError::field("power_factor"))?;
        let power: Power = current * voltage * (phases.line_factor() * power_factor);

        Ok(Self {
            current: Some(current),
            ..Self::new(name, power, voltage, phases, power_factor)?
        })
    }

    /// Marks the load as continuous duty.
    #[must_use]
    pub fn continuous(self) -> Self {
        Self {
            continuous: true,
            ..self
        }
    }

    /// Marks the load as a motor.
    #[must_use]
    pub fn motor(self) -> Self {
        Self {
            motor: true,
            ..self
        }
    }

    /// Returns the load repeated `quantity` times.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `quantity` is zero.
    pub fn with_quantity(self, quantity: u32) -> Result<Self, InputError> {
        let quantity = StrictlyPositive::new(quantity).map_err(InputError::field("quantity"))?;
        Ok(Self {
            quantity: quantity.into_inner(),
            ..self
        })
    }

    /// Overrides the power-derived current with an explicit current.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the current is not strictly positive.
    pub fn with_current(self, current: ElectricCurrent) -> Result<Self, InputError> {
        let current = StrictlyPositive::new(current).map_err(InputError::field("current"))?;
        Ok(Self {
            current: Some(current.into_inner()),
            ..self
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn power(&self) -> Power {
        self.power
    }

    #[must_use]
    pub fn voltage(&self) -> ElectricPotential {
        self.voltage
    }

    #[must_use]
    pub fn phases(&self) -> Phases {
        self.phases
    }

    #[must_use]
    pub fn power_factor(&self) -> f64 {
        self.power_factor
    }

    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    #[must_use]
    pub fn is_motor(&self) -> bool {
        self.motor
    }

    /// Number of identical loads this entry represents.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The explicit current, if one was given.
    #[must_use]
    pub fn current_override(&self) -> Option<ElectricCurrent> {
        self.current
    }

    /// Current drawn by one unit of this load, before any code multiplier.
    ///
    /// Uses the explicit current when present, otherwise
    /// `P / (V · pf)` for single-phase and `P / (√3 · V · pf)` for three-phase.
    /// For motors this is the full-load current (FLA).
    #[must_use]
    pub fn base_current(&self) -> ElectricCurrent {
        self.current.unwrap_or_else(|| {
            self.power / self.voltage / (self.phases.line_factor() * self.power_factor)
        })
    }

    /// Code-required current of one unit of this load.
    ///
    /// Continuous loads carry the 125 % multiplier. Motor multipliers are not
    /// applied here; they belong to breaker and conductor selection.
    #[must_use]
    pub fn design_current(&self) -> ElectricCurrent {
        if self.continuous {
            self.base_current() * CONTINUOUS_MULTIPLIER
        } else {
            self.base_current()
        }
    }
}
