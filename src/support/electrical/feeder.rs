use std::fmt::{self, Display};

use tracing::trace;
use uom::si::{electric_current::ampere, f64::ElectricCurrent};

use crate::support::constraint::NonNegative;

use super::{InputError, Load, load::CONTINUOUS_MULTIPLIER};

/// Share of the largest motor's full-load current added to a feeder.
pub const LARGEST_MOTOR_SURCHARGE: f64 = 0.25;

/// A demand (diversity) factor applied to an aggregated feeder current.
///
/// Only values below one reduce the total; one or more leaves it unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandFactor(f64);

impl DemandFactor {
    /// # Errors
    ///
    /// Returns an [`InputError`] if `value` is negative or NaN.
    pub fn new(value: f64) -> Result<Self, InputError> {
        let value = NonNegative::new(value).map_err(InputError::field("demand_factor"))?;
        Ok(Self(value.into_inner()))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the factor if it reduces the load.
    #[must_use]
    pub fn reduction(self) -> Option<f64> {
        (self.0 < 1.0).then_some(self.0)
    }

    /// Applies the factor to `current`, never amplifying it.
    #[must_use]
    pub fn apply(self, current: ElectricCurrent) -> ElectricCurrent {
        match self.reduction() {
            Some(factor) => current * factor,
            None => current,
        }
    }
}

impl Default for DemandFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Feeder current contributions grouped by load category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadBreakdown {
    /// Sum of motor full-load currents times quantity.
    pub motors: ElectricCurrent,

    /// Largest single-unit motor full-load current, if any motor is present.
    pub largest_motor: Option<ElectricCurrent>,

    /// Sum of continuous non-motor currents times quantity, before the 125 % multiplier.
    pub continuous: ElectricCurrent,

    /// Sum of non-continuous non-motor currents times quantity.
    pub noncontinuous: ElectricCurrent,
}

impl LoadBreakdown {
    #[must_use]
    pub fn from_loads(loads: &[Load]) -> Self {
        let zero = ElectricCurrent::new::<ampere>(0.0);
        let mut breakdown = Self {
            motors: zero,
            largest_motor: None,
            continuous: zero,
            noncontinuous: zero,
        };

        for load in loads {
            let unit = load.base_current();
            let total = unit * f64::from(load.quantity());

            if load.is_motor() {
                breakdown.motors += total;
                breakdown.largest_motor = match breakdown.largest_motor {
                    Some(largest) if largest >= unit => Some(largest),
                    _ => Some(unit),
                };
            } else if load.is_continuous() {
                breakdown.continuous += total;
            } else {
                breakdown.noncontinuous += total;
            }
        }

        breakdown
    }

    /// 25 % of the largest motor's unit current, or zero without motors.
    #[must_use]
    pub fn motor_surcharge(&self) -> ElectricCurrent {
        self.largest_motor
            .map_or(ElectricCurrent::new::<ampere>(0.0), |largest| {
                largest * LARGEST_MOTOR_SURCHARGE
            })
    }

    /// Code-required feeder current before any demand factor.
    #[must_use]
    pub fn total(&self) -> ElectricCurrent {
        self.motors
            + self.motor_surcharge()
            + self.continuous * CONTINUOUS_MULTIPLIER
            + self.noncontinuous
    }
}

/// How a feeder's current is carried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunConfiguration<S> {
    /// One conductor per phase.
    Single { size: S, ampacity: ElectricCurrent },

    /// `runs` identical conductors per phase.
    Parallel {
        runs: u32,
        size: S,
        ampacity_per_run: ElectricCurrent,
    },

    /// Beyond the bounded parallel search; needs custom engineering.
    Custom,
}

impl<S: Copy> RunConfiguration<S> {
    #[must_use]
    pub fn size(&self) -> Option<S> {
        match *self {
            Self::Single { size, .. } | Self::Parallel { size, .. } => Some(size),
            Self::Custom => None,
        }
    }

    /// Conductors per phase: 1 for a single run, `None` for custom feeders.
    #[must_use]
    pub fn runs(&self) -> Option<u32> {
        match *self {
            Self::Single { .. } => Some(1),
            Self::Parallel { runs, .. } => Some(runs),
            Self::Custom => None,
        }
    }

    /// Combined ampacity of all runs, or `None` for custom feeders.
    #[must_use]
    pub fn ampacity(&self) -> Option<ElectricCurrent> {
        match *self {
            Self::Single { ampacity, .. } => Some(ampacity),
            Self::Parallel {
                runs,
                ampacity_per_run,
                ..
            } => Some(ampacity_per_run * f64::from(runs)),
            Self::Custom => None,
        }
    }
}

impl<S: Display> Display for RunConfiguration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { size, .. } => write!(f, "{size} per phase"),
            Self::Parallel { runs, size, .. } => write!(f, "{runs}x {size} per phase"),
            Self::Custom => f.write_str("custom engineering required"),
        }
    }
}

/// Aggregated feeder current and the conductors chosen to carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeederResult<S> {
    pub total_current: ElectricCurrent,
    pub configuration: RunConfiguration<S>,
    pub description: String,
    pub reference: String,
}

impl<S: Copy> FeederResult<S> {
    #[must_use]
    pub fn size(&self) -> Option<S> {
        self.configuration.size()
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self.configuration, RunConfiguration::Custom)
    }

    /// Ampacity the main protection must respect.
    ///
    /// Custom feeders fall back to the aggregated current.
    #[must_use]
    pub fn ampacity(&self) -> ElectricCurrent {
        self.configuration.ampacity().unwrap_or(self.total_current)
    }
}

/// Conductor sizes and limits for the single/parallel run search.
pub(crate) struct RunSearch<'a, S> {
    /// Candidates for a single run, ascending.
    pub single: &'a [S],

    /// Candidates permitted in parallel, ascending.
    pub parallel: &'a [S],

    /// Largest current carried by a single run.
    pub single_ceiling: ElectricCurrent,

    pub max_runs: u32,

    /// Feeder ampacity of one conductor.
    pub ampacity: fn(S) -> ElectricCurrent,
}

impl<S: Copy + Display> RunSearch<'_, S> {
    /// Picks the fewest runs of the smallest size that carry `total`.
    pub(crate) fn configure(&self, total: ElectricCurrent) -> RunConfiguration<S> {
        if total <= self.single_ceiling {
            if let Some(size) = self.smallest_carrying(self.single, total) {
                return RunConfiguration::Single {
                    size,
                    ampacity: (self.ampacity)(size),
                };
            }
        }

        for runs in 2..=self.max_runs {
            let per_run = total / f64::from(runs);
            match self.smallest_carrying(self.parallel, per_run) {
                Some(size) => {
                    return RunConfiguration::Parallel {
                        runs,
                        size,
                        ampacity_per_run: (self.ampacity)(size),
                    };
                }
                None => trace!(
                    runs,
                    per_run = per_run.get::<ampere>(),
                    "no parallel size carries per-run current"
                ),
            }
        }

        RunConfiguration::Custom
    }

    fn smallest_carrying(&self, sizes: &[S], current: ElectricCurrent) -> Option<S> {
        sizes
            .iter()
            .copied()
            .find(|&size| (self.ampacity)(size) >= current)
    }
}
