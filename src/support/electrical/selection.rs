use std::fmt::{self, Display};

use tracing::trace;
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, Ratio},
    ratio::percent,
};

use super::{BreakerSelection, Derating};

/// A conductor size that satisfies every sizing criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedCable<S> {
    pub size: S,

    /// Usable ampacity: the lesser of the terminal-limited and derated values.
    pub ampacity: ElectricCurrent,

    /// Voltage drop at the load's operating current.
    pub voltage_drop: Ratio,
}

/// Outcome of a conductor size search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CableSelection<S> {
    Selected(SelectedCable<S>),

    /// No tabulated size satisfies the requirements.
    Exceeded,
}

impl<S: Copy> CableSelection<S> {
    #[must_use]
    pub fn selected(&self) -> Option<&SelectedCable<S>> {
        match self {
            Self::Selected(cable) => Some(cable),
            Self::Exceeded => None,
        }
    }

    #[must_use]
    pub fn size(&self) -> Option<S> {
        self.selected().map(|cable| cable.size)
    }

    #[must_use]
    pub fn is_exceeded(&self) -> bool {
        matches!(self, Self::Exceeded)
    }
}

/// A conductor selection together with the factors that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CableReport<S> {
    pub selection: CableSelection<S>,
    pub derating: Derating,
    pub reference: String,
}

/// Complete branch circuit design: conductor, breaker and a notes line.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult<S> {
    pub cable: CableSelection<S>,
    pub derating: Derating,
    pub breaker: BreakerSelection,
    pub notes: String,
}

impl<S: Copy> SelectionResult<S> {
    #[must_use]
    pub fn size(&self) -> Option<S> {
        self.cable.size()
    }

    #[must_use]
    pub fn ampacity(&self) -> Option<ElectricCurrent> {
        self.cable.selected().map(|cable| cable.ampacity)
    }

    #[must_use]
    pub fn voltage_drop(&self) -> Option<Ratio> {
        self.cable.selected().map(|cable| cable.voltage_drop)
    }

    #[must_use]
    pub fn breaker_rating(&self) -> ElectricCurrent {
        self.breaker.rating()
    }
}

/// Currents a candidate conductor must carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Requirement {
    /// Minimum ampacity at the terminal temperature rating.
    pub terminal: ElectricCurrent,

    /// Minimum ampacity after derating.
    pub derated: ElectricCurrent,

    /// Current used for the voltage-drop check.
    pub operating: ElectricCurrent,

    /// Maximum acceptable voltage drop.
    pub drop_limit: Ratio,
}

/// Per-size data a standard supplies to the size search.
pub(crate) trait SizeCheck<S> {
    /// Ampacity compared against [`Requirement::terminal`].
    fn terminal_ampacity(&self, size: S) -> ElectricCurrent;

    /// Ampacity after derating, compared against [`Requirement::derated`].
    fn derated_ampacity(&self, size: S) -> ElectricCurrent;

    /// Voltage drop carrying `current`.
    fn voltage_drop(&self, size: S, current: ElectricCurrent) -> Ratio;
}

#[derive(Debug, Clone, Copy)]
enum Rejection {
    Terminal,
    Derated,
    VoltageDrop,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terminal => "terminal ampacity too low",
            Self::Derated => "derated ampacity too low",
            Self::VoltageDrop => "voltage drop above limit",
        })
    }
}

/// Returns the first size, in the given order, that passes every check.
///
/// Checks run in order: terminal ampacity, derated ampacity, voltage drop.
pub(crate) fn first_fit<S, C>(
    sizes: &[S],
    requirement: &Requirement,
    check: &C,
) -> CableSelection<S>
where
    S: Copy + Display,
    C: SizeCheck<S> + ?Sized,
{
    for &size in sizes {
        let terminal = check.terminal_ampacity(size);
        if terminal < requirement.terminal {
            reject(size, Rejection::Terminal, terminal);
            continue;
        }

        let derated = check.derated_ampacity(size);
        if derated < requirement.derated {
            reject(size, Rejection::Derated, derated);
            continue;
        }

        let voltage_drop = check.voltage_drop(size, requirement.operating);
        if voltage_drop > requirement.drop_limit {
            trace!(
                %size,
                drop_percent = voltage_drop.get::<percent>(),
                reason = %Rejection::VoltageDrop,
                "rejected conductor"
            );
            continue;
        }

        return CableSelection::Selected(SelectedCable {
            size,
            ampacity: if terminal < derated { terminal } else { derated },
            voltage_drop,
        });
    }

    CableSelection::Exceeded
}

fn reject<S: Display>(size: S, reason: Rejection, ampacity: ElectricCurrent) {
    trace!(
        %size,
        ampacity = ampacity.get::<ampere>(),
        %reason,
        "rejected conductor"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Sizes 1..=5 with ampacity 10·n, half derated, and drop 10/n percent.
    struct Linear;

    impl SizeCheck<u8> for Linear {
        fn terminal_ampacity(&self, size: u8) -> ElectricCurrent {
            ElectricCurrent::new::<ampere>(10.0 * f64::from(size))
        }

        fn derated_ampacity(&self, size: u8) -> ElectricCurrent {
            ElectricCurrent::new::<ampere>(5.0 * f64::from(size))
        }

        fn voltage_drop(&self, size: u8, _current: ElectricCurrent) -> Ratio {
            Ratio::new::<percent>(10.0 / f64::from(size))
        }
    }

    fn requirement(terminal: f64, derated: f64, limit: f64) -> Requirement {
        Requirement {
            terminal: ElectricCurrent::new::<ampere>(terminal),
            derated: ElectricCurrent::new::<ampere>(derated),
            operating: ElectricCurrent::new::<ampere>(derated),
            drop_limit: Ratio::new::<percent>(limit),
        }
    }

    const SIZES: [u8; 5] = [1, 2, 3, 4, 5];

    #[test]
    fn terminal_rating_governs() {
        let selection = first_fit(&SIZES, &requirement(25.0, 0.0, 100.0), &Linear);
        let cable = selection.selected().unwrap();
        assert_eq!(cable.size, 3);
        // Reported ampacity is the smaller of the two.
        assert_relative_eq!(cable.ampacity.get::<ampere>(), 15.0);
    }

    #[test]
    fn derating_governs() {
        let selection = first_fit(&SIZES, &requirement(10.0, 18.0, 100.0), &Linear);
        assert_eq!(selection.size(), Some(4));
    }

    #[test]
    fn voltage_drop_governs() {
        let selection = first_fit(&SIZES, &requirement(10.0, 5.0, 3.0), &Linear);
        let cable = selection.selected().unwrap();
        assert_eq!(cable.size, 4);
        assert_relative_eq!(cable.voltage_drop.get::<percent>(), 2.5);
    }

    #[test]
    fn nothing_fits() {
        let selection = first_fit(&SIZES, &requirement(60.0, 0.0, 100.0), &Linear);
        assert!(selection.is_exceeded());
        assert_eq!(selection.size(), None);
    }
}
