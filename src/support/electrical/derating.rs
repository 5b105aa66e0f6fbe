use std::fmt;

/// Ampacity derating factors applied to a conductor's table ampacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derating {
    /// Ambient temperature correction factor.
    pub temperature: f64,

    /// Adjustment for the number of current-carrying conductors or circuits.
    pub grouping: f64,
}

impl Derating {
    /// Product of the temperature and grouping factors.
    #[must_use]
    pub fn combined(&self) -> f64 {
        self.temperature * self.grouping
    }
}

impl fmt::Display for Derating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3} (temperature {:.2} × grouping {:.2})",
            self.combined(),
            self.temperature,
            self.grouping
        )
    }
}

/// Returns the value of the first step whose upper limit is not below `key`.
///
/// `steps` must be sorted by ascending limit.
/// Returns `None` when `key` exceeds every limit.
pub(crate) fn step_lookup<K: PartialOrd + Copy, V: Copy>(steps: &[(K, V)], key: K) -> Option<V> {
    let index = steps.partition_point(|&(limit, _)| limit < key);
    steps.get(index).map(|&(_, value)| value)
}

/// Ambient temperature correction table with one factor column per insulation class.
///
/// Each band is keyed by its upper temperature bound in degrees Celsius.
/// Temperatures at or below `floor` take a factor of 1.0, temperatures beyond
/// the last band take 0.0, and anything else takes the factor of the first
/// band whose bound is not below it.
#[derive(Debug)]
pub(crate) struct TemperatureBands<const N: usize> {
    pub floor: f64,
    pub bands: &'static [(f64, [f64; N])],
}

impl<const N: usize> TemperatureBands<N> {
    pub(crate) fn factor(&self, ambient_celsius: f64, column: usize) -> f64 {
        if ambient_celsius <= self.floor {
            return 1.0;
        }
        step_lookup(self.bands, ambient_celsius)
            .and_then(|row| row.get(column).copied())
            .unwrap_or(0.0)
    }
}

/// Grouping adjustment keyed by the upper bound of each count range.
///
/// Counts beyond the last step take `beyond`.
#[derive(Debug)]
pub(crate) struct GroupingSteps {
    pub steps: &'static [(u32, f64)],
    pub beyond: f64,
}

impl GroupingSteps {
    pub(crate) fn factor(&self, count: u32) -> f64 {
        step_lookup(self.steps, count).unwrap_or(self.beyond)
    }
}
