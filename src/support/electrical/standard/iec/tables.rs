//! Copper conductor data from IEC 60364-5-52 and IEC 60228.
//!
//! Per-size tables follow the order of [`MetricSize::ALL`].

use crate::support::electrical::{
    breaker::StandardRatings,
    derating::{GroupingSteps, TemperatureBands},
};

use super::MetricSize;

/// Table B.52.4, reference method B1, two loaded conductors, PVC (70 °C), in amperes.
pub(super) const AMPACITY_PVC: [f64; MetricSize::ALL.len()] = [
    17.5, 24.0, 32.0, 41.0, 57.0, 76.0, 101.0, 125.0, 151.0, 192.0, 232.0, 269.0, 309.0, 353.0,
    415.0, 477.0,
];

/// Table B.52.5, reference method B1, XLPE/EPR (90 °C), in amperes.
pub(super) const AMPACITY_XLPE: [f64; MetricSize::ALL.len()] = [
    23.0, 31.0, 42.0, 54.0, 75.0, 100.0, 133.0, 164.0, 198.0, 253.0, 306.0, 354.0, 402.0, 472.0,
    555.0, 638.0,
];

/// IEC 60228 class 2 copper, DC resistance at 20 °C in Ω/km.
pub(super) const RESISTANCE_20C: [f64; MetricSize::ALL.len()] = [
    12.1, 7.41, 4.61, 3.08, 1.83, 1.15, 0.727, 0.524, 0.387, 0.268, 0.193, 0.153, 0.124, 0.0991,
    0.0754, 0.0601,
];

/// Copper resistance temperature coefficient at 20 °C, per kelvin.
pub(super) const COPPER_ALPHA: f64 = 0.00393;

/// Typical reactance of single-core cables in Ω/km.
pub(super) const REACTANCE: f64 = 0.08;

/// Reactance increase inside a magnetic raceway.
pub(super) const STEEL_REACTANCE_FACTOR: f64 = 1.25;

/// Table B.52.14, air ambient relative to 30 °C, PVC and XLPE columns.
///
/// PVC is unusable above 60 °C.
pub(super) const TEMPERATURE_CORRECTION: TemperatureBands<2> = TemperatureBands {
    floor: 0.0,
    bands: &[
        (10.0, [1.22, 1.15]),
        (15.0, [1.17, 1.12]),
        (20.0, [1.12, 1.08]),
        (25.0, [1.06, 1.04]),
        (30.0, [1.00, 1.00]),
        (35.0, [0.94, 0.96]),
        (40.0, [0.87, 0.91]),
        (45.0, [0.79, 0.87]),
        (50.0, [0.71, 0.82]),
        (55.0, [0.61, 0.76]),
        (60.0, [0.50, 0.71]),
        (65.0, [0.00, 0.65]),
        (70.0, [0.00, 0.58]),
        (75.0, [0.00, 0.50]),
        (80.0, [0.00, 0.41]),
    ],
};

/// Table B.52.17, by number of loaded circuits bunched together.
pub(super) const GROUPING: GroupingSteps = GroupingSteps {
    steps: &[
        (1, 1.0),
        (2, 0.80),
        (3, 0.70),
        (4, 0.65),
        (5, 0.60),
        (6, 0.57),
        (7, 0.54),
        (8, 0.52),
        (9, 0.50),
        (12, 0.45),
        (16, 0.41),
        (20, 0.38),
    ],
    beyond: 0.38,
};

/// IEC 61439-1 Table 101 rated diversity factor, by number of circuits.
pub(super) const DIVERSITY: GroupingSteps = GroupingSteps {
    steps: &[(1, 1.0), (3, 0.9), (5, 0.8), (9, 0.7)],
    beyond: 0.6,
};

/// IEC 60898-1 preferred rated currents.
pub(super) const BREAKER_RATINGS: StandardRatings = StandardRatings::new(&[
    6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 250.0, 400.0,
    630.0,
]);

/// Smallest size permitted in parallel.
pub(super) const PARALLEL_MINIMUM: MetricSize = MetricSize::Mm50;
