//! Copper conductor data from the NEC.
//!
//! Per-size tables are indexed by [`AwgSize::index`] and listed in the same
//! order as [`AwgSize::ALL`].

use crate::support::electrical::{
    breaker::StandardRatings,
    derating::{GroupingSteps, TemperatureBands},
};

use super::AwgSize;

/// Table 310.16, copper, 60/75/90 °C columns, in amperes.
pub(super) const AMPACITY: [[f64; 3]; AwgSize::ALL.len()] = [
    [15.0, 20.0, 25.0],
    [20.0, 25.0, 30.0],
    [30.0, 35.0, 40.0],
    [40.0, 50.0, 55.0],
    [55.0, 65.0, 75.0],
    [70.0, 85.0, 95.0],
    [85.0, 100.0, 115.0],
    [95.0, 115.0, 130.0],
    [110.0, 130.0, 145.0],
    [125.0, 150.0, 170.0],
    [145.0, 175.0, 195.0],
    [165.0, 200.0, 225.0],
    [195.0, 230.0, 260.0],
    [215.0, 255.0, 290.0],
    [240.0, 285.0, 320.0],
    [260.0, 310.0, 350.0],
    [280.0, 335.0, 380.0],
    [320.0, 380.0, 430.0],
    [350.0, 420.0, 475.0],
    [385.0, 460.0, 520.0],
    [400.0, 475.0, 535.0],
    [410.0, 490.0, 555.0],
    [435.0, 520.0, 585.0],
    [455.0, 545.0, 615.0],
    [495.0, 590.0, 665.0],
    [525.0, 625.0, 705.0],
    [545.0, 650.0, 735.0],
    [555.0, 665.0, 750.0],
];

/// Chapter 9 Table 9, copper, Ω per 1000 ft: `[(R, X) in PVC, (R, X) in steel]`.
///
/// Covers 14 AWG through 600 kcmil; larger sizes have no impedance data.
pub(super) const IMPEDANCE: [[(f64, f64); 2]; 19] = [
    [(3.1, 0.048), (3.1, 0.060)],
    [(2.0, 0.046), (2.0, 0.057)],
    [(1.2, 0.044), (1.2, 0.055)],
    [(0.78, 0.052), (0.78, 0.066)],
    [(0.49, 0.051), (0.49, 0.063)],
    [(0.31, 0.048), (0.31, 0.059)],
    [(0.25, 0.047), (0.25, 0.058)],
    [(0.19, 0.045), (0.20, 0.057)],
    [(0.15, 0.046), (0.16, 0.057)],
    [(0.12, 0.044), (0.13, 0.055)],
    [(0.10, 0.043), (0.10, 0.054)],
    [(0.077, 0.042), (0.082, 0.052)],
    [(0.062, 0.041), (0.067, 0.051)],
    [(0.052, 0.041), (0.054, 0.052)],
    [(0.044, 0.041), (0.045, 0.051)],
    [(0.038, 0.040), (0.039, 0.050)],
    [(0.033, 0.040), (0.035, 0.049)],
    [(0.027, 0.039), (0.029, 0.048)],
    [(0.023, 0.039), (0.025, 0.048)],
];

/// Table 310.15(B)(1), 30 °C base ambient, 60/75/90 °C columns.
pub(super) const TEMPERATURE_CORRECTION: TemperatureBands<3> = TemperatureBands {
    floor: 0.0,
    bands: &[
        (10.0, [1.29, 1.20, 1.15]),
        (15.0, [1.22, 1.15, 1.12]),
        (20.0, [1.15, 1.11, 1.08]),
        (25.0, [1.08, 1.05, 1.04]),
        (30.0, [1.00, 1.00, 1.00]),
        (35.0, [0.91, 0.94, 0.96]),
        (40.0, [0.82, 0.88, 0.91]),
        (45.0, [0.71, 0.82, 0.87]),
        (50.0, [0.58, 0.75, 0.82]),
        (55.0, [0.41, 0.67, 0.76]),
        (60.0, [0.00, 0.58, 0.71]),
        (70.0, [0.00, 0.47, 0.65]),
    ],
};

/// Table 310.15(C)(1), by current-carrying conductors in the raceway.
pub(super) const GROUPING: GroupingSteps = GroupingSteps {
    steps: &[
        (3, 1.0),
        (6, 0.80),
        (9, 0.70),
        (20, 0.50),
        (30, 0.45),
        (40, 0.40),
    ],
    beyond: 0.35,
};

/// Section 240.6(A) standard ampere ratings.
pub(super) const BREAKER_RATINGS: StandardRatings = StandardRatings::new(&[
    15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 125.0,
    150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 500.0, 600.0, 800.0, 1000.0, 1200.0,
]);

/// Table 250.122, keyed by the largest overcurrent device rating each size serves.
pub(super) const GROUNDING: [(f64, AwgSize); 19] = [
    (15.0, AwgSize::Awg14),
    (20.0, AwgSize::Awg12),
    (60.0, AwgSize::Awg10),
    (100.0, AwgSize::Awg8),
    (200.0, AwgSize::Awg6),
    (300.0, AwgSize::Awg4),
    (400.0, AwgSize::Awg3),
    (500.0, AwgSize::Awg2),
    (600.0, AwgSize::Awg1),
    (800.0, AwgSize::Aught1),
    (1000.0, AwgSize::Aught2),
    (1200.0, AwgSize::Aught3),
    (1600.0, AwgSize::Aught4),
    (2000.0, AwgSize::Kcmil250),
    (2500.0, AwgSize::Kcmil350),
    (3000.0, AwgSize::Kcmil400),
    (4000.0, AwgSize::Kcmil500),
    (5000.0, AwgSize::Kcmil700),
    (6000.0, AwgSize::Kcmil800),
];

/// Sizes considered for a single feeder run.
pub(super) const FEEDER_SINGLE: &[AwgSize] = AwgSize::ALL.split_at(19).0;

/// Sizes permitted in parallel (310.10(G): 1/0 AWG and larger), up to 600 kcmil.
pub(super) const FEEDER_PARALLEL: &[AwgSize] = FEEDER_SINGLE.split_at(9).1;
