use std::fmt;

use uom::si::{electric_current::ampere, f64::ElectricCurrent};

/// Lower bound of the motor breaker window, as a multiple of full-load current.
pub const MOTOR_BREAKER_MIN: f64 = 1.5;

/// Upper bound of the motor breaker window, as a multiple of full-load current.
pub const MOTOR_BREAKER_MAX: f64 = 2.5;

/// A circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breaker {
    pub rating: ElectricCurrent,
    pub poles: u8,
}

impl fmt::Display for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} A {}P", self.rating.get::<ampere>(), self.poles)
    }
}

/// Why a selected breaker departs from the usual selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerNote {
    /// The smallest rating at or above 150 % FLA exceeded 250 % FLA, so the
    /// largest rating within 250 % FLA was taken instead.
    CappedAtMotorCeiling,

    /// No standard rating lies in the 150 % to 250 % FLA window, so the rating
    /// exceeds 250 % FLA.
    ExceedsMotorCeiling,

    /// The required current exceeds every standard rating.
    LargestStandardRating,
}

impl fmt::Display for BreakerNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CappedAtMotorCeiling => "capped at 250% FLA",
            Self::ExceedsMotorCeiling => "exceeds 250% FLA, no standard rating in window",
            Self::LargestStandardRating => "largest standard rating, load exceeds table",
        })
    }
}

/// A chosen breaker with the code reference that justifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakerSelection {
    pub breaker: Breaker,
    pub reference: String,
    pub note: Option<BreakerNote>,
}

impl BreakerSelection {
    #[must_use]
    pub fn rating(&self) -> ElectricCurrent {
        self.breaker.rating
    }
}

/// An ascending list of standard breaker ratings in amperes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StandardRatings(&'static [f64]);

impl StandardRatings {
    pub(crate) const fn new(ratings: &'static [f64]) -> Self {
        Self(ratings)
    }

    pub(crate) fn smallest(&self) -> f64 {
        self.0.first().copied().unwrap_or(0.0)
    }

    pub(crate) fn largest(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    pub(crate) fn smallest_at_least(&self, amps: f64) -> Option<f64> {
        self.0.iter().copied().find(|&rating| rating >= amps)
    }

    pub(crate) fn largest_at_most(&self, amps: f64) -> Option<f64> {
        self.0.iter().copied().rev().find(|&rating| rating <= amps)
    }

    pub(crate) fn next_above(&self, amps: f64) -> Option<f64> {
        self.0.iter().copied().find(|&rating| rating > amps)
    }

    /// Smallest rating covering `amps`, or the largest rating flagged as such.
    pub(crate) fn covering(&self, amps: f64) -> (f64, Option<BreakerNote>) {
        match self.smallest_at_least(amps) {
            Some(rating) => (rating, None),
            None => (self.largest(), Some(BreakerNote::LargestStandardRating)),
        }
    }

    /// Rating for a motor with full-load current `fla`.
    ///
    /// Aims for the smallest rating at or above 150 % FLA without exceeding
    /// 250 % FLA.
    pub(crate) fn motor(&self, fla: f64) -> (f64, Option<BreakerNote>) {
        let floor = fla * MOTOR_BREAKER_MIN;
        let ceiling = fla * MOTOR_BREAKER_MAX;

        let Some(rating) = self.smallest_at_least(floor) else {
            return (self.largest(), Some(BreakerNote::LargestStandardRating));
        };
        if rating <= ceiling {
            return (rating, None);
        }
        match self.largest_at_most(ceiling) {
            Some(capped) => (capped, Some(BreakerNote::CappedAtMotorCeiling)),
            None => (rating, Some(BreakerNote::ExceedsMotorCeiling)),
        }
    }
}
