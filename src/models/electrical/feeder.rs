use std::convert::Infallible;

use tracing::debug;
use twine_core::Model;
use uom::si::electric_current::ampere;

use crate::support::electrical::{
    BreakerSelection, DemandFactor, FeederResult, GroundingConductor, Load, Standard,
};

/// Loads served by a feeder and an optional demand factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeederInput {
    pub loads: Vec<Load>,
    pub demand_factor: DemandFactor,
}

/// Feeder conductors with their main protection and grounding conductor.
#[derive(Debug, Clone, PartialEq)]
pub struct FeederDesign<S> {
    pub feeder: FeederResult<S>,
    pub main_breaker: BreakerSelection,

    /// `None` when the feeder needs custom engineering.
    pub grounding: Option<GroundingConductor<S>>,
}

/// Sizes a feeder under the electrical code `S`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Feeder<S> {
    standard: S,
}

impl<S: Standard> Feeder<S> {
    #[must_use]
    pub fn new(standard: S) -> Self {
        Self { standard }
    }

    #[must_use]
    pub fn standard(&self) -> &S {
        &self.standard
    }
}

impl<S: Standard> Model for Feeder<S> {
    type Input = FeederInput;
    type Output = FeederDesign<S::Size>;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let feeder = self
            .standard
            .feeder_conductors(&input.loads, input.demand_factor);
        let main_breaker = self.standard.main_protection(&feeder);
        let grounding = feeder
            .size()
            .map(|size| self.standard.grounding_conductor(size, &main_breaker.breaker));

        debug!(
            standard = self.standard.name(),
            loads = input.loads.len(),
            total = feeder.total_current.get::<ampere>(),
            main = main_breaker.rating().get::<ampere>(),
            "feeder designed"
        );

        Ok(FeederDesign {
            feeder,
            main_breaker,
            grounding,
        })
    }
}
