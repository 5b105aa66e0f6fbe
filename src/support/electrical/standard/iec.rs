mod tables;

use std::fmt;

use tracing::{debug, warn};
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, ElectricPotential, Length, Ratio},
    length::kilometer,
    ratio::percent,
};

use crate::support::{
    electrical::{
        Breaker, BreakerNote, BreakerSelection, CableReport, ConfigError, Derating, FeederResult,
        Installation, InsulationRating, Load, Phases, Raceway, SizingConfig,
        feeder::{DemandFactor, RunSearch},
        selection::{Requirement, SizeCheck, first_fit},
        voltage_drop::{ConductorImpedance, voltage_drop},
    },
    units::per_length,
};

use super::{GroundingConductor, Standard};

/// Nominal copper conductor cross-sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricSize {
    Mm1_5,
    Mm2_5,
    Mm4,
    Mm6,
    Mm10,
    Mm16,
    Mm25,
    Mm35,
    Mm50,
    Mm70,
    Mm95,
    Mm120,
    Mm150,
    Mm185,
    Mm240,
    Mm300,
}

/// Insulation family selecting the ampacity column and operating temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insulation {
    Pvc,
    Xlpe,
}

impl Insulation {
    fn from_rating(rating: InsulationRating) -> Self {
        match rating {
            InsulationRating::C60 | InsulationRating::C75 => Self::Pvc,
            InsulationRating::C90 => Self::Xlpe,
        }
    }

    fn column(self) -> usize {
        match self {
            Self::Pvc => 0,
            Self::Xlpe => 1,
        }
    }

    /// Maximum conductor operating temperature in °C.
    fn operating_celsius(self) -> f64 {
        match self {
            Self::Pvc => 70.0,
            Self::Xlpe => 90.0,
        }
    }
}

impl MetricSize {
    /// Every size, smallest first.
    pub const ALL: &'static [MetricSize] = &[
        Self::Mm1_5,
        Self::Mm2_5,
        Self::Mm4,
        Self::Mm6,
        Self::Mm10,
        Self::Mm16,
        Self::Mm25,
        Self::Mm35,
        Self::Mm50,
        Self::Mm70,
        Self::Mm95,
        Self::Mm120,
        Self::Mm150,
        Self::Mm185,
        Self::Mm240,
        Self::Mm300,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Cross-section in mm².
    #[must_use]
    pub fn square_millimeters(self) -> f64 {
        match self {
            Self::Mm1_5 => 1.5,
            Self::Mm2_5 => 2.5,
            Self::Mm4 => 4.0,
            Self::Mm6 => 6.0,
            Self::Mm10 => 10.0,
            Self::Mm16 => 16.0,
            Self::Mm25 => 25.0,
            Self::Mm35 => 35.0,
            Self::Mm50 => 50.0,
            Self::Mm70 => 70.0,
            Self::Mm95 => 95.0,
            Self::Mm120 => 120.0,
            Self::Mm150 => 150.0,
            Self::Mm185 => 185.0,
            Self::Mm240 => 240.0,
            Self::Mm300 => 300.0,
        }
    }

    /// Tabulated ampacity for `insulation` (reference method B1).
    #[must_use]
    pub fn ampacity(self, insulation: InsulationRating) -> ElectricCurrent {
        let amps = match Insulation::from_rating(insulation) {
            Insulation::Pvc => tables::AMPACITY_PVC[self.index()],
            Insulation::Xlpe => tables::AMPACITY_XLPE[self.index()],
        };
        ElectricCurrent::new::<ampere>(amps)
    }

    /// Resistance at the insulation's operating temperature and reactance for `raceway`.
    #[must_use]
    pub fn impedance(self, insulation: InsulationRating, raceway: Raceway) -> ConductorImpedance {
        let theta = Insulation::from_rating(insulation).operating_celsius();
        let r =
            tables::RESISTANCE_20C[self.index()] * (1.0 + tables::COPPER_ALPHA * (theta - 20.0));
        let x = if raceway.is_magnetic() {
            tables::REACTANCE * tables::STEEL_REACTANCE_FACTOR
        } else {
            tables::REACTANCE
        };
        let km = Length::new::<kilometer>(1.0);
        ConductorImpedance {
            resistance: per_length(r, km),
            reactance: per_length(x, km),
        }
    }

    /// Smallest size with at least `mm2` of cross-section.
    fn at_least(mm2: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.square_millimeters() >= mm2)
    }
}

impl fmt::Display for MetricSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm²", self.square_millimeters())
    }
}

/// IEC-style sizing: IEC 60364 conductors protected by IEC 60898 breakers.
///
/// The design current `Ib` is the load's base current; there is no separate
/// continuous-duty multiplier. Breakers satisfy `Ib ≤ In` and conductors
/// satisfy `In ≤ Iz` after derating.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Iec {
    config: SizingConfig,
}

impl Iec {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: SizingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Air ambient correction from Table B.52.14.
    #[must_use]
    pub fn temperature_correction(ambient_celsius: f64, insulation: InsulationRating) -> f64 {
        tables::TEMPERATURE_CORRECTION
            .factor(ambient_celsius, Insulation::from_rating(insulation).column())
    }

    /// Bunched-circuit reduction from Table B.52.17.
    #[must_use]
    pub fn grouping_factor(circuits: u32) -> f64 {
        tables::GROUPING.factor(circuits)
    }

    /// Loaded circuits formed by `conductors` current-carrying conductors.
    #[must_use]
    pub fn circuits(conductors: u32, phases: Phases) -> u32 {
        let per_circuit = match phases {
            Phases::Single => 2,
            Phases::Three => 3,
        };
        conductors.div_ceil(per_circuit)
    }

    /// Rated diversity factor for a board with `circuits` outgoing circuits.
    #[must_use]
    pub fn diversity_factor(circuits: u32) -> f64 {
        tables::DIVERSITY.factor(circuits)
    }

    /// Smallest standard rating `In ≥ Ib`, flagged when the table runs out.
    fn covering(load: &Load) -> (f64, Option<BreakerNote>) {
        tables::BREAKER_RATINGS.covering(load.base_current().get::<ampere>())
    }

    /// Percent voltage drop carrying `current` through `size` conductors.
    #[must_use]
    pub fn voltage_drop(
        current: ElectricCurrent,
        size: MetricSize,
        installation: &Installation,
        voltage: ElectricPotential,
        phases: Phases,
        power_factor: f64,
    ) -> Ratio {
        voltage_drop(
            current,
            Some(size.impedance(installation.insulation(), installation.raceway())),
            installation.length(),
            voltage,
            phases,
            power_factor,
        )
    }
}

struct BranchCheck<'a> {
    load: &'a Load,
    installation: &'a Installation,
    derating: f64,
}

impl SizeCheck<MetricSize> for BranchCheck<'_> {
    // No separate terminal limit: both ampacity checks use the derated Iz.
    fn terminal_ampacity(&self, size: MetricSize) -> ElectricCurrent {
        self.derated_ampacity(size)
    }

    fn derated_ampacity(&self, size: MetricSize) -> ElectricCurrent {
        size.ampacity(self.installation.insulation()) * self.derating
    }

    fn voltage_drop(&self, size: MetricSize, current: ElectricCurrent) -> Ratio {
        Iec::voltage_drop(
            current,
            size,
            self.installation,
            self.load.voltage(),
            self.load.phases(),
            self.load.power_factor(),
        )
    }
}

fn feeder_ampacity(size: MetricSize) -> ElectricCurrent {
    size.ampacity(InsulationRating::C75)
}

fn breaker(rating: f64, poles: u8, reference: String) -> BreakerSelection {
    BreakerSelection {
        breaker: Breaker {
            rating: ElectricCurrent::new::<ampere>(rating),
            poles,
        },
        reference,
        note: None,
    }
}

impl Standard for Iec {
    type Size = MetricSize;

    fn name(&self) -> &'static str {
        "IEC"
    }

    fn config(&self) -> &SizingConfig {
        &self.config
    }

    fn derating(&self, installation: &Installation, phases: Phases) -> Derating {
        Derating {
            temperature: Self::temperature_correction(
                installation.ambient_celsius(),
                installation.insulation(),
            ),
            grouping: Self::grouping_factor(Self::circuits(installation.conductor_count(), phases)),
        }
    }

    fn select_breaker(&self, load: &Load) -> BreakerSelection {
        let ib = load.base_current().get::<ampere>();
        let (rating, note) = Self::covering(load);
        if note.is_some() {
            warn!(load = load.name(), ib, "load exceeds largest standard breaker rating");
        }
        debug!(load = load.name(), ib, rating, "breaker selected");

        BreakerSelection {
            note,
            ..breaker(rating, load.phases().count(), "IEC 60898-1 (Ib <= In)".to_owned())
        }
    }

    fn select_cable(&self, load: &Load, installation: &Installation) -> CableReport<MetricSize> {
        let derating = self.derating(installation, load.phases());
        let ib = load.base_current();
        let rated = ElectricCurrent::new::<ampere>(Self::covering(load).0);
        // When the breaker table is exhausted the conductor still carries Ib.
        let required = if rated > ib { rated } else { ib };

        let requirement = Requirement {
            terminal: required,
            derated: required,
            operating: ib,
            drop_limit: self.config.voltage_drop_limit(),
        };
        let check = BranchCheck {
            load,
            installation,
            derating: derating.combined(),
        };
        let selection = first_fit(MetricSize::ALL, &requirement, &check);

        match selection.selected() {
            Some(cable) => debug!(
                load = load.name(),
                size = %cable.size,
                iz = cable.ampacity.get::<ampere>(),
                drop_percent = cable.voltage_drop.get::<percent>(),
                "conductor selected"
            ),
            None => warn!(
                load = load.name(),
                required = required.get::<ampere>(),
                derating = derating.combined(),
                "no conductor size satisfies the load"
            ),
        }

        CableReport {
            selection,
            derating,
            reference: "IEC 60364-5-52 (In <= Iz), B.52.14 & B.52.17".to_owned(),
        }
    }

    fn feeder_conductors(
        &self,
        loads: &[Load],
        demand_factor: DemandFactor,
    ) -> FeederResult<MetricSize> {
        // Every count past the last diversity step maps to the same factor.
        let circuits = loads
            .iter()
            .map(Load::quantity)
            .fold(0, u32::saturating_add);
        let sum_ib: ElectricCurrent = loads
            .iter()
            .map(|load| load.base_current() * f64::from(load.quantity()))
            .fold(ElectricCurrent::new::<ampere>(0.0), |acc, current| acc + current);

        let (factor, basis) = match demand_factor.reduction() {
            Some(factor) => (factor, format!("Demand Factor ({:.0}%)", factor * 100.0)),
            None => {
                let rdf = Self::diversity_factor(circuits);
                (rdf, format!("IEC 61439-1 Table 101 (RDF = {rdf})"))
            }
        };
        let total = sum_ib * factor;

        let parallel_from =
            MetricSize::ALL.partition_point(|&size| size < tables::PARALLEL_MINIMUM);
        let search = RunSearch {
            single: MetricSize::ALL,
            parallel: &MetricSize::ALL[parallel_from..],
            single_ceiling: feeder_ampacity(MetricSize::Mm300),
            max_runs: self.config.max_parallel_runs,
            ampacity: feeder_ampacity,
        };
        let configuration = search.configure(total);

        if configuration.runs().is_none() {
            warn!(
                total = total.get::<ampere>(),
                max_runs = self.config.max_parallel_runs,
                "feeder exceeds standard cable capacity"
            );
        }
        debug!(total = total.get::<ampere>(), circuits, %configuration, "feeder sized");

        let selection = match configuration.runs() {
            Some(_) => "IEC 60364-5-52",
            None => "Exceeds standard cable capacity",
        };

        FeederResult {
            total_current: total,
            description: configuration.to_string(),
            configuration,
            reference: format!("{basis} | {selection}"),
        }
    }

    fn main_protection(&self, feeder: &FeederResult<MetricSize>) -> BreakerSelection {
        let ratings = tables::BREAKER_RATINGS;
        let iz = feeder.ampacity().get::<ampere>();

        match ratings.largest_at_most(iz) {
            Some(rating) => breaker(rating, 3, format!("IEC 60364-4-43 (In <= Iz = {iz:.1} A)")),
            None => breaker(
                ratings.smallest(),
                3,
                format!("IEC 60364-4-43 (smallest standard rating, Iz = {iz:.1} A)"),
            ),
        }
    }

    fn grounding_conductor(
        &self,
        phase: MetricSize,
        _breaker: &Breaker,
    ) -> GroundingConductor<MetricSize> {
        let s = phase.square_millimeters();
        let size = if s <= 16.0 {
            phase
        } else if s <= 35.0 {
            MetricSize::Mm16
        } else {
            MetricSize::at_least(s / 2.0).unwrap_or(phase)
        };
        GroundingConductor {
            size,
            reference: "IEC 60364-5-54 Table 54.2".to_owned(),
        }
    }
}
