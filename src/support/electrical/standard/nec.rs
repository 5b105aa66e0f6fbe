mod tables;

use std::fmt;

use tracing::{debug, warn};
use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, ElectricPotential, Length, Ratio},
    length::foot,
    ratio::percent,
};

use crate::support::{
    electrical::{
        Breaker, BreakerSelection, CableReport, ConfigError, Derating, FeederResult, Installation,
        InsulationRating, Load, LoadBreakdown, Phases, Raceway, SizingConfig,
        derating::step_lookup,
        feeder::{DemandFactor, RunSearch},
        selection::{Requirement, SizeCheck, first_fit},
        voltage_drop::{ConductorImpedance, voltage_drop},
    },
    units::per_length,
};

use super::{GroundingConductor, Standard};

/// Motor branch conductors carry 125 % of full-load current (430.22).
const MOTOR_CONDUCTOR_MULTIPLIER: f64 = 1.25;

/// Largest feeder current carried by one conductor per phase.
const SINGLE_RUN_CEILING: f64 = 420.0;

/// Main protection may round up to the next rating up to this ampacity (240.4(B)).
const ROUND_UP_LIMIT: f64 = 800.0;

/// Table column for an insulation rating.
fn column(insulation: InsulationRating) -> usize {
    match insulation {
        InsulationRating::C60 => 0,
        InsulationRating::C75 => 1,
        InsulationRating::C90 => 2,
    }
}

/// Copper conductor sizes in the American Wire Gauge and kcmil series.
///
/// Ordered from smallest to largest cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AwgSize {
    Awg14,
    Awg12,
    Awg10,
    Awg8,
    Awg6,
    Awg4,
    Awg3,
    Awg2,
    Awg1,
    /// 1/0 AWG.
    Aught1,
    /// 2/0 AWG.
    Aught2,
    /// 3/0 AWG.
    Aught3,
    /// 4/0 AWG.
    Aught4,
    Kcmil250,
    Kcmil300,
    Kcmil350,
    Kcmil400,
    Kcmil500,
    Kcmil600,
    Kcmil700,
    Kcmil750,
    Kcmil800,
    Kcmil900,
    Kcmil1000,
    Kcmil1250,
    Kcmil1500,
    Kcmil1750,
    Kcmil2000,
}

impl AwgSize {
    /// Every size, smallest first.
    pub const ALL: &'static [AwgSize] = &[
        Self::Awg14,
        Self::Awg12,
        Self::Awg10,
        Self::Awg8,
        Self::Awg6,
        Self::Awg4,
        Self::Awg3,
        Self::Awg2,
        Self::Awg1,
        Self::Aught1,
        Self::Aught2,
        Self::Aught3,
        Self::Aught4,
        Self::Kcmil250,
        Self::Kcmil300,
        Self::Kcmil350,
        Self::Kcmil400,
        Self::Kcmil500,
        Self::Kcmil600,
        Self::Kcmil700,
        Self::Kcmil750,
        Self::Kcmil800,
        Self::Kcmil900,
        Self::Kcmil1000,
        Self::Kcmil1250,
        Self::Kcmil1500,
        Self::Kcmil1750,
        Self::Kcmil2000,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Table 310.16 ampacity in the column for `insulation`.
    #[must_use]
    pub fn ampacity(self, insulation: InsulationRating) -> ElectricCurrent {
        ElectricCurrent::new::<ampere>(tables::AMPACITY[self.index()][column(insulation)])
    }

    /// Chapter 9 Table 9 impedance, or `None` above 600 kcmil.
    #[must_use]
    pub fn impedance(self, raceway: Raceway) -> Option<ConductorImpedance> {
        let column = usize::from(raceway.is_magnetic());
        let (r, x) = tables::IMPEDANCE.get(self.index())?[column];
        let reference = Length::new::<foot>(1000.0);
        Some(ConductorImpedance {
            resistance: per_length(r, reference),
            reactance: per_length(x, reference),
        })
    }

    /// The gauge or kcmil label without its unit, e.g. `"1/0"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Awg14 => "14",
            Self::Awg12 => "12",
            Self::Awg10 => "10",
            Self::Awg8 => "8",
            Self::Awg6 => "6",
            Self::Awg4 => "4",
            Self::Awg3 => "3",
            Self::Awg2 => "2",
            Self::Awg1 => "1",
            Self::Aught1 => "1/0",
            Self::Aught2 => "2/0",
            Self::Aught3 => "3/0",
            Self::Aught4 => "4/0",
            Self::Kcmil250 => "250",
            Self::Kcmil300 => "300",
            Self::Kcmil350 => "350",
            Self::Kcmil400 => "400",
            Self::Kcmil500 => "500",
            Self::Kcmil600 => "600",
            Self::Kcmil700 => "700",
            Self::Kcmil750 => "750",
            Self::Kcmil800 => "800",
            Self::Kcmil900 => "900",
            Self::Kcmil1000 => "1000",
            Self::Kcmil1250 => "1250",
            Self::Kcmil1500 => "1500",
            Self::Kcmil1750 => "1750",
            Self::Kcmil2000 => "2000",
        }
    }

    #[must_use]
    pub fn is_kcmil(self) -> bool {
        self >= Self::Kcmil250
    }
}

impl fmt::Display for AwgSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.is_kcmil() { "kcmil" } else { "AWG" };
        write!(f, "{} {unit}", self.label())
    }
}

/// NEC-style sizing with copper conductors and 75 °C terminations.
///
/// ```
/// use circuit_sizing::support::electrical::{
///     Installation, Load, Phases, Raceway,
///     standard::{AwgSize, Nec, Standard},
/// };
/// use uom::si::{
///     electric_current::ampere,
///     electric_potential::volt,
///     f64::{ElectricPotential, Length, Power},
///     length::meter,
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
/// let installation = Installation::new(Length::new::<meter>(10.0), Raceway::NonMagnetic)?;
///
/// let result = Nec::default().select(&heater, &installation);
/// assert_eq!(result.size(), Some(AwgSize::Awg10));
/// assert_eq!(result.breaker_rating().get::<ampere>(), 35.0);
/// # Ok::<(), circuit_sizing::support::electrical::InputError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nec {
    config: SizingConfig,
}

impl Nec {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: SizingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Ambient temperature correction from Table 310.15(B)(1).
    #[must_use]
    pub fn temperature_correction(ambient_celsius: f64, insulation: InsulationRating) -> f64 {
        tables::TEMPERATURE_CORRECTION.factor(ambient_celsius, column(insulation))
    }

    /// Adjustment for more than three current-carrying conductors, Table 310.15(C)(1).
    #[must_use]
    pub fn grouping_factor(conductor_count: u32) -> f64 {
        tables::GROUPING.factor(conductor_count)
    }

    /// Percent voltage drop carrying `current` through `size` conductors.
    #[must_use]
    pub fn voltage_drop(
        current: ElectricCurrent,
        size: AwgSize,
        installation: &Installation,
        voltage: ElectricPotential,
        phases: Phases,
        power_factor: f64,
    ) -> Ratio {
        voltage_drop(
            current,
            size.impedance(installation.raceway()),
            installation.length(),
            voltage,
            phases,
            power_factor,
        )
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
}

struct BranchCheck<'a> {
    load: &'a Load,
    installation: &'a Installation,
    derating: f64,
}

impl SizeCheck<AwgSize> for BranchCheck<'_> {
    fn terminal_ampacity(&self, size: AwgSize) -> ElectricCurrent {
        size.ampacity(InsulationRating::C75)
    }

    fn derated_ampacity(&self, size: AwgSize) -> ElectricCurrent {
        size.ampacity(self.installation.insulation()) * self.derating
    }

    fn voltage_drop(&self, size: AwgSize, current: ElectricCurrent) -> Ratio {
        Nec::voltage_drop(
            current,
            size,
            self.installation,
            self.load.voltage(),
            self.load.phases(),
            self.load.power_factor(),
        )
    }
}

fn feeder_ampacity(size: AwgSize) -> ElectricCurrent {
    size.ampacity(InsulationRating::C75)
}

impl Standard for Nec {
    type Size = AwgSize;

    fn name(&self) -> &'static str {
        "NEC"
    }

    fn config(&self) -> &SizingConfig {
        &self.config
    }

    fn derating(&self, installation: &Installation, _phases: Phases) -> Derating {
        Derating {
            temperature: Self::temperature_correction(
                installation.ambient_celsius(),
                installation.insulation(),
            ),
            grouping: Self::grouping_factor(installation.conductor_count()),
        }
    }

    fn select_breaker(&self, load: &Load) -> BreakerSelection {
        let poles = load.phases().count();
        let base = load.base_current().get::<ampere>();

        if load.is_motor() {
            let (rating, note) = tables::BREAKER_RATINGS.motor(base);
            if note.is_some() {
                warn!(
                    load = load.name(),
                    fla = base,
                    rating,
                    ?note,
                    "motor breaker outside 150-250% FLA"
                );
            }
            debug!(load = load.name(), rating, "motor breaker selected");
            return BreakerSelection {
                note,
                ..Self::breaker(rating, poles, "NEC 430.52 (Motor 150-250%)".to_owned())
            };
        }

        let required = load.design_current().get::<ampere>();
        let (rating, note) = tables::BREAKER_RATINGS.covering(required);
        let reference = if load.is_continuous() {
            "NEC 240.6(A) & 210.19(A)(1) (125% Continuous)"
        } else {
            "NEC 240.6(A)"
        };
        if note.is_some() {
            warn!(load = load.name(), required, "load exceeds largest standard breaker rating");
        }
        debug!(load = load.name(), required, rating, "breaker selected");

        BreakerSelection {
            note,
            ..Self::breaker(rating, poles, reference.to_owned())
        }
    }

    fn select_cable(&self, load: &Load, installation: &Installation) -> CableReport<AwgSize> {
        let derating = self.derating(installation, load.phases());
        let base = load.base_current();

        let (terminal, reference) = if load.is_motor() {
            (
                base * MOTOR_CONDUCTOR_MULTIPLIER,
                "NEC 430.22 (Motor 125%) & 310.16",
            )
        } else if load.is_continuous() {
            (load.design_current(), "NEC 310.16 (75°C) & 210.19(A)(1)")
        } else {
            (base, "NEC 310.16 (75°C)")
        };

        let requirement = Requirement {
            terminal,
            derated: base,
            operating: base,
            drop_limit: self.config.voltage_drop_limit(),
        };
        let check = BranchCheck {
            load,
            installation,
            derating: derating.combined(),
        };
        let selection = first_fit(AwgSize::ALL, &requirement, &check);

        match selection.selected() {
            Some(cable) => debug!(
                load = load.name(),
                size = %cable.size,
                ampacity = cable.ampacity.get::<ampere>(),
                drop_percent = cable.voltage_drop.get::<percent>(),
                "conductor selected"
            ),
            None => warn!(
                load = load.name(),
                required = terminal.get::<ampere>(),
                derating = derating.combined(),
                "no conductor size satisfies the load"
            ),
        }

        CableReport {
            selection,
            derating,
            reference: format!("{reference}, 310.15(B)(1) & 310.15(C)(1)"),
        }
    }

    fn feeder_conductors(
        &self,
        loads: &[Load],
        demand_factor: DemandFactor,
    ) -> FeederResult<AwgSize> {
        let breakdown = LoadBreakdown::from_loads(loads);
        let total = demand_factor.apply(breakdown.total());

        let mut basis = Vec::new();
        if breakdown.largest_motor.is_some() {
            basis.push("NEC 430.24 (25% Largest Motor)".to_owned());
        }
        if breakdown.continuous.get::<ampere>() > 0.0 {
            basis.push("NEC 215.2 (125% Continuous)".to_owned());
        }
        if let Some(factor) = demand_factor.reduction() {
            basis.push(format!("NEC 430.26/220.87 (Demand Factor {:.0}%)", factor * 100.0));
        }
        let basis = if basis.is_empty() {
            "NEC 215.2".to_owned()
        } else {
            basis.join(" + ")
        };

        let search = RunSearch {
            single: tables::FEEDER_SINGLE,
            parallel: tables::FEEDER_PARALLEL,
            single_ceiling: ElectricCurrent::new::<ampere>(SINGLE_RUN_CEILING),
            max_runs: self.config.max_parallel_runs,
            ampacity: feeder_ampacity,
        };
        let configuration = search.configure(total);

        let selection = match configuration.runs() {
            Some(1) => "NEC 310.16".to_owned(),
            Some(runs) => format!("NEC 310.10(G) ({runs} parallel sets)"),
            None => {
                warn!(
                    total = total.get::<ampere>(),
                    max_runs = self.config.max_parallel_runs,
                    "feeder exceeds standard cable capacity"
                );
                "Exceeds standard cable capacity".to_owned()
            }
        };
        debug!(total = total.get::<ampere>(), %configuration, "feeder sized");

        FeederResult {
            total_current: total,
            description: configuration.to_string(),
            configuration,
            reference: format!("{basis} | {selection}"),
        }
    }

    fn main_protection(&self, feeder: &FeederResult<AwgSize>) -> BreakerSelection {
        let ratings = tables::BREAKER_RATINGS;
        let ampacity = feeder.ampacity().get::<ampere>();

        let Some(rating) = ratings.largest_at_most(ampacity) else {
            return Self::breaker(
                ratings.smallest(),
                3,
                format!("NEC 240.4 (smallest standard rating, Iz = {ampacity:.1} A)"),
            );
        };

        if rating < ampacity && ampacity <= ROUND_UP_LIMIT {
            if let Some(next) = ratings.next_above(rating) {
                debug!(ampacity, rating = next, "main protection rounded up");
                return Self::breaker(
                    next,
                    3,
                    format!("NEC 240.4(B) (Round up from Iz = {ampacity:.1} A)"),
                );
            }
        }

        Self::breaker(rating, 3, format!("NEC 240.4 (In <= Iz = {ampacity:.1} A)"))
    }

    fn grounding_conductor(
        &self,
        _phase: AwgSize,
        breaker: &Breaker,
    ) -> GroundingConductor<AwgSize> {
        let rating = breaker.rating.get::<ampere>();
        let size = step_lookup(&tables::GROUNDING, rating).unwrap_or(AwgSize::Kcmil800);
        GroundingConductor {
            size,
            reference: "NEC 250.122".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        electric_potential::volt,
        f64::{Power, ThermodynamicTemperature},
        length::meter,
        power::{kilowatt, watt},
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::electrical::{BreakerNote, RunConfiguration};

    fn load(watts: f64, volts: f64, phases: Phases, pf: f64) -> Load {
        Load::new(
            "load",
            Power::new::<watt>(watts),
            ElectricPotential::new::<volt>(volts),
            phases,
            pf,
        )
        .unwrap()
    }

    fn motor_amps(amps: f64) -> Load {
        Load::from_current(
            "motor",
            ElectricCurrent::new::<ampere>(amps),
            ElectricPotential::new::<volt>(480.0),
            Phases::Three,
            0.85,
        )
        .unwrap()
        .motor()
    }

    fn run(meters: f64) -> Installation {
        Installation::new(Length::new::<meter>(meters), Raceway::NonMagnetic).unwrap()
    }

    fn at(installation: Installation, celsius: f64) -> Installation {
        installation
            .with_ambient(ThermodynamicTemperature::new::<degree_celsius>(celsius))
            .unwrap()
    }

    #[test]
    fn size_order_matches_tables() {
        for (index, size) in AwgSize::ALL.iter().enumerate() {
            assert_eq!(size.index(), index);
        }
        assert!(AwgSize::ALL.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(
            AwgSize::ALL
                .windows(2)
                .all(|pair| pair[0].ampacity(InsulationRating::C75)
                    < pair[1].ampacity(InsulationRating::C75))
        );
        assert_eq!(tables::FEEDER_SINGLE.last(), Some(&AwgSize::Kcmil600));
        assert_eq!(tables::FEEDER_PARALLEL.first(), Some(&AwgSize::Aught1));
    }

    #[test]
    fn size_labels() {
        assert_eq!(AwgSize::Awg12.to_string(), "12 AWG");
        assert_eq!(AwgSize::Aught3.to_string(), "3/0 AWG");
        assert_eq!(AwgSize::Kcmil500.to_string(), "500 kcmil");
    }

    #[test]
    fn impedance_by_raceway() {
        let pvc = AwgSize::Awg2.impedance(Raceway::NonMagnetic).unwrap();
        let aluminum = AwgSize::Awg2.impedance(Raceway::Aluminum).unwrap();
        let steel = AwgSize::Awg2.impedance(Raceway::Steel).unwrap();

        assert_eq!(pvc, aluminum);
        assert!(steel.reactance > pvc.reactance);
        assert!(steel.resistance > pvc.resistance);
        assert!(AwgSize::Kcmil700.impedance(Raceway::NonMagnetic).is_none());
    }

    #[test]
    fn temperature_correction_bands() {
        let c75 = InsulationRating::C75;
        assert_relative_eq!(Nec::temperature_correction(-10.0, c75), 1.0);
        assert_relative_eq!(Nec::temperature_correction(5.0, c75), 1.20);
        assert_relative_eq!(Nec::temperature_correction(30.0, c75), 1.0);
        assert_relative_eq!(Nec::temperature_correction(31.0, c75), 0.94);
        assert_relative_eq!(Nec::temperature_correction(30.5, c75), 0.94);
        assert_relative_eq!(Nec::temperature_correction(40.0, InsulationRating::C90), 0.91);
        assert_relative_eq!(Nec::temperature_correction(58.0, InsulationRating::C60), 0.0);
        assert_relative_eq!(Nec::temperature_correction(70.0, c75), 0.47);
        assert_relative_eq!(Nec::temperature_correction(71.0, InsulationRating::C90), 0.0);
    }

    #[test]
    fn grouping_is_non_increasing() {
        assert_relative_eq!(Nec::grouping_factor(1), 1.0);
        assert_relative_eq!(Nec::grouping_factor(3), 1.0);
        assert_relative_eq!(Nec::grouping_factor(4), 0.8);
        assert_relative_eq!(Nec::grouping_factor(9), 0.7);
        assert_relative_eq!(Nec::grouping_factor(20), 0.5);
        assert_relative_eq!(Nec::grouping_factor(41), 0.35);

        let factors: Vec<f64> = (1..=60).map(Nec::grouping_factor).collect();
        assert!(factors.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn continuous_heater_branch_circuit() {
        let heater = load(5000.0, 220.0, Phases::Single, 0.9).continuous();
        let result = Nec::default().select(&heater, &run(10.0));

        assert_eq!(result.size(), Some(AwgSize::Awg10));
        assert_relative_eq!(result.ampacity().unwrap().get::<ampere>(), 35.0);
        assert_relative_eq!(
            result.voltage_drop().unwrap().get::<percent>(),
            0.828,
            epsilon = 1e-3
        );
        assert_relative_eq!(result.breaker_rating().get::<ampere>(), 35.0);
        assert_eq!(result.breaker.breaker.poles, 1);
        assert!(result.notes.contains("10 AWG (THWN (75°C))"));
        assert!(result.notes.contains("210.19(A)(1)"));
    }

    #[test]
    fn notes_are_reproducible() {
        let heater = load(5000.0, 220.0, Phases::Single, 0.9).continuous();
        let nec = Nec::default();
        assert_eq!(nec.select(&heater, &run(25.0)), nec.select(&heater, &run(25.0)));
    }

    #[test]
    fn hot_ambient_upsizes_conductor() {
        let heater = load(10_000.0, 220.0, Phases::Single, 0.9).continuous();
        let nec = Nec::default();

        let normal = nec.select_cable(&heater, &run(10.0));
        assert_eq!(normal.selection.size(), Some(AwgSize::Awg6));

        let hot = nec.select_cable(&heater, &at(run(10.0), 55.0));
        let cable = hot.selection.selected().unwrap();
        assert_eq!(cable.size, AwgSize::Awg4);
        assert_relative_eq!(cable.ampacity.get::<ampere>(), 56.95, epsilon = 1e-9);
        assert_relative_eq!(hot.derating.temperature, 0.67);
    }

    #[test]
    fn selection_is_monotonic_in_ambient_and_grouping() {
        let heater = load(7_500.0, 240.0, Phases::Single, 0.95).continuous();
        let nec = Nec::default();

        let mut previous = AwgSize::Awg14;
        for celsius in [10.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0] {
            let size = nec
                .select_cable(&heater, &at(run(15.0), celsius))
                .selection
                .size()
                .unwrap();
            assert!(size >= previous, "{size} smaller than {previous} at {celsius} °C");
            previous = size;
        }

        let mut previous = AwgSize::Awg14;
        for count in [3, 4, 6, 7, 9, 10, 20, 21, 30, 31, 40, 41] {
            let installation = run(15.0).with_conductor_count(count).unwrap();
            let size = nec.select_cable(&heater, &installation).selection.size().unwrap();
            assert!(size >= previous, "{size} smaller than {previous} at {count} conductors");
            previous = size;
        }
    }

    #[test]
    fn freezing_ambient_clamps_to_unity() {
        let c75 = InsulationRating::C75;
        assert_relative_eq!(Nec::temperature_correction(0.0, c75), 1.0);
        assert_relative_eq!(Nec::temperature_correction(0.5, c75), 1.20);

        // Below the first band the clamp is more conservative than the band
        // itself, so 0 °C selects a larger conductor than 5 °C.
        let load = Load::from_current(
            "load",
            ElectricCurrent::new::<ampere>(30.0),
            ElectricPotential::new::<volt>(480.0),
            Phases::Three,
            0.9,
        )
        .unwrap();
        let bundled = run(10.0).with_conductor_count(20).unwrap();
        let nec = Nec::default();
        let size_at = |celsius| {
            nec.select_cable(&load, &at(bundled, celsius))
                .selection
                .size()
        };

        assert_eq!(size_at(0.0), Some(AwgSize::Awg6));
        assert_eq!(size_at(-20.0), Some(AwgSize::Awg6));
        assert_eq!(size_at(5.0), Some(AwgSize::Awg8));
    }

    #[test]
    fn long_run_is_governed_by_voltage_drop() {
        let heater = load(5000.0, 220.0, Phases::Single, 0.9).continuous();
        let nec = Nec::default();

        let cable = nec.select_cable(&heater, &run(60.0)).selection;
        let cable = cable.selected().unwrap();
        assert!(cable.size > AwgSize::Awg10);
        assert!(cable.voltage_drop.get::<percent>() <= 3.0);

        let relaxed = Nec::new(SizingConfig {
            voltage_drop_limit_percent: 10.0,
            ..SizingConfig::default()
        })
        .unwrap();
        assert_eq!(
            relaxed.select_cable(&heater, &run(60.0)).selection.size(),
            Some(AwgSize::Awg10)
        );
    }

    #[test]
    fn voltage_drop_increases_with_length_and_current() {
        let installation = run(30.0);
        let drop = |amps: f64, installation: &Installation| {
            Nec::voltage_drop(
                ElectricCurrent::new::<ampere>(amps),
                AwgSize::Awg8,
                installation,
                ElectricPotential::new::<volt>(208.0),
                Phases::Three,
                0.85,
            )
            .get::<percent>()
        };

        assert_eq!(drop(20.0, &installation), drop(20.0, &installation));
        assert!(drop(25.0, &installation) > drop(20.0, &installation));
        assert!(drop(20.0, &run(40.0)) > drop(20.0, &installation));
        assert_relative_eq!(
            Nec::voltage_drop(
                ElectricCurrent::new::<ampere>(20.0),
                AwgSize::Kcmil1000,
                &installation,
                ElectricPotential::new::<volt>(208.0),
                Phases::Three,
                0.85,
            )
            .get::<percent>(),
            999.0
        );
    }

    #[test]
    fn exhausted_selections() {
        let nec = Nec::default();

        let too_hot = nec.select(&load(5000.0, 220.0, Phases::Single, 0.9), &at(run(10.0), 75.0));
        assert!(too_hot.cable.is_exceeded());
        assert!(too_hot.notes.contains("exceeded"));

        let huge = nec.select(
            &Load::new(
                "huge",
                Power::new::<kilowatt>(1000.0),
                ElectricPotential::new::<volt>(480.0),
                Phases::Three,
                0.9,
            )
            .unwrap(),
            &run(10.0),
        );
        assert!(huge.cable.is_exceeded());
        assert_eq!(huge.ampacity(), None);
        assert_eq!(huge.breaker.note, Some(BreakerNote::LargestStandardRating));
        assert_relative_eq!(huge.breaker_rating().get::<ampere>(), 1200.0);
    }

    #[test]
    fn motor_branch_circuit() {
        let motor = load(50_000.0, 480.0, Phases::Three, 0.9).motor();
        let nec = Nec::default();

        let breaker = nec.select_breaker(&motor);
        assert_relative_eq!(breaker.rating().get::<ampere>(), 110.0);
        assert_eq!(breaker.breaker.poles, 3);
        assert_eq!(breaker.note, None);
        assert!(breaker.reference.contains("430.52"));

        // Terminal check at 125 % FLA = 83.5 A.
        let cable = nec.select_cable(&motor, &run(10.0));
        assert_eq!(cable.selection.size(), Some(AwgSize::Awg4));
        assert!(cable.reference.contains("430.22"));
    }

    #[test]
    fn motor_breaker_fallbacks() {
        let nec = Nec::default();

        // Window [31.5, 52.5]: 35 A fits.
        assert_relative_eq!(nec.select_breaker(&motor_amps(21.0)).rating().get::<ampere>(), 35.0);

        // Window [7.5, 12.5]: 15 A is the smallest rating and exceeds the ceiling.
        let small = nec.select_breaker(&motor_amps(5.0));
        assert_relative_eq!(small.rating().get::<ampere>(), 15.0);
        assert_eq!(small.note, Some(BreakerNote::ExceedsMotorCeiling));

        // Window [915, 1525]: 1000 A fits.
        assert_relative_eq!(
            nec.select_breaker(&motor_amps(610.0))
                .rating()
                .get::<ampere>(),
            1000.0
        );

        let huge = nec.select_breaker(&motor_amps(900.0));
        assert_relative_eq!(huge.rating().get::<ampere>(), 1200.0);
        assert_eq!(huge.note, Some(BreakerNote::LargestStandardRating));
    }

    #[test]
    fn large_motor_breakers() {
        let nec = Nec::default();

        // Window [502.5, 837.5]: 600 A.
        assert_relative_eq!(nec.select_breaker(&motor_amps(335.0)).rating().get::<ampere>(), 600.0);

        // Window [763.5, 1272.5]: 800 A.
        assert_relative_eq!(nec.select_breaker(&motor_amps(509.0)).rating().get::<ampere>(), 800.0);
    }

    fn factory() -> Vec<Load> {
        vec![
            motor_amps(106.9),
            motor_amps(13.36).with_quantity(20).unwrap(),
        ]
    }

    #[test]
    fn factory_feeder() {
        let nec = Nec::default();

        let feeder = nec.feeder_conductors(&factory(), DemandFactor::default());
        assert_relative_eq!(feeder.total_current.get::<ampere>(), 400.825, epsilon = 1e-9);
        assert_eq!(feeder.size(), Some(AwgSize::Kcmil600));
        assert_eq!(feeder.configuration.runs(), Some(1));
        assert_eq!(feeder.description, "600 kcmil per phase");
        assert!(feeder.reference.contains("430.24"));

        let reduced = nec.feeder_conductors(&factory(), DemandFactor::new(0.7).unwrap());
        assert_relative_eq!(reduced.total_current.get::<ampere>(), 280.5775, epsilon = 1e-9);
        assert_eq!(reduced.size(), Some(AwgSize::Kcmil300));
        assert!(reduced.reference.contains("Demand Factor 70%"));
    }

    #[test]
    fn parallel_feeder_with_main_protection() {
        let nec = Nec::default();
        let mut loads = factory();
        loads.push(load(200_000.0, 480.0, Phases::Three, 0.9).motor());

        let feeder = nec.feeder_conductors(&loads, DemandFactor::default());
        assert!(feeder.total_current.get::<ampere>() > SINGLE_RUN_CEILING);
        assert_eq!(
            feeder.configuration,
            RunConfiguration::Parallel {
                runs: 2,
                size: AwgSize::Kcmil500,
                ampacity_per_run: ElectricCurrent::new::<ampere>(380.0),
            }
        );
        assert_eq!(feeder.description, "2x 500 kcmil per phase");
        assert_relative_eq!(feeder.ampacity().get::<ampere>(), 760.0);

        let main = nec.main_protection(&feeder);
        assert_relative_eq!(main.rating().get::<ampere>(), 800.0);
        assert!(main.reference.contains("240.4(B)"));

        let ground = nec.grounding_conductor(AwgSize::Kcmil500, &main.breaker);
        assert_eq!(ground.size, AwgSize::Aught1);
    }

    #[test]
    fn parallel_runs_never_exceed_the_single_ceiling() {
        let nec = Nec::default();
        let feeder = nec.feeder_conductors(&[motor_amps(565.6)], DemandFactor::default());

        // 565.6 · 1.25 = 707 A over two runs of at least 353.5 A each.
        assert_relative_eq!(feeder.total_current.get::<ampere>(), 707.0, epsilon = 1e-9);
        assert_eq!(feeder.configuration.runs(), Some(2));
        assert!(
            feeder
                .configuration
                .size()
                .unwrap()
                .ampacity(InsulationRating::C75)
                .get::<ampere>()
                >= 353.5
        );
    }

    #[test]
    fn custom_feeder() {
        let nec = Nec::default();
        let feeder = nec.feeder_conductors(&[motor_amps(2500.0)], DemandFactor::default());

        assert!(feeder.is_custom());
        assert_eq!(feeder.size(), None);
        assert!(feeder.reference.contains("Exceeds"));

        // Main protection falls back to the aggregated current.
        let main = nec.main_protection(&feeder);
        assert_relative_eq!(main.rating().get::<ampere>(), 1200.0);

        let limited = Nec::new(SizingConfig {
            max_parallel_runs: 2,
            ..SizingConfig::default()
        })
        .unwrap();
        assert!(
            limited
                .feeder_conductors(&[motor_amps(800.0)], DemandFactor::default())
                .is_custom()
        );
    }

    #[test]
    fn small_mixed_feeder() {
        let nec = Nec::default();
        let loads = [
            load(10_000.0, 400.0, Phases::Three, 0.9).motor(),
            load(10_000.0, 400.0, Phases::Three, 0.9).continuous(),
        ];

        let feeder = nec.feeder_conductors(&loads, DemandFactor::default());
        assert_relative_eq!(feeder.total_current.get::<ampere>(), 40.09, epsilon = 1e-2);
        assert_eq!(feeder.size(), Some(AwgSize::Awg8));

        // Ampacity equals a standard rating, so no round up.
        let main = nec.main_protection(&feeder);
        assert_relative_eq!(main.rating().get::<ampere>(), 50.0);
        assert_eq!(
            nec.grounding_conductor(AwgSize::Awg8, &main.breaker).size,
            AwgSize::Awg10
        );
    }

    #[test]
    fn main_protection_round_up_limit() {
        let nec = Nec::default();
        let feeder = |runs, size| FeederResult {
            total_current: ElectricCurrent::new::<ampere>(0.0),
            configuration: RunConfiguration::Parallel {
                runs,
                size,
                ampacity_per_run: feeder_ampacity(size),
            },
            description: String::new(),
            reference: String::new(),
        };

        // 3 · 310 = 930 A is above 800 A: no round up.
        let strict = nec.main_protection(&feeder(3, AwgSize::Kcmil350));
        assert_relative_eq!(strict.rating().get::<ampere>(), 800.0);
        assert!(!strict.reference.contains("240.4(B)"));

        // 2 · 335 = 670 A rounds up from 600 A.
        let round_up = nec.main_protection(&feeder(2, AwgSize::Kcmil400));
        assert_relative_eq!(round_up.rating().get::<ampere>(), 800.0);

        let tiny = FeederResult {
            total_current: ElectricCurrent::new::<ampere>(5.0),
            configuration: RunConfiguration::Custom,
            description: String::new(),
            reference: String::new(),
        };
        assert_relative_eq!(nec.main_protection(&tiny).rating().get::<ampere>(), 15.0);
    }

    #[test]
    fn grounding_table() {
        let nec = Nec::default();
        let ground = |amps: f64| {
            nec.grounding_conductor(
                AwgSize::Awg4,
                &Breaker {
                    rating: ElectricCurrent::new::<ampere>(amps),
                    poles: 3,
                },
            )
            .size
        };

        assert_eq!(ground(15.0), AwgSize::Awg14);
        assert_eq!(ground(20.0), AwgSize::Awg12);
        assert_eq!(ground(35.0), AwgSize::Awg10);
        assert_eq!(ground(100.0), AwgSize::Awg8);
        assert_eq!(ground(225.0), AwgSize::Awg4);
        assert_eq!(ground(1200.0), AwgSize::Aught3);
        assert_eq!(ground(7000.0), AwgSize::Kcmil800);
    }
}
