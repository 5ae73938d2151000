use std::f64::consts::PI;

use clap::Parser;
use seatrial_core::{
    analysis::reciprocal_true_wind, physics::relative_wind, AngleRange, CorrectedRun, Degrees,
    Knots, MetersPerSecond, PropulsionModel, Radians, SeaTrialAnalysis, SeaTrialError,
    SeaTrialRun, SelfPropulsionSensitivity, ShipParticulars, WaterProperties, WindObservation,
    WindResistanceCoefficients,
};
use tracing_subscriber::EnvFilter;

/// Sea trial correction demo for a single speed/power run
#[derive(Parser, Debug)]
#[command(name = "seatrial-demo")]
#[command(about = "ITTC speed/power trial correction demo", long_about = None)]
struct Args {
    /// Relative wind speed at the anemometer in knots
    #[arg(short = 'w', long, default_value_t = 24.0)]
    wind_speed: f64,

    /// Relative wind direction in degrees off the bow (0 = head wind, 90 = starboard beam)
    #[arg(long, default_value_t = 20.0)]
    wind_direction: f64,

    /// Anemometer height above the sea surface in metres
    #[arg(long, default_value_t = 35.0)]
    anemometer_height: f64,

    /// Speed over ground in knots
    #[arg(short = 'g', long, default_value_t = 14.5)]
    speed_over_ground: f64,

    /// Speed through water in knots
    #[arg(short = 's', long, default_value_t = 14.2)]
    speed_through_water: f64,

    /// Heading in degrees (0 = North, 90 = East)
    #[arg(long, default_value_t = 45.0)]
    heading: f64,

    /// Measured delivered power in kW
    #[arg(short, long, default_value_t = 9200.0)]
    power: f64,

    /// Water temperature in °C
    #[arg(short, long, default_value_t = 12.0)]
    temperature: f64,

    /// Salinity in g/kg
    #[arg(long, default_value_t = 34.0)]
    salinity: f64,

    /// Significant wave height in metres
    #[arg(long, default_value_t = 1.2)]
    wave_height: f64,

    /// Wave direction in degrees off the bow
    #[arg(long, default_value_t = 15.0)]
    wave_direction: f64,

    /// Also analyse the reciprocal leg of a double run in the same true wind
    #[arg(short, long)]
    reciprocal: bool,

    /// Print the power correction for relative wind directions from 0° to 180°
    #[arg(long)]
    sweep: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Sea Trial Correction Demo ===\n");

    let analysis = sample_analysis();
    let ship = &analysis.ship;
    println!(
        "Ship: L_PP {:.1} m, B {:.2} m, A_XV {:.0} m², R_id {:.0} kN",
        ship.length_pp,
        ship.beam,
        ship.transverse_area,
        ship.ideal_resistance / 1e3
    );

    let run = trial_run(&args);
    println!(
        "Run: V_G {}, V_S {}, heading {}, P_DMS {:.0} kW",
        Knots::new(args.speed_over_ground),
        Knots::new(args.speed_through_water),
        Degrees::new(args.heading),
        args.power
    );
    println!(
        "Measured wind: {} from {} off the bow at {:.1} m\n",
        Knots::new(args.wind_speed),
        Degrees::new(args.wind_direction),
        args.anemometer_height
    );

    let corrected = match analysis.analyse(&run) {
        Ok(corrected) => corrected,
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    print_report(&corrected, run.delivered_power);

    if args.reciprocal {
        if let Err(e) = reciprocal_leg(&analysis, &run, &corrected) {
            eprintln!("Reciprocal leg failed: {e}");
        }
    }

    if args.sweep {
        print_sweep(&analysis, &run);
    }
}

fn sample_analysis() -> SeaTrialAnalysis<WindResistanceCoefficients> {
    let ship = ShipParticulars {
        length_pp: 225.0,
        length_wl: 229.5,
        bow_length: 38.0,
        beam: 32.26,
        transverse_area: 980.0,
        wetted_surface: 11_800.0,
        ideal_resistance: 820e3,
    };
    let propulsion = PropulsionModel {
        open_water_efficiency: 0.61,
        relative_rotative_efficiency: 1.01,
        thrust_deduction: 0.19,
        model_wake_fraction: 0.36,
        wake_scale_factor: 0.93,
        ideal_propulsive_efficiency: 0.76,
        sensitivity: SelfPropulsionSensitivity {
            thrust_deduction: 0.02,
            wake_fraction: -0.01,
            ..SelfPropulsionSensitivity::default()
        },
    };
    // Tanker-type superstructure aft, coefficients after wind tunnel data
    let coefficients = WindResistanceCoefficients::from_degrees(&[
        (0.0, 0.88),
        (20.0, 0.84),
        (40.0, 0.68),
        (60.0, 0.42),
        (80.0, 0.12),
        (100.0, -0.15),
        (120.0, -0.40),
        (140.0, -0.58),
        (160.0, -0.66),
        (180.0, -0.68),
    ])
    .unwrap_or_else(|e| {
        eprintln!("Invalid coefficient table: {e}");
        std::process::exit(1);
    });
    SeaTrialAnalysis::new(ship, propulsion, coefficients)
}

fn trial_run(args: &Args) -> SeaTrialRun {
    let wind_speed: MetersPerSecond = Knots::new(args.wind_speed).into();
    let wind_direction: Radians = Degrees::new(args.wind_direction).into();
    SeaTrialRun {
        relative_wind: WindObservation::new(wind_speed.value(), wind_direction.value()),
        anemometer_height: args.anemometer_height,
        speed_over_ground: Knots::new(args.speed_over_ground).to_meters_per_second().value(),
        speed_through_water: Knots::new(args.speed_through_water)
            .to_meters_per_second()
            .value(),
        heading: args.heading.to_radians(),
        delivered_power: args.power * 1e3,
        water: WaterProperties {
            temperature: args.temperature,
            salinity: args.salinity,
        },
        significant_wave_height: args.wave_height,
        relative_wave_direction: args.wave_direction.to_radians(),
        ..SeaTrialRun::default()
    }
}

fn print_report(corrected: &CorrectedRun, measured_power: f64) {
    let true_wind = corrected.reference_true_wind;
    let relative = corrected.reference_relative_wind;
    println!("Wind at 10 m reference height:");
    println!(
        "  True:     {} from {}",
        MetersPerSecond::new(true_wind.speed).to_knots(),
        Radians::new(true_wind.direction).to_degrees()
    );
    println!(
        "  Relative: {} from {} off the bow",
        MetersPerSecond::new(relative.speed).to_knots(),
        Radians::new(relative.direction).to_degrees()
    );

    println!("\nResistance increase:");
    println!("  Wind              | {:10.1} kN", corrected.wind_resistance / 1e3);
    println!("  Waves (STAWAVE-1) | {:10.1} kN", corrected.wave_resistance / 1e3);
    println!(
        "  Temp./salinity    | {:10.1} kN",
        corrected.temperature_salinity_resistance / 1e3
    );
    println!("  ------------------|--------------");
    println!("  Total             | {:10.1} kN", corrected.resistance_increase / 1e3);

    println!("\nTrial propulsion factors:");
    println!("  t     = {:.4}", corrected.thrust_deduction);
    println!("  w_S   = {:.4}", corrected.wake_fraction);
    println!("  eta_R = {:.4}", corrected.relative_rotative_efficiency);
    println!("  eta_O = {:.4}", corrected.open_water_efficiency);
    println!("  eta_D = {:.4}", corrected.propulsive_efficiency);

    println!("\n=== Power Correction ===");
    println!("Measured P_DMS: {:10.0} kW", measured_power / 1e3);
    println!("Correction dP:  {:10.0} kW", corrected.power_correction / 1e3);
    println!("Ideal P_DID:    {:10.0} kW", corrected.corrected_power / 1e3);
}

/// Second leg on the opposite heading in the true wind found on the first leg
fn reciprocal_leg(
    analysis: &SeaTrialAnalysis<WindResistanceCoefficients>,
    run: &SeaTrialRun,
    first: &CorrectedRun,
) -> Result<(), SeaTrialError> {
    let heading = AngleRange::Positive.wrap(run.heading + PI);
    let measured = relative_wind(
        first.true_wind,
        run.speed_over_ground,
        heading,
        AngleRange::Positive,
    )?;
    let second = analysis.analyse(&SeaTrialRun {
        relative_wind: measured,
        heading,
        ..*run
    })?;
    let mean = reciprocal_true_wind(first, &second)?;

    println!("\n=== Reciprocal Leg ===");
    println!(
        "Heading {}, relative wind {} from {}",
        Radians::new(heading).to_degrees(),
        MetersPerSecond::new(measured.speed).to_knots(),
        Radians::new(measured.direction).to_degrees()
    );
    println!("Ideal P_DID:    {:10.0} kW", second.corrected_power / 1e3);
    println!(
        "Double-run mean true wind: {} from {}",
        MetersPerSecond::new(mean.speed).to_knots(),
        Radians::new(mean.direction).to_degrees()
    );
    Ok(())
}

fn print_sweep(analysis: &SeaTrialAnalysis<WindResistanceCoefficients>, run: &SeaTrialRun) {
    let runs: Vec<SeaTrialRun> = (0..=6)
        .map(|step| SeaTrialRun {
            relative_wind: WindObservation::new(
                run.relative_wind.speed,
                f64::from(step * 30).to_radians(),
            ),
            ..*run
        })
        .collect();

    println!("\n=== Relative Wind Direction Sweep ===");
    println!("Direction | R_AA (kN) | dP (kW)  | P_DID (kW)");
    println!("----------|-----------|----------|-----------");
    for (run, result) in runs.iter().zip(analysis.analyse_runs(&runs)) {
        let direction = Radians::new(run.relative_wind.direction)
            .to_degrees()
            .to_string();
        match result {
            Ok(corrected) => println!(
                "{:>9} | {:9.1} | {:8.0} | {:10.0}",
                direction,
                corrected.wind_resistance / 1e3,
                corrected.power_correction / 1e3,
                corrected.corrected_power / 1e3
            ),
            Err(e) => println!("{:>9} | {}", direction, e),
        }
    }
}
