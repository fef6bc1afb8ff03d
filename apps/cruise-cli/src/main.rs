use clap::{Parser, Subcommand, ValueEnum};
use cruise_controls::{BangBang, Controller, Pd, Pid, Proportional};
use cruise_core::Real;
use cruise_sim::{RunHistory, SimOptions, run};
use cruise_traj::Trajectory;
use cruise_vehicle::{Vehicle, VehicleParams, World, consts};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cruise-cli")]
#[command(about = "Cruise control simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a trajectory file
    Validate {
        /// Path to the trajectory JSON file
        trajectory_path: PathBuf,
    },
    /// Run a closed-loop simulation against a trajectory
    Run {
        /// Path to the trajectory JSON file
        trajectory_path: PathBuf,
        /// Controller strategy
        #[arg(long, value_enum, default_value = "pid")]
        controller: ControllerKind,
        /// Drive up the default hill instead of flat ground
        #[arg(long)]
        hill: bool,
        /// Sampling period in seconds
        #[arg(long, default_value_t = 0.1)]
        dt: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ControllerKind {
    P,
    Pd,
    Pid,
    BangBang,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Trajectory error: {0}")]
    Trajectory(#[from] cruise_traj::TrajError),

    #[error("Vehicle error: {0}")]
    Vehicle(#[from] cruise_vehicle::VehicleError),

    #[error("Simulation error: {0}")]
    Sim(#[from] cruise_sim::SimError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> Result<(), CliError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { trajectory_path } => cmd_validate(&trajectory_path),
        Commands::Run {
            trajectory_path,
            controller,
            hill,
            dt,
            output,
        } => cmd_run(&trajectory_path, controller, hill, dt, output.as_deref()),
    }
}

fn cmd_validate(trajectory_path: &Path) -> Result<(), CliError> {
    let traj = Trajectory::from_file(trajectory_path, 0.0)?;
    println!("OK: {} waypoint(s)", traj.waypoints().t.len());
    println!("  t_final: {} s", traj.t_final());
    println!("  terminal position: {} m", traj.terminal_position());
    println!("  terminal velocity: {} m/s", traj.terminal_velocity());
    Ok(())
}

fn cmd_run(
    trajectory_path: &Path,
    kind: ControllerKind,
    hill: bool,
    dt: Real,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let params = VehicleParams::sedan(consts::CAR_MASS_KG)?;
    let offset = params.length / 2.0;
    let vehicle = Vehicle::new(params)?;
    let trajectory = Trajectory::from_file(trajectory_path, offset)?;
    let world = if hill {
        World::hill(consts::HILL_SLOPE)
    } else {
        World::flat(consts::GROUND_HEIGHT_M)
    };
    let options = SimOptions {
        sampling_period: dt,
        slope: hill,
        ..SimOptions::default()
    };

    let mut controller: Box<dyn Controller> = match kind {
        ControllerKind::P => Box::new(Proportional::default()),
        ControllerKind::Pd => Box::new(Pd::default()),
        ControllerKind::Pid => Box::new(Pid::default()),
        ControllerKind::BangBang => Box::new(BangBang::default()),
    };

    let history = run(&vehicle, &world, &trajectory, controller.as_mut(), &options)?;

    println!("{}", history.exit_status);
    println!("  ticks: {}", history.len());
    println!("  final time: {} s", history.time[history.len() - 1]);
    println!(
        "  final state: x = {:.3} m, v = {:.3} m/s",
        history.states[history.len() - 1].position,
        history.states[history.len() - 1].velocity
    );

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_csv(&history, io::BufWriter::new(file))?;
            println!("  wrote {}", path.display());
        }
        None => write_csv(&history, io::stdout().lock())?,
    }
    Ok(())
}

fn write_csv<W: Write>(history: &RunHistory, mut out: W) -> io::Result<()> {
    writeln!(out, "time,position,velocity,control,reference")?;
    for k in 0..history.len() {
        writeln!(
            out,
            "{},{},{},{},{}",
            history.time[k],
            history.states[k].position,
            history.states[k].velocity,
            history.control[k],
            history.reference[k]
        )?;
    }
    Ok(())
}
