//! ACS Navigation Simulation CLI
//!
//! Runs a gyro propagation scenario and prints decimated telemetry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use acs_nav::math::to_euler;
use acs_nav_sim::{AttitudeSimulator, SimConfig};

/// Gyro propagation harness for the acs-nav attitude algebra
#[derive(Parser)]
#[command(name = "acs-nav-sim")]
#[command(about = "Fixed-rate gyro propagation harness")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a propagation scenario
    Run {
        /// YAML scenario file (built-in default scenario if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print telemetry as YAML instead of a table
        #[arg(long)]
        yaml: bool,
    },

    /// Print the default scenario as YAML
    ExampleConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs on stderr, telemetry on stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { config, yaml } => run(config, yaml)?,
        Commands::ExampleConfig => {
            println!("# acs-nav-sim scenario");
            println!("# angles [rad], angular_velocity [rad/s], rate_hz [Hz], durations [s]");
            print!("{}", SimConfig::example_yaml()?);
        }
    }

    Ok(())
}

fn run(config_path: Option<PathBuf>, yaml: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading scenario");
            SimConfig::load_from(&path)
                .with_context(|| format!("loading scenario {}", path.display()))?
        }
        None => {
            info!("using built-in scenario");
            SimConfig::default()
        }
    };

    let mut sim = AttitudeSimulator::new(config)?;
    let report = sim.run()?;

    if yaml {
        print!("{}", serde_yaml::to_string(&report.telemetry)?);
    } else {
        println!(
            "{:>8} {:>9} {:>9} {:>9} {:>10}",
            "t [s]", "roll", "pitch", "yaw", "drift"
        );
        for record in &report.telemetry {
            println!(
                "{:>8.3} {:>9.3} {:>9.3} {:>9.3} {:>10.5}",
                record.time,
                record.attitude_deg.roll,
                record.attitude_deg.pitch,
                record.attitude_deg.yaw,
                record.drift_deg
            );
        }
    }

    let truth = to_euler(&report.final_truth).to_degrees();
    let estimate = to_euler(&report.final_estimate).to_degrees();
    println!();
    println!("rate:           {} Hz", sim.config().rate_hz);
    println!("steps:          {}", report.steps);
    println!("duration:       {:.3} s", report.duration);
    println!(
        "final truth:    roll {:.3}  pitch {:.3}  yaw {:.3} deg",
        truth.roll, truth.pitch, truth.yaw
    );
    println!(
        "final estimate: roll {:.3}  pitch {:.3}  yaw {:.3} deg",
        estimate.roll, estimate.pitch, estimate.yaw
    );
    println!("final drift:    {:.5} deg", report.final_drift.to_degrees());
    println!("max drift:      {:.5} deg", report.max_drift.to_degrees());

    Ok(())
}
