//! Watershed CLI - run a TOML scenario and print CSV results

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use watershed_response::Scenario;

#[derive(Parser)]
#[command(name = "watershed")]
#[command(author, version, about = "Watershed hydrologic response", long_about = None)]
struct Cli {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let scenario = Scenario::from_path(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;

    if let Some(flood) = &scenario.flood {
        let report = flood.run().context("flood hydrograph")?;
        let tp = &report.time_parameters;
        info!(
            tc = tp.time_of_concentration,
            lag = tp.lag_time,
            peak_time = report.unit_hydrograph.time_to_peak,
            "basin time parameters"
        );
        println!("Time [h], Discharge");
        for (t, q) in report.flood.discharge.iter() {
            println!("{:.3}, {:.3}", t, q);
        }
    }

    if let Some(bucket) = &scenario.bucket {
        let output = bucket.run().context("bucket model")?;
        println!("Step, Total Runoff");
        for (step, runoff) in output.total_runoff.iter().enumerate() {
            println!("{}, {:.3}", step, runoff);
        }
    }

    if let Some(groundwater) = &scenario.groundwater {
        let solution = groundwater.run().context("groundwater solver")?;
        println!("x, Head, Discharge");
        for i in 0..solution.head.len() {
            println!(
                "{:.3}, {:.4}, {:.4}",
                solution.x[i], solution.head[i], solution.discharge[i]
            );
        }
    }

    if scenario.flood.is_none() && scenario.bucket.is_none() && scenario.groundwater.is_none() {
        info!("scenario has no [flood], [bucket] or [groundwater] section");
    }
    Ok(())
}
