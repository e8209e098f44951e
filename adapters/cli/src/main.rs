#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Polygon Defence headlessly.
//!
//! A run starts from the menu, applies scripted input from a TOML scenario
//! and `--tower` flags, and prints a summary with a state fingerprint so
//! two runs can be compared for determinism.

mod runner;
mod scenario;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use self::scenario::{Scenario, TowerPlacement, ViewportConfig};

/// Headless Polygon Defence runner.
#[derive(Debug, Parser)]
#[command(name = "polygon-defence", version, about)]
struct CliArgs {
    /// TOML scenario describing the viewport, timing and scripted input.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Width of the play area when no scenario is given.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Height of the play area when no scenario is given.
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Simulated frames per second when no scenario is given.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Simulated seconds to run when no scenario is given.
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Tower to build at the start, as `kind@x,y` (repeatable).
    #[arg(long = "tower", value_name = "KIND@X,Y")]
    towers: Vec<TowerPlacement>,
}

impl CliArgs {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("failed to read scenario {}", path.display()))?;
                Scenario::from_toml(&source)
                    .with_context(|| format!("invalid scenario {}", path.display()))?
            }
            None => Scenario::new(
                ViewportConfig {
                    width: self.width,
                    height: self.height,
                },
                self.fps,
                self.seconds,
            )
            .context("invalid run parameters")?,
        };

        for placement in &self.towers {
            scenario.place_at_start(*placement);
        }

        Ok(scenario)
    }
}

/// Entry point for the Polygon Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let scenario = args.scenario()?;
    let summary = runner::run(&scenario);
    println!("{summary}");

    Ok(())
}
