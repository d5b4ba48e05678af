//! # Bastion Sim
//!
//! Headless runner for the siege AI.
//!
//! Builds a scripted world (structure, patrolling player, ring of hostiles),
//! drives the orchestrator on a fixed timestep and reports the outcome.
//!
//! Usage:
//! - `bastion-sim [config.toml]` runs a siege
//! - `bastion-sim --init [config.toml]` writes the default config and exits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod timing;
mod world;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::SimConfig;

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("bastion=info".parse()?))
        .init();

    info!("Bastion sim starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--init") => {
            let path = args.next().unwrap_or_else(|| config::CONFIG_FILE.to_string());
            SimConfig::default().save_to(&path)?;
            return Ok(());
        },
        Some(path) => SimConfig::load_from(path),
        None => SimConfig::load(),
    };

    let report = app::run(&config)?;
    if config.report_path.is_none() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!("Bastion sim complete");
    Ok(())
}
