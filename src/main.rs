//! MushakNav: flood-fill navigation core for a micromouse maze solver.
//!
//! Speaks the mms simulator's stdio protocol: commands go to stdout, replies
//! arrive on stdin, so all logging goes to stderr.

mod client;
mod config;
mod display;
mod error;
#[cfg(test)]
mod harness;
mod maze;
mod navigation;
mod planning;

use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::client::MmsClient;
use crate::config::MushakConfig;
use crate::error::Result;
use crate::navigation::Mission;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mushak_nav=info")),
        )
        .init();

    if let Err(e) = run() {
        error!("mission failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut config = load_config()?;
    let mut client = MmsClient::from_stdio();

    // The simulator is authoritative for maze geometry
    config.maze.width = client.maze_width()?;
    config.maze.height = client.maze_height()?;
    info!(
        "starting mission: {}x{} maze, start ({}, {}), {} goal cells",
        config.maze.width,
        config.maze.height,
        config.maze.start[0],
        config.maze.start[1],
        config.maze.goal_cells().len()
    );

    let mut mission = Mission::new(config);
    let report = mission.run(&mut client)?;

    info!(
        "mission complete: {} search moves, {} speed moves, {:.0}% coverage",
        report.search_moves,
        report.speed_moves,
        report.coverage * 100.0
    );
    Ok(())
}

fn load_config() -> Result<MushakConfig> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "mushak.toml".into());
    if Path::new(&path).exists() {
        info!("loading config from {}", path);
        MushakConfig::load(Path::new(&path))
    } else {
        Ok(MushakConfig::default())
    }
}
