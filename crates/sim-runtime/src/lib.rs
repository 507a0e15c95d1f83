//! # FFG Simulation Runtime
//!
//! Wires configuration, logging and the simulated network together and
//! produces a statistics summary for one run.
//!
//! ## Modular Structure
//!
//! - `config` - defaults, JSON file and `FFG_*` environment overrides
//! - `logging` - tracing subscriber setup
//! - `stats` - per-validator chain statistics and their averages
//!
//! ## Run Sequence
//!
//! 1. Load and validate configuration
//! 2. Build the genesis block and every validator
//! 3. Tick the network `block_period × epoch_size × epochs` times
//! 4. Summarise the online validators' views

pub mod config;
pub mod logging;
pub mod stats;

pub use config::RuntimeConfig;
pub use stats::{ChainStats, Summary};

use anyhow::{Context, Result};
use ffg_02_network::Network;
use shared_types::SimulationConfig;
use tracing::info;

/// Run one full simulation and summarise it.
pub fn run_simulation(config: SimulationConfig) -> Result<Summary> {
    let mut network = Network::new(config).context("failed to build network")?;
    let ticks = network.config().total_ticks();

    info!(ticks, "simulation starting");
    network.run();

    let summary = Summary::of(&network);
    info!(
        justified = summary.justified_fraction,
        finalized = summary.finalized_fraction,
        main_chain = summary.main_chain_size,
        total_deposit = summary.total_deposit,
        "simulation complete"
    );
    Ok(summary)
}
