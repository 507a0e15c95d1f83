//! # FFG Simulator
//!
//! Runs one Casper-FFG finality simulation and prints a summary.
//!
//! ```text
//! FFG_NUM_VALIDATORS=20 FFG_AVG_LATENCY=5 ffg-sim
//! FFG_CONFIG=byzantine.json FFG_JSON_LOGS=1 ffg-sim
//! ```

use anyhow::Result;
use sim_runtime::{logging::init_logging, run_simulation, RuntimeConfig, Summary};

fn print_summary(summary: &Summary) {
    println!("Ticks:                        {}", summary.ticks);
    println!("Online validators:            {}/{}", summary.online, summary.validators);
    println!("Justified:                    {:.4}", summary.justified_fraction);
    println!("Finalized:                    {:.4}", summary.finalized_fraction);
    println!("Justified in forks:           {:.4}", summary.forked_justified_fraction);
    println!("Main chain size:              {:.2}", summary.main_chain_size);
    println!("Blocks under main justified:  {:.2}", summary.blocks_under_justified);
    println!("Main chain fraction:          {:.4}", summary.main_chain_fraction);
    println!("Total deposit:                {}", summary.total_deposit);
}

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    init_logging(&config)?;

    let summary = run_simulation(config.simulation)?;

    if config.json_logs {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}
