//! # Chain Statistics
//!
//! What one validator's view of the chain looks like at the end of a run,
//! and the average over every online validator.
//!
//! The main chain is the checkpoint path from the highest justified
//! checkpoint back to genesis. Everything here is derived from the
//! validator's read-only queries.

use ffg_01_finality::Validator;
use ffg_02_network::Network;
use serde::Serialize;
use shared_types::{Deposit, ValidatorId};

/// One validator's end-of-run view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainStats {
    pub validator: ValidatorId,
    /// Justified share of main-chain checkpoints
    pub justified_fraction: f64,
    /// Finalized share of main-chain checkpoints
    pub finalized_fraction: f64,
    /// Justified checkpoints off the main chain, relative to its length
    pub forked_justified_fraction: f64,
    pub main_chain_checkpoints: u64,
    /// Blocks up to and including the highest justified checkpoint
    pub main_chain_size: u64,
    pub blocks_under_justified: u64,
    pub blocks_received: u64,
    pub deposit: Deposit,
    pub byzantine: bool,
}

impl ChainStats {
    pub fn of(validator: &Validator) -> Self {
        let hjc = validator.highest_justified_checkpoint();

        let mut total = 0u64;
        let mut justified = 0u64;
        let mut finalized = 0u64;
        let mut checkpoint = Some(hjc.clone());
        while let Some(block) = checkpoint {
            total += 1;
            if validator.is_justified(&block.id) {
                justified += 1;
            }
            if validator.is_finalized(&block.id) {
                finalized += 1;
            }
            checkpoint = validator.checkpoint_parent(&block);
        }
        let forked = (validator.justified().len() as u64).saturating_sub(justified);

        let mut blocks_received = 0u64;
        let mut blocks_under_justified = 0u64;
        for (_, block) in validator.received_blocks() {
            blocks_received += 1;
            if block.height <= hjc.height {
                blocks_under_justified += 1;
            }
        }

        let fraction = |count: u64| count as f64 / total as f64;
        Self {
            validator: validator.id(),
            justified_fraction: fraction(justified),
            finalized_fraction: fraction(finalized),
            forked_justified_fraction: fraction(forked),
            main_chain_checkpoints: total,
            main_chain_size: hjc.height + 1,
            blocks_under_justified,
            blocks_received,
            deposit: validator.deposit(),
            byzantine: validator.is_byzantine(),
        }
    }
}

/// Averages over the online validators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub ticks: u64,
    pub validators: usize,
    pub online: usize,
    pub justified_fraction: f64,
    pub finalized_fraction: f64,
    pub forked_justified_fraction: f64,
    pub main_chain_size: f64,
    pub blocks_under_justified: f64,
    /// `main_chain_size` relative to the blocks a perfect run would produce
    pub main_chain_fraction: f64,
    pub total_deposit: Deposit,
    pub per_validator: Vec<ChainStats>,
}

impl Summary {
    pub fn of(network: &Network) -> Self {
        let per_validator: Vec<ChainStats> = network.online_validators().map(ChainStats::of).collect();
        let online = per_validator.len();
        let mean = |f: fn(&ChainStats) -> f64| {
            if online == 0 {
                0.0
            } else {
                per_validator.iter().map(f).sum::<f64>() / online as f64
            }
        };

        let config = network.config();
        let ideal_chain = (config.epoch_size * config.epochs + 1) as f64;
        let main_chain_size = mean(|s| s.main_chain_size as f64);

        Self {
            ticks: network.time(),
            validators: network.validators().len(),
            online,
            justified_fraction: mean(|s| s.justified_fraction),
            finalized_fraction: mean(|s| s.finalized_fraction),
            forked_justified_fraction: mean(|s| s.forked_justified_fraction),
            main_chain_size,
            blocks_under_justified: mean(|s| s.blocks_under_justified as f64),
            main_chain_fraction: main_chain_size / ideal_chain,
            total_deposit: network.total_deposit(),
            per_validator,
        }
    }
}
