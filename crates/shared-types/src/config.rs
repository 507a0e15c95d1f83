//! Simulation constants.
//!
//! Every subsystem is built from one `SimulationConfig`. Values are fixed for
//! the lifetime of a run.

use crate::{ConfigError, Deposit};
use serde::{Deserialize, Serialize};

/// Basis-point denominator (10_000 = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Constants consumed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of validators (ids `0..num_validators`).
    pub num_validators: usize,
    /// Blocks per checkpoint.
    pub epoch_size: u64,
    /// Ticks between block proposals.
    pub block_period: u64,
    /// Mean of the exponential latency component, in ticks.
    pub avg_latency: f64,
    /// Deposit each validator starts with.
    pub initial_deposit: Deposit,
    /// Share of the offender's deposit removed per slash.
    pub slash_bps: u32,
    /// Share of the voter's deposit added per reward.
    pub reward_bps: u32,
    /// Fraction of validators running the replay strategy.
    pub byzantine_fraction: f64,
    /// Chance a Byzantine validator replays instead of voting honestly.
    pub replay_probability: f64,
    /// Fraction of validators cut off from the network.
    pub disconnected_fraction: f64,
    /// Length of the run in epochs.
    pub epochs: u64,
    /// Master RNG seed.
    pub seed: u64,
    /// Deliver to validators in parallel.
    pub parallel: bool,
    /// Drop messages whose id was already received.
    pub suppress_duplicates: bool,
    /// Rotate to a derived subset of this size when set.
    pub dynasty_size: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_validators: 10,
            epoch_size: 5,
            block_period: 10,
            avg_latency: 10.0,
            initial_deposit: 100,
            slash_bps: 1_000,
            reward_bps: 500,
            byzantine_fraction: 0.0,
            replay_probability: 1.0,
            disconnected_fraction: 0.0,
            epochs: 50,
            seed: 0,
            parallel: false,
            suppress_duplicates: true,
            dynasty_size: None,
        }
    }
}

impl SimulationConfig {
    /// Fail fast on constants no simulation can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_validators == 0 {
            return Err(ConfigError::ZeroValidators);
        }
        if self.epoch_size == 0 {
            return Err(ConfigError::ZeroEpochSize);
        }
        if self.block_period == 0 {
            return Err(ConfigError::ZeroBlockPeriod);
        }
        if self.initial_deposit == 0 {
            return Err(ConfigError::ZeroDeposit);
        }
        if !self.avg_latency.is_finite() || self.avg_latency < 0.0 {
            return Err(ConfigError::InvalidLatency(self.avg_latency));
        }
        for (name, value) in [
            ("byzantine_fraction", self.byzantine_fraction),
            ("replay_probability", self.replay_probability),
            ("disconnected_fraction", self.disconnected_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        for (name, value) in [("slash_bps", self.slash_bps), ("reward_bps", self.reward_bps)] {
            if u64::from(value) > BPS_DENOMINATOR {
                return Err(ConfigError::BasisPointsOutOfRange { name, value });
            }
        }
        if self.epochs == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        if let Some(size) = self.dynasty_size {
            if size == 0 || size > self.num_validators {
                return Err(ConfigError::InvalidDynastySize {
                    size,
                    validators: self.num_validators,
                });
            }
        }
        if self.online_count() == 0 {
            return Err(ConfigError::NoOnlineValidators(self.disconnected_fraction));
        }
        Ok(())
    }

    /// Ticks needed to produce `epochs` epochs of blocks.
    pub fn total_ticks(&self) -> u64 {
        self.block_period * self.epoch_size * self.epochs
    }

    /// `ceil(byzantine_fraction × num_validators)`.
    pub fn byzantine_count(&self) -> usize {
        let count = (self.byzantine_fraction * self.num_validators as f64).ceil() as usize;
        count.min(self.num_validators)
    }

    /// Validators left after the last `floor(disconnected_fraction × N)` are cut off.
    pub fn online_count(&self) -> usize {
        let offline = (self.disconnected_fraction * self.num_validators as f64).floor() as usize;
        self.num_validators.saturating_sub(offline)
    }

    /// Sum of all deposits at genesis, offline validators included.
    pub fn initial_total_deposit(&self) -> Deposit {
        self.initial_deposit * self.num_validators as Deposit
    }
}
