//! # Error Types
//!
//! Construction-time failures. Nothing here is raised once a simulation is
//! running: protocol violations are outcomes, not errors.

use thiserror::Error;

/// Rejected simulation constants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// At least one validator is required.
    #[error("num_validators must be at least 1")]
    ZeroValidators,

    /// A zero epoch size would make every height divide by zero.
    #[error("epoch_size must be at least 1")]
    ZeroEpochSize,

    /// Proposer rotation needs a non-zero period.
    #[error("block_period must be at least 1")]
    ZeroBlockPeriod,

    /// Validators must start with a positive stake.
    #[error("initial_deposit must be positive")]
    ZeroDeposit,

    /// Average latency must be finite and non-negative.
    #[error("avg_latency must be a finite non-negative number, got {0}")]
    InvalidLatency(f64),

    /// A fraction outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    /// Basis points above 10_000 (100%).
    #[error("{name} must be at most 10000 basis points, got {value}")]
    BasisPointsOutOfRange { name: &'static str, value: u32 },

    /// The run must cover at least one epoch.
    #[error("epochs must be at least 1")]
    ZeroEpochs,

    /// Dynasty size must be within `1..=num_validators`.
    #[error("dynasty_size {size} must be within 1..={validators}")]
    InvalidDynastySize { size: usize, validators: usize },

    /// Partitioning every validator leaves nobody to propose.
    #[error("disconnected_fraction {0} leaves no online validator")]
    NoOnlineValidators(f64),
}
