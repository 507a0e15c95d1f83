//! Error types for the simulated network

use shared_types::{ConfigError, ValidatorId};
use thiserror::Error;

/// Misuse of the network's public scheduling API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Simulation constants failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// No validator with this id is registered
    #[error("unknown destination: {0}")]
    UnknownDestination(ValidatorId),

    /// Delivery time already passed
    #[error("cannot schedule at {at}, current time is {now}")]
    ScheduledInPast { at: u64, now: u64 },
}
