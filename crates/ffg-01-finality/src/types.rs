use crate::error::VoteRejection;
use shared_types::{config::BPS_DENOMINATOR, Deposit, MessageId, SimulationConfig};

/// Finality configuration
#[derive(Clone, Debug)]
pub struct FinalityConfig {
    /// Blocks per epoch (checkpoint interval)
    pub epoch_size: u64,
    /// Ticks between block proposals
    pub block_period: u64,
    /// Number of validators taking turns as proposer
    pub num_validators: usize,
    /// Deposit at genesis
    pub initial_deposit: Deposit,
    /// Slash penalty in basis points (100 = 1%)
    pub slash_bps: u32,
    /// Reward in basis points
    pub reward_bps: u32,
    /// Drop messages whose id was already received
    pub suppress_duplicates: bool,
    /// Rotate validator sets to a derived subset of this size
    pub dynasty_size: Option<usize>,
}

impl Default for FinalityConfig {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for FinalityConfig {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            epoch_size: config.epoch_size,
            block_period: config.block_period,
            num_validators: config.num_validators,
            initial_deposit: config.initial_deposit,
            slash_bps: config.slash_bps,
            reward_bps: config.reward_bps,
            suppress_duplicates: config.suppress_duplicates,
            dynasty_size: config.dynasty_size,
        }
    }
}

impl FinalityConfig {
    /// Apply a basis-point fraction to a deposit, rounding down.
    pub fn fraction_of(deposit: Deposit, bps: u32) -> Deposit {
        let amount = u128::from(deposit) * u128::from(bps) / u128::from(BPS_DENOMINATOR);
        Deposit::try_from(amount).unwrap_or(Deposit::MAX)
    }
}

/// Result of handing one message to a validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Applied and recorded in `received`
    Accepted,
    /// Id already received; nothing changed
    Duplicate,
    /// Parked until `missing` is accepted
    Pending { missing: MessageId },
    /// Dropped for good
    Rejected(VoteRejection),
}

impl DeliveryOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
