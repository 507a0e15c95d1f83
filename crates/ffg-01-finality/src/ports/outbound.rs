//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::SlashingEvidence;
use shared_types::{Deposit, Message, ValidatorId};

/// Everything a validator may ask of the network.
///
/// The network hands each validator its own implementation for the duration
/// of a call, so a validator never holds a reference to the network itself.
pub trait NetworkGateway {
    /// Send `message` to every other validator with independent latency.
    fn broadcast(&mut self, message: Message, sender: ValidatorId);

    /// Report a slashing condition violation by `evidence.validator()`.
    fn report_slash(&mut self, evidence: SlashingEvidence);

    /// Report that `validator`'s vote completed a finalizing link.
    fn report_reward(&mut self, validator: ValidatorId);

    /// Current network-wide sum of deposits.
    ///
    /// Reflects slashes and rewards applied at the end of previous ticks.
    fn total_deposit(&self) -> Deposit;
}
