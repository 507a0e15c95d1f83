//! Per-validator gateway handed out for one tick.

use ffg_01_finality::{NetworkGateway, SlashingEvidence};
use shared_types::{Deposit, Message, ValidatorId};

/// Collects everything one validator says during a tick.
#[derive(Debug, Default)]
pub struct Outbox {
    total_deposit: Deposit,
    pub(crate) broadcasts: Vec<(Message, ValidatorId)>,
    pub(crate) slashes: Vec<SlashingEvidence>,
    pub(crate) rewards: Vec<ValidatorId>,
}

impl Outbox {
    /// Empty outbox seeing `total_deposit` as of the start of the tick.
    pub fn new(total_deposit: Deposit) -> Self {
        Self {
            total_deposit,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.broadcasts.is_empty() && self.slashes.is_empty() && self.rewards.is_empty()
    }
}

impl NetworkGateway for Outbox {
    fn broadcast(&mut self, message: Message, sender: ValidatorId) {
        self.broadcasts.push((message, sender));
    }

    fn report_slash(&mut self, evidence: SlashingEvidence) {
        self.slashes.push(evidence);
    }

    fn report_reward(&mut self, validator: ValidatorId) {
        self.rewards.push(validator);
    }

    fn total_deposit(&self) -> Deposit {
        self.total_deposit
    }
}
