//! Shared fixtures for the scenarios and benchmarks.

use ffg_01_finality::{FinalityConfig, NetworkGateway, SlashingEvidence, Validator};
use ffg_02_network::{FixedLatency, Network};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shared_types::{Block, Deposit, Message, MessageId, SimulationConfig, ValidatorId, ValidatorSet, Vote};
use std::sync::Arc;

pub const EPOCH: u64 = 5;
pub const DEPOSIT: Deposit = 100;

/// Keeps everything a validator sends instead of scheduling it.
#[derive(Debug, Default)]
pub struct CollectingGateway {
    pub total: Deposit,
    pub broadcasts: Vec<Message>,
    pub slashes: Vec<SlashingEvidence>,
    pub rewards: Vec<ValidatorId>,
}

impl CollectingGateway {
    pub fn with_total(total: Deposit) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn votes(&self) -> impl Iterator<Item = &Vote> {
        self.broadcasts.iter().filter_map(|message| match message {
            Message::Vote(vote) => Some(vote),
            Message::Block(_) => None,
        })
    }
}

impl NetworkGateway for CollectingGateway {
    fn broadcast(&mut self, message: Message, _sender: ValidatorId) {
        self.broadcasts.push(message);
    }

    fn report_slash(&mut self, evidence: SlashingEvidence) {
        self.slashes.push(evidence);
    }

    fn report_reward(&mut self, validator: ValidatorId) {
        self.rewards.push(validator);
    }

    fn total_deposit(&self) -> Deposit {
        self.total
    }
}

pub fn finality_config(validators: usize) -> FinalityConfig {
    FinalityConfig {
        epoch_size: EPOCH,
        block_period: 10,
        num_validators: validators,
        initial_deposit: DEPOSIT,
        slash_bps: 1_000,
        reward_bps: 500,
        suppress_duplicates: true,
        dynasty_size: None,
    }
}

pub fn genesis(validators: usize) -> Arc<Block> {
    Arc::new(Block::genesis(MessageId::from_u128(1), ValidatorSet::range(validators)))
}

pub fn validator(id: u32, genesis: &Arc<Block>, config: FinalityConfig) -> Validator {
    Validator::new(
        ValidatorId(id),
        Arc::clone(genesis),
        config,
        ChaCha8Rng::seed_from_u64(u64::from(id)),
    )
}

/// `len` blocks built on `parent`, ids counting up from `first_id`.
pub fn chain(parent: &Arc<Block>, first_id: u128, len: usize) -> Vec<Arc<Block>> {
    let mut blocks: Vec<Arc<Block>> = Vec::with_capacity(len);
    for n in 0..len {
        let tip = blocks.last().unwrap_or(parent);
        let block = Block::child(tip, MessageId::from_u128(first_id + n as u128), EPOCH, ValidatorId(0));
        blocks.push(Arc::new(block));
    }
    blocks
}

/// A network with one-tick latency, so runs are free of forks.
pub fn fast_network(config: SimulationConfig) -> Network {
    Network::new(config)
        .expect("valid config")
        .with_latency_model(Box::new(FixedLatency(1)))
}

pub fn small_config() -> SimulationConfig {
    SimulationConfig {
        num_validators: 10,
        epoch_size: EPOCH,
        block_period: 10,
        epochs: 12,
        seed: 7,
        ..Default::default()
    }
}

/// Every pair of finalized checkpoints lies on one chain.
pub fn assert_finalized_on_one_chain(validator: &Validator) {
    let finalized: Vec<_> = validator.finalized().iter().collect();
    for a in &finalized {
        for b in &finalized {
            assert!(
                validator.is_ancestor(a, b) || validator.is_ancestor(b, a),
                "{} finalized conflicting checkpoints {a} and {b}",
                validator.id()
            );
        }
    }
}
