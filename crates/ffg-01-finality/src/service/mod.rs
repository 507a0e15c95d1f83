//! Finality Service - the per-validator consensus engine
//!
//! `Validator` owns every piece of state one participant keeps. It is driven
//! through two entry points only: [`Validator::deliver`] for incoming
//! messages and [`Validator::on_tick`] for its proposer turn. Everything else
//! is a read-only query.

mod ingest;
mod voting;


use crate::domain::{CheckpointTree, DependencyBuffer, ForkChoice, JustificationTracker, SlashingDb};
use crate::ports::NetworkGateway;
use crate::strategy::{Honest, VoteStrategy};
use crate::types::FinalityConfig;
use rand_chacha::ChaCha8Rng;
use shared_types::{
    Block, BlockId, Deposit, Message, MessageId, ValidatorId, ValidatorSet, Vote,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One validator's view of the chain and of finality.
#[derive(Debug)]
pub struct Validator {
    id: ValidatorId,
    config: FinalityConfig,
    deposit: Deposit,
    /// Every accepted message, blocks and votes in one id namespace
    received: HashMap<MessageId, Message>,
    buffer: DependencyBuffer,
    tree: CheckpointTree,
    fork_choice: ForkChoice,
    justification: JustificationTracker,
    slashing_db: SlashingDb,
    /// Highest checkpoint height this validator has voted for
    current_epoch: u64,
    cast_votes: Vec<Vote>,
    proposed_blocks: u64,
    strategy: Box<dyn VoteStrategy>,
    rng: ChaCha8Rng,
    /// Candidates for dynasty derivation
    pool: ValidatorSet,
}

impl Validator {
    /// Create an honest validator that knows only `genesis`.
    pub fn new(
        id: ValidatorId,
        genesis: Arc<Block>,
        config: FinalityConfig,
        rng: ChaCha8Rng,
    ) -> Self {
        let mut received = HashMap::new();
        received.insert(genesis.id, Message::Block(Arc::clone(&genesis)));

        Self {
            id,
            deposit: config.initial_deposit,
            pool: ValidatorSet::range(config.num_validators),
            config,
            received,
            buffer: DependencyBuffer::new(),
            tree: CheckpointTree::new(Arc::clone(&genesis)),
            fork_choice: ForkChoice::new(Arc::clone(&genesis)),
            justification: JustificationTracker::new(genesis),
            slashing_db: SlashingDb::new(),
            current_epoch: 0,
            cast_votes: Vec::new(),
            proposed_blocks: 0,
            strategy: Box::new(Honest),
            rng,
        }
    }

    /// Swap the vote-emission strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn VoteStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    // =========================================================================
    // Proposer
    // =========================================================================

    /// Round-robin turn: `time % period == 0` and `(time / period) % N == id`.
    pub fn is_proposer(&self, time: u64) -> bool {
        let period = self.config.block_period;
        let validators = self.config.num_validators as u64;
        period > 0
            && validators > 0
            && time % period == 0
            && (time / period) % validators == u64::from(self.id.0)
    }

    /// Per-tick hook. Proposes a block on the head when it is our turn.
    pub fn on_tick(&mut self, time: u64, gateway: &mut dyn NetworkGateway) -> Option<Arc<Block>> {
        if !self.is_proposer(time) {
            return None;
        }

        let block = Arc::new(self.build_block());
        self.proposed_blocks += 1;
        tracing::debug!(
            validator = %self.id,
            block = %block.id,
            height = block.height,
            time,
            "proposing block"
        );

        gateway.broadcast(Message::Block(Arc::clone(&block)), self.id);
        self.deliver(Message::Block(Arc::clone(&block)), gateway);
        Some(block)
    }

    fn build_block(&mut self) -> Block {
        let parent = Arc::clone(self.fork_choice.head());
        let id = MessageId::random(&mut self.rng);
        let block = Block::child(&parent, id, self.config.epoch_size, self.id);

        match self.config.dynasty_size {
            Some(size) if block.is_checkpoint && self.dynasty_finalized(&parent) => {
                let next = ValidatorSet::derive_next(id, &self.pool, size);
                block.with_dynasty(parent.next_validators.clone(), next)
            }
            _ => block,
        }
    }

    /// Whether any checkpoint voted on by `parent`'s validator set, back to
    /// where that set took over, is finalized.
    fn dynasty_finalized(&self, parent: &Block) -> bool {
        let mut checkpoint = self.tree.checkpoint_of(&parent.id);
        while let Some(id) = checkpoint {
            if self.justification.is_finalized(&id) {
                return true;
            }
            checkpoint = self.tree.checkpoint_parent(&id).filter(|previous| {
                self.tree
                    .get(previous)
                    .is_some_and(|block| block.validators == parent.validators)
            });
        }
        false
    }

    // =========================================================================
    // Economics
    // =========================================================================

    /// Apply one slash penalty. Returns the amount removed.
    pub fn slash(&mut self) -> Deposit {
        let amount = FinalityConfig::fraction_of(self.deposit, self.config.slash_bps);
        self.deposit -= amount;
        amount
    }

    /// Apply one reward. Returns the amount added.
    pub fn reward(&mut self) -> Deposit {
        let amount = FinalityConfig::fraction_of(self.deposit, self.config.reward_bps)
            .min(Deposit::MAX - self.deposit);
        self.deposit += amount;
        amount
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> ValidatorId {
        self.id
    }

    pub fn deposit(&self) -> Deposit {
        self.deposit
    }

    pub fn head(&self) -> &Arc<Block> {
        self.fork_choice.head()
    }

    pub fn highest_justified_checkpoint(&self) -> &Arc<Block> {
        self.justification.highest_justified()
    }

    pub fn is_justified(&self, id: &BlockId) -> bool {
        self.justification.is_justified(id)
    }

    pub fn is_finalized(&self, id: &BlockId) -> bool {
        self.justification.is_finalized(id)
    }

    pub fn justified(&self) -> &HashSet<BlockId> {
        self.justification.justified()
    }

    pub fn finalized(&self) -> &HashSet<BlockId> {
        self.justification.finalized()
    }

    /// Nearest checkpoint strictly above `block`; `None` at genesis.
    pub fn checkpoint_parent(&self, block: &Block) -> Option<Arc<Block>> {
        let parent = block.parent_id?;
        let checkpoint = self.tree.checkpoint_of(&parent)?;
        self.tree.get(&checkpoint).cloned()
    }

    /// Every block accepted so far, genesis included.
    pub fn received_blocks(&self) -> impl Iterator<Item = (&BlockId, &Arc<Block>)> {
        self.tree.blocks()
    }

    pub fn has_received(&self, id: &MessageId) -> bool {
        self.received.contains_key(id)
    }

    /// Source ⊑ target, both checkpoints.
    pub fn is_ancestor(&self, ancestor: &BlockId, descendant: &BlockId) -> bool {
        self.tree.is_ancestor(ancestor, descendant)
    }

    /// Checkpoint whose epoch group `id` belongs to.
    pub fn checkpoint_of(&self, id: &BlockId) -> Option<BlockId> {
        self.tree.checkpoint_of(id)
    }

    /// Length of the chain ending at the head, genesis counted.
    pub fn main_chain_size(&self) -> u64 {
        self.head().height + 1
    }

    pub fn current_epoch(&self) -> u64 {
        self.current_epoch
    }

    /// Messages still waiting on a missing block.
    pub fn buffered_count(&self) -> usize {
        self.buffer.len()
    }

    /// Votes this validator broadcast, replays included.
    pub fn cast_votes(&self) -> &[Vote] {
        &self.cast_votes
    }

    pub fn proposed_blocks(&self) -> u64 {
        self.proposed_blocks
    }

    pub fn is_byzantine(&self) -> bool {
        self.strategy.is_byzantine()
    }

    /// Accumulated deposit behind `source → target`.
    pub fn link_weight(&self, source: &BlockId, target: &BlockId) -> Deposit {
        self.justification.link_weight(source, target)
    }

    /// Votes accepted from `validator`, in acceptance order.
    pub fn vote_history(&self, validator: &ValidatorId) -> &[Vote] {
        self.slashing_db.history(validator)
    }
}
