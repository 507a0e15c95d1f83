//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `MessageId`, `ValidatorId`, `Deposit`
//! - **Chain**: `Block` (checkpoint every `epoch_size` blocks)
//! - **Finality**: `Vote` (a source → target checkpoint link)
//! - **Transport**: `Message`, the closed union the network carries

use crate::ValidatorSet;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Deposit weight in base units.
pub type Deposit = u64;

/// Globally unique identifier shared by blocks and votes.
///
/// Blocks and votes live in one namespace so a validator can suppress
/// duplicates and key its dependency buffer without knowing the message kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(Uuid);

/// Identifier of a block (a `MessageId` that names a block).
pub type BlockId = MessageId;

impl MessageId {
    /// Draw a fresh random id from the given generator.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Build an id from a fixed integer (tests and fixtures).
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self)
    }
}

/// Validator index. Round-robin proposer selection uses it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidatorId(pub u32);

impl ValidatorId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ValidatorId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// An immutable block.
///
/// A block is a checkpoint when its height is a multiple of the epoch size;
/// only checkpoints are voted on, justified or finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Unique id, generated by the proposer.
    pub id: BlockId,
    /// Parent id; `None` only for genesis.
    pub parent_id: Option<BlockId>,
    /// Genesis is 0, otherwise parent height + 1.
    pub height: u64,
    /// `height % epoch_size == 0`.
    pub is_checkpoint: bool,
    /// `height / epoch_size`.
    pub checkpoint_height: u64,
    /// Validator that proposed the block; `None` for genesis.
    pub proposer: Option<ValidatorId>,
    /// Validators eligible to vote with this block as a checkpoint.
    pub validators: ValidatorSet,
    /// Set that takes over once this block's dynasty rotates.
    pub next_validators: ValidatorSet,
}

impl Block {
    /// Create the genesis block (root of every validator's checkpoint tree).
    pub fn genesis(id: BlockId, validators: ValidatorSet) -> Self {
        Self {
            id,
            parent_id: None,
            height: 0,
            is_checkpoint: true,
            checkpoint_height: 0,
            proposer: None,
            next_validators: validators.clone(),
            validators,
        }
    }

    /// Create a child of `parent`, inheriting its validator sets.
    pub fn child(parent: &Block, id: BlockId, epoch_size: u64, proposer: ValidatorId) -> Self {
        let height = parent.height + 1;
        Self {
            id,
            parent_id: Some(parent.id),
            height,
            is_checkpoint: height % epoch_size == 0,
            checkpoint_height: height / epoch_size,
            proposer: Some(proposer),
            validators: parent.validators.clone(),
            next_validators: parent.next_validators.clone(),
        }
    }

    /// Replace the validator sets carried by this block.
    pub fn with_dynasty(mut self, validators: ValidatorSet, next_validators: ValidatorSet) -> Self {
        self.validators = validators;
        self.next_validators = next_validators;
        self
    }

    pub fn is_genesis(&self) -> bool {
        self.parent_id.is_none()
    }
}

// =============================================================================
// CLUSTER C: FINALITY
// =============================================================================

/// A vote for the checkpoint link `source → target`.
///
/// Checkpoint heights are cached on the vote so slashing checks never need
/// the referenced blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: MessageId,
    pub source_id: BlockId,
    pub target_id: BlockId,
    pub source_height: u64,
    pub target_height: u64,
    pub validator_id: ValidatorId,
    /// Weight this vote contributes when valid.
    pub deposit: Deposit,
}

impl Vote {
    pub fn new(
        id: MessageId,
        source: &Block,
        target: &Block,
        validator_id: ValidatorId,
        deposit: Deposit,
    ) -> Self {
        Self {
            id,
            source_id: source.id,
            target_id: target.id,
            source_height: source.checkpoint_height,
            target_height: target.checkpoint_height,
            validator_id,
            deposit,
        }
    }

    /// Same link, new id. Defeats duplicate suppression on purpose.
    pub fn replayed(&self, id: MessageId) -> Self {
        Self { id, ..self.clone() }
    }

    /// Slashing condition 1: two votes with the same target height.
    pub fn is_double_vote(&self, other: &Vote) -> bool {
        self.target_height == other.target_height
    }

    /// Slashing condition 2: either interval strictly contains the other.
    pub fn is_surround_vote(&self, other: &Vote) -> bool {
        (other.source_height < self.source_height && other.target_height > self.target_height)
            || (other.source_height > self.source_height
                && other.target_height < self.target_height)
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}→{} ({}→{})",
            self.validator_id, self.source_height, self.target_height, self.source_id, self.target_id
        )
    }
}

// =============================================================================
// CLUSTER D: TRANSPORT
// =============================================================================

/// Kind tag for logging and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Block,
    Vote,
}

/// Everything the network carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Block(Arc<Block>),
    Vote(Vote),
}

impl Message {
    pub fn id(&self) -> MessageId {
        match self {
            Message::Block(block) => block.id,
            Message::Vote(vote) => vote.id,
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Block(_) => MessageKind::Block,
            Message::Vote(_) => MessageKind::Vote,
        }
    }

    pub fn as_block(&self) -> Option<&Arc<Block>> {
        match self {
            Message::Block(block) => Some(block),
            Message::Vote(_) => None,
        }
    }
}

impl From<Arc<Block>> for Message {
    fn from(block: Arc<Block>) -> Self {
        Message::Block(block)
    }
}

impl From<Block> for Message {
    fn from(block: Block) -> Self {
        Message::Block(Arc::new(block))
    }
}

impl From<Vote> for Message {
    fn from(vote: Vote) -> Self {
        Message::Vote(vote)
    }
}
