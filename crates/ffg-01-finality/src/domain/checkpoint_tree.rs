//! # Checkpoint Tree
//!
//! Per-validator index over received blocks.
//!
//! ```text
//!   [G]──b1──b2──b3──b4──[C1]──b6──b7          checkpoint_of(b7)  = C1
//!                          │                    checkpoint_of(C1)  = C1
//!                          └──b6'               checkpoint_parent(C1) = G
//!                                               tail(C1) = b7 (deepest)
//! ```
//!
//! Blocks are stored by id in an arena; parents are ids, never pointers.

use shared_types::{Block, BlockId};
use std::collections::HashMap;
use std::sync::Arc;

/// Nearest-checkpoint mapping plus the deepest known block per checkpoint.
#[derive(Debug, Default)]
pub struct CheckpointTree {
    /// Every recorded block
    blocks: HashMap<BlockId, Arc<Block>>,
    /// Block id -> nearest checkpoint at or above it
    checkpoint_of: HashMap<BlockId, BlockId>,
    /// Checkpoint id -> deepest known block of its epoch group
    tails: HashMap<BlockId, Arc<Block>>,
}

impl CheckpointTree {
    /// Create a tree rooted at `genesis`.
    pub fn new(genesis: Arc<Block>) -> Self {
        let mut tree = Self::default();
        tree.record(genesis);
        tree
    }

    /// Index a block whose parent has already been recorded.
    ///
    /// Returns `false` (and records nothing) if the parent is unknown.
    pub fn record(&mut self, block: Arc<Block>) -> bool {
        let parent_checkpoint = match block.parent_id {
            Some(parent) => match self.checkpoint_of.get(&parent) {
                Some(checkpoint) => Some(*checkpoint),
                None => return false,
            },
            None => None,
        };
        let checkpoint = match parent_checkpoint {
            Some(checkpoint) if !block.is_checkpoint => checkpoint,
            _ => block.id,
        };

        self.checkpoint_of.insert(block.id, checkpoint);
        match self.tails.get(&checkpoint) {
            Some(tail) if tail.height >= block.height => {}
            _ => {
                self.tails.insert(checkpoint, Arc::clone(&block));
            }
        }
        self.blocks.insert(block.id, block);
        true
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&Arc<Block>> {
        self.blocks.get(id)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&BlockId, &Arc<Block>)> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Nearest checkpoint at or above `id`.
    pub fn checkpoint_of(&self, id: &BlockId) -> Option<BlockId> {
        self.checkpoint_of.get(id).copied()
    }

    /// Nearest checkpoint strictly above `id`; `None` at genesis.
    pub fn checkpoint_parent(&self, id: &BlockId) -> Option<BlockId> {
        let parent = self.blocks.get(id)?.parent_id?;
        self.checkpoint_of(&parent)
    }

    /// Deepest known block following checkpoint `id`.
    pub fn tail(&self, id: &BlockId) -> Option<&Arc<Block>> {
        self.tails.get(id)
    }

    /// All `(checkpoint, tail)` pairs.
    pub fn tails(&self) -> impl Iterator<Item = (&BlockId, &Arc<Block>)> {
        self.tails.iter()
    }

    /// True iff checkpoint `ancestor` is `descendant` or lies above it.
    ///
    /// Only meaningful for checkpoint ids; unknown ids yield `false`.
    pub fn is_ancestor(&self, ancestor: &BlockId, descendant: &BlockId) -> bool {
        let Some(floor) = self.blocks.get(ancestor).map(|b| b.checkpoint_height) else {
            return false;
        };

        let mut current = *descendant;
        loop {
            if current == *ancestor {
                return true;
            }
            match self.blocks.get(&current) {
                Some(block) if block.checkpoint_height > floor => {}
                _ => return false,
            }
            match self.checkpoint_parent(&current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}
