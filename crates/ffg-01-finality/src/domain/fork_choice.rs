//! # Fork Choice
//!
//! "Highest justified checkpoint, longest chain beneath it."
//!
//! ## Fast path
//!
//! A new block whose checkpoint descends from the highest justified
//! checkpoint extends the head if it is strictly higher.
//!
//! ## Slow path
//!
//! Otherwise every tail is scanned, keeping those whose checkpoint descends
//! from the highest justified checkpoint, and the highest one wins (ties go
//! to the smallest checkpoint id). The head never regresses to a shorter
//! chain while it is still under the highest justified checkpoint.

use super::CheckpointTree;
use shared_types::{Block, BlockId};
use std::sync::Arc;

/// Current chain tip of one validator.
#[derive(Debug, Clone)]
pub struct ForkChoice {
    head: Arc<Block>,
}

impl ForkChoice {
    pub fn new(genesis: Arc<Block>) -> Self {
        Self { head: genesis }
    }

    pub fn head(&self) -> &Arc<Block> {
        &self.head
    }

    /// Update the head after `block` has been recorded in `tree`.
    pub fn on_block(&mut self, tree: &CheckpointTree, justified: &BlockId, block: &Arc<Block>) {
        let under_justified = tree
            .checkpoint_of(&block.id)
            .is_some_and(|checkpoint| tree.is_ancestor(justified, &checkpoint));

        if under_justified && self.head_is_under(tree, justified) {
            if block.height > self.head.height {
                self.head = Arc::clone(block);
            }
        } else {
            self.recompute(tree, justified);
        }
    }

    /// Re-derive the head from every known tail.
    ///
    /// Called directly whenever the highest justified checkpoint moves.
    pub fn recompute(&mut self, tree: &CheckpointTree, justified: &BlockId) {
        let best = tree
            .tails()
            .filter(|(checkpoint, _)| tree.is_ancestor(justified, checkpoint))
            .min_by(|(a_id, a_tail), (b_id, b_tail)| {
                b_tail.height.cmp(&a_tail.height).then_with(|| a_id.cmp(b_id))
            })
            .map(|(_, tail)| Arc::clone(tail));

        let Some(best) = best else {
            return;
        };

        if !self.head_is_under(tree, justified) || best.height > self.head.height {
            self.head = best;
        }
    }

    fn head_is_under(&self, tree: &CheckpointTree, justified: &BlockId) -> bool {
        tree.checkpoint_of(&self.head.id)
            .is_some_and(|checkpoint| tree.is_ancestor(justified, &checkpoint))
    }
}
