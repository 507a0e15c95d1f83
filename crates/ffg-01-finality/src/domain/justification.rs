//! Justification and finalization accounting.

use shared_types::{Block, BlockId, Deposit};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Effect of one vote's weight on its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkUpdate {
    /// Weight before this vote
    pub before: Deposit,
    /// Weight after this vote
    pub after: Deposit,
    /// `⌊2·total/3⌋` at the time of the vote
    pub threshold: Deposit,
}

impl LinkUpdate {
    /// Link now has a supermajority.
    pub fn is_supermajority(&self) -> bool {
        self.after > self.threshold
    }

    /// This vote is the one that pushed the link over the threshold.
    pub fn crossed(&self) -> bool {
        self.before <= self.threshold && self.after > self.threshold
    }
}

/// Supermajority threshold: weight must be strictly greater than this.
pub fn supermajority_threshold(total_deposit: Deposit) -> Deposit {
    total_deposit.saturating_mul(2) / 3
}

/// Link weights and the justified/finalized sets of one validator.
#[derive(Debug)]
pub struct JustificationTracker {
    vote_weight: HashMap<(BlockId, BlockId), Deposit>,
    justified: HashSet<BlockId>,
    finalized: HashSet<BlockId>,
    highest_justified: Arc<Block>,
}

impl JustificationTracker {
    /// Genesis starts justified and finalized.
    pub fn new(genesis: Arc<Block>) -> Self {
        Self {
            vote_weight: HashMap::new(),
            justified: HashSet::from([genesis.id]),
            finalized: HashSet::from([genesis.id]),
            highest_justified: genesis,
        }
    }

    /// Add `deposit` to the `source → target` link.
    pub fn add_weight(
        &mut self,
        source: BlockId,
        target: BlockId,
        deposit: Deposit,
        total_deposit: Deposit,
    ) -> LinkUpdate {
        let weight = self.vote_weight.entry((source, target)).or_default();
        let before = *weight;
        *weight = weight.saturating_add(deposit);
        LinkUpdate {
            before,
            after: *weight,
            threshold: supermajority_threshold(total_deposit),
        }
    }

    pub fn link_weight(&self, source: &BlockId, target: &BlockId) -> Deposit {
        self.vote_weight.get(&(*source, *target)).copied().unwrap_or(0)
    }

    /// Mark `target` justified. Returns `true` if it was not already.
    pub fn justify(&mut self, target: BlockId) -> bool {
        self.justified.insert(target)
    }

    /// Mark `source` finalized. Returns `true` if it was not already.
    pub fn finalize(&mut self, source: BlockId) -> bool {
        self.finalized.insert(source)
    }

    /// Replace the highest justified checkpoint if `candidate` is higher.
    pub fn raise_highest(&mut self, candidate: &Arc<Block>) -> bool {
        if candidate.checkpoint_height > self.highest_justified.checkpoint_height {
            self.highest_justified = Arc::clone(candidate);
            true
        } else {
            false
        }
    }

    pub fn is_justified(&self, id: &BlockId) -> bool {
        self.justified.contains(id)
    }

    pub fn is_finalized(&self, id: &BlockId) -> bool {
        self.finalized.contains(id)
    }

    pub fn highest_justified(&self) -> &Arc<Block> {
        &self.highest_justified
    }

    pub fn justified(&self) -> &HashSet<BlockId> {
        &self.justified
    }

    pub fn finalized(&self) -> &HashSet<BlockId> {
        &self.finalized
    }
}
