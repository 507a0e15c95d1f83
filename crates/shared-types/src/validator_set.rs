//! Validator sets carried by blocks.
//!
//! The base design uses one static set for every epoch. The dynasty variant
//! derives a block's `next_validators` deterministically from its id.

use crate::{MessageId, ValidatorId};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Sorted, de-duplicated, cheaply clonable set of validator ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidatorSet(Arc<[ValidatorId]>);

impl ValidatorSet {
    pub fn new(ids: impl IntoIterator<Item = ValidatorId>) -> Self {
        let mut ids: Vec<ValidatorId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids.into())
    }

    /// `{v0, …, v(count-1)}`.
    pub fn range(count: usize) -> Self {
        Self::new((0..count).map(ValidatorId::from))
    }

    pub fn contains(&self, id: &ValidatorId) -> bool {
        self.0.binary_search(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidatorId> {
        self.0.iter()
    }

    /// Derive the next dynasty from `pool` using `seed` as the only entropy.
    ///
    /// Same seed, same pool, same size: same set, on every validator.
    pub fn derive_next(seed: MessageId, pool: &ValidatorSet, size: usize) -> Self {
        let mut key = [0u8; 32];
        key[..16].copy_from_slice(seed.as_bytes());
        let mut rng = ChaCha8Rng::from_seed(key);

        let mut ids: Vec<ValidatorId> = pool.0.to_vec();
        ids.shuffle(&mut rng);
        ids.truncate(size.min(pool.len()));
        Self::new(ids)
    }
}
