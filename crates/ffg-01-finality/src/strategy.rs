//! # Vote Strategies
//!
//! The step between "this validator decided to vote" and "this vote goes out"
//! is pluggable, so Byzantine behavior can be swapped in without touching the
//! engine.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use shared_types::{MessageId, Vote};
use std::fmt::Debug;

/// Decides which vote is actually broadcast.
pub trait VoteStrategy: Send + Sync + Debug {
    /// Given the freshly built honest vote and every vote cast so far,
    /// return the vote to broadcast.
    fn select(&mut self, fresh: Vote, history: &[Vote], rng: &mut dyn RngCore) -> Vote;

    fn is_byzantine(&self) -> bool {
        false
    }
}

/// Always casts the fresh vote.
#[derive(Debug, Default, Clone, Copy)]
pub struct Honest;

impl VoteStrategy for Honest {
    fn select(&mut self, fresh: Vote, _history: &[Vote], _rng: &mut dyn RngCore) -> Vote {
        fresh
    }
}

/// With `probability`, rebroadcasts a random earlier vote under a new id.
///
/// The replay keeps its stale source/target heights, so every honest
/// recipient sees a second vote for an already-voted target height.
#[derive(Debug, Clone, Copy)]
pub struct ReplayStrategy {
    probability: f64,
}

impl ReplayStrategy {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl Default for ReplayStrategy {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl VoteStrategy for ReplayStrategy {
    fn select(&mut self, fresh: Vote, history: &[Vote], rng: &mut dyn RngCore) -> Vote {
        if history.is_empty() || !rng.gen_bool(self.probability) {
            return fresh;
        }
        match history.choose(rng) {
            Some(past) => past.replayed(MessageId::random(rng)),
            None => fresh,
        }
    }

    fn is_byzantine(&self) -> bool {
        true
    }
}
