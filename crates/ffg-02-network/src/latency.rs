//! Per-message latency models.

use rand::{Rng, RngCore};
use rand_distr::Exp1;
use std::fmt::Debug;

/// Draws the delay, in ticks, for one message to one destination.
pub trait LatencyModel: Send + Sync + Debug {
    /// Always at least 1, so nothing is delivered in the tick it was sent.
    fn sample(&self, rng: &mut dyn RngCore) -> u64;
}

/// `1 + floor(Exp(1) × avg)`.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialLatency {
    avg: f64,
}

impl ExponentialLatency {
    pub fn new(avg: f64) -> Self {
        Self { avg: avg.max(0.0) }
    }
}

impl LatencyModel for ExponentialLatency {
    fn sample(&self, rng: &mut dyn RngCore) -> u64 {
        let draw: f64 = rng.sample(Exp1);
        1 + (draw * self.avg).floor() as u64
    }
}

/// Same delay for every message.
#[derive(Debug, Clone, Copy)]
pub struct FixedLatency(pub u64);

impl LatencyModel for FixedLatency {
    fn sample(&self, _rng: &mut dyn RngCore) -> u64 {
        self.0.max(1)
    }
}
