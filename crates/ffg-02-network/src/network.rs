//! Simulated network with per-destination latency, partitions and
//! deterministic scheduling.

use crate::error::NetworkError;
use crate::latency::{ExponentialLatency, LatencyModel};
use crate::ledger::{DepositLedger, Settlement};
use crate::outbox::Outbox;
use ffg_01_finality::{FinalityConfig, ReplayStrategy, Validator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use shared_types::{Block, Deposit, Message, MessageId, SimulationConfig, ValidatorId, ValidatorSet};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub time: u64,
    /// Messages handed to validators
    pub delivered: usize,
    /// Blocks proposed this tick
    pub proposed: usize,
    /// Messages put on the wire
    pub scheduled: usize,
    pub settlement: Settlement,
}

/// Owns the validators, the clock and every message in flight.
#[derive(Debug)]
pub struct Network {
    config: SimulationConfig,
    validators: Vec<Validator>,
    /// Offline validators receive nothing and never propose
    online: Vec<bool>,
    /// Delivery time -> (destination, message) in scheduling order
    schedule: BTreeMap<u64, Vec<(ValidatorId, Message)>>,
    latency: Box<dyn LatencyModel>,
    ledger: DepositLedger,
    rng: ChaCha8Rng,
    genesis: Arc<Block>,
    time: u64,
}

impl Network {
    /// Validate `config` and build the genesis block and every validator.
    ///
    /// The network draws from RNG stream 0 and validator `i` from stream
    /// `i + 1`, all seeded from `config.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self, NetworkError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        rng.set_stream(0);

        let pool = ValidatorSet::range(config.num_validators);
        let genesis_id = MessageId::random(&mut rng);
        let mut genesis = Block::genesis(genesis_id, pool.clone());
        if let Some(size) = config.dynasty_size {
            let next = ValidatorSet::derive_next(genesis_id, &pool, size);
            genesis = genesis.with_dynasty(pool.clone(), next);
        }
        let genesis = Arc::new(genesis);

        let finality = FinalityConfig::from(&config);
        let byzantine = config.byzantine_count();
        let online_count = config.online_count();

        let validators = (0..config.num_validators)
            .map(|index| {
                let mut validator_rng = ChaCha8Rng::seed_from_u64(config.seed);
                validator_rng.set_stream(index as u64 + 1);
                let validator = Validator::new(
                    ValidatorId::from(index),
                    Arc::clone(&genesis),
                    finality.clone(),
                    validator_rng,
                );
                if index < byzantine {
                    validator.with_strategy(Box::new(ReplayStrategy::new(config.replay_probability)))
                } else {
                    validator
                }
            })
            .collect();

        info!(
            validators = config.num_validators,
            byzantine,
            online = online_count,
            genesis = %genesis.id,
            seed = config.seed,
            "network initialised"
        );

        Ok(Self {
            online: (0..config.num_validators).map(|i| i < online_count).collect(),
            ledger: DepositLedger::new(config.initial_total_deposit()),
            latency: Box::new(ExponentialLatency::new(config.avg_latency)),
            schedule: BTreeMap::new(),
            validators,
            rng,
            genesis,
            time: 0,
            config,
        })
    }

    /// Replace the latency model.
    pub fn with_latency_model(mut self, latency: Box<dyn LatencyModel>) -> Self {
        self.latency = latency;
        self
    }

    /// Queue `message` for `destination` at absolute time `at`.
    pub fn schedule(&mut self, at: u64, destination: ValidatorId, message: Message) -> Result<(), NetworkError> {
        if destination.index() >= self.validators.len() {
            return Err(NetworkError::UnknownDestination(destination));
        }
        if at < self.time {
            return Err(NetworkError::ScheduledInPast { at, now: self.time });
        }
        self.schedule.entry(at).or_default().push((destination, message));
        Ok(())
    }

    /// Run `config.total_ticks()` ticks.
    pub fn run(&mut self) {
        self.run_for(self.config.total_ticks());
    }

    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Advance the clock by one tick.
    pub fn tick(&mut self) -> TickReport {
        let time = self.time;
        let total = self.ledger.total();
        let mut report = TickReport {
            time,
            ..Default::default()
        };

        // Deliver
        let mut inboxes: Vec<Vec<Message>> = vec![Vec::new(); self.validators.len()];
        for (destination, message) in self.schedule.remove(&time).unwrap_or_default() {
            if let Some(inbox) = inboxes.get_mut(destination.index()) {
                inbox.push(message);
                report.delivered += 1;
            }
        }
        let mut outboxes: Vec<Outbox> = (0..self.validators.len()).map(|_| Outbox::new(total)).collect();

        let deliver = |(validator, (inbox, outbox)): (&mut Validator, (Vec<Message>, &mut Outbox))| {
            for message in inbox {
                validator.deliver(message, outbox);
            }
        };
        if self.config.parallel {
            self.validators
                .par_iter_mut()
                .zip(inboxes.into_par_iter().zip(outboxes.par_iter_mut()))
                .for_each(deliver);
        } else {
            self.validators
                .iter_mut()
                .zip(inboxes.into_iter().zip(outboxes.iter_mut()))
                .for_each(deliver);
        }

        // Advance
        for ((validator, outbox), online) in self.validators.iter_mut().zip(outboxes.iter_mut()).zip(&self.online) {
            if *online && validator.on_tick(time, outbox).is_some() {
                report.proposed += 1;
            }
        }

        // Drain
        for outbox in outboxes {
            for (message, sender) in outbox.broadcasts {
                report.scheduled += self.broadcast(message, sender);
            }
            for evidence in outbox.slashes {
                self.ledger.report_slash(evidence.validator());
            }
            for validator in outbox.rewards {
                self.ledger.report_reward(validator);
            }
        }

        // Settle
        report.settlement = self.ledger.settle(&mut self.validators);

        debug!(
            time,
            delivered = report.delivered,
            proposed = report.proposed,
            scheduled = report.scheduled,
            "tick complete"
        );
        self.time += 1;
        report
    }

    /// Fan `message` out to every online validator except `sender`.
    fn broadcast(&mut self, message: Message, sender: ValidatorId) -> usize {
        let mut scheduled = 0;
        for (index, online) in self.online.iter().enumerate() {
            let destination = ValidatorId::from(index);
            if !*online || destination == sender {
                continue;
            }
            let delay = self.latency.sample(&mut self.rng);
            self.schedule
                .entry(self.time + delay)
                .or_default()
                .push((destination, message.clone()));
            scheduled += 1;
        }
        scheduled
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn genesis(&self) -> &Arc<Block> {
        &self.genesis
    }

    /// Network-wide sum of deposits.
    pub fn total_deposit(&self) -> Deposit {
        self.ledger.total()
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn validator(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.get(id.index())
    }

    pub fn is_online(&self, id: ValidatorId) -> bool {
        self.online.get(id.index()).copied().unwrap_or(false)
    }

    /// Online validators, in id order.
    pub fn online_validators(&self) -> impl Iterator<Item = &Validator> {
        self.validators
            .iter()
            .zip(&self.online)
            .filter_map(|(validator, online)| online.then_some(validator))
    }

    /// Messages scheduled but not yet delivered.
    pub fn in_flight(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }
}
