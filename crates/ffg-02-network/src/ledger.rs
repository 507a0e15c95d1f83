//! # Deposit Ledger
//!
//! Network-wide deposit total and the per-tick economic reports.
//!
//! Reports are sets: several honest validators catching the same offender in
//! one tick produce a single penalty. Rewards settle before slashes, and the
//! total moves by exactly the amount each validator's deposit moved.

use ffg_01_finality::Validator;
use shared_types::{Deposit, ValidatorId};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// What one settlement moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub rewarded: Vec<(ValidatorId, Deposit)>,
    pub slashed: Vec<(ValidatorId, Deposit)>,
}

impl Settlement {
    pub fn is_empty(&self) -> bool {
        self.rewarded.is_empty() && self.slashed.is_empty()
    }
}

#[derive(Debug)]
pub struct DepositLedger {
    total: Deposit,
    to_reward: BTreeSet<ValidatorId>,
    to_slash: BTreeSet<ValidatorId>,
}

impl DepositLedger {
    pub fn new(total: Deposit) -> Self {
        Self {
            total,
            to_reward: BTreeSet::new(),
            to_slash: BTreeSet::new(),
        }
    }

    pub fn total(&self) -> Deposit {
        self.total
    }

    pub fn report_reward(&mut self, validator: ValidatorId) {
        self.to_reward.insert(validator);
    }

    pub fn report_slash(&mut self, offender: ValidatorId) {
        self.to_slash.insert(offender);
    }

    /// Apply this tick's reports to `validators` and clear them.
    pub fn settle(&mut self, validators: &mut [Validator]) -> Settlement {
        let mut settlement = Settlement::default();

        for id in std::mem::take(&mut self.to_reward) {
            let Some(validator) = validators.get_mut(id.index()) else {
                warn!(validator = %id, "reward for unknown validator ignored");
                continue;
            };
            let amount = validator.reward();
            self.total = self.total.saturating_add(amount);
            info!(validator = %id, amount, total = self.total, "reward applied");
            settlement.rewarded.push((id, amount));
        }

        for id in std::mem::take(&mut self.to_slash) {
            let Some(validator) = validators.get_mut(id.index()) else {
                warn!(validator = %id, "slash for unknown validator ignored");
                continue;
            };
            let amount = validator.slash();
            self.total -= amount;
            info!(validator = %id, amount, total = self.total, "slash applied");
            settlement.slashed.push((id, amount));
        }

        settlement
    }
}
