//! # Slashing Database (Casper Rules Enforcer)
//!
//! Enforces Casper commandments against every vote accepted from a validator.
//!
//! ## The Two Commandments
//!
//! 1. No Double Vote: never two votes with the same target height
//! 2. No Surround Vote: never a vote whose `(source, target)` interval strictly
//!    contains, or is strictly contained by, an earlier one
//!
//! The full history is scanned, so detection does not depend on the order in
//! which the two offending votes arrive.

use shared_types::{BlockId, ValidatorId, Vote};
use std::collections::HashMap;
use std::fmt;

/// Slashing evidence reported to the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlashingEvidence {
    /// Two votes for the same target height
    DoubleVote {
        validator: ValidatorId,
        target_height: u64,
        first_target: BlockId,
        second_target: BlockId,
    },
    /// One vote surrounds another
    SurroundVote {
        validator: ValidatorId,
        inner_source: u64,
        inner_target: u64,
        outer_source: u64,
        outer_target: u64,
    },
}

impl SlashingEvidence {
    pub fn validator(&self) -> ValidatorId {
        match self {
            Self::DoubleVote { validator, .. } => *validator,
            Self::SurroundVote { validator, .. } => *validator,
        }
    }

    /// Label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DoubleVote { .. } => "double_vote",
            Self::SurroundVote { .. } => "surround_vote",
        }
    }
}

impl fmt::Display for SlashingEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleVote {
                validator,
                target_height,
                first_target,
                second_target,
            } => write!(
                f,
                "{validator} double vote at height {target_height} ({first_target} / {second_target})"
            ),
            Self::SurroundVote {
                validator,
                inner_source,
                inner_target,
                outer_source,
                outer_target,
            } => write!(
                f,
                "{validator} surround vote {outer_source}→{outer_target} around {inner_source}→{inner_target}"
            ),
        }
    }
}

/// Accepted votes per validator.
#[derive(Debug, Default)]
pub struct SlashingDb {
    records: HashMap<ValidatorId, Vec<Vote>>,
}

impl SlashingDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a commandment the vote would break, without recording it.
    pub fn check(&self, vote: &Vote) -> Option<SlashingEvidence> {
        let history = self.records.get(&vote.validator_id)?;
        history.iter().find_map(|past| Self::conflict(past, vote))
    }

    /// Check `vote` and record it if it is clean.
    ///
    /// Returns `Some(SlashingEvidence)` if the vote violates Casper rules; the
    /// offending vote is not recorded.
    pub fn check_and_record(&mut self, vote: &Vote) -> Option<SlashingEvidence> {
        if let Some(evidence) = self.check(vote) {
            return Some(evidence);
        }
        self.records
            .entry(vote.validator_id)
            .or_default()
            .push(vote.clone());
        None
    }

    /// Votes accepted from a validator, in acceptance order.
    pub fn history(&self, validator: &ValidatorId) -> &[Vote] {
        self.records.get(validator).map(Vec::as_slice).unwrap_or_default()
    }

    fn conflict(past: &Vote, new: &Vote) -> Option<SlashingEvidence> {
        // Commandment 1: No Double Vote
        if past.is_double_vote(new) {
            return Some(SlashingEvidence::DoubleVote {
                validator: new.validator_id,
                target_height: new.target_height,
                first_target: past.target_id,
                second_target: new.target_id,
            });
        }

        // Commandment 2: No Surround Vote
        if !past.is_surround_vote(new) {
            return None;
        }
        let (inner, outer) = if past.source_height < new.source_height {
            (new, past)
        } else {
            (past, new)
        };
        Some(SlashingEvidence::SurroundVote {
            validator: new.validator_id,
            inner_source: inner.source_height,
            inner_target: inner.target_height,
            outer_source: outer.source_height,
            outer_target: outer.target_height,
        })
    }
}
