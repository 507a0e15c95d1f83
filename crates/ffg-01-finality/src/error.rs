//! Error types for Finality subsystem
//!
//! A rejected vote is an expected outcome, never a failure of the simulation.

use crate::domain::SlashingEvidence;
use shared_types::{BlockId, ValidatorId};
use thiserror::Error;

/// Why a vote was permanently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteRejection {
    /// Source checkpoint was not justified when the vote arrived
    #[error("source {source_id} is not justified")]
    SourceNotJustified { source_id: BlockId },

    /// Source or target is not a checkpoint block
    #[error("block {block_id} is not a checkpoint")]
    NotCheckpoint { block_id: BlockId },

    /// Source and target are not on one chain
    #[error("source {source_id} is not an ancestor of target {target_id}")]
    NotAncestor {
        source_id: BlockId,
        target_id: BlockId,
    },

    /// Voter is not in the target's validator set
    #[error("validator {validator} is not eligible to vote for {target_id}")]
    NotEligible {
        validator: ValidatorId,
        target_id: BlockId,
    },

    /// Vote violates a slashing condition (offender reported)
    #[error("slashable offense: {0}")]
    Slashable(SlashingEvidence),
}

impl VoteRejection {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::SourceNotJustified { .. } => "source_not_justified",
            Self::NotCheckpoint { .. } => "not_checkpoint",
            Self::NotAncestor { .. } => "not_ancestor",
            Self::NotEligible { .. } => "not_eligible",
            Self::Slashable(_) => "slashable",
        }
    }
}
