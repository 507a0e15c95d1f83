//! Vote emission and vote validation.

use super::Validator;
use crate::domain::LinkUpdate;
use crate::error::VoteRejection;
use crate::metrics;
use crate::ports::NetworkGateway;
use crate::types::DeliveryOutcome;
use shared_types::{Block, Message, MessageId, Vote};
use std::sync::Arc;
use tracing::{debug, info};

impl Validator {
    /// Vote for `target` if it is the first checkpoint seen at its height and
    /// it descends from the highest justified checkpoint.
    pub(super) fn emit_vote(&mut self, target: &Arc<Block>, gateway: &mut dyn NetworkGateway) {
        if target.checkpoint_height <= self.current_epoch {
            return;
        }

        let source = Arc::clone(self.justification.highest_justified());
        if !self.tree.is_ancestor(&source.id, &target.id) {
            return;
        }
        if !target.validators.contains(&self.id) {
            return;
        }

        self.current_epoch = target.checkpoint_height;

        let fresh = Vote::new(
            MessageId::random(&mut self.rng),
            &source,
            target,
            self.id,
            self.deposit,
        );
        let vote = self.strategy.select(fresh, &self.cast_votes, &mut self.rng);

        debug!(
            validator = %self.id,
            vote = %vote.id,
            source_height = vote.source_height,
            target_height = vote.target_height,
            "casting vote"
        );

        self.cast_votes.push(vote.clone());
        gateway.broadcast(Message::Vote(vote.clone()), self.id);
        self.deliver(Message::Vote(vote), gateway);
    }

    /// Validate a vote and account for its weight.
    ///
    /// Checks run in a fixed order: unknown source buffers, unjustified
    /// source rejects, unknown target buffers, then structure, eligibility and
    /// the slashing conditions.
    pub(super) fn check_vote(&mut self, vote: Vote, gateway: &mut dyn NetworkGateway) -> DeliveryOutcome {
        let Some(source) = self.tree.get(&vote.source_id).cloned() else {
            return self.park(vote.source_id, Message::Vote(vote));
        };

        if !self.justification.is_justified(&source.id) {
            return self.reject(VoteRejection::SourceNotJustified {
                source_id: source.id,
            });
        }

        let Some(target) = self.tree.get(&vote.target_id).cloned() else {
            return self.park(vote.target_id, Message::Vote(vote));
        };

        if let Some(block) = [&source, &target].into_iter().find(|b| !b.is_checkpoint) {
            return self.reject(VoteRejection::NotCheckpoint { block_id: block.id });
        }

        if !self.tree.is_ancestor(&source.id, &target.id) {
            return self.reject(VoteRejection::NotAncestor {
                source_id: source.id,
                target_id: target.id,
            });
        }

        if !target.validators.contains(&vote.validator_id) {
            return self.reject(VoteRejection::NotEligible {
                validator: vote.validator_id,
                target_id: target.id,
            });
        }

        if let Some(evidence) = self.slashing_db.check_and_record(&vote) {
            tracing::warn!(
                "SLASHABLE OFFENSE DETECTED: {} (seen by {})",
                evidence,
                self.id
            );
            metrics::record_slashable_offense(evidence.kind());
            gateway.report_slash(evidence.clone());
            return self.reject(VoteRejection::Slashable(evidence));
        }

        self.received.insert(vote.id, Message::Vote(vote.clone()));
        metrics::record_vote_accepted();

        let update = self.justification.add_weight(
            source.id,
            target.id,
            vote.deposit,
            gateway.total_deposit(),
        );
        if update.is_supermajority() {
            self.on_supermajority(&vote, &source, &target, update, gateway);
        }

        DeliveryOutcome::Accepted
    }

    fn on_supermajority(
        &mut self,
        vote: &Vote,
        source: &Arc<Block>,
        target: &Arc<Block>,
        update: LinkUpdate,
        gateway: &mut dyn NetworkGateway,
    ) {
        if self.justification.justify(target.id) {
            info!(
                validator = %self.id,
                checkpoint = %target.id,
                checkpoint_height = target.checkpoint_height,
                weight = update.after,
                "checkpoint justified"
            );
            metrics::record_checkpoint_justified();
        }

        if self.justification.raise_highest(target) {
            self.fork_choice.recompute(&self.tree, &target.id);
        }

        // Direct link: source is the checkpoint immediately before target
        if source.checkpoint_height + 1 == target.checkpoint_height {
            if self.justification.finalize(source.id) {
                info!(
                    validator = %self.id,
                    checkpoint = %source.id,
                    checkpoint_height = source.checkpoint_height,
                    "checkpoint finalized"
                );
                metrics::record_checkpoint_finalized();
            }
            if update.crossed() {
                gateway.report_reward(vote.validator_id);
            }
        }
    }

    fn reject(&self, rejection: VoteRejection) -> DeliveryOutcome {
        debug!(validator = %self.id, reason = rejection.reason(), "vote rejected: {}", rejection);
        metrics::record_vote_rejected(rejection.reason());
        DeliveryOutcome::Rejected(rejection)
    }
}
