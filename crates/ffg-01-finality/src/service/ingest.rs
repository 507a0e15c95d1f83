//! Message ingestion: duplicate suppression, causal buffering and block
//! acceptance.

use super::Validator;
use crate::metrics;
use crate::ports::NetworkGateway;
use crate::types::DeliveryOutcome;
use shared_types::{Block, Message, MessageId};
use std::sync::Arc;
use tracing::debug;

impl Validator {
    /// Hand one message to this validator.
    ///
    /// On acceptance, every message that was waiting on it is replayed,
    /// depth-first, until nothing more can make progress.
    pub fn deliver(&mut self, message: Message, gateway: &mut dyn NetworkGateway) -> DeliveryOutcome {
        let id = message.id();
        let outcome = self.process(message, gateway);
        if outcome.is_accepted() {
            self.replay_dependents(id, gateway);
        }
        outcome
    }

    fn replay_dependents(&mut self, id: MessageId, gateway: &mut dyn NetworkGateway) {
        let mut stack = self.buffer.release(&id);
        stack.reverse();

        while let Some(message) = stack.pop() {
            let released = message.id();
            if self.process(message, gateway).is_accepted() {
                let mut dependents = self.buffer.release(&released);
                dependents.reverse();
                stack.extend(dependents);
            }
        }
    }

    fn process(&mut self, message: Message, gateway: &mut dyn NetworkGateway) -> DeliveryOutcome {
        if self.config.suppress_duplicates && self.received.contains_key(&message.id()) {
            return DeliveryOutcome::Duplicate;
        }

        match message {
            Message::Block(block) => self.accept_block(block, gateway),
            Message::Vote(vote) => self.check_vote(vote, gateway),
        }
    }

    /// Park `message` until `missing` is accepted.
    pub(super) fn park(&mut self, missing: MessageId, message: Message) -> DeliveryOutcome {
        debug!(
            validator = %self.id,
            message = %message.id(),
            missing = %missing,
            "buffering on missing dependency"
        );
        metrics::record_message_buffered();
        self.buffer.park(missing, message);
        DeliveryOutcome::Pending { missing }
    }

    fn accept_block(&mut self, block: Arc<Block>, gateway: &mut dyn NetworkGateway) -> DeliveryOutcome {
        // Only one genesis exists per run and every validator starts with it
        let Some(parent_id) = block.parent_id else {
            return DeliveryOutcome::Duplicate;
        };

        if !self.tree.record(Arc::clone(&block)) {
            return self.park(parent_id, Message::Block(block));
        }
        self.received.insert(block.id, Message::Block(Arc::clone(&block)));

        debug!(
            validator = %self.id,
            block = %block.id,
            height = block.height,
            checkpoint = block.is_checkpoint,
            "block accepted"
        );

        if block.is_checkpoint {
            self.emit_vote(&block, gateway);
        }

        let justified = self.justification.highest_justified().id;
        self.fork_choice.on_block(&self.tree, &justified, &block);

        DeliveryOutcome::Accepted
    }
}
