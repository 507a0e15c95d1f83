//! Dependency buffer: messages waiting on a block that has not arrived yet.

use shared_types::{Message, MessageId};
use std::collections::HashMap;

/// Missing id -> messages blocked on it, in arrival order.
#[derive(Debug, Default)]
pub struct DependencyBuffer {
    waiting: HashMap<MessageId, Vec<Message>>,
    len: usize,
}

impl DependencyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `message` until `missing` is accepted.
    pub fn park(&mut self, missing: MessageId, message: Message) {
        self.waiting.entry(missing).or_default().push(message);
        self.len += 1;
    }

    /// Take every message that was waiting on `id`.
    pub fn release(&mut self, id: &MessageId) -> Vec<Message> {
        let released = self.waiting.remove(id).unwrap_or_default();
        self.len -= released.len();
        released
    }

    pub fn is_waiting_on(&self, id: &MessageId) -> bool {
        self.waiting.contains_key(id)
    }

    /// Number of parked messages.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
