//! Message log aggregate.
//!
//! Append-only, insertion-ordered. Storage is unbounded unless a retention
//! limit is set, in which case the oldest entries are evicted. The number of
//! messages ever appended is counted separately from what is retained.
//!
//! Ids are derived from the creation time but forced to be strictly
//! increasing: `id = max(now_millis, last_id + 1)`.

use std::collections::VecDeque;

use super::{
    entity::ChatMessage,
    value_object::{MessageId, MessageText, Timestamp, Username},
};

#[derive(Debug, Default)]
pub struct MessageLog {
    messages: VecDeque<ChatMessage>,
    retention: Option<usize>,
    last_id: Option<i64>,
    appended: usize,
}

impl MessageLog {
    /// Create an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log keeping at most `retention` messages (`None` = unbounded).
    pub fn with_retention(retention: Option<usize>) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    /// Create a message with a fresh id and store it at the end of the log.
    pub fn append(&mut self, username: Username, text: MessageText, now: Timestamp) -> ChatMessage {
        let id = self.next_id(now);
        let message = ChatMessage {
            id,
            username,
            text,
            timestamp: now,
        };
        self.messages.push_back(message.clone());
        self.appended += 1;

        if let Some(retention) = self.retention {
            while self.messages.len() > retention {
                self.messages.pop_front();
            }
        }

        message
    }

    /// The last `limit` messages, oldest first.
    pub fn recent_messages(&self, limit: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).cloned().collect()
    }

    /// Number of messages appended since creation, evicted ones included.
    pub fn total_appended(&self) -> usize {
        self.appended
    }

    fn next_id(&mut self, now: Timestamp) -> MessageId {
        let id = match self.last_id {
            Some(last) => now.value().max(last + 1),
            None => now.value(),
        };
        self.last_id = Some(id);
        MessageId::new(id)
    }
}
