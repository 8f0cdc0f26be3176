//! Server configuration.

use std::path::PathBuf;

use crate::domain::DEFAULT_HISTORY_LIMIT;

/// Default capacity of each connection's outbound queue
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;

/// Runtime settings of the relay, filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Number of messages replayed to a new connection
    pub history_limit: usize,
    /// Capacity of each connection's outbound queue
    pub outbound_buffer: usize,
    /// Upper bound of stored messages (`None` keeps everything)
    pub max_stored_messages: Option<usize>,
    /// Directory served for any path other than the API routes
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            max_stored_messages: None,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Retention actually applied to the log.
    ///
    /// Never smaller than `history_limit`, so a replay always has enough
    /// messages to send.
    pub fn effective_retention(&self) -> Option<usize> {
        self.max_stored_messages
            .map(|max| max.max(self.history_limit))
    }

    /// Outbound queue capacity; a bounded channel needs at least one slot.
    pub fn effective_outbound_buffer(&self) -> usize {
        self.outbound_buffer.max(1)
    }
}
