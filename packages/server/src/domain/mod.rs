//! Domain layer: value objects, entities, aggregates and the ports
//! (`ChatRepository`, `MessagePusher`) implemented by the infrastructure layer.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_log;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Session};
pub use error::{LoginError, MessagePushError, ValueObjectError};
pub use event::{CallFields, ServerEvent};
pub use message_log::MessageLog;
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::SessionRegistry;
pub use repository::ChatRepository;
pub use value_object::{ConnectionId, MessageId, MessageText, Timestamp, Username};

/// Number of messages replayed to a newly connected client.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
