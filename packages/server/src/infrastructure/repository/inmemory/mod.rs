//! InMemory Repository 実装

pub mod chat;

pub use chat::InMemoryChatRepository;
