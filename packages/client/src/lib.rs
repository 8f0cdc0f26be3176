//! Hiroba CLI chat client.
//!
//! Connects to the relay, logs in with a username and sends each input line
//! as a chat message. Reconnects on connection loss.

mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub mod error;

pub use runner::run_client;
