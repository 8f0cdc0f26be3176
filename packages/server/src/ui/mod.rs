//! WebSocket chat relay server.

mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::{DEFAULT_OUTBOUND_BUFFER, ServerConfig};
pub use server::Server;
