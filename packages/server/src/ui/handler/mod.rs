//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_status, health_check};
pub use websocket::{root_handler, websocket_handler};
