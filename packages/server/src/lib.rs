//! Hiroba chat relay server library.
//!
//! Clients connect over WebSocket, log in with a username, exchange broadcast
//! text messages and receive typing/presence notifications.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
