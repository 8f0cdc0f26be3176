//! Hiroba CLI chat client with reconnection support.
//!
//! Connects to the chat relay, prints the recent history and logs in with
//! the given username. Each input line is sent as a chat message;
//! `/call <note>` rings everyone instead.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected login (e.g. the username is already online) exits with status 1.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! cargo run --bin hiroba-client -- -n bob --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use hiroba_client::run_client;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "CLI client for the Hiroba chat relay", long_about = None)]
struct Args {
    /// Username to log in with (must not be online already)
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
