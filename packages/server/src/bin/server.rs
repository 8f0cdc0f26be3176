//! Hiroba chat relay server.
//!
//! Relays chat messages, typing indicators and call requests between
//! WebSocket clients, and replays recent history to every new connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 127.0.0.1 --port 3000
//! PORT=3000 cargo run --bin hiroba-server
//! ```

use std::path::PathBuf;

use clap::Parser;
use hiroba_server::{
    domain::DEFAULT_HISTORY_LIMIT,
    ui::{DEFAULT_OUTBOUND_BUFFER, Server, ServerConfig},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Number of recent messages sent to each new connection
    #[arg(long, env = "HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Capacity of each connection's outbound queue
    #[arg(long, env = "OUTBOUND_BUFFER", default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,

    /// Maximum number of stored messages (unbounded when omitted)
    #[arg(long, env = "MAX_STORED_MESSAGES")]
    max_stored_messages: Option<usize>,

    /// Directory of the web client, served for paths other than the API
    #[arg(long, env = "STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            history_limit: args.history_limit,
            outbound_buffer: args.outbound_buffer,
            max_stored_messages: args.max_stored_messages,
            static_dir: args.static_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let host = args.host.clone();
    let port = args.port;

    let server = Server::new(ServerConfig::from(args));
    if let Err(e) = server.run(host, port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
