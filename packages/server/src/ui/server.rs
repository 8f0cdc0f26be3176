//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{
    config::ServerConfig,
    handler::{get_status, health_check, root_handler, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a server backed by the in-memory repository
    pub fn new(config: ServerConfig) -> Self {
        Self::with_state(Arc::new(AppState::in_memory(&config)))
    }

    /// Create a server from already wired state
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the router
    ///
    /// The relay accepts upgrades on `/ws` and on the bare origin `/`.
    /// `/admin` and `/api/health` are read-only. With a static directory
    /// configured, every other path is served from it.
    pub fn router(&self) -> Router {
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            .route("/", get(root_handler))
            // HTTP エンドポイント
            .route("/admin", get(get_status))
            .route("/api/health", get(health_check));

        let app = match &self.state.static_dir {
            Some(dir) => app.fallback_service(ServeDir::new(dir)),
            None => app,
        };

        app.layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Hiroba chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        if let Some(dir) = &self.state.static_dir {
            tracing::info!("Serving static files from {}", dir.display());
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
