//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

use super::{
    handler::{
        create_room, debug_room_state, health_check, join_room, login, my_rooms, register,
        websocket_handler,
    },
    reaper::spawn_room_reaper,
    signal::shutdown_signal,
    state::AppState,
};

/// Collaboration server
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// let state = build_app_state(&config);
/// Server::new(config, state).run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/auth/register", post(register))
            .route("/api/auth/login", post(login))
            .route("/api/rooms/create", post(create_room))
            .route("/api/rooms/join", post(join_room))
            .route("/api/rooms/my-rooms", get(my_rooms))
            .route("/debug/rooms/{room_id}", get(debug_room_state))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind to the configured address and serve until a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let local_addr = listener.local_addr()?;

        let reaper = spawn_room_reaper(
            self.state.session.clone(),
            self.config.reap_interval,
            self.config.room_idle_timeout,
        );

        tracing::info!("Collaboration server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Drawing relay policy: {}", self.config.drawing_relay);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;
        reaper.abort();
        result?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
