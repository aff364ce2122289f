//! StudySphere collaboration server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studysphere-server
//! cargo run --bin studysphere-server -- --host 0.0.0.0 --port 8001
//! ```

use std::time::Duration;

use clap::Parser;

use studysphere_server::{
    app::build_app_state,
    config::{
        DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REAP_INTERVAL_SECS, DEFAULT_ROOM_IDLE_TIMEOUT_SECS,
        DEFAULT_TOKEN_TTL_HOURS, DEVELOPMENT_JWT_SECRET, ServerConfig,
    },
    ui::Server,
    usecase::DrawingRelayPolicy,
};
use studysphere_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "studysphere-server")]
#[command(about = "Real-time study room collaboration server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "STUDYSPHERE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "STUDYSPHERE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "STUDYSPHERE_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Lifetime of issued bearer tokens, in hours
    #[arg(long, env = "STUDYSPHERE_TOKEN_TTL_HOURS", default_value_t = DEFAULT_TOKEN_TTL_HOURS)]
    token_ttl_hours: u64,

    /// bcrypt work factor for password hashes
    #[arg(long, env = "STUDYSPHERE_BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    bcrypt_cost: u32,

    /// Seconds an empty room keeps its live state before it is reaped
    #[arg(long, env = "STUDYSPHERE_ROOM_IDLE_TIMEOUT_SECS", default_value_t = DEFAULT_ROOM_IDLE_TIMEOUT_SECS)]
    room_idle_timeout_secs: u64,

    /// Seconds between idle room sweeps
    #[arg(long, env = "STUDYSPHERE_REAP_INTERVAL_SECS", default_value_t = DEFAULT_REAP_INTERVAL_SECS)]
    reap_interval_secs: u64,

    /// Drawing events from connections outside a room: `permissive` relays
    /// them to the room named in the payload, `members-only` drops them
    #[arg(long, env = "STUDYSPHERE_DRAWING_RELAY", default_value = "permissive")]
    drawing_relay: DrawingRelayPolicy,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "STUDYSPHERE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let jwt_secret = self.jwt_secret.unwrap_or_else(|| {
            tracing::warn!("No JWT secret configured, using the development secret");
            DEVELOPMENT_JWT_SECRET.to_string()
        });

        ServerConfig {
            host: self.host,
            port: self.port,
            jwt_secret,
            token_ttl: Duration::from_secs(self.token_ttl_hours.saturating_mul(3600)),
            bcrypt_cost: self.bcrypt_cost,
            room_idle_timeout: Duration::from_secs(self.room_idle_timeout_secs),
            reap_interval: Duration::from_secs(self.reap_interval_secs.max(1)),
            drawing_relay: self.drawing_relay,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = args.into_config();
    let state = build_app_state(&config);

    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
