//! Server configuration.

use std::time::Duration;

use crate::usecase::DrawingRelayPolicy;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
pub const DEFAULT_ROOM_IDLE_TIMEOUT_SECS: u64 = 3600;
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 300;

/// Signing secret used when none is configured. Only suitable for local
/// development.
pub const DEVELOPMENT_JWT_SECRET: &str = "studysphere-development-secret";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    /// How long an empty room keeps its live state
    pub room_idle_timeout: Duration,
    pub reap_interval: Duration,
    pub drawing_relay: DrawingRelayPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS * 3600),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            room_idle_timeout: Duration::from_secs(DEFAULT_ROOM_IDLE_TIMEOUT_SECS),
            reap_interval: Duration::from_secs(DEFAULT_REAP_INTERVAL_SECS),
            drawing_relay: DrawingRelayPolicy::default(),
        }
    }
}
