//! Gateway connection configuration.
//!
//! The OEMS client reads its settings from a single JSON config file. Only
//! the handshake token has no default; hostname, port, and connect timeout
//! fall back to the gateway's standard deployment values.
//!
//! # Example config
//!
//! ```json
//! {
//!   "hostname": "localhost",
//!   "port": 9998,
//!   "handshake_token": "9f2b9e0cd9a1a2c95b4e0b123c7b8d6a",
//!   "connect_timeout_secs": 10
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

/// Connection settings for the GQ order-execution gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway hostname (default: `localhost`).
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Gateway HTTP port (default: 9998).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Static shared-secret sent as the `Handshake-Token` header on every
    /// request. Not a per-session credential.
    pub handshake_token: String,

    /// TCP connect timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9998
}

fn default_connect_timeout() -> u64 {
    10
}

impl GatewayConfig {
    /// Base URL for gateway HTTP requests.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<GatewayConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: GatewayConfig = serde_json::from_str(&content)?;
    debug!("[config] loaded {} (gateway={})", path.display(), config.base_url());
    Ok(config)
}
