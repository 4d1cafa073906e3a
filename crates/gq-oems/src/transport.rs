//! HTTP transport to the GQ gateway.
//!
//! One POST per order: the serialized record goes to `/place` as an opaque
//! octet-stream with the static `Handshake-Token` shared-secret header. The
//! gateway's binary response body is never parsed. Login posts JSON to
//! `/{exchange}/login`.
//!
//! One attempt per call, no retries, no connection reuse: pooling is disabled
//! so each request acquires and releases its own connection on every exit
//! path.

use std::time::Duration;

use gq_core::config::GatewayConfig;
use gq_core::error::OemsError;
use gq_core::types::LoginRequest;
use tracing::debug;

/// HTTP statuses the gateway returns for accepted orders.
const ACCEPTED_STATUSES: [u16; 2] = [200, 201];

/// Thin HTTP client over the gateway's two endpoints.
pub struct GatewayTransport {
    http: reqwest::Client,
    base_url: String,
    handshake_token: String,
}

impl GatewayTransport {
    /// Build a transport from a gateway config.
    pub fn new(config: &GatewayConfig) -> Result<Self, OemsError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| OemsError::Unknown(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            handshake_token: config.handshake_token.clone(),
        })
    }

    /// Whether an HTTP status counts as gateway acceptance.
    pub fn is_accepted(status: u16) -> bool {
        ACCEPTED_STATUSES.contains(&status)
    }

    /// POST the serialized record to `/place` and wait for the full round
    /// trip. Returns the gateway's HTTP status; the body is drained unread.
    pub async fn send_order(&self, record: Vec<u8>) -> Result<u16, OemsError> {
        let response = self.post_place(record).await?;
        let status = response.status().as_u16();
        // Drain the opaque binary body.
        let _ = response.bytes().await.map_err(classify)?;
        debug!("[transport] /place round trip complete (status={status})");
        Ok(status)
    }

    /// POST the serialized record to `/place` without waiting for the body.
    ///
    /// Resolves as soon as the request is issued and response headers arrive;
    /// the body download is abandoned.
    pub async fn send_order_nonblocking(&self, record: Vec<u8>) -> Result<(), OemsError> {
        let response = self.post_place(record).await?;
        debug!("[transport] /place issued (status={}), not awaiting body", response.status());
        Ok(())
    }

    async fn post_place(&self, record: Vec<u8>) -> Result<reqwest::Response, OemsError> {
        self.http
            .post(format!("{}/place", self.base_url))
            .header("Content-Type", "application/octet-stream")
            .header("Handshake-Token", &self.handshake_token)
            .body(record)
            .send()
            .await
            .map_err(classify)
    }

    /// POST a JSON login payload to `/{exchange}/login` and return the parsed
    /// response document.
    pub async fn login(
        &self,
        exchange_name: &str,
        request: &LoginRequest,
    ) -> Result<serde_json::Value, OemsError> {
        let response = self
            .http
            .post(format!("{}/{}/login", self.base_url, exchange_name.to_lowercase()))
            .header("Handshake-Token", &self.handshake_token)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        response.json::<serde_json::Value>().await.map_err(classify)
    }
}

/// Classify a reqwest error into the transport failure taxonomy.
fn classify(e: reqwest::Error) -> OemsError {
    if e.is_connect() {
        OemsError::TransportRefused(e.to_string())
    } else if e.is_timeout() || e.is_request() || e.is_body() || e.is_decode() {
        OemsError::TransportFault(e.to_string())
    } else {
        OemsError::Unknown(e.to_string())
    }
}
