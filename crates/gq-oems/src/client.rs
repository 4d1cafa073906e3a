//! Dispatch facade — validate, encode, transmit, normalize.
//!
//! [`OemsClient`] exposes one placement method per order variant plus the
//! login flow. Every method returns a normalized outcome value; validation,
//! encoding, and transport failures all surface through the `success` flag
//! and `status_code`, never as propagated errors.

use chrono::Local;
use gq_core::config::GatewayConfig;
use gq_core::error::OemsError;
use gq_core::types::{
    LimitOrderRequest, LoginRequest, LoginResponse, MarketEdgeOrderRequest, MarketOrderRequest,
    OrderRequest, OrderResponse, TwapEdgeOrderRequest, TwapOrderRequest,
};
use tracing::{info, warn};

use crate::transport::GatewayTransport;
use crate::wire::GqMessage;

/// Status reported for orders submitted without waiting on the gateway.
const STATUS_ACCEPTED_ASYNC: u16 = 202;

/// Client facade for the GQ order-execution gateway.
///
/// Stateless and reentrant: all methods take `&self`, each call builds its
/// own wire message and uses its own connection, so concurrent callers need
/// no external synchronization.
pub struct OemsClient {
    transport: GatewayTransport,
}

impl OemsClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, OemsError> {
        Ok(Self { transport: GatewayTransport::new(config)? })
    }

    // -----------------------------------------------------------------------
    // Placement operations
    // -----------------------------------------------------------------------

    /// Place a market order.
    pub async fn place_market_order(
        &self,
        request: MarketOrderRequest,
        blocking: bool,
    ) -> OrderResponse {
        self.place(OrderRequest::Market(request), blocking).await
    }

    /// Place a limit order.
    pub async fn place_limit_order(
        &self,
        request: LimitOrderRequest,
        blocking: bool,
    ) -> OrderResponse {
        self.place(OrderRequest::Limit(request), blocking).await
    }

    /// Place a TWAP order.
    pub async fn place_twap_order(
        &self,
        request: TwapOrderRequest,
        blocking: bool,
    ) -> OrderResponse {
        self.place(OrderRequest::Twap(request), blocking).await
    }

    /// Place a market-edge order.
    pub async fn place_market_edge_order(
        &self,
        request: MarketEdgeOrderRequest,
        blocking: bool,
    ) -> OrderResponse {
        self.place(OrderRequest::MarketEdge(request), blocking).await
    }

    /// Place a TWAP-edge order.
    pub async fn place_twap_edge_order(
        &self,
        request: TwapEdgeOrderRequest,
        blocking: bool,
    ) -> OrderResponse {
        self.place(OrderRequest::TwapEdge(request), blocking).await
    }

    /// Shared placement pipeline: validate → encode → transmit → normalize.
    ///
    /// A validation or encoding failure returns before any network attempt.
    async fn place(&self, request: OrderRequest, blocking: bool) -> OrderResponse {
        if let Err(e) = request.validate() {
            warn!("[oems] {} order rejected: {e}", request.symbol());
            return OrderResponse::failure(400, e.to_string());
        }

        let record = match GqMessage::from_order(&request).to_bytes() {
            Ok(record) => record,
            Err(e) => {
                warn!("[oems] {} order not encodable: {e}", request.symbol());
                return OrderResponse::failure(400, format!("encoding error: {e}"));
            }
        };

        if blocking {
            match self.transport.send_order(record.to_vec()).await {
                Ok(status) => {
                    let accepted = GatewayTransport::is_accepted(status);
                    let verdict = if accepted { "sent" } else { "failed" };
                    info!("[oems] {} order {verdict} (status={status})", request.symbol());
                    OrderResponse {
                        success: accepted,
                        status_code: status,
                        message: format!("[{}] Order {verdict}", timestamp()),
                        response_data: None,
                    }
                }
                Err(e) => transport_failure(&request, e),
            }
        } else {
            match self.transport.send_order_nonblocking(record.to_vec()).await {
                Ok(()) => {
                    info!("[oems] {} order submitted asynchronously", request.symbol());
                    OrderResponse {
                        success: true,
                        status_code: STATUS_ACCEPTED_ASYNC,
                        message: format!("[{}] Order submitted asynchronously", timestamp()),
                        response_data: None,
                    }
                }
                Err(e) => transport_failure(&request, e),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Authenticate a trading account with an exchange via the gateway.
    ///
    /// Placement does not require a prior login — the `/place` endpoint only
    /// checks the handshake token — but authenticated flows do.
    pub async fn login(&self, exchange_name: &str, request: LoginRequest) -> LoginResponse {
        if exchange_name.is_empty()
            || request.name.is_empty()
            || request.key.is_empty()
            || request.secret.is_empty()
        {
            return LoginResponse {
                success: false,
                status_code: 400,
                message: "Missing required fields: exchange_name, account_name, api_key, and secret_key are required".to_string(),
            };
        }

        match self.transport.login(exchange_name, &request).await {
            Ok(body) => {
                let success =
                    body.get("response").and_then(|v| v.as_str()) == Some("SUCCESS");
                let status_code =
                    body.get("status_code").and_then(|v| v.as_u64()).unwrap_or(0) as u16;
                let message = body
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown response")
                    .to_string();
                info!("[oems] login {} for '{}': {message}", exchange_name, request.name);
                LoginResponse { success, status_code, message }
            }
            Err(e) => {
                warn!("[oems] login transport failure: {e}");
                LoginResponse { success: false, status_code: e.status_code(), message: e.to_string() }
            }
        }
    }
}

fn transport_failure(request: &OrderRequest, e: OemsError) -> OrderResponse {
    warn!("[oems] {} order transport failure: {e}", request.symbol());
    OrderResponse::failure(e.status_code(), format!("[{}] Error: {e}", timestamp()))
}

/// Wall-clock timestamp embedded in outcome messages.
fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
