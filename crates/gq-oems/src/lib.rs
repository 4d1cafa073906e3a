//! # gq-oems
//!
//! Client-side order entry for the GQ order-execution gateway.
//!
//! Translates typed order requests (market, limit, TWAP, market-edge,
//! TWAP-edge) into the gateway's fixed 192-byte binary record and delivers it
//! over HTTP. Per order:
//!
//! ```text
//! OemsClient::place_*            facade (client)
//!   OrderRequest::validate       request model (gq-core)
//!   GqMessage::from_order
//!     └── to_bytes               wire codec (wire)
//!   GatewayTransport::send_order HTTP POST /place (transport)
//! ```
//!
//! All placement methods take `&self`, hold no mutable state, and are safe to
//! call concurrently: each call builds its own message and opens its own
//! connection. Every call returns a normalized [`gq_core::OrderResponse`];
//! transport faults never propagate as errors.

pub mod client;
pub mod transport;
pub mod wire;

pub use client::OemsClient;
