//! Uniform outcome types returned by the dispatch facade.
//!
//! Every facade call returns one of these values — failures included. Callers
//! distinguish success from failure via the `success` flag and `status_code`,
//! never via panics or propagated errors.

use serde::{Deserialize, Serialize};

/// Outcome of an order operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    /// Raw gateway response body. Always `None` for placement — the binary
    /// body is treated as opaque and never decoded.
    pub response_data: Option<Vec<u8>>,
}

impl OrderResponse {
    /// A failure outcome with no response data.
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self { success: false, status_code, message: message.into(), response_data: None }
    }
}

/// Outcome of a login operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}
