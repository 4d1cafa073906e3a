//! Typed error definitions for the GQ OEMS client.
//!
//! Three layers, detected at different points in the dispatch pipeline:
//!
//! - [`ValidationError`] — malformed, missing, or contradictory request
//!   input. Caught before any encoding; never reaches the wire.
//! - [`EncodingError`] — a field value cannot be represented within its
//!   fixed-width wire slot. A hard error, never a silent truncation.
//! - [`OemsError`] — the umbrella error carried through the dispatch facade,
//!   adding the transport failure classes. [`OemsError::status_code`] maps
//!   each class to the status code reported in the uniform outcome.

use thiserror::Error;

/// A request failed validation before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are empty. Carries the per-variant field list.
    #[error("Missing required fields: {0}")]
    MissingFields(&'static str),

    /// A floating-point field must be finite and strictly positive.
    #[error("{0} must be a positive number")]
    NonPositive(&'static str),

    /// An integer field must be strictly positive.
    #[error("{0} must be a positive integer")]
    NonPositiveInteger(&'static str),

    /// Side is not BUY or SELL (after uppercasing).
    #[error("Side must be 'BUY' or 'SELL'")]
    InvalidSide,

    /// Bybit requests must carry an instrument type.
    #[error("instrument_type is required for Bybit")]
    InstrumentTypeRequired,

    /// Non-Bybit requests must not carry an instrument type.
    #[error("instrument_type is not supported for {0}")]
    InstrumentTypeUnsupported(String),
}

/// A field value does not fit its fixed-width slot in the wire record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Value is longer than the slot capacity.
    #[error("{field} value of {len} bytes exceeds the {capacity}-byte wire slot")]
    Overflow {
        field: &'static str,
        len: usize,
        capacity: usize,
    },

    /// Fixed string slots only accept ASCII content.
    #[error("{field} contains non-ASCII bytes")]
    NotAscii { field: &'static str },
}

/// Umbrella error for the dispatch facade.
///
/// Transport variants carry the underlying error text; callers only ever see
/// these through the normalized outcome types, never as unhandled faults.
#[derive(Debug, Error)]
pub enum OemsError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// No connection could be established to the gateway.
    #[error("could not connect to server - connection refused: {0}")]
    TransportRefused(String),

    /// The exchange failed mid-request (timeout, protocol error, bad body).
    #[error("HTTP error occurred: {0}")]
    TransportFault(String),

    /// Anything not covered by the classes above.
    #[error("an error occurred: {0}")]
    Unknown(String),
}

impl OemsError {
    /// Status code reported to callers for this failure class.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Encoding(_) => 400,
            Self::TransportRefused(_) => 503,
            Self::TransportFault(_) | Self::Unknown(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(OemsError::Validation(ValidationError::InvalidSide).status_code(), 400);
        assert_eq!(
            OemsError::Encoding(EncodingError::NotAscii { field: "symbol" }).status_code(),
            400
        );
        assert_eq!(OemsError::TransportRefused("refused".into()).status_code(), 503);
        assert_eq!(OemsError::TransportFault("timeout".into()).status_code(), 500);
        assert_eq!(OemsError::Unknown("?".into()).status_code(), 500);
    }

    #[test]
    fn validation_messages_match_gateway_wording() {
        assert_eq!(
            ValidationError::NonPositive("Quantity").to_string(),
            "Quantity must be a positive number"
        );
        assert_eq!(
            ValidationError::NonPositiveInteger("Duration").to_string(),
            "Duration must be a positive integer"
        );
        assert_eq!(
            ValidationError::InstrumentTypeUnsupported("binance".into()).to_string(),
            "instrument_type is not supported for binance"
        );
    }
}
