//! GQ wire message codec.
//!
//! The gateway consumes a fixed 192-byte packed record, little-endian, with
//! zero-padded fixed-capacity string slots. The legacy layout overlays
//! algorithm parameters in a memory union; here the active arm is a typed
//! enum ([`AlgoParams`]) and the union bytes are produced only by the
//! explicit [`GqMessage::to_bytes`] serializer.
//!
//! # Record layout
//!
//! | Offset | Size | Field            | Encoding                         |
//! |--------|------|------------------|----------------------------------|
//! | 0      | 16   | algorithm_type   | ASCII, zero-padded               |
//! | 16     | 16   | exchange         | ASCII uppercase, zero-padded     |
//! | 32     | 32   | account          | ASCII, zero-padded               |
//! | 64     | 32   | symbol           | ASCII, zero-padded               |
//! | 96     | 8    | side_or_place_id | side string or i32 place id      |
//! | 104    | 8    | quantity         | f64 LE                           |
//! | 112    | 8    | price            | f64 LE (0.0 if variant unpriced) |
//! | 120    | 40   | credential_id    | ASCII, zero-padded               |
//! | 160    | 32   | params           | union arm selected by the tag    |
//!
//! # Params union arms (offsets relative to 160)
//!
//! | Arm         | Fields                                              |
//! |-------------|-----------------------------------------------------|
//! | twap        | duration i32 LE @0, interval i32 LE @4              |
//! | market_edge | max_timer i32 LE @0                                 |
//! | place       | type str[16] @0, instrument_type str[16] @16        |
//! | tpsl        | tp_percentage f64 LE @0, sl_percentage f64 LE @8    |
//!
//! Exactly one arm is semantically active per message, selected by the
//! algorithm tag. The serializer starts from a zeroed buffer on every call so
//! unused union bytes can never carry stale data from another message.

use gq_core::error::EncodingError;
use gq_core::types::{AlgorithmType, OrderRequest};

/// Total serialized size of a [`GqMessage`].
pub const GQ_MESSAGE_SIZE: usize = 192;

// Field offsets in the packed record.
const OFF_ALGORITHM_TYPE: usize = 0;
const OFF_EXCHANGE: usize = 16;
const OFF_ACCOUNT: usize = 32;
const OFF_SYMBOL: usize = 64;
const OFF_SIDE_OR_PLACE_ID: usize = 96;
const OFF_QUANTITY: usize = 104;
const OFF_PRICE: usize = 112;
const OFF_CREDENTIAL_ID: usize = 120;
const OFF_PARAMS: usize = 160;

// Fixed-capacity slot widths.
const LEN_ALGORITHM_TYPE: usize = 16;
const LEN_EXCHANGE: usize = 16;
const LEN_ACCOUNT: usize = 32;
const LEN_SYMBOL: usize = 32;
const LEN_SIDE: usize = 8;
const LEN_CREDENTIAL_ID: usize = 40;
const LEN_PARAMS: usize = 32;
const LEN_PLACE_STR: usize = 16;

/// Offset of the legacy `place.instrument_type` slot within the params union.
const OFF_PARAMS_INSTRUMENT_TYPE: usize = 16;

// Layout sanity: fields must tile the record exactly.
const _: () = assert!(OFF_EXCHANGE == OFF_ALGORITHM_TYPE + LEN_ALGORITHM_TYPE);
const _: () = assert!(OFF_ACCOUNT == OFF_EXCHANGE + LEN_EXCHANGE);
const _: () = assert!(OFF_SYMBOL == OFF_ACCOUNT + LEN_ACCOUNT);
const _: () = assert!(OFF_SIDE_OR_PLACE_ID == OFF_SYMBOL + LEN_SYMBOL);
const _: () = assert!(OFF_QUANTITY == OFF_SIDE_OR_PLACE_ID + LEN_SIDE);
const _: () = assert!(OFF_PRICE == OFF_QUANTITY + 8);
const _: () = assert!(OFF_CREDENTIAL_ID == OFF_PRICE + 8);
const _: () = assert!(OFF_PARAMS == OFF_CREDENTIAL_ID + LEN_CREDENTIAL_ID);
const _: () = assert!(GQ_MESSAGE_SIZE == OFF_PARAMS + LEN_PARAMS);

// ---------------------------------------------------------------------------
// Typed message model
// ---------------------------------------------------------------------------

/// The 8-byte field aliasing either a side string or a numeric place id.
///
/// Placement paths always carry the side; the place id is reserved for
/// modify/cancel traffic.
#[derive(Debug, Clone, PartialEq)]
pub enum SideOrPlaceId {
    /// Order side (`"BUY"` / `"SELL"`).
    Side(String),
    /// Gateway-assigned id of an existing order.
    PlaceId(i32),
}

/// Algorithm-specific parameters — the active arm of the wire params union.
///
/// The twap and market_edge arms also carry the instrument type because the
/// gateway's legacy layout cross-writes it into the `place` arm's slot even
/// for non-PLACE messages (bytes 16..32 of the params region, which no other
/// arm occupies). Whether the gateway reads that slot for these algorithms is
/// unconfirmed; the write is preserved for wire compatibility.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgoParams {
    /// Plain placement: order type string (`"market"` / `"limit"`).
    Place { order_type: String, instrument_type: String },
    /// TWAP execution (also used by TWAP_EDGE).
    Twap { duration: i32, interval: i32, instrument_type: String },
    /// Market-edge execution.
    MarketEdge { max_timer: i32, instrument_type: String },
    /// Take-profit / stop-loss levels. No placement path selects this arm.
    Tpsl { tp_percentage: f64, sl_percentage: f64 },
}

/// A fully-typed GQ gateway message.
///
/// Constructed fresh per request, serialized once, then discarded — never
/// mutated after serialization and never reused across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GqMessage {
    pub algorithm_type: AlgorithmType,
    /// Uppercase exchange name.
    pub exchange: String,
    pub account: String,
    pub symbol: String,
    pub side_or_place_id: SideOrPlaceId,
    pub quantity: f64,
    /// 0.0 for variants without a price.
    pub price: f64,
    /// Empty on all placement paths; reserved for authenticated flows.
    pub credential_id: String,
    pub params: AlgoParams,
}

impl GqMessage {
    /// Map a validated order request onto a wire message.
    ///
    /// Pure field mapping — all input checking lives in
    /// [`OrderRequest::validate`], all capacity checking in [`to_bytes`](Self::to_bytes).
    pub fn from_order(request: &OrderRequest) -> Self {
        // Only bybit carries an instrument type; validation has already
        // rejected every other combination.
        let instrument_type = if request.exchange_name() == "bybit" {
            request.instrument_type().to_string()
        } else {
            String::new()
        };

        let (algorithm_type, price, params) = match request {
            OrderRequest::Market(_) => (
                AlgorithmType::Place,
                0.0,
                AlgoParams::Place { order_type: "market".to_string(), instrument_type },
            ),
            OrderRequest::Limit(r) => (
                AlgorithmType::Place,
                r.price,
                AlgoParams::Place { order_type: "limit".to_string(), instrument_type },
            ),
            OrderRequest::Twap(r) => (
                AlgorithmType::Twap,
                0.0,
                AlgoParams::Twap { duration: r.duration, interval: r.interval, instrument_type },
            ),
            OrderRequest::MarketEdge(r) => (
                AlgorithmType::MarketEdge,
                0.0,
                AlgoParams::MarketEdge { max_timer: r.max_timer, instrument_type },
            ),
            OrderRequest::TwapEdge(r) => (
                AlgorithmType::TwapEdge,
                0.0,
                AlgoParams::Twap { duration: r.duration, interval: r.interval, instrument_type },
            ),
        };

        Self {
            algorithm_type,
            exchange: request.exchange_name().to_uppercase(),
            account: request.account_name().to_string(),
            symbol: request.symbol().to_string(),
            side_or_place_id: SideOrPlaceId::Side(request.side().to_uppercase()),
            quantity: request.quantity(),
            price,
            credential_id: String::new(),
            params,
        }
    }

    /// Serialize into the packed 192-byte gateway record.
    ///
    /// Whole-record, one-shot, deterministic. The buffer is zero-initialized
    /// per call, so unused union bytes never leak state between messages.
    /// String values that exceed their slot are rejected, never truncated.
    pub fn to_bytes(&self) -> Result<[u8; GQ_MESSAGE_SIZE], EncodingError> {
        let mut buf = [0u8; GQ_MESSAGE_SIZE];

        write_fixed_str(
            &mut buf,
            OFF_ALGORITHM_TYPE,
            LEN_ALGORITHM_TYPE,
            self.algorithm_type.wire_tag(),
            "algorithm_type",
        )?;
        write_fixed_str(&mut buf, OFF_EXCHANGE, LEN_EXCHANGE, &self.exchange, "exchange")?;
        write_fixed_str(&mut buf, OFF_ACCOUNT, LEN_ACCOUNT, &self.account, "account")?;
        write_fixed_str(&mut buf, OFF_SYMBOL, LEN_SYMBOL, &self.symbol, "symbol")?;

        match &self.side_or_place_id {
            SideOrPlaceId::Side(side) => {
                write_fixed_str(&mut buf, OFF_SIDE_OR_PLACE_ID, LEN_SIDE, side, "side")?;
            }
            SideOrPlaceId::PlaceId(id) => {
                buf[OFF_SIDE_OR_PLACE_ID..OFF_SIDE_OR_PLACE_ID + 4]
                    .copy_from_slice(&id.to_le_bytes());
            }
        }

        buf[OFF_QUANTITY..OFF_QUANTITY + 8].copy_from_slice(&self.quantity.to_le_bytes());
        buf[OFF_PRICE..OFF_PRICE + 8].copy_from_slice(&self.price.to_le_bytes());
        write_fixed_str(
            &mut buf,
            OFF_CREDENTIAL_ID,
            LEN_CREDENTIAL_ID,
            &self.credential_id,
            "credential_id",
        )?;

        match &self.params {
            AlgoParams::Place { order_type, instrument_type } => {
                write_fixed_str(&mut buf, OFF_PARAMS, LEN_PLACE_STR, order_type, "params.place.type")?;
                write_fixed_str(
                    &mut buf,
                    OFF_PARAMS + OFF_PARAMS_INSTRUMENT_TYPE,
                    LEN_PLACE_STR,
                    instrument_type,
                    "params.place.instrument_type",
                )?;
            }
            AlgoParams::Twap { duration, interval, instrument_type } => {
                buf[OFF_PARAMS..OFF_PARAMS + 4].copy_from_slice(&duration.to_le_bytes());
                buf[OFF_PARAMS + 4..OFF_PARAMS + 8].copy_from_slice(&interval.to_le_bytes());
                write_fixed_str(
                    &mut buf,
                    OFF_PARAMS + OFF_PARAMS_INSTRUMENT_TYPE,
                    LEN_PLACE_STR,
                    instrument_type,
                    "params.place.instrument_type",
                )?;
            }
            AlgoParams::MarketEdge { max_timer, instrument_type } => {
                buf[OFF_PARAMS..OFF_PARAMS + 4].copy_from_slice(&max_timer.to_le_bytes());
                write_fixed_str(
                    &mut buf,
                    OFF_PARAMS + OFF_PARAMS_INSTRUMENT_TYPE,
                    LEN_PLACE_STR,
                    instrument_type,
                    "params.place.instrument_type",
                )?;
            }
            AlgoParams::Tpsl { tp_percentage, sl_percentage } => {
                buf[OFF_PARAMS..OFF_PARAMS + 8].copy_from_slice(&tp_percentage.to_le_bytes());
                buf[OFF_PARAMS + 8..OFF_PARAMS + 16].copy_from_slice(&sl_percentage.to_le_bytes());
            }
        }

        Ok(buf)
    }
}

/// Write `value` into a fixed-capacity, zero-padded string slot.
///
/// Content longer than the slot or containing non-ASCII bytes is a hard
/// [`EncodingError`] — the legacy client truncated silently, which could send
/// a corrupted field to the gateway.
fn write_fixed_str(
    buf: &mut [u8],
    offset: usize,
    capacity: usize,
    value: &str,
    field: &'static str,
) -> Result<(), EncodingError> {
    if !value.is_ascii() {
        return Err(EncodingError::NotAscii { field });
    }
    let bytes = value.as_bytes();
    if bytes.len() > capacity {
        return Err(EncodingError::Overflow { field, len: bytes.len(), capacity });
    }
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use gq_core::types::{
        LimitOrderRequest, MarketEdgeOrderRequest, MarketOrderRequest, TwapEdgeOrderRequest,
        TwapOrderRequest,
    };

    use super::*;

    /// Read a zero-padded string slot back out of a serialized record.
    fn read_str(buf: &[u8], offset: usize, capacity: usize) -> &str {
        let slice = &buf[offset..offset + capacity];
        let end = slice.iter().position(|&b| b == 0).unwrap_or(capacity);
        std::str::from_utf8(&slice[..end]).unwrap()
    }

    fn read_f64(buf: &[u8], offset: usize) -> f64 {
        f64::from_le_bytes(buf[offset..offset + 8].try_into().unwrap())
    }

    fn read_i32(buf: &[u8], offset: usize) -> i32 {
        i32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn limit_order_layout() {
        let request = OrderRequest::Limit(LimitOrderRequest::new(
            "binance", "acct1", "BTCUSDT", "sell", 2.5, 50000.0, "",
        ));
        let bytes = GqMessage::from_order(&request).to_bytes().unwrap();

        assert_eq!(read_str(&bytes, 0, 16), "PLACE");
        assert_eq!(read_str(&bytes, 16, 16), "BINANCE");
        assert_eq!(read_str(&bytes, 32, 32), "acct1");
        assert_eq!(read_str(&bytes, 64, 32), "BTCUSDT");
        assert_eq!(read_str(&bytes, 96, 8), "SELL");
        assert_eq!(read_f64(&bytes, 104), 2.5);
        assert_eq!(read_f64(&bytes, 112), 50000.0);
        assert_eq!(read_str(&bytes, 120, 40), "");
        assert_eq!(read_str(&bytes, 160, 16), "limit");
        assert_eq!(read_str(&bytes, 176, 16), "");
    }

    #[test]
    fn market_order_layout() {
        let request = OrderRequest::Market(MarketOrderRequest::new(
            "bybit", "acct1", "BTCUSDT", "buy", 1.0, "linear",
        ));
        let bytes = GqMessage::from_order(&request).to_bytes().unwrap();

        assert_eq!(read_str(&bytes, 0, 16), "PLACE");
        assert_eq!(read_str(&bytes, 16, 16), "BYBIT");
        assert_eq!(read_str(&bytes, 96, 8), "BUY");
        assert_eq!(read_f64(&bytes, 112), 0.0);
        assert_eq!(read_str(&bytes, 160, 16), "market");
        assert_eq!(read_str(&bytes, 176, 16), "linear");
    }

    #[test]
    fn twap_order_layout() {
        let request = OrderRequest::Twap(TwapOrderRequest::new(
            "bybit", "acct1", "BTCUSDT", "buy", 1.0, 3600, 60, "linear",
        ));
        let bytes = GqMessage::from_order(&request).to_bytes().unwrap();

        assert_eq!(read_str(&bytes, 0, 16), "TWAP");
        assert_eq!(read_i32(&bytes, 160), 3600);
        assert_eq!(read_i32(&bytes, 164), 60);
        assert_eq!(read_f64(&bytes, 112), 0.0);
        // Legacy cross-write lands in the place arm's instrument slot.
        assert_eq!(read_str(&bytes, 176, 16), "linear");
    }

    #[test]
    fn market_edge_order_layout() {
        let request = OrderRequest::MarketEdge(MarketEdgeOrderRequest::new(
            "binance", "acct1", "ETHUSDT", "sell", 4.0, 30, "",
        ));
        let bytes = GqMessage::from_order(&request).to_bytes().unwrap();

        assert_eq!(read_str(&bytes, 0, 16), "MARKET_EDGE");
        assert_eq!(read_i32(&bytes, 160), 30);
        assert_eq!(read_str(&bytes, 176, 16), "");
    }

    #[test]
    fn twap_edge_uses_twap_arm() {
        let request = OrderRequest::TwapEdge(TwapEdgeOrderRequest::new(
            "binance", "acct1", "ETHUSDT", "buy", 2.0, 600, 30, "",
        ));
        let bytes = GqMessage::from_order(&request).to_bytes().unwrap();

        assert_eq!(read_str(&bytes, 0, 16), "TWAP_EDGE");
        assert_eq!(read_i32(&bytes, 160), 600);
        assert_eq!(read_i32(&bytes, 164), 30);
    }

    #[test]
    fn encoding_is_deterministic() {
        let request = OrderRequest::Twap(TwapOrderRequest::new(
            "bybit", "acct1", "BTCUSDT", "buy", 1.5, 3600, 60, "linear",
        ));
        let first = GqMessage::from_order(&request).to_bytes().unwrap();
        let second = GqMessage::from_order(&request).to_bytes().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn union_arms_do_not_leak_across_messages() {
        // A market-edge message writes max_timer into params[0..4]. Encoding
        // a TWAP message afterwards must start from zeroed bytes, not inherit
        // anything from the previous record.
        let edge = OrderRequest::MarketEdge(MarketEdgeOrderRequest::new(
            "binance", "acct1", "BTCUSDT", "buy", 1.0, 0x7FFF_FFFF, "",
        ));
        let edge_bytes = GqMessage::from_order(&edge).to_bytes().unwrap();
        assert_eq!(read_i32(&edge_bytes, 160), 0x7FFF_FFFF);

        let twap = OrderRequest::Twap(TwapOrderRequest::new(
            "binance", "acct1", "BTCUSDT", "buy", 1.0, 7, 3, "",
        ));
        let twap_bytes = GqMessage::from_order(&twap).to_bytes().unwrap();
        assert_eq!(read_i32(&twap_bytes, 160), 7);
        assert_eq!(read_i32(&twap_bytes, 164), 3);
        // Bytes past the twap arm stay zero (no instrument type here).
        assert!(twap_bytes[168..192].iter().all(|&b| b == 0));

        // And the other direction: the edge record's interval slot holds only
        // what max_timer's width allows, the rest is zero.
        assert!(edge_bytes[164..176].iter().all(|&b| b == 0));
    }

    #[test]
    fn oversized_symbol_is_an_error_not_a_truncation() {
        let request = OrderRequest::Market(MarketOrderRequest::new(
            "binance",
            "acct1",
            &"X".repeat(33),
            "buy",
            1.0,
            "",
        ));
        let err = GqMessage::from_order(&request).to_bytes().unwrap_err();
        assert_eq!(err, EncodingError::Overflow { field: "symbol", len: 33, capacity: 32 });
    }

    #[test]
    fn oversized_account_and_exchange_rejected() {
        let request = OrderRequest::Market(MarketOrderRequest::new(
            "binance",
            &"A".repeat(40),
            "BTCUSDT",
            "buy",
            1.0,
            "",
        ));
        assert!(matches!(
            GqMessage::from_order(&request).to_bytes(),
            Err(EncodingError::Overflow { field: "account", .. })
        ));

        let request = OrderRequest::Market(MarketOrderRequest::new(
            &"e".repeat(17),
            "acct1",
            "BTCUSDT",
            "buy",
            1.0,
            "",
        ));
        assert!(matches!(
            GqMessage::from_order(&request).to_bytes(),
            Err(EncodingError::Overflow { field: "exchange", .. })
        ));
    }

    #[test]
    fn non_ascii_symbol_rejected() {
        let request = OrderRequest::Market(MarketOrderRequest::new(
            "binance", "acct1", "BTCÜSDT", "buy", 1.0, "",
        ));
        assert_eq!(
            GqMessage::from_order(&request).to_bytes().unwrap_err(),
            EncodingError::NotAscii { field: "symbol" }
        );
    }

    #[test]
    fn place_id_arm_layout() {
        let message = GqMessage {
            algorithm_type: AlgorithmType::Place,
            exchange: "BINANCE".into(),
            account: "acct1".into(),
            symbol: "BTCUSDT".into(),
            side_or_place_id: SideOrPlaceId::PlaceId(123456),
            quantity: 1.0,
            price: 0.0,
            credential_id: String::new(),
            params: AlgoParams::Place { order_type: "market".into(), instrument_type: String::new() },
        };
        let bytes = message.to_bytes().unwrap();
        assert_eq!(read_i32(&bytes, 96), 123456);
        // The id only occupies 4 of the 8 union bytes; the rest stays zero.
        assert!(bytes[100..104].iter().all(|&b| b == 0));
    }

    #[test]
    fn tpsl_arm_layout() {
        let message = GqMessage {
            algorithm_type: AlgorithmType::Place,
            exchange: "BYBIT".into(),
            account: "acct1".into(),
            symbol: "BTCUSDT".into(),
            side_or_place_id: SideOrPlaceId::Side("BUY".into()),
            quantity: 1.0,
            price: 0.0,
            credential_id: String::new(),
            params: AlgoParams::Tpsl { tp_percentage: 5.0, sl_percentage: 2.0 },
        };
        let bytes = message.to_bytes().unwrap();
        assert_eq!(read_f64(&bytes, 160), 5.0);
        assert_eq!(read_f64(&bytes, 168), 2.0);
        assert!(bytes[176..192].iter().all(|&b| b == 0));
    }
}
