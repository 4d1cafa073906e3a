//! Order request model and validation.
//!
//! Each request variant owns its field set and a pure `validate()` predicate
//! that gates wire encoding — no encoding or I/O happens here. Constructors
//! normalize case the way the gateway routes: exchange names lowercased,
//! sides uppercased.
//!
//! Validation rules apply in a fixed order and the first failing rule wins:
//!
//! 1. required string fields non-empty
//! 2. numeric fields finite and strictly positive
//! 3. side is BUY or SELL
//! 4. the bybit instrument-type rule, in both directions

use serde::{Deserialize, Serialize};

use super::enums::Side;
use crate::error::ValidationError;

/// The only exchange that requires (and accepts) an `instrument_type`.
const INSTRUMENT_TYPE_EXCHANGE: &str = "bybit";

// ---------------------------------------------------------------------------
// Shared validation helpers
// ---------------------------------------------------------------------------

fn check_positive_number(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive(field))
    }
}

fn check_positive_integer(value: i32, field: &'static str) -> Result<(), ValidationError> {
    if value > 0 { Ok(()) } else { Err(ValidationError::NonPositiveInteger(field)) }
}

fn check_side(side: &str) -> Result<(), ValidationError> {
    Side::parse(side).map(|_| ()).ok_or(ValidationError::InvalidSide)
}

/// The bybit rule is a two-way implication: bybit requests must carry an
/// instrument type, and every other exchange must not.
fn check_instrument_type(exchange: &str, instrument_type: &str) -> Result<(), ValidationError> {
    if exchange == INSTRUMENT_TYPE_EXCHANGE {
        if instrument_type.is_empty() {
            return Err(ValidationError::InstrumentTypeRequired);
        }
    } else if !instrument_type.is_empty() {
        return Err(ValidationError::InstrumentTypeUnsupported(exchange.to_string()));
    }
    Ok(())
}

fn check_required(fields: &[&str], names: &'static str) -> Result<(), ValidationError> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ValidationError::MissingFields(names));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Market order — immediate execution at the prevailing price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    /// Uppercased side string; checked against BUY/SELL during validation.
    pub side: String,
    pub quantity: f64,
    /// Required for bybit, must stay empty for every other exchange.
    pub instrument_type: String,
}

impl MarketOrderRequest {
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// Limit
// ---------------------------------------------------------------------------

/// Limit order — execution at the given price or better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
    pub instrument_type: String,
}

impl LimitOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        price: f64,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            price,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity, price",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_positive_number(self.price, "Price")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// TWAP
// ---------------------------------------------------------------------------

/// TWAP order — one order split into sub-orders spaced over `duration`
/// seconds, one every `interval` seconds.
///
/// `interval <= duration` is deliberately not enforced; the gateway accepts
/// an interval longer than the duration and executes a single slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwapOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    /// Total execution window in seconds.
    pub duration: i32,
    /// Seconds between partial orders.
    pub interval: i32,
    pub instrument_type: String,
}

impl TwapOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        duration: i32,
        interval: i32,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            duration,
            interval,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity, duration, interval",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_positive_integer(self.duration, "Duration")?;
        check_positive_integer(self.interval, "Interval")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// Market Edge
// ---------------------------------------------------------------------------

/// Market-edge order — opportunistic execution bounded by `max_timer` seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEdgeOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    /// Hard time limit for the edge algorithm, in seconds.
    pub max_timer: i32,
    pub instrument_type: String,
}

impl MarketEdgeOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        max_timer: i32,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            max_timer,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity, max_timer",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_positive_integer(self.max_timer, "Max timer")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// TWAP Edge
// ---------------------------------------------------------------------------

/// TWAP-edge order — TWAP slicing combined with the edge strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwapEdgeOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    pub duration: i32,
    pub interval: i32,
    pub instrument_type: String,
}

impl TwapEdgeOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        duration: i32,
        interval: i32,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            duration,
            interval,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity, duration, interval",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_positive_integer(self.duration, "Duration")?;
        check_positive_integer(self.interval, "Interval")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// TP/SL
// ---------------------------------------------------------------------------

/// Take-profit / stop-loss levels for an open position.
///
/// Validated but not yet placeable — the gateway contract does not define an
/// algorithm tag for the tpsl params arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TpslOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub side: String,
    pub quantity: f64,
    /// Take-profit trigger percentage.
    pub tp_percentage: f64,
    /// Stop-loss trigger percentage.
    pub sl_percentage: f64,
    pub instrument_type: String,
}

impl TpslOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        side: &str,
        quantity: f64,
        tp_percentage: f64,
        sl_percentage: f64,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            side: side.to_uppercase(),
            quantity,
            tp_percentage,
            sl_percentage,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.side],
            "exchange_name, account_name, symbol, side, quantity, tp_percentage, sl_percentage",
        )?;
        check_positive_number(self.quantity, "Quantity")?;
        check_positive_number(self.tp_percentage, "Take profit percentage")?;
        check_positive_number(self.sl_percentage, "Stop loss percentage")?;
        check_side(&self.side)?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// Cancel / Modify
// ---------------------------------------------------------------------------

/// Cancel an existing order by gateway order id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub order_id: String,
    pub instrument_type: String,
}

impl CancelOrderRequest {
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        order_id: &str,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            order_id: order_id.to_string(),
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.order_id],
            "exchange_name, account_name, symbol, order_id",
        )?;
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

/// Amend price and/or quantity of an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyOrderRequest {
    pub exchange_name: String,
    pub account_name: String,
    pub symbol: String,
    pub order_id: String,
    /// New limit price, if amending the price.
    pub new_price: Option<f64>,
    /// New quantity, if amending the size.
    pub new_quantity: Option<f64>,
    pub instrument_type: String,
}

impl ModifyOrderRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        exchange_name: &str,
        account_name: &str,
        symbol: &str,
        order_id: &str,
        new_price: Option<f64>,
        new_quantity: Option<f64>,
        instrument_type: &str,
    ) -> Self {
        Self {
            exchange_name: exchange_name.to_lowercase(),
            account_name: account_name.to_string(),
            symbol: symbol.to_string(),
            order_id: order_id.to_string(),
            new_price,
            new_quantity,
            instrument_type: instrument_type.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(
            &[&self.exchange_name, &self.account_name, &self.symbol, &self.order_id],
            "exchange_name, account_name, symbol, order_id",
        )?;
        if let Some(price) = self.new_price {
            check_positive_number(price, "New price")?;
        }
        if let Some(quantity) = self.new_quantity {
            check_positive_number(quantity, "New quantity")?;
        }
        check_instrument_type(&self.exchange_name, &self.instrument_type)
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Credentials payload for the gateway's per-exchange login endpoint.
///
/// Serialized as the JSON body of `POST /{exchange}/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account/user identifier.
    pub name: String,
    /// API key.
    pub key: String,
    /// API secret.
    pub secret: String,
    /// Additional passphrase (some exchanges; may be empty).
    #[serde(default)]
    pub passphrase: String,
    /// Whether the gateway should authenticate with the exchange immediately.
    #[serde(default = "default_authenticate")]
    pub authenticate: bool,
}

fn default_authenticate() -> bool {
    true
}

// ---------------------------------------------------------------------------
// OrderRequest, the codec input
// ---------------------------------------------------------------------------

/// A placeable order — one of the five variants the wire codec encodes.
#[derive(Debug, Clone)]
pub enum OrderRequest {
    Market(MarketOrderRequest),
    Limit(LimitOrderRequest),
    Twap(TwapOrderRequest),
    MarketEdge(MarketEdgeOrderRequest),
    TwapEdge(TwapEdgeOrderRequest),
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Market(r) => r.validate(),
            Self::Limit(r) => r.validate(),
            Self::Twap(r) => r.validate(),
            Self::MarketEdge(r) => r.validate(),
            Self::TwapEdge(r) => r.validate(),
        }
    }

    pub fn exchange_name(&self) -> &str {
        match self {
            Self::Market(r) => &r.exchange_name,
            Self::Limit(r) => &r.exchange_name,
            Self::Twap(r) => &r.exchange_name,
            Self::MarketEdge(r) => &r.exchange_name,
            Self::TwapEdge(r) => &r.exchange_name,
        }
    }

    pub fn account_name(&self) -> &str {
        match self {
            Self::Market(r) => &r.account_name,
            Self::Limit(r) => &r.account_name,
            Self::Twap(r) => &r.account_name,
            Self::MarketEdge(r) => &r.account_name,
            Self::TwapEdge(r) => &r.account_name,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Market(r) => &r.symbol,
            Self::Limit(r) => &r.symbol,
            Self::Twap(r) => &r.symbol,
            Self::MarketEdge(r) => &r.symbol,
            Self::TwapEdge(r) => &r.symbol,
        }
    }

    pub fn side(&self) -> &str {
        match self {
            Self::Market(r) => &r.side,
            Self::Limit(r) => &r.side,
            Self::Twap(r) => &r.side,
            Self::MarketEdge(r) => &r.side,
            Self::TwapEdge(r) => &r.side,
        }
    }

    pub fn quantity(&self) -> f64 {
        match self {
            Self::Market(r) => r.quantity,
            Self::Limit(r) => r.quantity,
            Self::Twap(r) => r.quantity,
            Self::MarketEdge(r) => r.quantity,
            Self::TwapEdge(r) => r.quantity,
        }
    }

    pub fn instrument_type(&self) -> &str {
        match self {
            Self::Market(r) => &r.instrument_type,
            Self::Limit(r) => &r.instrument_type,
            Self::Twap(r) => &r.instrument_type,
            Self::MarketEdge(r) => &r.instrument_type,
            Self::TwapEdge(r) => &r.instrument_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(exchange: &str, instrument_type: &str) -> MarketOrderRequest {
        MarketOrderRequest::new(exchange, "acct1", "BTCUSDT", "buy", 1.0, instrument_type)
    }

    #[test]
    fn minimal_market_order_is_valid() {
        let req = market("binance", "");
        assert!(req.validate().is_ok());
        // Constructor normalization.
        assert_eq!(req.side, "BUY");
        assert_eq!(req.exchange_name, "binance");
    }

    #[test]
    fn exchange_case_is_normalized() {
        let req = market("BINANCE", "");
        assert_eq!(req.exchange_name, "binance");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_fields_rejected_first() {
        // Symbol empty AND quantity bad: the missing-field rule must win.
        let req = MarketOrderRequest::new("binance", "acct1", "", "buy", -1.0, "");
        assert_eq!(
            req.validate(),
            Err(ValidationError::MissingFields(
                "exchange_name, account_name, symbol, side, quantity"
            ))
        );
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let mut req = market("binance", "");
        req.quantity = 0.0;
        assert_eq!(req.validate(), Err(ValidationError::NonPositive("Quantity")));
        req.quantity = f64::NAN;
        assert_eq!(req.validate(), Err(ValidationError::NonPositive("Quantity")));
        req.quantity = f64::INFINITY;
        assert_eq!(req.validate(), Err(ValidationError::NonPositive("Quantity")));
    }

    #[test]
    fn bad_side_rejected() {
        let req = MarketOrderRequest::new("binance", "acct1", "BTCUSDT", "hold", 1.0, "");
        assert_eq!(req.validate(), Err(ValidationError::InvalidSide));
    }

    #[test]
    fn bybit_rule_both_directions() {
        // bybit without instrument_type: invalid.
        assert_eq!(market("bybit", "").validate(), Err(ValidationError::InstrumentTypeRequired));
        // bybit with instrument_type: valid.
        assert!(market("bybit", "linear").validate().is_ok());
        // non-bybit with instrument_type: invalid.
        assert_eq!(
            market("binance", "linear").validate(),
            Err(ValidationError::InstrumentTypeUnsupported("binance".into()))
        );
        // Case-insensitive on the exchange (constructor lowercases).
        assert_eq!(market("ByBit", "").validate(), Err(ValidationError::InstrumentTypeRequired));
    }

    #[test]
    fn limit_order_price_checks() {
        let mut req =
            LimitOrderRequest::new("binance", "acct1", "BTCUSDT", "sell", 2.5, 50000.0, "");
        assert!(req.validate().is_ok());
        req.price = 0.0;
        assert_eq!(req.validate(), Err(ValidationError::NonPositive("Price")));
        req.price = -50000.0;
        assert_eq!(req.validate(), Err(ValidationError::NonPositive("Price")));
    }

    #[test]
    fn twap_duration_and_interval_checks() {
        let ok = TwapOrderRequest::new("bybit", "acct1", "BTCUSDT", "buy", 1.0, 3600, 60, "linear");
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.duration = 0;
        assert_eq!(bad.validate(), Err(ValidationError::NonPositiveInteger("Duration")));

        let mut bad = ok.clone();
        bad.interval = -5;
        assert_eq!(bad.validate(), Err(ValidationError::NonPositiveInteger("Interval")));

        // interval > duration is intentionally accepted.
        let odd = TwapOrderRequest::new("binance", "acct1", "BTCUSDT", "buy", 1.0, 60, 3600, "");
        assert!(odd.validate().is_ok());
    }

    #[test]
    fn market_edge_max_timer_checks() {
        let ok = MarketEdgeOrderRequest::new("binance", "acct1", "BTCUSDT", "sell", 1.0, 30, "");
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.max_timer = 0;
        assert_eq!(bad.validate(), Err(ValidationError::NonPositiveInteger("Max timer")));
    }

    #[test]
    fn twap_edge_mirrors_twap_rules() {
        let ok = TwapEdgeOrderRequest::new("binance", "acct1", "ETHUSDT", "buy", 2.0, 600, 30, "");
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.duration = -1;
        assert_eq!(bad.validate(), Err(ValidationError::NonPositiveInteger("Duration")));
    }

    #[test]
    fn tpsl_percentage_checks() {
        let ok = TpslOrderRequest::new("bybit", "acct1", "BTCUSDT", "buy", 1.0, 5.0, 2.0, "linear");
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.tp_percentage = 0.0;
        assert_eq!(
            bad.validate(),
            Err(ValidationError::NonPositive("Take profit percentage"))
        );

        let mut bad = ok.clone();
        bad.sl_percentage = -2.0;
        assert_eq!(
            bad.validate(),
            Err(ValidationError::NonPositive("Stop loss percentage"))
        );
    }

    #[test]
    fn cancel_and_modify_checks() {
        let cancel = CancelOrderRequest::new("binance", "acct1", "BTCUSDT", "42", "");
        assert!(cancel.validate().is_ok());

        let missing = CancelOrderRequest::new("binance", "acct1", "BTCUSDT", "", "");
        assert_eq!(
            missing.validate(),
            Err(ValidationError::MissingFields("exchange_name, account_name, symbol, order_id"))
        );

        let modify = ModifyOrderRequest::new(
            "binance",
            "acct1",
            "BTCUSDT",
            "42",
            Some(50000.0),
            None,
            "",
        );
        assert!(modify.validate().is_ok());

        let bad_price = ModifyOrderRequest::new(
            "binance",
            "acct1",
            "BTCUSDT",
            "42",
            Some(0.0),
            None,
            "",
        );
        assert_eq!(bad_price.validate(), Err(ValidationError::NonPositive("New price")));
    }

    #[test]
    fn order_request_enum_dispatches() {
        let req = OrderRequest::Limit(LimitOrderRequest::new(
            "bybit", "acct1", "BTCUSDT", "sell", 2.5, 50000.0, "linear",
        ));
        assert!(req.validate().is_ok());
        assert_eq!(req.exchange_name(), "bybit");
        assert_eq!(req.symbol(), "BTCUSDT");
        assert_eq!(req.side(), "SELL");
        assert_eq!(req.instrument_type(), "linear");
        assert!((req.quantity() - 2.5).abs() < f64::EPSILON);
    }
}
