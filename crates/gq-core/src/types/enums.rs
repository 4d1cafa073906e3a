//! Enumerations shared across the OEMS client.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Order side
// ---------------------------------------------------------------------------

/// Buy or sell. The wire format carries the uppercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse a side string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Wire representation (`"BUY"` / `"SELL"`).
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Algorithm type
// ---------------------------------------------------------------------------

/// Execution algorithm selector.
///
/// The wire tag doubles as the discriminant of the params union in the GQ
/// record: the gateway reads the arm named by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmType {
    /// Plain placement (market or limit).
    Place,
    /// Time-weighted average price execution.
    Twap,
    /// Opportunistic execution bounded by a maximum timer.
    MarketEdge,
    /// TWAP combined with the edge strategy.
    TwapEdge,
}

impl AlgorithmType {
    /// Tag string written into the 16-byte `algorithm_type` wire slot.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Self::Place => "PLACE",
            Self::Twap => "TWAP",
            Self::MarketEdge => "MARKET_EDGE",
            Self::TwapEdge => "TWAP_EDGE",
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parse_is_case_insensitive() {
        assert_eq!(Side::parse("buy"), Some(Side::Buy));
        assert_eq!(Side::parse("Buy"), Some(Side::Buy));
        assert_eq!(Side::parse("SELL"), Some(Side::Sell));
        assert_eq!(Side::parse("hold"), None);
        assert_eq!(Side::parse(""), None);
    }

    #[test]
    fn wire_tags() {
        assert_eq!(AlgorithmType::Place.wire_tag(), "PLACE");
        assert_eq!(AlgorithmType::Twap.wire_tag(), "TWAP");
        assert_eq!(AlgorithmType::MarketEdge.wire_tag(), "MARKET_EDGE");
        assert_eq!(AlgorithmType::TwapEdge.wire_tag(), "TWAP_EDGE");
    }
}
