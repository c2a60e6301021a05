//! Trade execution record

use crate::order::Side;
use serde::{Deserialize, Serialize};

/// A single fill between an incoming (aggressor) order and a resting
/// order.
///
/// `trade_id` is assigned by the engine as a per-symbol monotone
/// counter formatted `TRD_` + 10-digit zero-padded number. The
/// aggressor is always the incoming order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: String,
    pub symbol: String,
    pub price: f64,
    pub quantity: f64,
    pub timestamp: i64,
    pub aggressor_side: Side,
    pub buyer_order_id: String,
    pub seller_order_id: String,
}

impl Trade {
    /// Notional value of the fill (price × quantity).
    pub fn value(&self) -> f64 {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> Trade {
        Trade {
            trade_id: "TRD_0000000001".to_string(),
            symbol: "AAPL".to_string(),
            price: 105.0,
            quantity: 75.0,
            timestamp: 1_700_000_000_000,
            aggressor_side: Side::Buy,
            buyer_order_id: "TG-10".to_string(),
            seller_order_id: "TG-3".to_string(),
        }
    }

    #[test]
    fn test_trade_value() {
        assert_eq!(sample_trade().value(), 7_875.0);
    }

    #[test]
    fn test_trade_serialization() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trade);
        assert!(json.contains("\"aggressor_side\":\"BUY\""));
    }
}
