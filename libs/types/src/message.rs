//! Status-query and market-data wire messages

use crate::order::Order;
use serde::{Deserialize, Serialize};

/// A single (price, timestamp) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub price: f64,
    pub timestamp_ms: i64,
}

impl PriceTick {
    pub fn new(price: f64, timestamp_ms: i64) -> Self {
        Self {
            price,
            timestamp_ms,
        }
    }
}

/// Acknowledgement sent back for every order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
    pub status: crate::order::AckStatus,
    pub message: String,
    pub timestamp: i64,
}

/// One aggregated price level in a book snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: f64,
    pub quantity: f64,
    pub order_count: u32,
}

/// Top-of-book snapshot, bids descending and asks ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub symbol: String,
    pub timestamp: i64,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }
}

/// Status query addressed to the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRequest {
    pub request_type: String,
    pub symbol: String,
}

impl StatusRequest {
    pub fn status(symbol: impl Into<String>) -> Self {
        Self {
            request_type: "status".to_string(),
            symbol: symbol.into(),
        }
    }
}

/// Full per-symbol status snapshot.
///
/// Unknown symbols get a zeroed response with the requested symbol
/// echoed in `current_orderbook`, so monitors need not special-case
/// startup ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub total_orders_received: u64,
    pub total_trades: u64,
    pub total_volume: f64,
    pub last_trade_price: f64,
    pub last_trade_timestamp: i64,
    pub mid_price: f64,
    pub mid_price_timestamp: i64,
    pub last_received_order: Option<Order>,
    pub current_orderbook: OrderBookSnapshot,
    pub trade_price_history: Vec<PriceTick>,
    pub mid_price_history: Vec<PriceTick>,
}

impl StatusResponse {
    /// Zeroed snapshot carrying only the requested symbol name.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            current_orderbook: OrderBookSnapshot::empty(symbol),
            ..Default::default()
        }
    }
}

/// A completed OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub symbol: String,
    /// Bucket start in milliseconds, divisible by the interval.
    pub timestamp: i64,
    pub interval_seconds: i32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub tick_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::AckStatus;

    #[test]
    fn test_empty_status_response_echoes_symbol() {
        let resp = StatusResponse::empty("TSLA");
        assert_eq!(resp.current_orderbook.symbol, "TSLA");
        assert_eq!(resp.total_orders_received, 0);
        assert_eq!(resp.total_volume, 0.0);
        assert!(resp.last_received_order.is_none());
        assert!(resp.trade_price_history.is_empty());
    }

    #[test]
    fn test_status_request_constructor() {
        let req = StatusRequest::status("AAPL");
        assert_eq!(req.request_type, "status");
        assert_eq!(req.symbol, "AAPL");
    }

    #[test]
    fn test_ack_roundtrip() {
        let ack = OrderAck {
            order_id: "TG-7".to_string(),
            status: AckStatus::Accepted,
            message: "OK".to_string(),
            timestamp: 12,
        };
        let json = serde_json::to_string(&ack).unwrap();
        assert!(json.contains("\"status\":\"ACCEPTED\""));
        let back: OrderAck = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ack);
    }

    #[test]
    fn test_snapshot_best_levels() {
        let snap = OrderBookSnapshot {
            symbol: "AAPL".to_string(),
            timestamp: 0,
            bids: vec![
                BookLevel {
                    price: 104.0,
                    quantity: 10.0,
                    order_count: 2,
                },
                BookLevel {
                    price: 103.5,
                    quantity: 4.0,
                    order_count: 1,
                },
            ],
            asks: vec![BookLevel {
                price: 105.0,
                quantity: 7.0,
                order_count: 1,
            }],
        };
        assert_eq!(snap.best_bid().unwrap().price, 104.0);
        assert_eq!(snap.best_ask().unwrap().price, 105.0);
    }
}
