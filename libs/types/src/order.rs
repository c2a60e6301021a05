//! Order wire message and related enums

use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Rests at its price if not immediately matched
    Limit,
    /// Executes against the book, remainder is discarded
    Market,
}

/// Acknowledgement status returned for a submitted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AckStatus {
    Accepted,
    Rejected,
    Filled,
    PartiallyFilled,
    Cancelled,
    Pending,
}

/// Incoming order message.
///
/// `price` is `0.0` only for market orders; `timestamp` is advisory
/// (monotone per client) in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub client_id: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub price: f64,
    pub quantity: f64,
    pub timestamp: i64,
}

impl Order {
    /// Build a limit order.
    pub fn limit(
        order_id: impl Into<String>,
        symbol: impl Into<String>,
        client_id: impl Into<String>,
        side: Side,
        price: f64,
        quantity: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            symbol: symbol.into(),
            client_id: client_id.into(),
            side,
            order_type: OrderType::Limit,
            price,
            quantity,
            timestamp,
        }
    }

    /// Build a market order. Market orders carry price 0.
    pub fn market(
        order_id: impl Into<String>,
        symbol: impl Into<String>,
        client_id: impl Into<String>,
        side: Side,
        quantity: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            symbol: symbol.into(),
            client_id: client_id.into(),
            side,
            order_type: OrderType::Market,
            price: 0.0,
            quantity,
            timestamp,
        }
    }
}
