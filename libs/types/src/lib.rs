//! Shared types for the market simulator
//!
//! Wire messages exchanged between the traffic generator, the exchange
//! and the monitor, plus the fixed-point numeric types used inside the
//! matching engine.

pub mod errors;
pub mod message;
pub mod numeric;
pub mod order;
pub mod trade;

pub use errors::{OrderRejection, TransportError};
pub use message::{
    BookLevel, OhlcvBar, OrderAck, OrderBookSnapshot, PriceTick, StatusRequest, StatusResponse,
};
pub use numeric::{Price, Quantity};
pub use order::{AckStatus, Order, OrderType, Side};
pub use trade::Trade;
