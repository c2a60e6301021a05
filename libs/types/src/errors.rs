//! Error taxonomy
//!
//! Validation failures are reported to clients on the ack; transport
//! failures are transient and swallowed by polling loops; invariant
//! violations inside the engine are programmer errors and assert.

use thiserror::Error;

/// Reasons an order is rejected at admission.
///
/// Rejections never mutate engine state; the message text travels back
/// on the `OrderAck`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("Symbol mismatch")]
    SymbolMismatch,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("invalid price")]
    InvalidPrice,

    #[error("duplicate order id: {order_id}")]
    DuplicateOrderId { order_id: String },
}

/// Transient transport-layer failures.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("peer disconnected")]
    Disconnected,
}
