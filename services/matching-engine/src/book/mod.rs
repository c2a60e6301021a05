//! Order book infrastructure
//!
//! Price levels with FIFO queues, the two ordered book sides, and the
//! combined per-symbol book with its cancel index.

pub mod ask_book;
pub mod bid_book;
pub mod order_book;
pub mod price_level;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use order_book::{Fill, OrderBook, RestingOrder};
pub use price_level::PriceLevel;
