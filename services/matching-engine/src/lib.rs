//! Matching engine core
//!
//! Per-symbol limit order books with strict price-time priority, the
//! price-history rings they feed, and the exchange dispatcher that
//! routes orders and status queries to them.

pub mod book;
pub mod dispatcher;
pub mod engine;
pub mod history;
pub mod stats;

pub use book::OrderBook;
pub use dispatcher::ExchangeDispatcher;
pub use engine::{MatchEngine, MatchResult};
pub use history::PriceHistory;
pub use stats::MarketStats;
