//! Per-symbol matching engine
//!
//! Price-time priority matching for limit and market orders. The walk
//! mutates the book directly: each fill consumes queue heads at the
//! best counter level, exhausted makers leave the index immediately,
//! and empty levels are erased before the next iteration.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use types::errors::OrderRejection;
use types::{Order, OrderType, Price, Quantity, Side, Trade};

use crate::book::{OrderBook, RestingOrder};
use crate::history::PriceHistory;
use crate::stats::MarketStats;

/// Outcome of matching one incoming order.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub success: bool,
    pub trades: Vec<Trade>,
    pub executed_quantity: f64,
    /// Volume-weighted average fill price; 0 when nothing executed.
    pub vwap_execution_price: f64,
    pub error: Option<String>,
}

impl MatchResult {
    fn rejected(reason: OrderRejection) -> Self {
        Self {
            success: false,
            trades: Vec::new(),
            executed_quantity: 0.0,
            vwap_execution_price: 0.0,
            error: Some(reason.to_string()),
        }
    }
}

/// Matching engine owning one symbol's book, statistics and price
/// histories.
pub struct MatchEngine {
    symbol: String,
    book: OrderBook,
    trade_id_counter: u64,
    trade_count: u64,
    total_volume: Quantity,
    stats: MarketStats,
    trade_history: PriceHistory,
    mid_history: PriceHistory,
}

impl MatchEngine {
    pub fn new(symbol: impl Into<String>, price_history_size: usize) -> Self {
        Self {
            symbol: symbol.into(),
            book: OrderBook::new(),
            trade_id_counter: 0,
            trade_count: 0,
            total_volume: Quantity::zero(),
            stats: MarketStats::new(),
            trade_history: PriceHistory::new(price_history_size),
            mid_history: PriceHistory::new(price_history_size),
        }
    }

    /// Match an incoming order against the book.
    ///
    /// Validation failures reject without touching state. A market
    /// order against an empty counter side succeeds with zero
    /// executed quantity; its remainder is always discarded.
    pub fn match_order(&mut self, order: &Order) -> MatchResult {
        if order.symbol != self.symbol {
            return MatchResult::rejected(OrderRejection::SymbolMismatch);
        }

        let Some(quantity) = Quantity::from_f64(order.quantity) else {
            return MatchResult::rejected(OrderRejection::InvalidQuantity);
        };

        let limit = match order.order_type {
            OrderType::Limit => match Price::from_f64(order.price) {
                Some(price) => Some(price),
                None => return MatchResult::rejected(OrderRejection::InvalidPrice),
            },
            OrderType::Market => {
                if !order.price.is_finite() || order.price < 0.0 {
                    return MatchResult::rejected(OrderRejection::InvalidPrice);
                }
                None
            }
        };

        if self.book.contains(&order.order_id) {
            return MatchResult::rejected(OrderRejection::DuplicateOrderId {
                order_id: order.order_id.clone(),
            });
        }

        let mut remaining = quantity;
        let mut trades = Vec::new();
        let mut executed_value = Decimal::ZERO;

        while !remaining.is_zero() {
            let Some(fill) = self
                .book
                .execute_against_best(order.side, limit, remaining)
            else {
                break;
            };

            remaining -= fill.quantity;
            executed_value += fill.quantity.as_decimal() * fill.price.as_decimal();

            let now = now_ms();
            let trade = self.build_trade(order, &fill.maker_order_id, fill.price, fill.quantity, now);
            trace!(
                symbol = %self.symbol,
                trade_id = %trade.trade_id,
                price = trade.price,
                quantity = trade.quantity,
                "fill"
            );
            self.stats.update_trade(trade.price, trade.quantity, now);
            self.trade_history.add(fill.price.to_f64(), now);
            trades.push(trade);
        }

        let executed = quantity - remaining;

        if order.order_type == OrderType::Limit && !remaining.is_zero() {
            let mut resting = RestingOrder::new(
                &order.order_id,
                &order.client_id,
                limit.expect("limit order has a price"),
                quantity,
                order.timestamp,
            );
            resting.filled_quantity = executed;
            self.book.add_resting(resting, order.side);
            debug!(
                symbol = %self.symbol,
                order_id = %order.order_id,
                remaining = %remaining,
                "rested limit remainder"
            );
        }
        // Market remainders are discarded: market orders never rest.

        self.trade_count += trades.len() as u64;
        self.total_volume += executed;
        self.update_mid_price();

        let executed_f64 = executed.to_f64();
        let vwap = if executed.is_zero() {
            0.0
        } else {
            (executed_value / executed.as_decimal())
                .to_f64()
                .unwrap_or(0.0)
        };

        MatchResult {
            success: true,
            trades,
            executed_quantity: executed_f64,
            vwap_execution_price: vwap,
            error: None,
        }
    }

    /// Cancel a resting order by id.
    pub fn cancel(&mut self, order_id: &str) -> bool {
        let removed = self.book.remove_order(order_id);
        if removed {
            debug!(symbol = %self.symbol, order_id, "order cancelled");
        }
        removed
    }

    fn build_trade(
        &mut self,
        incoming: &Order,
        maker_order_id: &str,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Trade {
        self.trade_id_counter += 1;
        let (buyer_order_id, seller_order_id) = match incoming.side {
            Side::Buy => (incoming.order_id.clone(), maker_order_id.to_string()),
            Side::Sell => (maker_order_id.to_string(), incoming.order_id.clone()),
        };
        Trade {
            trade_id: format!("TRD_{:010}", self.trade_id_counter),
            symbol: self.symbol.clone(),
            price: price.to_f64(),
            quantity: quantity.to_f64(),
            timestamp,
            aggressor_side: incoming.side,
            buyer_order_id,
            seller_order_id,
        }
    }

    /// Recompute the mid-price from the current best of book and push
    /// it to the mid history. With only one side present that side's
    /// best is used; with no sides nothing is pushed.
    fn update_mid_price(&mut self) {
        let best_bid = self.book.best_bid();
        let best_ask = self.book.best_ask();
        self.stats.update_bbo(
            best_bid.map_or(0.0, |(p, _)| p.to_f64()),
            best_bid.map_or(0.0, |(_, q)| q.to_f64()),
            best_ask.map_or(0.0, |(p, _)| p.to_f64()),
            best_ask.map_or(0.0, |(_, q)| q.to_f64()),
        );

        let mid = match (best_bid, best_ask) {
            (Some((bid, _)), Some((ask, _))) => {
                (bid.as_decimal() + ask.as_decimal()) / Decimal::from(2)
            }
            (Some((bid, _)), None) => bid.as_decimal(),
            (None, Some((ask, _))) => ask.as_decimal(),
            (None, None) => return,
        };
        self.mid_history
            .add(mid.to_f64().unwrap_or(0.0), now_ms());
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume.to_f64()
    }

    /// Session open/high/low/last, cumulative figures and last BBO.
    pub fn market_stats(&self) -> &MarketStats {
        &self.stats
    }

    pub fn trade_history(&self) -> &PriceHistory {
        &self.trade_history
    }

    pub fn mid_history(&self) -> &PriceHistory {
        &self.mid_history
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
