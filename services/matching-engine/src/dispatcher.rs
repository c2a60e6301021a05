//! Exchange dispatcher
//!
//! Routes incoming orders to per-symbol engines (created lazily) and
//! answers status queries with a point-in-time snapshot. Single
//! mutator: one cooperative loop drives both request kinds, so the
//! engines need no locking.

use std::collections::HashMap;

use tracing::{debug, info};

use types::order::AckStatus;
use types::{Order, OrderAck, OrderBookSnapshot, StatusResponse};

use crate::engine::{MatchEngine, MatchResult};

/// Book depth returned in status snapshots.
const SNAPSHOT_DEPTH: usize = 5;

struct SymbolEntry {
    engine: MatchEngine,
    order_count: u64,
    last_received_order: Option<Order>,
}

/// Symbol → engine routing and status snapshots.
pub struct ExchangeDispatcher {
    symbols: HashMap<String, SymbolEntry>,
    price_history_size: usize,
}

impl ExchangeDispatcher {
    pub fn new(price_history_size: usize) -> Self {
        Self {
            symbols: HashMap::new(),
            price_history_size,
        }
    }

    /// Route an order to its symbol's engine, creating the engine on
    /// first sight of the symbol, and build the client ack.
    pub fn submit_order(&mut self, order: Order) -> (OrderAck, MatchResult) {
        let entry = self.get_or_create(&order.symbol);
        entry.order_count += 1;
        entry.last_received_order = Some(order.clone());

        let result = entry.engine.match_order(&order);

        let ack = OrderAck {
            order_id: order.order_id.clone(),
            status: if result.success {
                AckStatus::Accepted
            } else {
                AckStatus::Rejected
            },
            message: match &result.error {
                None => "OK".to_string(),
                Some(reason) => reason.clone(),
            },
            timestamp: order.timestamp,
        };

        debug!(
            symbol = %order.symbol,
            order_id = %order.order_id,
            status = ?ack.status,
            trades = result.trades.len(),
            "order processed"
        );
        (ack, result)
    }

    /// Cancel a resting order on a symbol's engine.
    pub fn cancel_order(&mut self, symbol: &str, order_id: &str) -> bool {
        self.symbols
            .get_mut(symbol)
            .map(|entry| entry.engine.cancel(order_id))
            .unwrap_or(false)
    }

    /// Build a status snapshot for `symbol`.
    ///
    /// Unknown symbols return a zeroed snapshot echoing the symbol
    /// name, so monitors can start polling before any order arrives.
    pub fn status(&self, symbol: &str) -> StatusResponse {
        let Some(entry) = self.symbols.get(symbol) else {
            return StatusResponse::empty(symbol);
        };

        let engine = &entry.engine;
        let (bids, asks) = engine.book().snapshot(SNAPSHOT_DEPTH);
        let last_trade = engine.trade_history().get_last();
        let last_mid = engine.mid_history().get_last();

        StatusResponse {
            total_orders_received: entry.order_count,
            total_trades: engine.trade_count(),
            total_volume: engine.total_volume(),
            last_trade_price: last_trade.map(|t| t.price).unwrap_or(0.0),
            last_trade_timestamp: last_trade.map(|t| t.timestamp_ms).unwrap_or(0),
            mid_price: last_mid.map(|t| t.price).unwrap_or(0.0),
            mid_price_timestamp: last_mid.map(|t| t.timestamp_ms).unwrap_or(0),
            last_received_order: entry.last_received_order.clone(),
            current_orderbook: OrderBookSnapshot {
                symbol: symbol.to_string(),
                timestamp: last_mid.map(|t| t.timestamp_ms).unwrap_or(0),
                bids,
                asks,
            },
            trade_price_history: engine.trade_history().to_vec(),
            mid_price_history: engine.mid_history().to_vec(),
        }
    }

    /// Symbols with live engines.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    fn get_or_create(&mut self, symbol: &str) -> &mut SymbolEntry {
        if !self.symbols.contains_key(symbol) {
            info!(symbol, "creating matching engine");
            self.symbols.insert(
                symbol.to_string(),
                SymbolEntry {
                    engine: MatchEngine::new(symbol, self.price_history_size),
                    order_count: 0,
                    last_received_order: None,
                },
            );
        }
        self.symbols.get_mut(symbol).expect("just inserted")
    }
}
