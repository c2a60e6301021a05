//! Per-symbol order book
//!
//! Combines the two book sides with an `order_id → (price, side)`
//! index for O(1) cancels. Every resting order appears in exactly one
//! level and in the index; neither without the other.

use std::collections::HashMap;

use types::{BookLevel, Price, Quantity, Side};

use super::ask_book::AskBook;
use super::bid_book::BidBook;

/// An order resting at a price level.
#[derive(Debug, Clone)]
pub struct RestingOrder {
    pub order_id: String,
    pub client_id: String,
    pub price: Price,
    pub quantity: Quantity,
    pub filled_quantity: Quantity,
    pub timestamp: i64,
}

impl RestingOrder {
    pub fn new(
        order_id: impl Into<String>,
        client_id: impl Into<String>,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            client_id: client_id.into(),
            price,
            quantity,
            filled_quantity: Quantity::zero(),
            timestamp,
        }
    }

    pub fn remaining(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Record a fill against this order.
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining(),
            "fill would exceed order quantity"
        );
        self.filled_quantity += quantity;
    }
}

/// One execution against the book's best counter level.
#[derive(Debug, Clone)]
pub struct Fill {
    pub maker_order_id: String,
    pub price: Price,
    pub quantity: Quantity,
}

/// Order book for a single symbol.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
    /// order_id → (price, side) back-pointers, resolved via lookup.
    index: HashMap<String, (Price, Side)>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest a limit order on its side and record it in the index.
    pub fn add_resting(&mut self, order: RestingOrder, side: Side) {
        debug_assert!(
            !self.index.contains_key(&order.order_id),
            "duplicate resting order id {}",
            order.order_id
        );
        self.index
            .insert(order.order_id.clone(), (order.price, side));
        match side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// Remove a resting order by id. O(1) level lookup via the index.
    pub fn remove_order(&mut self, order_id: &str) -> bool {
        let Some((price, side)) = self.index.get(order_id).copied() else {
            return false;
        };
        let removed = match side {
            Side::Buy => self.bids.remove(order_id, price),
            Side::Sell => self.asks.remove(order_id, price),
        };
        assert!(
            removed.is_some(),
            "indexed order {order_id} missing from its level"
        );
        self.index.remove(order_id);
        true
    }

    /// Whether an order id is currently resting.
    pub fn contains(&self, order_id: &str) -> bool {
        self.index.contains_key(order_id)
    }

    /// Highest bid with aggregate quantity.
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best()
    }

    /// Lowest ask with aggregate quantity.
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best()
    }

    /// Execute one fill for an incoming order against the best counter
    /// level.
    ///
    /// `limit` bounds the acceptable counter price for LIMIT orders
    /// (`None` for MARKET). Returns `None` when the counter side is
    /// empty or its best price no longer crosses; otherwise mutates the
    /// book (consumed makers leave the level and the index, empty
    /// levels are erased) and reports the fill.
    pub fn execute_against_best(
        &mut self,
        incoming_side: Side,
        limit: Option<Price>,
        remaining: Quantity,
    ) -> Option<Fill> {
        match incoming_side {
            Side::Buy => {
                let level = self.asks.best_level_mut()?;
                let best_price = level.price();
                // Strict inequality: an incoming LIMIT at exactly the
                // best counter price still matches.
                if limit.is_some_and(|l| best_price > l) {
                    return None;
                }
                let maker = level.front().expect("non-empty level");
                let maker_id = maker.order_id.clone();
                let fill_qty = remaining.min(maker.remaining());
                let consumed = level.fill_front(fill_qty);
                if let Some(done) = consumed {
                    self.index.remove(&done);
                }
                self.asks.prune_empty(best_price);
                Some(Fill {
                    maker_order_id: maker_id,
                    price: best_price,
                    quantity: fill_qty,
                })
            }
            Side::Sell => {
                let level = self.bids.best_level_mut()?;
                let best_price = level.price();
                if limit.is_some_and(|l| best_price < l) {
                    return None;
                }
                let maker = level.front().expect("non-empty level");
                let maker_id = maker.order_id.clone();
                let fill_qty = remaining.min(maker.remaining());
                let consumed = level.fill_front(fill_qty);
                if let Some(done) = consumed {
                    self.index.remove(&done);
                }
                self.bids.prune_empty(best_price);
                Some(Fill {
                    maker_order_id: maker_id,
                    price: best_price,
                    quantity: fill_qty,
                })
            }
        }
    }

    /// Top `depth` levels per side: bids descending, asks ascending.
    pub fn snapshot(&self, depth: usize) -> (Vec<BookLevel>, Vec<BookLevel>) {
        (
            self.bids.depth_snapshot(depth),
            self.asks.depth_snapshot(depth),
        )
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }

    /// Number of resting orders across both sides.
    pub fn resting_order_count(&self) -> usize {
        self.index.len()
    }

    /// Verify index/level consistency. Test and debug helper; a
    /// violation is a bug in the book itself.
    pub fn check_invariants(&self) {
        let mut seen = 0usize;
        for (side_levels, side) in [
            (self.bids.iter().collect::<Vec<_>>(), Side::Buy),
            (self.asks.iter().collect::<Vec<_>>(), Side::Sell),
        ] {
            for level in side_levels {
                assert!(!level.is_empty(), "empty level left in side map");
                let mut total = Quantity::zero();
                for order in level.iter() {
                    total += order.remaining();
                    let indexed = self
                        .index
                        .get(&order.order_id)
                        .unwrap_or_else(|| panic!("order {} missing from index", order.order_id));
                    assert_eq!(*indexed, (level.price(), side), "index points elsewhere");
                    seen += 1;
                }
                assert_eq!(level.total_quantity(), total, "level total out of sync");
                assert!(!total.is_zero(), "non-empty level with zero total");
            }
        }
        assert_eq!(seen, self.index.len(), "index holds unknown orders");
    }
}
