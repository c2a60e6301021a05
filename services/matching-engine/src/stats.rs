//! Per-symbol session statistics
//!
//! Rolling trade and best-of-book figures maintained by the engine:
//! session open/high/low/last, cumulative volume and trade count, and
//! the latest quoted spread.

/// Session market statistics for one symbol.
#[derive(Debug, Clone, Default)]
pub struct MarketStats {
    pub last_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub total_volume: f64,
    pub trade_count: u64,
    pub last_trade_timestamp: i64,

    pub bid_price: f64,
    pub bid_quantity: f64,
    pub ask_price: f64,
    pub ask_quantity: f64,
    pub spread: f64,
}

impl MarketStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one execution into the session figures.
    pub fn update_trade(&mut self, price: f64, volume: f64, timestamp: i64) {
        self.last_price = price;
        self.last_trade_timestamp = timestamp;
        self.total_volume += volume;
        self.trade_count += 1;

        if self.open_price == 0.0 {
            self.open_price = price;
        }
        if self.high_price == 0.0 || price > self.high_price {
            self.high_price = price;
        }
        if self.low_price == 0.0 || price < self.low_price {
            self.low_price = price;
        }
    }

    /// Update the best bid/offer view. Absent sides come in as zero.
    pub fn update_bbo(&mut self, bid_price: f64, bid_quantity: f64, ask_price: f64, ask_quantity: f64) {
        self.bid_price = bid_price;
        self.bid_quantity = bid_quantity;
        self.ask_price = ask_price;
        self.ask_quantity = ask_quantity;
        self.spread = if bid_price > 0.0 && ask_price > 0.0 {
            ask_price - bid_price
        } else {
            0.0
        };
    }

    /// Quoted mid; zero until both sides exist.
    pub fn mid_price(&self) -> f64 {
        if self.bid_price > 0.0 && self.ask_price > 0.0 {
            (self.bid_price + self.ask_price) / 2.0
        } else {
            0.0
        }
    }

    /// Spread in basis points of the mid.
    pub fn spread_bps(&self) -> f64 {
        let mid = self.mid_price();
        if mid > 0.0 {
            (self.spread / mid) * 10_000.0
        } else {
            0.0
        }
    }

    pub fn average_trade_size(&self) -> f64 {
        if self.trade_count > 0 {
            self.total_volume / self.trade_count as f64
        } else {
            0.0
        }
    }
}
