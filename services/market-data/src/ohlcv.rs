//! OHLCV bar builder
//!
//! Buckets incoming ticks into fixed intervals aligned to the epoch.
//! A bar closes when a tick lands in a different bucket than the open
//! bar; buckets with no ticks produce no bar (sparse bucketing).

use std::collections::VecDeque;

use types::OhlcvBar;

#[derive(Debug, Clone)]
struct BarState {
    bucket_start_ms: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    tick_count: u32,
}

impl BarState {
    fn open_with(price: f64, volume: f64, bucket_start_ms: i64) -> Self {
        Self {
            bucket_start_ms,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
            tick_count: 1,
        }
    }

    fn update(&mut self, price: f64, volume: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume += volume;
        self.tick_count += 1;
    }
}

/// Single-symbol, single-interval bar builder.
pub struct OhlcvBuilder {
    symbol: String,
    interval_seconds: i32,
    interval_ms: i64,
    current: Option<BarState>,
    completed: VecDeque<OhlcvBar>,
}

impl OhlcvBuilder {
    /// Create a builder for `symbol` with the given bar interval.
    ///
    /// # Panics
    /// Panics if `interval_seconds` is not positive.
    pub fn new(symbol: impl Into<String>, interval_seconds: i32) -> Self {
        assert!(interval_seconds > 0, "bar interval must be positive");
        Self {
            symbol: symbol.into(),
            interval_seconds,
            interval_ms: interval_seconds as i64 * 1000,
            current: None,
            completed: VecDeque::new(),
        }
    }

    /// Fold one tick into the current bar, closing it first if the
    /// tick starts a new bucket.
    pub fn process_tick(&mut self, price: f64, timestamp_ms: i64, volume: f64) {
        let bucket = self.bucket_start(timestamp_ms);

        match &mut self.current {
            None => {
                self.current = Some(BarState::open_with(price, volume, bucket));
            }
            Some(bar) if bar.bucket_start_ms == bucket => {
                bar.update(price, volume);
            }
            Some(_) => {
                self.close_current();
                self.current = Some(BarState::open_with(price, volume, bucket));
            }
        }
    }

    /// Whether any closed bar is waiting to be drained.
    pub fn has_completed_bar(&self) -> bool {
        !self.completed.is_empty()
    }

    /// Pop the oldest completed bar.
    pub fn pop_completed_bar(&mut self) -> Option<OhlcvBar> {
        self.completed.pop_front()
    }

    /// Drain all completed bars, oldest first.
    pub fn take_completed_bars(&mut self) -> Vec<OhlcvBar> {
        self.completed.drain(..).collect()
    }

    /// The bar currently being built, if any.
    pub fn current_bar(&self) -> Option<OhlcvBar> {
        self.current.as_ref().map(|state| self.to_bar(state))
    }

    /// Close the open bar regardless of bucket boundaries (end of
    /// session).
    pub fn flush_current(&mut self) {
        self.close_current();
    }

    /// Drop all state, open and completed.
    pub fn reset(&mut self) {
        self.current = None;
        self.completed.clear();
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval_seconds(&self) -> i32 {
        self.interval_seconds
    }

    fn bucket_start(&self, timestamp_ms: i64) -> i64 {
        (timestamp_ms / self.interval_ms) * self.interval_ms
    }

    fn close_current(&mut self) {
        if let Some(state) = self.current.take() {
            let bar = self.to_bar(&state);
            debug_assert!(bar.low <= bar.open.min(bar.close));
            debug_assert!(bar.high >= bar.open.max(bar.close));
            self.completed.push_back(bar);
        }
    }

    fn to_bar(&self, state: &BarState) -> OhlcvBar {
        OhlcvBar {
            symbol: self.symbol.clone(),
            timestamp: state.bucket_start_ms,
            interval_seconds: self.interval_seconds,
            open: state.open,
            high: state.high,
            low: state.low,
            close: state.close,
            volume: state.volume,
            tick_count: state.tick_count,
        }
    }
}
