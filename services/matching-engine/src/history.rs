//! Bounded price history ring
//!
//! Keeps the last N (price, timestamp) observations per series. Stored
//! timestamps are strictly increasing after the first tick: a write at
//! or before the last recorded timestamp is rewritten as `last + 1`.

use std::collections::VecDeque;

use types::PriceTick;

/// Fixed-capacity ring of price ticks, oldest first.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    ticks: VecDeque<PriceTick>,
    max_size: usize,
}

impl PriceHistory {
    /// Create a ring keeping at most `max_size` ticks.
    ///
    /// # Panics
    /// Panics if `max_size` is zero.
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "history capacity must be positive");
        Self {
            ticks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Append a tick, dropping the oldest entry when full.
    pub fn add(&mut self, price: f64, timestamp_ms: i64) {
        let timestamp_ms = match self.ticks.back() {
            Some(last) if timestamp_ms <= last.timestamp_ms => last.timestamp_ms + 1,
            _ => timestamp_ms,
        };

        if self.ticks.len() == self.max_size {
            self.ticks.pop_front();
        }
        self.ticks.push_back(PriceTick::new(price, timestamp_ms));
    }

    /// Most recent tick.
    pub fn get_last(&self) -> Option<PriceTick> {
        self.ticks.back().copied()
    }

    /// Up to `n` most recent ticks, oldest first.
    pub fn get_last_n(&self, n: usize) -> Vec<PriceTick> {
        let skip = self.ticks.len().saturating_sub(n);
        self.ticks.iter().skip(skip).copied().collect()
    }

    /// All ticks, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PriceTick> {
        self.ticks.iter()
    }

    /// Snapshot of the whole ring, oldest first.
    pub fn to_vec(&self) -> Vec<PriceTick> {
        self.ticks.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_last() {
        let mut history = PriceHistory::new(10);
        history.add(100.0, 1_000);
        history.add(101.0, 2_000);

        let last = history.get_last().unwrap();
        assert_eq!(last.price, 101.0);
        assert_eq!(last.timestamp_ms, 2_000);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = PriceHistory::new(3);
        for i in 0..5 {
            history.add(i as f64, 1_000 + i);
        }
        assert_eq!(history.len(), 3);
        let ticks = history.to_vec();
        assert_eq!(ticks[0].price, 2.0);
        assert_eq!(ticks[2].price, 4.0);
    }

    #[test]
    fn test_monotone_timestamp_rewrite() {
        let mut history = PriceHistory::new(10);
        history.add(1.0, 10);
        history.add(2.0, 10);
        history.add(3.0, 5);

        let stamps: Vec<i64> = history.iter().map(|t| t.timestamp_ms).collect();
        assert_eq!(stamps, vec![10, 11, 12]);
    }

    #[test]
    fn test_strictly_increasing_after_first() {
        let mut history = PriceHistory::new(100);
        for i in 0..50 {
            // Every write uses the same timestamp; the ring must still
            // be strictly increasing.
            history.add(i as f64, 42);
        }
        let stamps: Vec<i64> = history.iter().map(|t| t.timestamp_ms).collect();
        for pair in stamps.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_get_last_n() {
        let mut history = PriceHistory::new(10);
        for i in 0..6 {
            history.add(i as f64, 1_000 + i);
        }
        let last_two = history.get_last_n(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].price, 4.0);
        assert_eq!(last_two[1].price, 5.0);

        assert_eq!(history.get_last_n(100).len(), 6);
    }

    #[test]
    fn test_empty_history() {
        let history = PriceHistory::new(4);
        assert!(history.is_empty());
        assert!(history.get_last().is_none());
        assert!(history.get_last_n(3).is_empty());
    }
}
