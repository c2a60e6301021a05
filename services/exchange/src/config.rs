//! Exchange service configuration

/// Ports and sizing for one exchange process.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Order request/reply endpoint.
    pub order_endpoint: String,
    /// Status request/reply endpoint.
    pub status_endpoint: String,
    /// Price ticks kept per history ring.
    pub price_history_size: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            order_endpoint: "127.0.0.1:5555".to_string(),
            status_endpoint: "127.0.0.1:5557".to_string(),
            price_history_size: 100,
        }
    }
}
