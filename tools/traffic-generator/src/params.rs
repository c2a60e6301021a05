//! Generation configuration

/// Parameters for one traffic-generation session.
///
/// Drift and volatility are percentages (`8.0` = 8% annualized); they
/// are converted to decimals where the GBM process is built. Hawkes
/// regimes carry their own drift/volatility and override these.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub symbol: String,
    /// Starting price for every model.
    pub base_price: f64,
    /// Linear model: price increase per second.
    pub price_rate: f64,
    /// GBM model: annualized drift in percent.
    pub drift_pct: f64,
    /// GBM model: annualized volatility in percent.
    pub volatility_pct: f64,
    /// Paired-order quantity for linear/GBM flow.
    pub order_quantity: f64,
    /// Wall-clock pacing and simulated step size, in milliseconds.
    pub step_interval_ms: u64,
    /// Total simulated duration in seconds.
    pub duration_seconds: f64,
    /// RNG seed; 0 seeds from OS entropy.
    pub seed: u64,
    /// Hawkes: log-volume location parameter.
    pub volume_mu: f64,
    /// Hawkes: log-volume scale parameter.
    pub volume_sigma: f64,
    /// Hawkes: orders per event cloud.
    pub orders_per_event: usize,
    /// Hawkes: simulated seconds between regime draws; 0 disables
    /// switching.
    pub regime_switch_interval_secs: f64,
    /// Bounded queue capacity between producer and submitter.
    pub queue_capacity: usize,
    /// Per-request reply timeout for order submission, milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            base_price: 100.0,
            price_rate: 10.0,
            drift_pct: 5.0,
            volatility_pct: 20.0,
            order_quantity: 1.0,
            step_interval_ms: 100,
            duration_seconds: 10.0,
            seed: 0,
            volume_mu: 0.0,
            volume_sigma: 0.5,
            orders_per_event: 5,
            regime_switch_interval_secs: 30.0,
            queue_capacity: 1024,
            request_timeout_ms: 1_000,
        }
    }
}

impl GenerationConfig {
    /// Step size in seconds.
    pub fn dt_seconds(&self) -> f64 {
        self.step_interval_ms as f64 / 1_000.0
    }

    /// Number of steps covering the configured duration.
    pub fn total_steps(&self) -> u64 {
        (self.duration_seconds / self.dt_seconds()).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_math() {
        let config = GenerationConfig {
            step_interval_ms: 100,
            duration_seconds: 10.0,
            ..Default::default()
        };
        assert_eq!(config.dt_seconds(), 0.1);
        assert_eq!(config.total_steps(), 100);
    }

    #[test]
    fn test_fractional_duration_rounds_up() {
        let config = GenerationConfig {
            step_interval_ms: 300,
            duration_seconds: 1.0,
            ..Default::default()
        };
        assert_eq!(config.total_steps(), 4);
    }
}
