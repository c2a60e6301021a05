//! Geometric Brownian Motion price process
//!
//! Discrete update of `dS/S = μ·dt + σ·dW`:
//!
//! `S(t+Δt) = S(t) · exp((μ − σ²/2)·Δt + σ·√Δt·Z)`, `Z ~ N(0,1)`.
//!
//! `dt` is a fraction of a year; drift and volatility are annualized
//! decimals (percent-to-decimal conversion is the caller's job).

use crate::rng::SimRng;

/// Discrete GBM generator owning its RNG stream.
#[derive(Debug)]
pub struct GbmProcess {
    initial_price: f64,
    current_price: f64,
    drift: f64,
    volatility: f64,
    dt: f64,
    rng: SimRng,
}

impl GbmProcess {
    /// Create a process starting at `initial_price`.
    ///
    /// # Panics
    /// Panics if `initial_price`, `dt` are not positive or
    /// `volatility` is negative.
    pub fn new(initial_price: f64, drift: f64, volatility: f64, dt: f64, seed: u64) -> Self {
        assert!(initial_price > 0.0, "initial price must be positive");
        assert!(dt > 0.0, "dt must be positive");
        assert!(volatility >= 0.0, "volatility must be non-negative");
        Self {
            initial_price,
            current_price: initial_price,
            drift,
            volatility,
            dt,
            rng: SimRng::new(seed),
        }
    }

    /// Advance one step and return the new price.
    pub fn step(&mut self) -> f64 {
        let z = self.rng.standard_normal();
        let drift_term = (self.drift - 0.5 * self.volatility * self.volatility) * self.dt;
        let diffusion_term = self.volatility * self.dt.sqrt() * z;
        self.current_price *= (drift_term + diffusion_term).exp();
        self.current_price
    }

    /// Current price without advancing.
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Restore the initial price. The RNG stream is not rewound.
    pub fn reset(&mut self) {
        self.current_price = self.initial_price;
    }

    /// Reconfigure drift between steps (regime switching).
    pub fn set_drift(&mut self, drift: f64) {
        self.drift = drift;
    }

    /// Reconfigure volatility between steps (regime switching).
    pub fn set_volatility(&mut self, volatility: f64) {
        assert!(volatility >= 0.0, "volatility must be non-negative");
        self.volatility = volatility;
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Generate `n` future prices without moving the current price.
    pub fn generate_path(&mut self, n: usize) -> Vec<f64> {
        let saved = self.current_price;
        let path = (0..n).map(|_| self.step()).collect();
        self.current_price = saved;
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const YEAR_SECS: f64 = 31_536_000.0;

    #[test]
    fn test_prices_stay_positive() {
        let mut gbm = GbmProcess::new(100.0, 0.05, 0.8, 1.0 / YEAR_SECS, 17);
        for _ in 0..10_000 {
            assert!(gbm.step() > 0.0);
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic_drift() {
        let dt = 1.0 / 252.0;
        let mut gbm = GbmProcess::new(100.0, 0.10, 0.0, dt, 3);
        let p1 = gbm.step();
        assert_relative_eq!(p1, 100.0 * (0.10 * dt).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut gbm = GbmProcess::new(100.0, 0.05, 0.2, 1.0 / 252.0, 5);
        gbm.step();
        gbm.step();
        gbm.reset();
        assert_eq!(gbm.current_price(), 100.0);
    }

    #[test]
    fn test_same_seed_reproduces_path() {
        let mut a = GbmProcess::new(100.0, 0.05, 0.3, 1.0 / 252.0, 42);
        let mut b = GbmProcess::new(100.0, 0.05, 0.3, 1.0 / 252.0, 42);
        for _ in 0..100 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn test_generate_path_preserves_state() {
        let mut gbm = GbmProcess::new(100.0, 0.05, 0.3, 1.0 / 252.0, 9);
        gbm.step();
        let before = gbm.current_price();
        let path = gbm.generate_path(50);
        assert_eq!(path.len(), 50);
        assert_eq!(gbm.current_price(), before);
    }

    #[test]
    fn test_regime_reconfiguration() {
        let mut gbm = GbmProcess::new(100.0, 0.08, 0.03, 1.0 / 252.0, 1);
        gbm.set_drift(-0.20);
        gbm.set_volatility(0.15);
        assert_eq!(gbm.drift(), -0.20);
        assert_eq!(gbm.volatility(), 0.15);
    }

    #[test]
    fn test_log_return_distribution() {
        // With daily steps the mean log return is (mu - sigma^2/2) dt
        // and its standard deviation is sigma sqrt(dt).
        let dt = 1.0 / 252.0;
        let (mu, sigma) = (0.05, 0.2);
        let mut gbm = GbmProcess::new(100.0, mu, sigma, dt, 77);
        let n = 100_000;
        let mut prev = gbm.current_price();
        let mut stats = crate::monte_carlo::Statistics::new();
        for _ in 0..n {
            let next = gbm.step();
            stats.add((next / prev).ln());
            prev = next;
        }
        let expected = (mu - 0.5 * sigma * sigma) * dt;
        let stderr = sigma * dt.sqrt() / (n as f64).sqrt();
        assert!(
            (stats.mean() - expected).abs() < 4.0 * stderr,
            "mean log return {} too far from {expected}",
            stats.mean()
        );
        let expected_sd = sigma * dt.sqrt();
        assert!((stats.stddev() - expected_sd).abs() / expected_sd < 0.02);
    }
}
