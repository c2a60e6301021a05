//! Monte Carlo simulation helpers
//!
//! A small engine for repeated-payoff estimation over the shared RNG,
//! plus a single-pass statistics accumulator (Welford's algorithm).

use crate::rng::SimRng;

/// Point estimate with a 95% confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceResult {
    pub mean: f64,
    pub std_error: f64,
    pub confidence_lower: f64,
    pub confidence_upper: f64,
}

/// Monte Carlo estimator borrowing the caller's RNG stream.
pub struct MonteCarlo<'a> {
    rng: &'a mut SimRng,
}

impl<'a> MonteCarlo<'a> {
    pub fn new(rng: &'a mut SimRng) -> Self {
        Self { rng }
    }

    /// Mean payoff over `n` simulations.
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn simulate<F>(&mut self, n: usize, mut payoff: F) -> f64
    where
        F: FnMut(&mut SimRng) -> f64,
    {
        assert!(n > 0, "simulation count must be positive");
        let mut sum = 0.0;
        for _ in 0..n {
            sum += payoff(self.rng);
        }
        sum / n as f64
    }

    /// Mean payoff with standard error and a 95% interval.
    ///
    /// # Panics
    /// Panics if `n` is less than two (the variance needs at least two
    /// samples).
    pub fn simulate_with_confidence<F>(&mut self, n: usize, mut payoff: F) -> ConfidenceResult
    where
        F: FnMut(&mut SimRng) -> f64,
    {
        assert!(n >= 2, "confidence estimation needs at least two samples");
        let mut stats = Statistics::new();
        for _ in 0..n {
            stats.add(payoff(self.rng));
        }

        let mean = stats.mean();
        let std_error = (stats.variance() / n as f64).sqrt();
        let margin = 1.96 * std_error;
        ConfidenceResult {
            mean,
            std_error,
            confidence_lower: mean - margin,
            confidence_upper: mean + margin,
        }
    }

    /// Antithetic-variates estimate: each normal draw `z` is evaluated
    /// as both `payoff(z)` and `payoff(-z)`, halving the variance for
    /// monotone payoffs.
    pub fn simulate_antithetic<F>(&mut self, n_pairs: usize, mut payoff: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        assert!(n_pairs > 0, "simulation count must be positive");
        let mut sum = 0.0;
        for _ in 0..n_pairs {
            let z = self.rng.standard_normal();
            sum += payoff(z);
            sum += payoff(-z);
        }
        sum / (2 * n_pairs) as f64
    }
}

/// Single-pass mean/variance/min/max accumulator.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n − 1 denominator); zero below two samples.
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics_known_values() {
        let mut stats = Statistics::new();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add(value);
        }
        assert_eq!(stats.count(), 8);
        assert_relative_eq!(stats.mean(), 5.0);
        assert_relative_eq!(stats.variance(), 32.0 / 7.0, max_relative = 1e-12);
        assert_eq!(stats.min(), 2.0);
        assert_eq!(stats.max(), 9.0);
    }

    #[test]
    fn test_statistics_single_sample() {
        let mut stats = Statistics::new();
        stats.add(3.5);
        assert_eq!(stats.mean(), 3.5);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.min(), 3.5);
        assert_eq!(stats.max(), 3.5);
    }

    #[test]
    fn test_statistics_reset() {
        let mut stats = Statistics::new();
        stats.add(1.0);
        stats.add(2.0);
        stats.reset();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
    }

    #[test]
    fn test_simulate_constant_payoff() {
        let mut rng = SimRng::new(1);
        let mut mc = MonteCarlo::new(&mut rng);
        let mean = mc.simulate(1_000, |_| 7.0);
        assert_eq!(mean, 7.0);
    }

    #[test]
    fn test_simulate_normal_mean() {
        let mut rng = SimRng::new(2);
        let mut mc = MonteCarlo::new(&mut rng);
        let result = mc.simulate_with_confidence(50_000, |rng| rng.normal(3.0, 1.0));
        assert!((result.mean - 3.0).abs() < 4.0 * result.std_error);
        assert!(result.confidence_lower < 3.0 && 3.0 < result.confidence_upper);
    }

    #[test]
    fn test_antithetic_cancels_linear_payoff() {
        // For payoff(z) = z the antithetic pairs cancel exactly.
        let mut rng = SimRng::new(3);
        let mut mc = MonteCarlo::new(&mut rng);
        let mean = mc.simulate_antithetic(10_000, |z| z);
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn test_antithetic_reduces_variance() {
        // Estimate E[exp(Z)] = exp(1/2) both ways with the same draw
        // budget; antithetic must land at least as close.
        let truth = 0.5f64.exp();

        let mut rng = SimRng::new(4);
        let mut mc = MonteCarlo::new(&mut rng);
        let plain = mc.simulate(20_000, |rng| rng.standard_normal().exp());

        let mut rng = SimRng::new(4);
        let mut mc = MonteCarlo::new(&mut rng);
        let antithetic = mc.simulate_antithetic(10_000, |z| z.exp());

        assert!((antithetic - truth).abs() <= (plain - truth).abs() + 0.01);
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_simulations_panics() {
        let mut rng = SimRng::new(5);
        MonteCarlo::new(&mut rng).simulate(0, |_| 1.0);
    }
}
