//! Distribution samplers for order-flow generation
//!
//! Inverse-CDF samplers over a shared [`SimRng`]. Parameter validation
//! failures are programmer errors and assert.

use crate::rng::SimRng;

/// Floor applied to uniform draws before taking a logarithm.
const LOG_EPSILON: f64 = 1e-10;

/// Exponential draw with rate `lambda`: `X = -ln(max(U, ε)) / λ`.
pub fn sample_exponential(lambda: f64, rng: &mut SimRng) -> f64 {
    assert!(lambda > 0.0, "exponential rate must be positive");
    let u = rng.uniform_01().max(LOG_EPSILON);
    -u.ln() / lambda
}

/// Bernoulli trial: true with probability `p`.
pub fn sample_bernoulli(p: f64, rng: &mut SimRng) -> bool {
    rng.uniform_01() < p
}

/// Truncated Pareto draw on `[l, x_max]` with tail exponent `alpha`.
///
/// Inverse CDF: `X = L · (1 − U·(1 − (L/x_max)^α))^(−1/α)`, clamped to
/// the support to absorb floating-point drift at the edges.
pub fn sample_truncated_pareto(l: f64, alpha: f64, x_max: f64, rng: &mut SimRng) -> f64 {
    assert!(l > 0.0, "Pareto lower bound must be positive");
    assert!(x_max > l, "Pareto upper bound must exceed lower bound");
    assert!(alpha > 0.0, "Pareto exponent must be positive");

    let u = rng.uniform_01();
    let truncation = 1.0 - (l / x_max).powf(alpha);
    let x = l * (1.0 - u * truncation).powf(-1.0 / alpha);
    x.clamp(l, x_max)
}

/// Log-normal draw: `X = exp(μ + σ·Z)` with `Z ~ N(0, 1)`.
pub fn sample_lognormal(mu: f64, sigma: f64, rng: &mut SimRng) -> f64 {
    assert!(sigma >= 0.0, "log-normal sigma must be non-negative");
    (mu + sigma * rng.standard_normal()).exp()
}

/// Numerically stable logistic (sigmoid) function.
///
/// For large negative `x`, `1/(1+e^{-x})` would overflow the exponent;
/// the `e^x/(1+e^x)` form keeps the intermediate bounded.
pub fn logistic(x: f64) -> f64 {
    if x < 0.0 {
        let e = x.exp();
        e / (1.0 + e)
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_mean() {
        let mut rng = SimRng::new(11);
        let lambda = 4.0;
        let n = 50_000;
        let mean: f64 = (0..n)
            .map(|_| sample_exponential(lambda, &mut rng))
            .sum::<f64>()
            / n as f64;
        assert_relative_eq!(mean, 1.0 / lambda, max_relative = 0.05);
    }

    #[test]
    #[should_panic(expected = "rate must be positive")]
    fn test_exponential_rejects_bad_lambda() {
        let mut rng = SimRng::new(1);
        sample_exponential(0.0, &mut rng);
    }

    #[test]
    fn test_bernoulli_frequency() {
        let mut rng = SimRng::new(5);
        let n = 20_000;
        let hits = (0..n).filter(|_| sample_bernoulli(0.3, &mut rng)).count();
        let freq = hits as f64 / n as f64;
        assert!((freq - 0.3).abs() < 0.02, "frequency was {freq}");
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = SimRng::new(5);
        assert!(!sample_bernoulli(0.0, &mut rng));
        assert!(sample_bernoulli(1.0, &mut rng));
    }

    #[test]
    fn test_truncated_pareto_support() {
        let mut rng = SimRng::new(21);
        for _ in 0..10_000 {
            let x = sample_truncated_pareto(0.1, 3.0, 5.0, &mut rng);
            assert!((0.1..=5.0).contains(&x), "sample {x} outside support");
        }
    }

    #[test]
    fn test_truncated_pareto_is_heavy_near_lower_bound() {
        let mut rng = SimRng::new(22);
        let n = 20_000;
        let below_double_l = (0..n)
            .filter(|_| sample_truncated_pareto(0.1, 3.0, 5.0, &mut rng) < 0.2)
            .count();
        // For alpha = 3 most of the mass sits within [L, 2L).
        assert!(below_double_l as f64 / n as f64 > 0.8);
    }

    #[test]
    #[should_panic(expected = "upper bound must exceed")]
    fn test_truncated_pareto_rejects_bad_bounds() {
        let mut rng = SimRng::new(1);
        sample_truncated_pareto(1.0, 2.0, 1.0, &mut rng);
    }

    #[test]
    fn test_lognormal_median() {
        let mut rng = SimRng::new(31);
        let n = 50_000;
        let mut samples: Vec<f64> = (0..n).map(|_| sample_lognormal(0.0, 0.5, &mut rng)).collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        // Median of LogNormal(mu, sigma) is exp(mu).
        assert_relative_eq!(samples[n / 2], 1.0, max_relative = 0.05);
        assert!(samples[0] > 0.0);
    }

    #[test]
    fn test_logistic_symmetry_and_limits() {
        assert_relative_eq!(logistic(0.0), 0.5);
        assert_relative_eq!(logistic(2.0) + logistic(-2.0), 1.0, epsilon = 1e-12);
        assert!(logistic(-800.0) >= 0.0);
        assert!(logistic(800.0) <= 1.0);
        assert_relative_eq!(logistic(800.0), 1.0, epsilon = 1e-12);
    }
}
