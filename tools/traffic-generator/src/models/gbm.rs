//! GBM price model
//!
//! Thin adapter putting the [`GbmProcess`] behind the model
//! capability.

use stochastics::GbmProcess;

use super::PriceModel;

#[derive(Debug)]
pub struct GbmPriceModel {
    process: GbmProcess,
}

impl GbmPriceModel {
    /// `drift` and `volatility` are annualized decimals; `dt` is the
    /// step as a fraction of a year.
    pub fn new(initial_price: f64, drift: f64, volatility: f64, dt: f64, seed: u64) -> Self {
        Self {
            process: GbmProcess::new(initial_price, drift, volatility, dt, seed),
        }
    }
}

impl PriceModel for GbmPriceModel {
    fn next_price(&mut self) -> f64 {
        self.process.step()
    }

    fn current_price(&self) -> f64 {
        self.process.current_price()
    }

    fn reset(&mut self) {
        self.process.reset();
    }

    fn name(&self) -> &'static str {
        "gbm"
    }

    fn description(&self) -> String {
        format!(
            "Geometric Brownian Motion (drift {:.2}%, volatility {:.2}% annualized)",
            self.process.drift() * 100.0,
            self.process.volatility() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_and_stays_positive() {
        let mut model = GbmPriceModel::new(100.0, 0.05, 0.2, 1.0 / 252.0, 42);
        for _ in 0..1_000 {
            assert!(model.next_price() > 0.0);
        }
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut model = GbmPriceModel::new(100.0, 0.05, 0.2, 1.0 / 252.0, 42);
        model.next_price();
        model.reset();
        assert_eq!(model.current_price(), 100.0);
    }

    #[test]
    fn test_name_and_description() {
        let model = GbmPriceModel::new(100.0, 0.05, 0.2, 1.0 / 252.0, 1);
        assert_eq!(model.name(), "gbm");
        assert!(model.description().contains("5.00%"));
    }
}
