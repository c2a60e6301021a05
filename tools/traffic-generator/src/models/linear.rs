//! Linear price model
//!
//! Deterministic ramp: `price = base + rate_per_step · step`.

use super::PriceModel;

#[derive(Debug)]
pub struct LinearPriceModel {
    base_price: f64,
    rate_per_step: f64,
    current_price: f64,
    step_count: u64,
}

impl LinearPriceModel {
    pub fn new(base_price: f64, rate_per_step: f64) -> Self {
        Self {
            base_price,
            rate_per_step,
            current_price: base_price,
            step_count: 0,
        }
    }
}

impl PriceModel for LinearPriceModel {
    fn next_price(&mut self) -> f64 {
        self.step_count += 1;
        self.current_price = self.base_price + self.rate_per_step * self.step_count as f64;
        self.current_price
    }

    fn current_price(&self) -> f64 {
        self.current_price
    }

    fn reset(&mut self) {
        self.current_price = self.base_price;
        self.step_count = 0;
    }

    fn name(&self) -> &'static str {
        "linear"
    }

    fn description(&self) -> String {
        format!(
            "Linear ramp from {} at {} per step",
            self.base_price, self.rate_per_step
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp() {
        let mut model = LinearPriceModel::new(100.0, 1.0);
        assert_eq!(model.next_price(), 101.0);
        assert_eq!(model.next_price(), 102.0);
        assert_eq!(model.current_price(), 102.0);
    }

    #[test]
    fn test_reset() {
        let mut model = LinearPriceModel::new(100.0, 1.0);
        model.next_price();
        model.reset();
        assert_eq!(model.current_price(), 100.0);
        assert_eq!(model.next_price(), 101.0);
    }

    #[test]
    fn test_negative_rate_declines() {
        let mut model = LinearPriceModel::new(100.0, -0.5);
        assert_eq!(model.next_price(), 99.5);
    }
}
