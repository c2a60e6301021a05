//! Price models
//!
//! A narrow capability shared by all models plus a by-name factory.
//! The Hawkes variant additionally exposes the orders generated at the
//! last step via [`hawkes::HawkesModel::drain_orders`].

pub mod gbm;
pub mod hawkes;
pub mod linear;

use thiserror::Error;

use crate::params::GenerationConfig;
pub use gbm::GbmPriceModel;
pub use hawkes::{GeneratedOrder, HawkesModel};
pub use linear::LinearPriceModel;

/// Seconds in a 365-day year; converts the step interval into the
/// year-fraction `dt` the GBM update expects.
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Common price-model capability.
pub trait PriceModel: Send {
    /// Advance one step and return the new price.
    fn next_price(&mut self) -> f64;
    /// Current price without advancing.
    fn current_price(&self) -> f64;
    /// Restore initial conditions.
    fn reset(&mut self);
    /// Stable lowercase model name.
    fn name(&self) -> &'static str;
    /// Human-readable description.
    fn description(&self) -> String;
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown price model: '{name}'. Available models: {available}")]
    Unknown { name: String, available: String },
}

/// A constructed model, dispatched statically so the flow driver can
/// reach Hawkes-specific state.
#[derive(Debug)]
pub enum ModelKind {
    Linear(LinearPriceModel),
    Gbm(GbmPriceModel),
    Hawkes(Box<HawkesModel>),
}

impl ModelKind {
    /// Build a model by (case-insensitive) name from the generation
    /// config.
    pub fn from_name(name: &str, config: &GenerationConfig) -> Result<Self, ModelError> {
        match name.to_ascii_lowercase().as_str() {
            "linear" => {
                let rate_per_step = config.price_rate * config.dt_seconds();
                Ok(ModelKind::Linear(LinearPriceModel::new(
                    config.base_price,
                    rate_per_step,
                )))
            }
            "gbm" => Ok(ModelKind::Gbm(GbmPriceModel::new(
                config.base_price,
                config.drift_pct / 100.0,
                config.volatility_pct / 100.0,
                config.dt_seconds() / SECONDS_PER_YEAR,
                config.seed,
            ))),
            "hawkes" => Ok(ModelKind::Hawkes(Box::new(HawkesModel::new(config)))),
            other => Err(ModelError::Unknown {
                name: other.to_string(),
                available: available_models().to_string(),
            }),
        }
    }

    /// Whether `name` names a known model.
    pub fn is_model_name(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "linear" | "gbm" | "hawkes"
        )
    }

    pub fn as_price_model(&mut self) -> &mut dyn PriceModel {
        match self {
            ModelKind::Linear(m) => m,
            ModelKind::Gbm(m) => m,
            ModelKind::Hawkes(m) => m.as_mut(),
        }
    }
}

/// Comma-separated list of model names the factory accepts.
pub fn available_models() -> &'static str {
    "linear, gbm, hawkes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_builds_each_model() {
        let config = GenerationConfig::default();
        for name in ["linear", "gbm", "hawkes", "LINEAR", "Gbm"] {
            let mut model = ModelKind::from_name(name, &config).unwrap();
            assert_eq!(model.as_price_model().current_price(), config.base_price);
        }
    }

    #[test]
    fn test_factory_rejects_unknown_name() {
        let config = GenerationConfig::default();
        let err = ModelKind::from_name("brownian", &config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("brownian"));
        assert!(msg.contains("linear, gbm, hawkes"));
    }

    #[test]
    fn test_is_model_name() {
        assert!(ModelKind::is_model_name("hawkes"));
        assert!(ModelKind::is_model_name("GBM"));
        assert!(!ModelKind::is_model_name("AAPL"));
    }
}
