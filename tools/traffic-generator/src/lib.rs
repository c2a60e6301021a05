//! Synthetic order-flow generation
//!
//! Price models (linear, GBM, regime-switching Hawkes microstructure),
//! the bounded queue between the generation and submission threads,
//! and the flow driver that wires them to the exchange.

pub mod flow;
pub mod models;
pub mod params;
pub mod regime;

pub use flow::driver::FlowDriver;
pub use models::{ModelError, ModelKind, PriceModel};
pub use params::GenerationConfig;
pub use regime::{MarketRegime, RegimeMix, RegimeParams};
