//! Stochastic building blocks for synthetic order flow
//!
//! A seeded PRNG wrapper, the distribution samplers used by the order
//! generators, and the discrete GBM price process.

pub mod distributions;
pub mod gbm;
pub mod monte_carlo;
pub mod rng;

pub use gbm::GbmProcess;
pub use monte_carlo::{MonteCarlo, Statistics};
pub use rng::SimRng;
