//! Producer/consumer order pipeline
//!
//! The generation thread turns model steps into wire orders and pushes
//! them onto a bounded queue; the submission thread drains the queue
//! and issues request/reply order submissions to the exchange.

pub mod driver;
pub mod producer;
pub mod queue;
pub mod submitter;

pub use driver::{FlowDriver, FlowStats};
pub use queue::OrderQueue;
