//! Market data derivation and recording
//!
//! OHLCV bar aggregation over tick streams and the CSV history
//! recorder used by the monitor for post-session analysis.

pub mod ohlcv;
pub mod recorder;

pub use ohlcv::OhlcvBuilder;
pub use recorder::{HistoryRecorder, RecorderConfig, RecorderError};
