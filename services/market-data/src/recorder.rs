//! CSV history recorder
//!
//! Writes the per-symbol session files consumed by offline analysis:
//!
//! - `<symbol>_trade_prices.csv`: `timestamp,timestamp_ms,price`
//! - `<symbol>_mid_prices.csv`: `timestamp,timestamp_ms,mid_price,best_bid,best_ask,spread`
//! - `<symbol>_orderbook.csv`: `timestamp,elapsed_ms,bids,asks` (top-5 `price:quantity:order_count` tuples, `;`-separated)
//! - `<symbol>_ohlcv.csv`: `timestamp,timestamp_ms,interval_seconds,open,high,low,close,volume`
//!
//! Tick files are append-only: a tick is written once, the first time
//! its timestamp exceeds the last written one.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, TimeZone};
use csv::Writer;
use thiserror::Error;
use tracing::{debug, info};

use types::{BookLevel, OhlcvBar, StatusResponse};

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Recorder configuration. All files are enabled by default.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    pub output_directory: PathBuf,
    pub record_trade_prices: bool,
    pub record_mid_prices: bool,
    pub record_orderbook: bool,
    pub record_ohlcv: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("market_data"),
            record_trade_prices: true,
            record_mid_prices: true,
            record_orderbook: true,
            record_ohlcv: true,
        }
    }
}

struct SessionFiles {
    trade_prices: Option<Writer<File>>,
    mid_prices: Option<Writer<File>>,
    orderbook: Option<Writer<File>>,
    ohlcv: Option<Writer<File>>,
}

/// Session-scoped CSV writer fed from status responses and completed
/// bars.
pub struct HistoryRecorder {
    config: RecorderConfig,
    files: Option<SessionFiles>,
    symbol: String,
    session_start: Instant,
    last_trade_ts_written: i64,
    last_mid_ts_written: i64,
    last_ohlcv_ts_written: i64,
}

impl HistoryRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            files: None,
            symbol: String::new(),
            session_start: Instant::now(),
            last_trade_ts_written: 0,
            last_mid_ts_written: 0,
            last_ohlcv_ts_written: 0,
        }
    }

    /// Open the session files for `symbol` and write headers.
    pub fn start_session(&mut self, symbol: &str) -> Result<(), RecorderError> {
        if self.is_recording() {
            self.end_session();
        }
        std::fs::create_dir_all(&self.config.output_directory)?;

        let open = |enabled: bool, name: &str, header: &[&str]| -> Result<Option<Writer<File>>, RecorderError> {
            if !enabled {
                return Ok(None);
            }
            let path = self.config.output_directory.join(format!("{symbol}_{name}.csv"));
            let mut writer = Writer::from_path(&path)?;
            writer.write_record(header)?;
            writer.flush()?;
            Ok(Some(writer))
        };

        self.files = Some(SessionFiles {
            trade_prices: open(
                self.config.record_trade_prices,
                "trade_prices",
                &["timestamp", "timestamp_ms", "price"],
            )?,
            mid_prices: open(
                self.config.record_mid_prices,
                "mid_prices",
                &["timestamp", "timestamp_ms", "mid_price", "best_bid", "best_ask", "spread"],
            )?,
            orderbook: open(
                self.config.record_orderbook,
                "orderbook",
                &["timestamp", "elapsed_ms", "bids", "asks"],
            )?,
            ohlcv: open(
                self.config.record_ohlcv,
                "ohlcv",
                &[
                    "timestamp",
                    "timestamp_ms",
                    "interval_seconds",
                    "open",
                    "high",
                    "low",
                    "close",
                    "volume",
                ],
            )?,
        });
        self.symbol = symbol.to_string();
        self.session_start = Instant::now();
        self.last_trade_ts_written = 0;
        self.last_mid_ts_written = 0;
        self.last_ohlcv_ts_written = 0;
        info!(symbol, dir = %self.config.output_directory.display(), "recording session started");
        Ok(())
    }

    pub fn is_recording(&self) -> bool {
        self.files.is_some()
    }

    /// Append everything new in a status response.
    pub fn record_status(&mut self, response: &StatusResponse) -> Result<(), RecorderError> {
        let elapsed_ms = self.session_start.elapsed().as_millis() as i64;
        let Some(files) = self.files.as_mut() else {
            return Ok(());
        };

        if let Some(writer) = files.trade_prices.as_mut() {
            let mut wrote = false;
            for tick in &response.trade_price_history {
                if tick.timestamp_ms <= self.last_trade_ts_written {
                    continue;
                }
                writer.write_record([
                    format_timestamp(tick.timestamp_ms),
                    tick.timestamp_ms.to_string(),
                    tick.price.to_string(),
                ])?;
                self.last_trade_ts_written = tick.timestamp_ms;
                wrote = true;
            }
            if wrote {
                writer.flush()?;
            }
        }

        if let Some(writer) = files.mid_prices.as_mut() {
            let best_bid = response.current_orderbook.best_bid().map_or(0.0, |l| l.price);
            let best_ask = response.current_orderbook.best_ask().map_or(0.0, |l| l.price);
            let spread = if best_bid > 0.0 && best_ask > 0.0 {
                best_ask - best_bid
            } else {
                0.0
            };
            let mut wrote = false;
            for tick in &response.mid_price_history {
                if tick.timestamp_ms <= self.last_mid_ts_written {
                    continue;
                }
                writer.write_record([
                    format_timestamp(tick.timestamp_ms),
                    tick.timestamp_ms.to_string(),
                    tick.price.to_string(),
                    best_bid.to_string(),
                    best_ask.to_string(),
                    spread.to_string(),
                ])?;
                self.last_mid_ts_written = tick.timestamp_ms;
                wrote = true;
            }
            if wrote {
                writer.flush()?;
            }
        }

        if let Some(writer) = files.orderbook.as_mut() {
            writer.write_record([
                format_timestamp(now_ms()),
                elapsed_ms.to_string(),
                format_levels(&response.current_orderbook.bids),
                format_levels(&response.current_orderbook.asks),
            ])?;
            writer.flush()?;
        }

        Ok(())
    }

    /// Append one completed OHLCV bar, deduplicated by bucket start.
    pub fn record_bar(&mut self, bar: &OhlcvBar) -> Result<(), RecorderError> {
        let Some(writer) = self.files.as_mut().and_then(|f| f.ohlcv.as_mut()) else {
            return Ok(());
        };
        if bar.timestamp <= self.last_ohlcv_ts_written {
            return Ok(());
        }
        writer.write_record([
            format_timestamp(bar.timestamp),
            bar.timestamp.to_string(),
            bar.interval_seconds.to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])?;
        writer.flush()?;
        self.last_ohlcv_ts_written = bar.timestamp;
        debug!(symbol = %self.symbol, bucket = bar.timestamp, "bar recorded");
        Ok(())
    }

    /// Flush and close all session files.
    pub fn end_session(&mut self) {
        if let Some(mut files) = self.files.take() {
            for writer in [
                files.trade_prices.as_mut(),
                files.mid_prices.as_mut(),
                files.orderbook.as_mut(),
                files.ohlcv.as_mut(),
            ]
            .into_iter()
            .flatten()
            {
                let _ = writer.flush();
            }
            info!(symbol = %self.symbol, "recording session ended");
        }
    }

    /// Path a session file would use, for tooling and tests.
    pub fn file_path(&self, kind: &str) -> PathBuf {
        Path::new(&self.config.output_directory).join(format!("{}_{kind}.csv", self.symbol))
    }
}

impl Drop for HistoryRecorder {
    fn drop(&mut self) {
        self.end_session();
    }
}

/// Top-5 levels as `price:quantity:order_count` tuples joined by `;`.
fn format_levels(levels: &[BookLevel]) -> String {
    levels
        .iter()
        .take(5)
        .map(|l| format!("{}:{}:{}", l.price, l.quantity, l.order_count))
        .collect::<Vec<_>>()
        .join(";")
}

fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        _ => timestamp_ms.to_string(),
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{OrderBookSnapshot, PriceTick};

    fn recorder_in(dir: &Path) -> HistoryRecorder {
        HistoryRecorder::new(RecorderConfig {
            output_directory: dir.to_path_buf(),
            ..Default::default()
        })
    }

    fn response_with_history() -> StatusResponse {
        StatusResponse {
            trade_price_history: vec![
                PriceTick::new(105.0, 1_000),
                PriceTick::new(105.5, 2_000),
            ],
            mid_price_history: vec![PriceTick::new(105.25, 1_500)],
            current_orderbook: OrderBookSnapshot {
                symbol: "AAPL".to_string(),
                timestamp: 2_000,
                bids: vec![BookLevel {
                    price: 105.0,
                    quantity: 10.0,
                    order_count: 2,
                }],
                asks: vec![BookLevel {
                    price: 105.5,
                    quantity: 5.0,
                    order_count: 1,
                }],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_headers_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(dir.path());
        rec.start_session("AAPL").unwrap();
        rec.end_session();

        let contents =
            std::fs::read_to_string(dir.path().join("AAPL_trade_prices.csv")).unwrap();
        assert!(contents.starts_with("timestamp,timestamp_ms,price"));

        let contents = std::fs::read_to_string(dir.path().join("AAPL_mid_prices.csv")).unwrap();
        assert!(contents
            .starts_with("timestamp,timestamp_ms,mid_price,best_bid,best_ask,spread"));

        let contents = std::fs::read_to_string(dir.path().join("AAPL_orderbook.csv")).unwrap();
        assert!(contents.starts_with("timestamp,elapsed_ms,bids,asks"));

        let contents = std::fs::read_to_string(dir.path().join("AAPL_ohlcv.csv")).unwrap();
        assert!(contents
            .starts_with("timestamp,timestamp_ms,interval_seconds,open,high,low,close,volume"));
    }

    #[test]
    fn test_ticks_are_deduplicated_across_polls() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(dir.path());
        rec.start_session("AAPL").unwrap();

        let response = response_with_history();
        rec.record_status(&response).unwrap();
        // Same history again: nothing new should be appended.
        rec.record_status(&response).unwrap();
        rec.end_session();

        let contents =
            std::fs::read_to_string(dir.path().join("AAPL_trade_prices.csv")).unwrap();
        let data_rows = contents.lines().count() - 1;
        assert_eq!(data_rows, 2);
    }

    #[test]
    fn test_orderbook_row_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(dir.path());
        rec.start_session("AAPL").unwrap();
        rec.record_status(&response_with_history()).unwrap();
        rec.end_session();

        let contents = std::fs::read_to_string(dir.path().join("AAPL_orderbook.csv")).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert!(row.contains("105:10:2"));
        assert!(row.contains("105.5:5:1"));
    }

    #[test]
    fn test_bar_dedup_by_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = recorder_in(dir.path());
        rec.start_session("AAPL").unwrap();

        let bar = OhlcvBar {
            symbol: "AAPL".to_string(),
            timestamp: 60_000,
            interval_seconds: 60,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 10.0,
            tick_count: 4,
        };
        rec.record_bar(&bar).unwrap();
        rec.record_bar(&bar).unwrap();
        rec.end_session();

        let contents = std::fs::read_to_string(dir.path().join("AAPL_ohlcv.csv")).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_disabled_files_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut rec = HistoryRecorder::new(RecorderConfig {
            output_directory: dir.path().to_path_buf(),
            record_orderbook: false,
            record_ohlcv: false,
            ..Default::default()
        });
        rec.start_session("AAPL").unwrap();
        rec.end_session();

        assert!(dir.path().join("AAPL_trade_prices.csv").exists());
        assert!(!dir.path().join("AAPL_orderbook.csv").exists());
        assert!(!dir.path().join("AAPL_ohlcv.csv").exists());
    }
}
