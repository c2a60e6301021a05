//! Polling exchange monitor
//!
//! Issues a status request at a fixed cadence, derives OHLCV bars
//! from the trade price history and drives the CSV recorder. Failed
//! polls are retried silently at the same cadence; the exchange never
//! notices a monitor coming or going.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use bus::RequestSocket;
use market_data::{HistoryRecorder, OhlcvBuilder, RecorderConfig};
use types::{StatusRequest, StatusResponse};

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub status_endpoint: String,
    pub symbol: String,
    pub poll_interval_ms: u64,
    pub ohlcv_interval_secs: i32,
    /// CSV recording; `None` disables it.
    pub recording: Option<RecorderConfig>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            status_endpoint: "127.0.0.1:5557".to_string(),
            symbol: "AAPL".to_string(),
            poll_interval_ms: 1_000,
            ohlcv_interval_secs: 60,
            recording: Some(RecorderConfig::default()),
        }
    }
}

pub struct ExchangeMonitor {
    config: MonitorConfig,
    builder: OhlcvBuilder,
    recorder: Option<HistoryRecorder>,
    /// Newest trade tick already folded into the bar builder.
    last_tick_ts: i64,
    polls: u64,
}

impl ExchangeMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        let builder = OhlcvBuilder::new(&config.symbol, config.ohlcv_interval_secs);
        let recorder = config
            .recording
            .clone()
            .map(HistoryRecorder::new);
        Self {
            config,
            builder,
            recorder,
            last_tick_ts: 0,
            polls: 0,
        }
    }

    /// Poll until the stop flag flips.
    pub fn run(&mut self, stop: Arc<AtomicBool>) -> anyhow::Result<()> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.start_session(&self.config.symbol)?;
        }

        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        let request_timeout = poll_interval.max(Duration::from_millis(100));
        let mut socket: Option<RequestSocket> = None;

        info!(
            symbol = %self.config.symbol,
            endpoint = %self.config.status_endpoint,
            "monitor started"
        );

        while !stop.load(Ordering::SeqCst) {
            if socket.is_none() {
                match RequestSocket::connect(&self.config.status_endpoint) {
                    Ok(connected) => socket = Some(connected),
                    Err(err) => {
                        // Exchange not up yet; keep polling silently.
                        debug!(%err, "exchange unreachable");
                        thread::sleep(poll_interval);
                        continue;
                    }
                }
            }

            let request = StatusRequest::status(&self.config.symbol);
            match socket
                .as_mut()
                .expect("socket just connected")
                .request::<StatusRequest, StatusResponse>(&request, request_timeout)
            {
                Ok(response) => self.ingest(&response)?,
                Err(err) => {
                    debug!(%err, "status poll failed, reconnecting");
                    socket = None;
                }
            }

            thread::sleep(poll_interval);
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.end_session();
        }
        info!(polls = self.polls, "monitor stopped");
        Ok(())
    }

    /// Fold one status response into bars, the recorder and the log.
    pub fn ingest(&mut self, response: &StatusResponse) -> anyhow::Result<()> {
        self.polls += 1;

        for tick in &response.trade_price_history {
            if tick.timestamp_ms <= self.last_tick_ts {
                continue;
            }
            // Each trade tick counts one unit of volume; per-trade
            // sizes are not part of the status history.
            self.builder.process_tick(tick.price, tick.timestamp_ms, 1.0);
            self.last_tick_ts = tick.timestamp_ms;
        }

        let completed = self.builder.take_completed_bars();
        if let Some(recorder) = self.recorder.as_mut() {
            for bar in &completed {
                recorder.record_bar(bar)?;
            }
            recorder.record_status(response)?;
        }

        let best_bid = response.current_orderbook.best_bid().map_or(0.0, |l| l.price);
        let best_ask = response.current_orderbook.best_ask().map_or(0.0, |l| l.price);
        info!(
            symbol = %self.config.symbol,
            orders = response.total_orders_received,
            trades = response.total_trades,
            volume = response.total_volume,
            last = response.last_trade_price,
            mid = response.mid_price,
            bid = best_bid,
            ask = best_ask,
            bars = completed.len(),
            "status"
        );
        if response.total_orders_received == 0 {
            warn!(symbol = %self.config.symbol, "no orders seen yet");
        }
        Ok(())
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Completed-bar count still buffered in the builder (testing).
    pub fn pending_bars(&self) -> bool {
        self.builder.has_completed_bar()
    }
}
