//! Monitor entry point
//!
//! Polls the exchange status endpoint for one symbol and records the
//! session to CSV.

mod monitor;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use market_data::RecorderConfig;
use monitor::{ExchangeMonitor, MonitorConfig};

#[derive(Parser, Debug)]
#[command(name = "monitor", about = "Polling market-data monitor")]
struct Args {
    /// Symbol to monitor
    symbol: Option<String>,

    /// Exchange status endpoint
    #[arg(long, default_value = "127.0.0.1:5557")]
    status_endpoint: String,

    /// Poll cadence in milliseconds
    #[arg(long, default_value_t = 1_000)]
    poll_interval_ms: u64,

    /// OHLCV bar interval in seconds
    #[arg(long, default_value_t = 60)]
    ohlcv_interval: i32,

    /// Disable CSV recording
    #[arg(long)]
    no_record: bool,

    /// Output directory for CSV files
    #[arg(long, default_value = "market_data")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = MonitorConfig {
        status_endpoint: args.status_endpoint,
        symbol: args.symbol.unwrap_or_else(|| "AAPL".to_string()),
        poll_interval_ms: args.poll_interval_ms,
        ohlcv_interval_secs: args.ohlcv_interval,
        recording: if args.no_record {
            None
        } else {
            Some(RecorderConfig {
                output_directory: args.output_dir,
                ..Default::default()
            })
        },
    };

    let stop = Arc::new(AtomicBool::new(false));
    ExchangeMonitor::new(config).run(stop)
}
