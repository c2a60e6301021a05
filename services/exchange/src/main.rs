//! Exchange entry point
//!
//! Binds the order and status endpoints and serves until killed.

mod config;
mod service;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::ExchangeConfig;
use service::ExchangeService;

#[derive(Parser, Debug)]
#[command(name = "exchange", about = "Limit-order-book exchange service")]
struct Args {
    /// Order request/reply endpoint
    #[arg(long, default_value = "127.0.0.1:5555")]
    order_endpoint: String,

    /// Status request/reply endpoint
    #[arg(long, default_value = "127.0.0.1:5557")]
    status_endpoint: String,

    /// Price ticks kept per history ring
    #[arg(long, default_value_t = 100)]
    price_history_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = ExchangeConfig {
        order_endpoint: args.order_endpoint,
        status_endpoint: args.status_endpoint,
        price_history_size: args.price_history_size,
    };

    let mut service = ExchangeService::new(config);
    service.run()
}
