//! Traffic generator entry point
//!
//! `traffic_generator [symbol]` runs the default linear flow against
//! the local exchange; `traffic_generator <model>` with `linear`,
//! `gbm` or `hawkes` selects the price model instead.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use traffic_generator::models::{available_models, ModelKind};
use traffic_generator::{FlowDriver, GenerationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "traffic_generator",
    about = "Synthetic order-flow generator (linear, gbm, hawkes)"
)]
struct Args {
    /// Symbol to trade, or a model name (linear, gbm, hawkes)
    target: Option<String>,

    /// Exchange order endpoint
    #[arg(long, default_value = "127.0.0.1:5555")]
    order_endpoint: String,

    /// Price model when the positional argument is a symbol
    #[arg(long)]
    model: Option<String>,

    /// Starting price
    #[arg(long, default_value_t = 100.0)]
    base_price: f64,

    /// Session duration in seconds
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Step interval in milliseconds
    #[arg(long, default_value_t = 100)]
    step_interval_ms: u64,

    /// Order quantity for linear/gbm paired flow
    #[arg(long, default_value_t = 1.0)]
    quantity: f64,

    /// RNG seed (0 = from OS entropy)
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    // The single positional argument doubles as either a model name
    // or a symbol.
    let (symbol, model_name) = match args.target.as_deref() {
        Some(target) if ModelKind::is_model_name(target) => {
            ("AAPL".to_string(), target.to_ascii_lowercase())
        }
        Some(symbol) => (
            symbol.to_string(),
            args.model.clone().unwrap_or_else(|| "linear".to_string()),
        ),
        None => (
            "AAPL".to_string(),
            args.model.clone().unwrap_or_else(|| "linear".to_string()),
        ),
    };

    let config = GenerationConfig {
        symbol: symbol.clone(),
        base_price: args.base_price,
        order_quantity: args.quantity,
        step_interval_ms: args.step_interval_ms,
        duration_seconds: args.duration,
        seed: args.seed,
        ..Default::default()
    };

    info!(
        symbol,
        model = %model_name,
        duration = args.duration,
        available = available_models(),
        "starting traffic generation"
    );

    let mut driver = FlowDriver::new(config, &model_name)?;
    driver.start(&args.order_endpoint)?;
    driver.wait();

    let stats = driver.stats();
    info!(
        generated = stats.generated.load(std::sync::atomic::Ordering::SeqCst),
        accepted = stats.accepted.load(std::sync::atomic::Ordering::SeqCst),
        rejected = stats.rejected.load(std::sync::atomic::Ordering::SeqCst),
        failed = stats.failed.load(std::sync::atomic::Ordering::SeqCst),
        "traffic generation complete"
    );
    Ok(())
}
