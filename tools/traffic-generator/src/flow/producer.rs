//! Generation thread
//!
//! Drives a price model forward `duration / Δt` steps, converting each
//! step's output into wire orders on the shared queue. Hawkes clouds
//! map one-to-one onto limit orders; linear and GBM models emit one
//! buy and one sell at the model price per step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use types::{Order, Side};

use crate::flow::driver::FlowStats;
use crate::flow::queue::OrderQueue;
use crate::models::{ModelKind, PriceModel};
use crate::params::GenerationConfig;

pub struct Producer {
    config: GenerationConfig,
    model: ModelKind,
    queue: Arc<OrderQueue<Order>>,
    stats: Arc<FlowStats>,
    stop: Arc<AtomicBool>,
    /// Paired-order id counter for non-Hawkes models.
    order_counter: u64,
}

impl Producer {
    pub fn new(
        config: GenerationConfig,
        model: ModelKind,
        queue: Arc<OrderQueue<Order>>,
        stats: Arc<FlowStats>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            model,
            queue,
            stats,
            stop,
            order_counter: 0,
        }
    }

    pub fn spawn(mut self) -> thread::JoinHandle<()> {
        thread::Builder::new()
            .name("flow-producer".to_string())
            .spawn(move || self.run())
            .expect("spawn producer thread")
    }

    fn run(&mut self) {
        let steps = self.config.total_steps();
        let pace = Duration::from_millis(self.config.step_interval_ms);
        info!(
            model = self.model.as_price_model().name(),
            symbol = %self.config.symbol,
            steps,
            "generation started"
        );

        for step in 0..steps {
            if self.stop.load(Ordering::SeqCst) {
                debug!(step, "producer stopping early");
                break;
            }

            let price = self.model.as_price_model().next_price();
            if !self.enqueue_step_orders(price) {
                break;
            }

            if !pace.is_zero() {
                thread::sleep(pace);
            }
        }

        // Signal end-of-stream: the submitter drains what is queued
        // and exits.
        self.queue.close();
        info!(
            generated = self.stats.generated.load(Ordering::SeqCst),
            "generation finished"
        );
    }

    /// Returns false when the queue refused an order (stopped/closed).
    fn enqueue_step_orders(&mut self, price: f64) -> bool {
        for order in self.build_step_orders(price) {
            if !self.push(order) {
                return false;
            }
        }
        true
    }

    fn build_step_orders(&mut self, price: f64) -> Vec<Order> {
        let mut orders = Vec::new();
        match &mut self.model {
            ModelKind::Hawkes(hawkes) => {
                for generated in hawkes.drain_orders() {
                    if generated.price <= 0.0 {
                        // Deep-offset draws can cross zero on a cheap
                        // symbol; such orders are unplaceable.
                        continue;
                    }
                    orders.push(Order::limit(
                        format!("TG-{}", generated.order_id),
                        &self.config.symbol,
                        "traffic-generator-hawkes",
                        if generated.is_buy { Side::Buy } else { Side::Sell },
                        generated.price,
                        generated.volume,
                        now_ms(),
                    ));
                }
            }
            _ => {
                if price <= 0.0 {
                    return orders;
                }
                // One buy and one sell at the model price.
                for side in [Side::Buy, Side::Sell] {
                    self.order_counter += 1;
                    orders.push(Order::limit(
                        format!("TG-{}", self.order_counter),
                        &self.config.symbol,
                        "traffic-generator",
                        side,
                        price,
                        self.config.order_quantity,
                        now_ms(),
                    ));
                }
            }
        }
        orders
    }

    fn push(&self, order: Order) -> bool {
        if self.queue.push(order) {
            self.stats.generated.fetch_add(1, Ordering::SeqCst);
            true
        } else {
            false
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
