//! Submission thread
//!
//! Pops orders off the shared queue and issues request/reply
//! submissions to the exchange. A timed-out request is logged and
//! dropped, never retried; the next queued order proceeds.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use bus::RequestSocket;
use types::order::AckStatus;
use types::{Order, OrderAck};

use crate::flow::driver::FlowStats;
use crate::flow::queue::OrderQueue;

/// Connection retry cadence while the exchange is not yet up.
const CONNECT_RETRY: Duration = Duration::from_millis(200);
const CONNECT_ATTEMPTS: u32 = 50;

pub struct Submitter {
    endpoint: String,
    request_timeout: Duration,
    queue: Arc<OrderQueue<Order>>,
    stats: Arc<FlowStats>,
}

impl Submitter {
    pub fn new(
        endpoint: impl Into<String>,
        request_timeout: Duration,
        queue: Arc<OrderQueue<Order>>,
        stats: Arc<FlowStats>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout,
            queue,
            stats,
        }
    }

    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::Builder::new()
            .name("flow-submitter".to_string())
            .spawn(move || self.run())
            .expect("spawn submitter thread")
    }

    fn run(self) {
        let mut socket =
            match RequestSocket::connect_with_retry(&self.endpoint, CONNECT_ATTEMPTS, CONNECT_RETRY)
            {
                Ok(socket) => socket,
                Err(err) => {
                    warn!(endpoint = %self.endpoint, %err, "could not reach exchange, submitter exiting");
                    self.queue.stop();
                    return;
                }
            };
        info!(endpoint = %self.endpoint, "submitter connected");

        while let Some(order) = self.queue.pop() {
            match socket.request::<Order, OrderAck>(&order, self.request_timeout) {
                Ok(ack) => {
                    self.stats.submitted.fetch_add(1, Ordering::SeqCst);
                    match ack.status {
                        AckStatus::Rejected => {
                            self.stats.rejected.fetch_add(1, Ordering::SeqCst);
                            warn!(order_id = %ack.order_id, reason = %ack.message, "order rejected");
                        }
                        _ => {
                            self.stats.accepted.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }
                Err(err) => {
                    self.stats.failed.fetch_add(1, Ordering::SeqCst);
                    warn!(order_id = %order.order_id, %err, "order submission failed");
                }
            }
        }

        info!(
            submitted = self.stats.submitted.load(Ordering::SeqCst),
            accepted = self.stats.accepted.load(Ordering::SeqCst),
            rejected = self.stats.rejected.load(Ordering::SeqCst),
            failed = self.stats.failed.load(Ordering::SeqCst),
            "submission finished"
        );
    }
}
