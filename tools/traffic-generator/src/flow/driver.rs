//! Flow driver
//!
//! Owns the producer and submitter threads and the queue between
//! them. `stop()` flips the shared flag, stops the queue and wakes
//! both threads; `wait()` joins them.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use types::Order;

use crate::flow::producer::Producer;
use crate::flow::queue::OrderQueue;
use crate::flow::submitter::Submitter;
use crate::models::{ModelError, ModelKind};
use crate::params::GenerationConfig;

/// Counters shared by both pipeline threads.
#[derive(Debug, Default)]
pub struct FlowStats {
    pub generated: AtomicU64,
    pub submitted: AtomicU64,
    pub accepted: AtomicU64,
    pub rejected: AtomicU64,
    pub failed: AtomicU64,
}

#[derive(Debug)]
pub struct FlowDriver {
    queue: Arc<OrderQueue<Order>>,
    stats: Arc<FlowStats>,
    stop: Arc<AtomicBool>,
    producer: Option<JoinHandle<()>>,
    submitter: Option<JoinHandle<()>>,
    config: GenerationConfig,
    model_name: String,
}

impl FlowDriver {
    /// Validate the model name and prepare the pipeline.
    pub fn new(
        config: GenerationConfig,
        model_name: &str,
    ) -> Result<Self, ModelError> {
        // Fail fast on unknown names; the model itself is built at
        // start() so a driver can be restarted.
        ModelKind::from_name(model_name, &config)?;
        Ok(Self {
            queue: Arc::new(OrderQueue::new(config.queue_capacity)),
            stats: Arc::new(FlowStats::default()),
            stop: Arc::new(AtomicBool::new(false)),
            producer: None,
            submitter: None,
            config,
            model_name: model_name.to_string(),
        })
    }

    /// Spawn both threads against `order_endpoint`.
    pub fn start(&mut self, order_endpoint: &str) -> Result<(), ModelError> {
        let model = ModelKind::from_name(&self.model_name, &self.config)?;
        let producer = Producer::new(
            self.config.clone(),
            model,
            self.queue.clone(),
            self.stats.clone(),
            self.stop.clone(),
        );
        let submitter = Submitter::new(
            order_endpoint,
            Duration::from_millis(self.config.request_timeout_ms),
            self.queue.clone(),
            self.stats.clone(),
        );
        self.producer = Some(producer.spawn());
        self.submitter = Some(submitter.spawn());
        Ok(())
    }

    /// Request early termination: producer halts at its next step,
    /// pending pops are released.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        self.queue.stop();
    }

    /// Join both threads (the natural end: producer finishes its
    /// steps, submitter drains the queue).
    pub fn wait(&mut self) {
        if let Some(handle) = self.producer.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.submitter.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.producer.as_ref().is_some_and(|h| !h.is_finished())
            || self.submitter.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stats(&self) -> &FlowStats {
        &self.stats
    }
}

impl Drop for FlowDriver {
    fn drop(&mut self) {
        self.stop();
        self.wait();
    }
}
