//! Exchange service loop
//!
//! One cooperative thread alternates between the order endpoint and
//! the status endpoint with short receive timeouts, so a stream of
//! orders can never starve status queries. All engine state is owned
//! by this loop; no locking anywhere.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use bus::ReplySocket;
use matching_engine::ExchangeDispatcher;
use types::{Order, StatusRequest};

use crate::config::ExchangeConfig;

/// Per-endpoint receive timeout for one loop turn.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

pub struct ExchangeService {
    config: ExchangeConfig,
    dispatcher: ExchangeDispatcher,
    running: Arc<AtomicBool>,
}

impl ExchangeService {
    pub fn new(config: ExchangeConfig) -> Self {
        let dispatcher = ExchangeDispatcher::new(config.price_history_size);
        Self {
            config,
            dispatcher,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the loop when cleared; share it with a signal
    /// handler or a controlling thread.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Bind both endpoints and serve until the stop flag is cleared.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut order_socket = ReplySocket::bind("exchange-orders", &self.config.order_endpoint)
            .with_context(|| format!("binding order endpoint {}", self.config.order_endpoint))?;
        let mut status_socket = ReplySocket::bind("exchange-status", &self.config.status_endpoint)
            .with_context(|| format!("binding status endpoint {}", self.config.status_endpoint))?;

        info!(
            orders = %self.config.order_endpoint,
            status = %self.config.status_endpoint,
            "exchange ready"
        );
        self.running.store(true, Ordering::SeqCst);

        while self.running.load(Ordering::SeqCst) {
            self.poll_orders(&mut order_socket);
            self.poll_status(&mut status_socket);
        }

        info!("exchange stopped");
        Ok(())
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn poll_orders(&mut self, socket: &mut ReplySocket) {
        match socket.recv_timeout::<Order>(POLL_TIMEOUT) {
            Ok(Some((order, conn))) => {
                let (ack, _result) = self.dispatcher.submit_order(order);
                if let Err(err) = socket.send_reply(conn, &ack) {
                    warn!(%err, "failed to send order ack");
                }
            }
            Ok(None) => {}
            // Transient transport failures never touch engine state;
            // drop the request and keep serving.
            Err(err) => warn!(%err, "order endpoint receive failed"),
        }
    }

    fn poll_status(&mut self, socket: &mut ReplySocket) {
        match socket.recv_timeout::<StatusRequest>(POLL_TIMEOUT) {
            Ok(Some((request, conn))) => {
                let response = self.dispatcher.status(&request.symbol);
                if let Err(err) = socket.send_reply(conn, &response) {
                    warn!(%err, "failed to send status response");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "status endpoint receive failed"),
        }
    }
}
