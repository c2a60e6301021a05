//! Client side of the request/reply pair

use std::io::ErrorKind;
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::frame::{read_frame, write_frame};
use types::errors::TransportError;

/// Blocking request socket. One request must complete (reply or
/// timeout) before the next is issued.
pub struct RequestSocket {
    stream: TcpStream,
    endpoint: String,
}

impl RequestSocket {
    /// Connect to a reply endpoint.
    pub fn connect(endpoint: &str) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(endpoint)?;
        stream.set_nodelay(true)?;
        debug!(endpoint, "request socket connected");
        Ok(Self {
            stream,
            endpoint: endpoint.to_string(),
        })
    }

    /// Connect, retrying at a fixed interval.
    ///
    /// External components retry silently until the exchange is up.
    pub fn connect_with_retry(
        endpoint: &str,
        attempts: u32,
        delay: Duration,
    ) -> Result<Self, TransportError> {
        let mut last_err = None;
        for attempt in 0..attempts {
            match Self::connect(endpoint) {
                Ok(socket) => return Ok(socket),
                Err(err) => {
                    debug!(endpoint, attempt, %err, "connect failed, retrying");
                    last_err = Some(err);
                    thread::sleep(delay);
                }
            }
        }
        Err(last_err.unwrap_or(TransportError::Disconnected))
    }

    /// Send a request and wait up to `timeout` for the reply.
    ///
    /// On timeout the request is considered lost; the caller decides
    /// whether to move on (it is never retried here).
    pub fn request<Req, Rep>(&mut self, request: &Req, timeout: Duration) -> Result<Rep, TransportError>
    where
        Req: Serialize,
        Rep: DeserializeOwned,
    {
        let payload = serde_json::to_vec(request)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        write_frame(&mut self.stream, &payload)?;

        self.stream.set_read_timeout(Some(timeout))?;
        let reply = match read_frame(&mut self.stream) {
            Ok(bytes) => bytes,
            Err(TransportError::Io(err))
                if err.kind() == ErrorKind::WouldBlock || err.kind() == ErrorKind::TimedOut =>
            {
                return Err(TransportError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            Err(err) => return Err(err),
        };

        serde_json::from_slice(&reply).map_err(|e| TransportError::Serialization(e.to_string()))
    }

    /// Endpoint this socket is connected to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
