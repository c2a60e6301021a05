//! Server side of the request/reply pair
//!
//! A reply socket accepts any number of request connections and polls
//! them without blocking the caller for longer than the passed
//! timeout. Exactly one reply must be sent for every received request
//! before that connection is read again.

use std::io::{ErrorKind, Read};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::frame::{take_frame, write_frame};
use types::errors::TransportError;

/// Identifies the connection a request arrived on, so the reply can be
/// routed back to the same peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnId(u64);

struct Conn {
    id: u64,
    stream: TcpStream,
    buf: Vec<u8>,
}

/// Polling reply socket.
pub struct ReplySocket {
    listener: TcpListener,
    conns: Vec<Conn>,
    next_conn_id: u64,
    name: &'static str,
}

/// Poll granularity while waiting for a request.
const POLL_SLEEP: Duration = Duration::from_millis(1);

impl ReplySocket {
    /// Bind to `endpoint` (e.g. `127.0.0.1:5555`).
    pub fn bind(name: &'static str, endpoint: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(endpoint)?;
        listener.set_nonblocking(true)?;
        debug!(name, endpoint, "reply socket bound");
        Ok(Self {
            listener,
            conns: Vec::new(),
            next_conn_id: 0,
            name,
        })
    }

    /// Local address the socket is bound to.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, TransportError> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait up to `timeout` for one request.
    ///
    /// Returns `None` when the timeout elapses with no complete frame.
    pub fn recv_timeout<Req: DeserializeOwned>(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<(Req, ConnId)>, TransportError> {
        let deadline = Instant::now() + timeout;
        loop {
            self.accept_pending();

            if let Some((payload, conn_id)) = self.poll_frames()? {
                let request = serde_json::from_slice(&payload)
                    .map_err(|e| TransportError::Serialization(e.to_string()))?;
                return Ok(Some((request, conn_id)));
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_SLEEP);
        }
    }

    /// Send the reply for the most recent request on `conn`.
    pub fn send_reply<Rep: Serialize>(
        &mut self,
        conn: ConnId,
        reply: &Rep,
    ) -> Result<(), TransportError> {
        let payload = serde_json::to_vec(reply)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        let entry = self
            .conns
            .iter_mut()
            .find(|c| c.id == conn.0)
            .ok_or(TransportError::Disconnected)?;
        write_frame(&mut entry.stream, &payload)
    }

    fn accept_pending(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    if stream.set_nonblocking(true).is_err() || stream.set_nodelay(true).is_err() {
                        continue;
                    }
                    let id = self.next_conn_id;
                    self.next_conn_id += 1;
                    debug!(name = self.name, %peer, conn = id, "peer connected");
                    self.conns.push(Conn {
                        id,
                        stream,
                        buf: Vec::new(),
                    });
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) => {
                    warn!(name = self.name, %err, "accept failed");
                    break;
                }
            }
        }
    }

    /// Read whatever is available on every connection and return the
    /// first complete frame.
    fn poll_frames(&mut self) -> Result<Option<(Vec<u8>, ConnId)>, TransportError> {
        let mut dead = Vec::new();
        let mut found = None;

        for conn in &mut self.conns {
            let mut chunk = [0u8; 4096];
            loop {
                match conn.stream.read(&mut chunk) {
                    Ok(0) => {
                        dead.push(conn.id);
                        break;
                    }
                    Ok(n) => conn.buf.extend_from_slice(&chunk[..n]),
                    Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                    Err(err) => {
                        debug!(name = self.name, conn = conn.id, %err, "peer dropped");
                        dead.push(conn.id);
                        break;
                    }
                }
            }

            if found.is_none() {
                match take_frame(&mut conn.buf) {
                    Ok(Some(payload)) => found = Some((payload, ConnId(conn.id))),
                    Ok(None) => {}
                    Err(err) => {
                        warn!(name = self.name, conn = conn.id, %err, "malformed frame, dropping peer");
                        dead.push(conn.id);
                    }
                }
            }
        }

        self.conns.retain(|c| !dead.contains(&c.id));
        Ok(found)
    }
}
