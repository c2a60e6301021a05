//! Request/reply message bus
//!
//! Minimal stand-in for the external transport: length-prefixed JSON
//! frames over TCP, one reply per received request, bounded receive
//! timeouts on both ends. The exchange binds two [`ReplySocket`]s (one
//! for orders, one for status queries); the traffic generator and the
//! monitor each connect a [`RequestSocket`].

mod frame;
mod reply;
mod request;

pub use reply::{ConnId, ReplySocket};
pub use request::RequestSocket;

pub use types::errors::TransportError;
