//! WebSocket transport
//!
//! A thin bidirectional text client with ping keepalive, used by the
//! socket gateway.

mod client;
mod types;

pub use client::WsClient;
pub use types::{WsConfig, WsError, WsMessage};
