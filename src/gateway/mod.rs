//! Connection gateway
//!
//! The bidirectional text channel prices arrive on and synthetic prices are
//! sent to. The core only sees the [`ConnectionGateway`] contract.

mod loopback;
mod socket;

pub use loopback::LoopbackGateway;
pub use socket::{SocketGateway, DEFAULT_GATEWAY_URL};

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{broadcast, watch};

/// Default inbound frame buffer; older frames are dropped on overflow
pub const DEFAULT_INBOUND_BUFFER: usize = 64;

/// Connection lifecycle as seen by the rest of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    #[default]
    Disconnected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        };
        f.write_str(label)
    }
}

/// Contract for the transport the price store talks to
///
/// Implementations must be usable from any thread; `connect` may spawn
/// background work and therefore needs an ambient tokio runtime.
pub trait ConnectionGateway: Send + Sync {
    /// Open the connection; a no-op while connecting or connected
    fn connect(&self);

    /// Best-effort, fire-and-forget send of one text frame
    fn send(&self, frame: &str);

    /// Terminate the connection; safe to call when not connected
    fn close(&self);

    /// Receiver for status transitions
    fn status(&self) -> watch::Receiver<ConnectionStatus>;

    /// Receiver for raw inbound text frames
    fn frames(&self) -> broadcast::Receiver<String>;
}
