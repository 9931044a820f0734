//! WebSocket types and configuration

use std::time::Duration;
use thiserror::Error;

/// WebSocket client configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// WebSocket URL to connect to
    pub url: String,
    /// Time allowed for the opening handshake
    pub connect_timeout: Duration,
    /// Interval for sending ping frames; a missing pong by the next tick fails the session
    pub ping_interval: Duration,
    /// Capacity of the event channel handed to the caller
    pub event_buffer: usize,
    /// Capacity of the outbound text queue
    pub outbound_buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            ping_interval: Duration::from_secs(30),
            event_buffer: 1024,
            outbound_buffer: 256,
        }
    }
}

impl WsConfig {
    /// Create a new config with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the handshake timeout
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.connect_timeout = d;
        self
    }

    /// Set ping interval
    pub fn ping_interval(mut self, d: Duration) -> Self {
        self.ping_interval = d;
        self
    }

    /// Set the outbound queue capacity
    pub fn outbound_buffer(mut self, n: usize) -> Self {
        self.outbound_buffer = n.max(1);
        self
    }
}

/// Events surfaced by a WebSocket session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsMessage {
    /// Text frame from the server
    Text(String),
    /// Handshake completed
    Connected,
    /// Session ended, cleanly or not; always the last event
    Disconnected,
}

/// WebSocket errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WsError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Pong not received within {0:?}")]
    PongTimeout(Duration),
}
