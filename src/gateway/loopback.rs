//! In-memory gateway

use super::{ConnectionGateway, ConnectionStatus};
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};

/// Gateway that never leaves the process
///
/// With echo enabled every frame sent while connected comes straight back as
/// an inbound frame, like an echo server. [`inject`](Self::inject) simulates
/// a server push and [`fail`](Self::fail) a transport failure.
pub struct LoopbackGateway {
    status: watch::Sender<ConnectionStatus>,
    inbound: broadcast::Sender<String>,
    sent: Mutex<Vec<String>>,
    echo: bool,
}

impl LoopbackGateway {
    /// Non-echoing gateway; sent frames are only recorded
    pub fn new(buffer: usize) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);
        let (inbound, _) = broadcast::channel(buffer.max(1));
        Self {
            status,
            inbound,
            sent: Mutex::new(Vec::new()),
            echo: false,
        }
    }

    /// Gateway that reflects every sent frame back inbound
    pub fn echo(buffer: usize) -> Self {
        Self {
            echo: true,
            ..Self::new(buffer)
        }
    }

    pub fn is_connected(&self) -> bool {
        *self.status.borrow() == ConnectionStatus::Connected
    }

    /// Deliver `frame` as if the server pushed it; dropped unless connected
    pub fn inject(&self, frame: impl Into<String>) -> bool {
        if !self.is_connected() {
            return false;
        }
        // No subscribers is not an error for a push
        let _ = self.inbound.send(frame.into());
        true
    }

    /// Simulate a transport failure
    pub fn fail(&self) {
        tracing::warn!("Loopback gateway failure injected");
        self.status.send_replace(ConnectionStatus::Disconnected);
    }

    /// Frames sent while connected, oldest first
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl ConnectionGateway for LoopbackGateway {
    fn connect(&self) {
        if *self.status.borrow() != ConnectionStatus::Disconnected {
            return;
        }
        self.status.send_replace(ConnectionStatus::Connecting);
        self.status.send_replace(ConnectionStatus::Connected);
        tracing::info!("Loopback gateway connected");
    }

    fn send(&self, frame: &str) {
        if !self.is_connected() {
            tracing::debug!(frame, "Not connected, dropping outbound frame");
            return;
        }
        self.sent.lock().push(frame.to_string());
        if self.echo {
            let _ = self.inbound.send(frame.to_string());
        }
    }

    fn close(&self) {
        self.status.send_replace(ConnectionStatus::Disconnected);
    }

    fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    fn frames(&self) -> broadcast::Receiver<String> {
        self.inbound.subscribe()
    }
}
