//! WebSocket-backed gateway

use super::{ConnectionGateway, ConnectionStatus};
use crate::telemetry;
use crate::ws::{WsClient, WsConfig, WsMessage};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// Public echo endpoint; every frame sent comes back inbound
pub const DEFAULT_GATEWAY_URL: &str = "wss://ws.postman-echo.com/raw";

struct Session {
    outbound: mpsc::Sender<String>,
    socket: JoinHandle<()>,
    pump: JoinHandle<()>,
}

/// Gateway over one WebSocket session at a time
///
/// A failed or closed session leaves the status at `Disconnected`; nothing
/// reconnects until the next explicit [`connect`](ConnectionGateway::connect).
pub struct SocketGateway {
    config: WsConfig,
    status: Arc<watch::Sender<ConnectionStatus>>,
    inbound: broadcast::Sender<String>,
    session: Mutex<Option<Session>>,
}

impl SocketGateway {
    pub fn new(config: WsConfig, inbound_buffer: usize) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);
        let (inbound, _) = broadcast::channel(inbound_buffer.max(1));
        Self {
            config,
            status: Arc::new(status),
            inbound,
            session: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Translate session events into status changes and inbound frames
    async fn run_pump(
        mut events: mpsc::Receiver<WsMessage>,
        status: Arc<watch::Sender<ConnectionStatus>>,
        inbound: broadcast::Sender<String>,
    ) {
        while let Some(event) = events.recv().await {
            match event {
                WsMessage::Connected => {
                    tracing::info!("Gateway connected");
                    status.send_replace(ConnectionStatus::Connected);
                }
                WsMessage::Text(text) => {
                    // No subscribers means nobody is tracking prices yet
                    let _ = inbound.send(text);
                }
                WsMessage::Disconnected => break,
            }
        }
        tracing::info!("Gateway disconnected");
        status.send_replace(ConnectionStatus::Disconnected);
    }
}

impl ConnectionGateway for SocketGateway {
    fn connect(&self) {
        let mut session = self.session.lock();
        if session.as_ref().is_some_and(|s| !s.pump.is_finished()) {
            tracing::debug!("Gateway already connected, ignoring connect");
            return;
        }

        self.status.send_replace(ConnectionStatus::Connecting);
        let (events, outbound, socket) = WsClient::new(self.config.clone()).connect();
        let pump = tokio::spawn(Self::run_pump(
            events,
            Arc::clone(&self.status),
            self.inbound.clone(),
        ));
        *session = Some(Session {
            outbound,
            socket,
            pump,
        });
    }

    fn send(&self, frame: &str) {
        let guard = self.session.lock();
        let Some(session) = guard.as_ref() else {
            tracing::debug!(frame, "No session, dropping outbound frame");
            return;
        };
        match session.outbound.try_send(frame.to_string()) {
            Ok(()) => telemetry::record_frame_sent(),
            Err(e) => tracing::debug!(frame, error = %e, "Dropping outbound frame"),
        }
    }

    fn close(&self) {
        if let Some(session) = self.session.lock().take() {
            // An open socket sends a close frame once the sender is dropped;
            // a pending handshake is abandoned
            let open = *self.status.borrow() == ConnectionStatus::Connected;
            drop(session.outbound);
            if !open {
                session.socket.abort();
            }
            session.pump.abort();
        }
        self.status.send_replace(ConnectionStatus::Disconnected);
    }

    fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    fn frames(&self) -> broadcast::Receiver<String> {
        self.inbound.subscribe()
    }
}

impl Drop for SocketGateway {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.socket.abort();
            session.pump.abort();
        }
    }
}
