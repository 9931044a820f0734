//! Single-session bidirectional WebSocket client

use super::types::{WsConfig, WsError, WsMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// WebSocket client that runs one session per [`connect`](WsClient::connect)
///
/// There is no reconnection: when the session ends for any reason the event
/// channel yields [`WsMessage::Disconnected`] and closes.
pub struct WsClient {
    config: WsConfig,
}

impl WsClient {
    /// Create a new WebSocket client with the given configuration
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    /// Create a new client with just a URL using default config
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::new(WsConfig::new(url))
    }

    /// Get the configured URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Open a session in the background
    ///
    /// Returns (event_receiver, text_sender, session_task). Dropping the
    /// sender closes the socket with a close frame; dropping the receiver ends
    /// the session on its next inbound frame. Aborting the task drops the
    /// socket at once, even mid-handshake.
    pub fn connect(
        &self,
    ) -> (
        mpsc::Receiver<WsMessage>,
        mpsc::Sender<String>,
        JoinHandle<()>,
    ) {
        let (event_tx, event_rx) = mpsc::channel(self.config.event_buffer);
        let (send_tx, send_rx) = mpsc::channel(self.config.outbound_buffer);
        let config = self.config.clone();

        let session = tokio::spawn(async move {
            match Self::run_session(&config, &event_tx, send_rx).await {
                Ok(()) => tracing::info!(url = %config.url, "WebSocket session closed"),
                Err(e) => tracing::warn!(url = %config.url, error = %e, "WebSocket session failed"),
            }
            let _ = event_tx.send(WsMessage::Disconnected).await;
        });

        (event_rx, send_tx, session)
    }

    async fn run_session(
        config: &WsConfig,
        tx: &mpsc::Sender<WsMessage>,
        mut send_rx: mpsc::Receiver<String>,
    ) -> Result<(), WsError> {
        tracing::info!(url = %config.url, "Connecting to WebSocket");

        let (ws_stream, _response) =
            tokio::time::timeout(config.connect_timeout, connect_async(&config.url))
                .await
                .map_err(|_| WsError::Timeout(config.connect_timeout))?
                .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        let (mut write, mut read) = ws_stream.split();

        if tx.send(WsMessage::Connected).await.is_err() {
            return Ok(());
        }

        let mut ping_interval = tokio::time::interval(config.ping_interval);
        ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick completes immediately
        ping_interval.tick().await;
        let mut waiting_for_pong = false;

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if tx.send(WsMessage::Text(text)).await.is_err() {
                                tracing::debug!("Receiver dropped, closing connection");
                                return Ok(());
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await
                                .map_err(|e| WsError::SendFailed(e.to_string()))?;
                        }
                        Some(Ok(Message::Pong(_))) => {
                            waiting_for_pong = false;
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("Received close frame");
                            return Ok(());
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(WsError::ConnectionFailed(e.to_string()));
                        }
                        None => {
                            return Err(WsError::ConnectionFailed("Stream ended unexpectedly".into()));
                        }
                    }
                }

                outbound = send_rx.recv() => {
                    match outbound {
                        Some(text) => {
                            write.send(Message::Text(text)).await
                                .map_err(|e| WsError::SendFailed(e.to_string()))?;
                        }
                        None => {
                            let _ = write.send(Message::Close(None)).await;
                            return Ok(());
                        }
                    }
                }

                _ = ping_interval.tick() => {
                    if waiting_for_pong {
                        return Err(WsError::PongTimeout(config.ping_interval));
                    }
                    write.send(Message::Ping(Vec::new())).await
                        .map_err(|e| WsError::SendFailed(e.to_string()))?;
                    waiting_for_pong = true;
                }
            }
        }
    }
}
