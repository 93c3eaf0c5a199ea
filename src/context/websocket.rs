//! Live-update channel shared by the admin area.
//!
//! The admin layout owns one [`WebSocketContext`]. Every descendant reaches
//! the same connection through the scope; calling [`WebSocketContext::connect`]
//! again while a connection is open does nothing. The message protocol is up
//! to the server: incoming text frames are fanned out to subscribers as-is.

use super::scope::{ContextValue, Scope};
use crate::error::{ContextError, WsError};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

const OUTGOING_BUFFER: usize = 32;
const INCOMING_BUFFER: usize = 64;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

struct Connection {
    outgoing: mpsc::Sender<Message>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Connection {
    fn is_open(&self) -> bool {
        !self.reader.is_finished() && !self.writer.is_finished()
    }

    fn abort(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}

pub struct WebSocketContext {
    url: String,
    connect_timeout: Duration,
    state: Arc<watch::Sender<ConnectionState>>,
    incoming: broadcast::Sender<String>,
    connection: Mutex<Option<Connection>>,
}

impl ContextValue for WebSocketContext {
    const CONSUMER: &'static str = "use_websocket";
    const PROVIDER: &'static str = "WebSocketProvider";
}

impl WebSocketContext {
    pub fn new(url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (incoming, _) = broadcast::channel(INCOMING_BUFFER);
        Self {
            url: url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            state: Arc::new(state),
            incoming,
            connection: Mutex::new(None),
        }
    }

    /// Upper bound on the TCP connect plus the opening handshake.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the shared connection unless one is already open.
    pub async fn connect(&self) -> Result<(), WsError> {
        let mut connection = self.connection.lock().await;
        if connection.as_ref().is_some_and(Connection::is_open) {
            debug!("WebSocket already connected to {}", self.url);
            return Ok(());
        }
        if let Some(stale) = connection.take() {
            stale.abort();
        }

        self.state.send_replace(ConnectionState::Connecting);

        let attempt = tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str()));
        let (stream, _) = match attempt.await {
            Ok(Ok(connected)) => connected,
            Ok(Err(e)) => {
                error!("Failed to connect to {}: {}", self.url, e);
                self.state.send_replace(ConnectionState::Failed);
                return Err(WsError::Connect {
                    url: self.url.clone(),
                    source: e,
                });
            }
            Err(_) => {
                error!(
                    "WebSocket handshake with {} did not complete within {:?}",
                    self.url, self.connect_timeout
                );
                self.state.send_replace(ConnectionState::Failed);
                return Err(WsError::Timeout {
                    url: self.url.clone(),
                    after: self.connect_timeout,
                });
            }
        };
        info!("Connected to live updates at {}", self.url);
        self.state.send_replace(ConnectionState::Connected);

        let (mut write, mut read) = stream.split();
        let (outgoing, mut outgoing_rx) = mpsc::channel::<Message>(OUTGOING_BUFFER);

        let writer = tokio::spawn(async move {
            while let Some(message) = outgoing_rx.recv().await {
                if let Err(e) = write.send(message).await {
                    warn!("Failed to send WebSocket frame: {}", e);
                    return;
                }
            }
            // Sender dropped: close the connection from our side.
            if let Err(e) = write.close().await {
                debug!("WebSocket close handshake failed: {}", e);
            }
        });

        let incoming = self.incoming.clone();
        let state = Arc::clone(&self.state);
        let reader = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        // No subscribers is fine.
                        let _ = incoming.send(text);
                    }
                    Ok(Message::Close(_)) => {
                        info!("Server closed the live-update connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
            state.send_replace(ConnectionState::Disconnected);
        });

        *connection = Some(Connection {
            outgoing,
            reader,
            writer,
        });
        Ok(())
    }

    /// Send a text frame over the shared connection.
    pub async fn send(&self, text: impl Into<String>) -> Result<(), WsError> {
        let outgoing = {
            let connection = self.connection.lock().await;
            match connection.as_ref() {
                Some(connection) if connection.is_open() => connection.outgoing.clone(),
                _ => return Err(WsError::NotConnected),
            }
        };
        outgoing
            .send(Message::Text(text.into()))
            .await
            .map_err(|_| WsError::NotConnected)
    }

    /// Incoming text messages.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.incoming.subscribe()
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Release the connection. Safe to call when nothing is open.
    pub async fn close(&self) {
        let Some(connection) = self.connection.lock().await.take() else {
            return;
        };

        let Connection {
            outgoing,
            reader,
            writer,
        } = connection;
        drop(outgoing);
        if let Err(e) = writer.await {
            debug!("WebSocket writer ended abnormally: {}", e);
        }
        reader.abort();

        self.state.send_replace(ConnectionState::Disconnected);
        info!("Closed live-update connection to {}", self.url);
    }
}

impl Drop for WebSocketContext {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.get_mut().take() {
            connection.abort();
        }
    }
}

pub fn use_websocket(scope: &Scope) -> Result<Arc<WebSocketContext>, ContextError> {
    scope.consume::<WebSocketContext>()
}
