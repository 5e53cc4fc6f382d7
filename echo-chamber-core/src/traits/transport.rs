//! Socket transport abstraction Trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Connection ready state, mirroring the WebSocket API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Event read from a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// UTF-8 text frame
    Text(String),
    /// Peer closed the connection
    Close { code: u16, reason: String },
}

/// One open socket
#[async_trait]
pub trait Connection: Send {
    /// Current ready state
    fn ready_state(&self) -> ReadyState;

    /// Wait for the next event
    ///
    /// # Returns
    /// * `Some(Ok(event))` - Frame or close notification
    /// * `Some(Err(e))` - Transport failure; the connection is unusable
    /// * `None` - Stream ended
    async fn recv(&mut self) -> Option<CoreResult<SocketEvent>>;

    /// Send one text frame
    async fn send_text(&mut self, text: String) -> CoreResult<()>;

    /// Start the closing handshake
    async fn close(&mut self) -> CoreResult<()>;
}

/// Connection factory Trait
///
/// Platform implementations:
/// - App: `TungsteniteTransport` (tokio-tungstenite)
/// - Tests: in-memory channel transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection to `url`
    ///
    /// # Arguments
    /// * `url` - WebSocket endpoint (`ws://` or `wss://`)
    async fn connect(&self, url: &str) -> CoreResult<Box<dyn Connection>>;
}
