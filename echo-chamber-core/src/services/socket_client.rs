//! Socket client lifecycle service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::dispatcher::{dispatch_frame, DispatchOutcome};
use crate::error::{CoreError, CoreResult};
use crate::traits::{Connection, Notifier, QueryHandler, ReadyState, SocketEvent, Transport};
use crate::types::Envelope;

/// Result of [`SocketClient::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new connection was created
    Opened,
    /// A connection that is not closed already exists; nothing was done
    AlreadyOpen,
}

/// Counters for one receive loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub received: usize,
    pub handled: usize,
    pub unknown: usize,
    pub failed: usize,
}

/// Socket client
///
/// Owns at most one connection. Constructed once per page session; the
/// connection handle is private and only changes through `open`/`close`.
pub struct SocketClient {
    url: String,
    transport: Arc<dyn Transport>,
    connection: Option<Box<dyn Connection>>,
}

impl SocketClient {
    /// Create a client for `url`; no connection is made yet
    #[must_use]
    pub fn new(url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: url.into(),
            transport,
            connection: None,
        }
    }

    /// Endpoint address
    pub fn url(&self) -> &str {
        &self.url
    }

    /// State of the current connection, `Closed` if none was opened
    pub fn ready_state(&self) -> ReadyState {
        self.connection
            .as_ref()
            .map_or(ReadyState::Closed, |c| c.ready_state())
    }

    /// Open the connection.
    ///
    /// No-op while an existing connection is in any state other than
    /// `Closed`.
    pub async fn open(&mut self) -> CoreResult<OpenOutcome> {
        if self.ready_state() != ReadyState::Closed {
            log::info!("WebSocket OK.");
            return Ok(OpenOutcome::AlreadyOpen);
        }

        let connection = self.transport.connect(&self.url).await?;
        log::info!("WebSocket connected: {}", self.url);
        self.connection = Some(connection);
        Ok(OpenOutcome::Opened)
    }

    /// Dispatch one inbound text frame.
    pub fn on_message<H, N>(
        &self,
        frame: &str,
        handler: &mut H,
        notifier: &N,
    ) -> CoreResult<DispatchOutcome>
    where
        H: QueryHandler + ?Sized,
        N: Notifier + ?Sized,
    {
        dispatch_frame(frame, handler, notifier)
    }

    /// Receive and dispatch frames until the connection closes.
    ///
    /// Each frame is dispatched to completion before the next one is read.
    /// Failed dispatches are logged and do not stop the loop. A close event is
    /// logged and ends the loop; there is no reconnection.
    pub async fn run<H, N>(&mut self, handler: &mut H, notifier: &N) -> CoreResult<SessionStats>
    where
        H: QueryHandler + ?Sized,
        N: Notifier + ?Sized,
    {
        let connection = self.connection.as_mut().ok_or(CoreError::NotConnected)?;
        let mut stats = SessionStats::default();

        while let Some(event) = connection.recv().await {
            match event {
                Ok(SocketEvent::Text(frame)) => {
                    stats.received += 1;
                    match dispatch_frame(&frame, handler, notifier) {
                        Ok(DispatchOutcome::Handled(_)) => stats.handled += 1,
                        Ok(DispatchOutcome::Unknown(_)) => stats.unknown += 1,
                        Err(e) => {
                            stats.failed += 1;
                            if e.is_expected() {
                                log::warn!("Failed to handle message: {e}");
                            } else {
                                log::error!("Failed to handle message: {e}");
                            }
                        }
                    }
                }
                Ok(SocketEvent::Close { code, reason }) => {
                    log::info!("WebSocket closed by server ({code}): {reason}");
                    break;
                }
                Err(e) => {
                    log::error!("WebSocket receive failed: {e}");
                    break;
                }
            }
        }

        log::info!(
            "Session ended: {} received, {} handled, {} unknown, {} failed",
            stats.received,
            stats.handled,
            stats.unknown,
            stats.failed
        );
        Ok(stats)
    }

    /// Send a `{ query, content }` message.
    pub async fn send(&mut self, query: &str, content: Value) -> CoreResult<()> {
        let frame = Envelope::new(query, content).to_frame()?;
        match self.connection.as_mut() {
            Some(connection) if connection.ready_state() == ReadyState::Open => {
                connection.send_text(frame).await
            }
            _ => Err(CoreError::NotConnected),
        }
    }

    /// Close the connection if one is open.
    pub async fn close(&mut self) -> CoreResult<()> {
        let Some(connection) = self.connection.as_mut() else {
            return Ok(());
        };
        if matches!(
            connection.ready_state(),
            ReadyState::Closing | ReadyState::Closed
        ) {
            return Ok(());
        }
        connection.close().await?;
        log::info!("WebSocket closed: {}", self.url);
        Ok(())
    }
}
