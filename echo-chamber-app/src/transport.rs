//! WebSocket transport backed by tokio-tungstenite

use async_trait::async_trait;
use echo_chamber_core::error::{CoreError, CoreResult};
use echo_chamber_core::traits::{Connection, ReadyState, SocketEvent, Transport};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Close code reported when the peer sent no status
const NO_STATUS_RECEIVED: u16 = 1005;

/// Transport opening real WebSocket connections
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteTransport;

#[async_trait]
impl Transport for TungsteniteTransport {
    async fn connect(&self, url: &str) -> CoreResult<Box<dyn Connection>> {
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| CoreError::Transport(format!("Connection failed: {e}")))?;
        tracing::debug!(status = %response.status(), "WebSocket handshake complete");

        Ok(Box::new(TungsteniteConnection {
            stream,
            state: ReadyState::Open,
        }))
    }
}

/// One tokio-tungstenite connection
pub struct TungsteniteConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    state: ReadyState,
}

#[async_trait]
impl Connection for TungsteniteConnection {
    fn ready_state(&self) -> ReadyState {
        self.state
    }

    async fn recv(&mut self) -> Option<CoreResult<SocketEvent>> {
        loop {
            let Some(next) = self.stream.next().await else {
                self.state = ReadyState::Closed;
                return None;
            };

            let message = match next {
                Ok(message) => message,
                Err(e) => {
                    self.state = ReadyState::Closed;
                    return Some(Err(CoreError::Transport(e.to_string())));
                }
            };

            match message {
                Message::Text(text) => return Some(Ok(SocketEvent::Text(text))),
                Message::Binary(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => return Some(Ok(SocketEvent::Text(text))),
                    Err(_) => tracing::debug!("Skipping non UTF-8 binary frame"),
                },
                Message::Close(frame) => {
                    self.state = ReadyState::Closed;
                    let (code, reason) = frame.map_or_else(
                        || (NO_STATUS_RECEIVED, String::new()),
                        |f| (u16::from(f.code), f.reason.into_owned()),
                    );
                    return Some(Ok(SocketEvent::Close { code, reason }));
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
    }

    async fn send_text(&mut self, text: String) -> CoreResult<()> {
        if self.state != ReadyState::Open {
            return Err(CoreError::NotConnected);
        }
        self.stream
            .send(Message::Text(text))
            .await
            .map_err(|e| CoreError::Transport(format!("Send failed: {e}")))
    }

    async fn close(&mut self) -> CoreResult<()> {
        if matches!(self.state, ReadyState::Closing | ReadyState::Closed) {
            return Ok(());
        }
        self.state = ReadyState::Closing;
        let result = self.stream.close(None).await;
        self.state = ReadyState::Closed;
        result.map_err(|e| CoreError::Transport(format!("Close failed: {e}")))
    }
}
