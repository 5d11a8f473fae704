//! One persistent WebSocket per race session.
//!
//! The connection carries plain-text commands out and JSON frames in. There
//! is deliberately no retry, heartbeat, or reconnection policy: a stalled
//! connection leaves the race running until the user stops or resets it.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use rabbithole::{RaceError, STOP_COMMAND};

pub struct RaceConnection {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    open: bool,
}

impl RaceConnection {
    pub async fn connect(url: &str) -> Result<Self, RaceError> {
        let (ws, _) = connect_async(url)
            .await
            .map_err(|e| RaceError::Connectivity(format!("connect {url}: {e}")))?;
        debug!("connected to {url}");
        Ok(Self { ws, open: true })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Send one plain-text command.
    pub async fn send(&mut self, command: &str) -> Result<(), RaceError> {
        if !self.open {
            return Err(RaceError::Connectivity("connection closed".to_string()));
        }
        self.ws
            .send(Message::Text(command.to_string()))
            .await
            .map_err(|e| {
                self.open = false;
                RaceError::Connectivity(format!("send: {e}"))
            })
    }

    /// Next text frame from the backend; `None` once the stream ends.
    /// Non-text frames are skipped (pings are answered by the library).
    pub async fn recv(&mut self) -> Option<String> {
        while let Some(frame) = self.ws.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    warn!("connection error: {e}");
                    self.open = false;
                    return None;
                }
            }
        }
        self.open = false;
        None
    }

    /// Graceful teardown. Sends a stop command first only when asked to and
    /// the socket is still observed open; best-effort, no confirmation.
    pub async fn shutdown(mut self, send_stop: bool) {
        if send_stop && self.open {
            let _ = self.ws.send(Message::Text(STOP_COMMAND.to_string())).await;
        }
        let _ = self.ws.close(None).await;
    }
}
