//! Websocket transport.

use super::transport::{Transport, TransportError};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, instrument, trace};

/// A text-frame transport over a websocket connection.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Opens a websocket connection to `url`.
    #[instrument]
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        info!("Connecting to matchmaking server");
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| TransportError::new(format!("Failed to connect to {}: {}", url, e)))?;
        debug!(status = %response.status(), "Websocket handshake complete");
        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        trace!(%frame, "Websocket send");
        self.stream
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| TransportError::new(format!("Websocket send failed: {}", e)))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(e) => {
                    return Some(Err(TransportError::new(format!(
                        "Websocket receive failed: {}",
                        e
                    ))));
                }
            };
            match message {
                Message::Text(text) => return Some(Ok(text.as_str().to_owned())),
                Message::Close(frame) => {
                    debug!(?frame, "Server closed the websocket");
                    return None;
                }
                // Ping/pong are answered by tungstenite; binary frames are not part of the protocol.
                other => trace!(?other, "Ignoring non-text frame"),
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| TransportError::new(format!("Websocket close failed: {}", e)))
    }
}
