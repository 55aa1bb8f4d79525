//! Frame transport seam between the matchmaking client and a socket.

use async_trait::async_trait;
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tracing::{instrument, trace};

/// Transport-level failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A bidirectional stream of text frames.
///
/// `recv` must be cancel-safe: the client polls it inside `select!`.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Sends one frame.
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Receives the next frame, or `None` once the peer has closed.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    /// Closes the transport. The default does nothing.
    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// In-memory transport backed by a pair of channels.
///
/// Used to drive a client without a network, e.g. against a scripted
/// peer in tests.
#[derive(Debug)]
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<String>,
    inbound: mpsc::UnboundedReceiver<String>,
}

/// The far end of a [`ChannelTransport`].
#[derive(Debug)]
pub struct ChannelPeer {
    /// Frames written by the client.
    pub from_client: mpsc::UnboundedReceiver<String>,
    /// Frames delivered to the client.
    pub to_client: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Creates a connected transport and its peer.
    #[instrument]
    pub fn pair() -> (Self, ChannelPeer) {
        let (client_tx, client_rx) = mpsc::unbounded_channel();
        let (peer_tx, peer_rx) = mpsc::unbounded_channel();
        (
            Self {
                outbound: client_tx,
                inbound: peer_rx,
            },
            ChannelPeer {
                from_client: client_rx,
                to_client: peer_tx,
            },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        trace!(%frame, "Channel send");
        self.outbound
            .send(frame)
            .map_err(|_| TransportError::new("Channel peer dropped"))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.recv().await.map(Ok)
    }
}
