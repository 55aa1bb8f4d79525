//! Drives one online match: session state plus its matchmaking connection.
//!
//! The controller owns the only [`GameSession`] and the only connection for
//! it. Clicks and queued server events are applied one at a time, in order.
//! Rejections are logged and absorbed; the return values let callers and
//! tests observe them.

use crate::matchmaking::{ClientError, Inbound, MatchmakingClient};
use crate::session::{GameSession, SessionError, SessionEvent, Transition};
use crate::games::tictactoe::{Move, MoveError};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, instrument, warn};

/// One online match and its connection.
#[derive(Debug)]
pub struct MatchController {
    session: GameSession,
    client: MatchmakingClient,
    inbound: Inbound,
    link_lost: bool,
}

impl MatchController {
    /// Wraps a fresh session and asks the server for an opponent.
    #[instrument(skip_all, fields(player = %session.player_name()))]
    pub fn start(
        session: GameSession,
        client: MatchmakingClient,
        inbound: Inbound,
    ) -> Result<Self, ClientError> {
        client.request_to_play(session.player_name())?;
        Ok(Self {
            session,
            client,
            inbound,
            link_lost: false,
        })
    }

    /// The session being driven.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// True once the connection has gone away.
    pub fn link_lost(&self) -> bool {
        self.link_lost
    }

    /// Handles a click on cell `id`.
    ///
    /// An accepted move is announced to the opponent exactly once; a
    /// rejected move is neither applied nor announced. Once the connection
    /// is gone every click is rejected with [`MoveError::LinkLost`].
    #[instrument(skip(self))]
    pub fn click(&mut self, id: usize) -> Result<Move, SessionError> {
        if self.link_lost || self.client.is_closed() {
            self.mark_link_lost();
            debug!("Click ignored, connection lost");
            return Err(MoveError::LinkLost.into());
        }

        let mv = self.session.local_move(id).inspect_err(|e| {
            debug!(error = %e, "Click ignored");
        })?;

        if let Err(e) = self.client.announce_move(mv) {
            warn!(error = %e, %mv, "Could not announce move");
            self.link_lost = true;
        }
        Ok(mv)
    }

    /// Applies one inbound event.
    #[instrument(skip(self))]
    pub fn apply(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        let result = self.session.handle_event(event);
        match &result {
            Ok(transition) => debug!(?transition, "Event applied"),
            Err(e) => debug!(error = %e, "Event ignored"),
        }
        result
    }

    /// Applies every event currently queued, in arrival order.
    ///
    /// Never blocks. Returns the per-event results.
    pub fn drain(&mut self) -> Vec<Result<Transition, SessionError>> {
        let mut results = Vec::new();
        loop {
            match self.inbound.try_recv() {
                Ok(event) => results.push(self.apply(event.into())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.mark_link_lost();
                    break;
                }
            }
        }
        results
    }

    /// Waits for the next queued event and applies it.
    ///
    /// Returns `None` once the connection is gone.
    pub async fn next(&mut self) -> Option<Result<Transition, SessionError>> {
        match self.inbound.recv().await {
            Some(event) => Some(self.apply(event.into())),
            None => {
                self.mark_link_lost();
                None
            }
        }
    }

    /// Closes the connection.
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        info!(outcome = %self.session.outcome(), "Leaving match");
        self.client.shutdown().await;
    }

    fn mark_link_lost(&mut self) {
        if !self.link_lost {
            warn!(phase = self.session.phase().name(), "Connection lost");
            self.link_lost = true;
        }
    }
}
