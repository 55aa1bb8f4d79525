//! Online Tic-Tac-Toe - two-player tic-tac-toe over a matchmaking server
//!
//! Each client keeps its own copy of the board and exchanges moves with a
//! single opponent through a realtime socket.
//!
//! # Architecture
//!
//! - **Games**: board, win detection and turn order for tic-tac-toe
//! - **Session**: the per-match state machine fed by local clicks and server events
//! - **Protocol**: the named events exchanged with the server, as JSON
//! - **Matchmaking**: the connection task bridging a transport to the session
//! - **View**: a pure projection of the session onto what is drawn
//! - **TUI**: the ratatui front end
//!
//! # Example
//!
//! ```no_run
//! use online_tictactoe::{GameSession, MatchController, PlayerName, connect};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (client, inbound) = connect("ws://localhost:8000").await?;
//! let session = GameSession::new(PlayerName::parse("alice")?);
//! let mut controller = MatchController::start(session, client, inbound)?;
//! while let Some(result) = controller.next().await {
//!     println!("{:?}", result);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod games;
mod matchmaking;
mod protocol;
mod session;
mod tui;
mod view;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Match driving
pub use controller::MatchController;

// Crate-level exports - Game rules
pub use games::tictactoe::{
    Board, Cell, LineKind, Mark, MatchState, Move, MoveError, Outcome, Position, TurnController,
    Verdict, WinningLine, LINES, check_winner, evaluate, is_draw, is_full,
};

// Crate-level exports - Contracts and invariants
pub use games::tictactoe::{
    AlternatingTurnInvariant, Contract, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, LegalMove, MatchIsLive, MonotonicBoardInvariant, MoveContract,
    PlayersTurn, TicTacToeInvariants,
};

// Crate-level exports - Matchmaking
pub use matchmaking::{
    ChannelPeer, ChannelTransport, ClientError, Inbound, MatchmakingClient, Transport,
    TransportError, WebSocketTransport, connect,
};

// Crate-level exports - Wire protocol
pub use protocol::{
    ClientEvent, MovePayload, MoveState, OpponentFound, PlayRequest, ProtocolError, ServerEvent,
    decode, encode,
};

// Crate-level exports - Session
pub use session::{EmptyName, GameSession, Origin, Phase, PlayerName, SessionError, SessionEvent, Transition};

// Crate-level exports - View
pub use view::{BoardView, CellView, NameTag, Screen, project};

// Crate-level exports - Terminal UI
pub use tui::{prompt_name, run_tui};
