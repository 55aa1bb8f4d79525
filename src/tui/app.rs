//! Application state for the terminal client.

use super::input::{self, Command};
use crate::controller::MatchController;
use crate::games::tictactoe::Position;
use crate::view::{self, Screen};
use tracing::debug;

/// Terminal client state: the match plus the keyboard cursor.
pub struct App {
    controller: MatchController,
    cursor: Position,
}

impl App {
    /// Creates the app around a started match.
    pub fn new(controller: MatchController) -> Self {
        Self {
            controller,
            cursor: Position::Center,
        }
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Applies queued server events.
    pub fn pump(&mut self) {
        let applied = self.controller.drain();
        if !applied.is_empty() {
            debug!(count = applied.len(), "Drained server events");
        }
    }

    /// Current screen projection.
    pub fn screen(&self) -> Screen {
        view::project(self.controller.session(), self.controller.link_lost())
    }

    /// Handles a command. Returns `false` when the app should exit.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Cursor(direction) => {
                self.cursor = input::move_cursor(self.cursor, direction);
            }
            Command::Place(pos) => {
                self.cursor = pos;
                self.place();
            }
            Command::PlaceAtCursor => self.place(),
        }
        true
    }

    /// Consumes the app, returning the controller for shutdown.
    pub fn into_controller(self) -> MatchController {
        self.controller
    }

    fn place(&mut self) {
        // Rejected clicks are absorbed; the controller logs them.
        let _ = self.controller.click(self.cursor.to_index());
    }
}
