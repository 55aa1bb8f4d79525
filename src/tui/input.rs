//! Keyboard mapping.

use crate::games::tictactoe::Position;
use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place on a specific cell (keys 1-9).
    Place(Position),
    /// Place on the cell under the cursor.
    PlaceAtCursor,
    /// Move the cursor.
    Cursor(Direction),
    /// Leave the game.
    Quit,
}

/// Cursor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

/// Maps a key to a command.
pub fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c @ '1'..='9') => {
            let id = c.to_digit(10)? as usize - 1;
            Position::from_index(id).map(Command::Place)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::PlaceAtCursor),
        KeyCode::Up => Some(Command::Cursor(Direction::Up)),
        KeyCode::Down => Some(Command::Cursor(Direction::Down)),
        KeyCode::Left => Some(Command::Cursor(Direction::Left)),
        KeyCode::Right => Some(Command::Cursor(Direction::Right)),
        _ => None,
    }
}

/// Moves the cursor one cell, stopping at the board edge.
pub fn move_cursor(cursor: Position, direction: Direction) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match direction {
        Direction::Up => (row.saturating_sub(1), col),
        Direction::Down => ((row + 1).min(2), col),
        Direction::Left => (row, col.saturating_sub(1)),
        Direction::Right => (row, (col + 1).min(2)),
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}
