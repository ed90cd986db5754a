//! Keyboard mapping.

use crate::games::tictactoe::Position;
use crate::session::Event;
use crossterm::event::KeyCode;

/// What a key press means to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the TUI.
    Quit,
    /// Move the highlight.
    MoveCursor(Position),
    /// Feed an event into the session.
    Session(Event),
    /// Key has no binding.
    Ignored,
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::at(r, c))
        .unwrap_or(cursor)
}

/// Maps a key to an action given the current cursor.
pub fn action_for(key: KeyCode, cursor: Position) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('t') => Action::Session(Event::TrainingRequested),
        KeyCode::Char('n') => Action::Session(Event::NewGameRequested),
        KeyCode::Char(c) if c.is_ascii_digit() => match Position::from_digit(c) {
            Some(pos) => Action::Session(Event::CellSelected(pos)),
            None => Action::Ignored,
        },
        KeyCode::Enter | KeyCode::Char(' ') => Action::Session(Event::CellSelected(cursor)),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Action::MoveCursor(move_cursor(cursor, key))
        }
        _ => Action::Ignored,
    }
}
