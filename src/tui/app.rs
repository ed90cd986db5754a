//! Application state and logic.

use super::input::{Action, action_for};
use crate::games::tictactoe::Position;
use crate::gateway::Gateway;
use crate::session::{SessionController, SessionState};
use crossterm::event::KeyCode;
use tracing::debug;

/// Main application state.
pub struct App<G> {
    controller: SessionController<G>,
    cursor: Position,
    should_quit: bool,
}

impl<G: Gateway + 'static> App<G> {
    /// Creates a new application around a controller.
    pub fn new(controller: SessionController<G>) -> Self {
        Self {
            controller,
            cursor: Position::Center,
            should_quit: false,
        }
    }

    /// Session being displayed.
    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let action = action_for(key, self.cursor);
        debug!(?key, ?action, "Handling key");

        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveCursor(pos) => self.cursor = pos,
            Action::Session(event) => self.controller.dispatch(event),
            Action::Ignored => {}
        }
    }

    /// Applies finished requests. Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        self.controller.poll_completions() > 0
    }

    /// Gives access to the controller, e.g. to await outstanding requests.
    pub fn controller_mut(&mut self) -> &mut SessionController<G> {
        &mut self.controller
    }
}
