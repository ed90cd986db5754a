//! Result of a simulated move as reported by the service.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Default substring the service puts in its message while the game goes on.
pub const DEFAULT_CONTINUATION_MARKER: &str = "continua";

/// Outcome of the last simulated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Game goes on, the player moves next.
    #[display("Game in progress")]
    Continue,
    /// The local player won.
    #[display("You win")]
    PlayerWin,
    /// The model won.
    #[display("The model wins")]
    OpponentWin,
    /// Board filled with no winner.
    #[display("Draw")]
    Draw,
    /// Game ended but the message did not say how.
    #[display("Game over")]
    Ended,
}

impl GameOutcome {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::Continue
    }

    /// Infers the outcome from the service's free-text message.
    ///
    /// Only the continuation marker decides whether play goes on; the
    /// remaining checks just label terminal messages for display.
    pub fn from_message(message: &str, continuation_marker: &str) -> Self {
        if message.contains(continuation_marker) {
            return GameOutcome::Continue;
        }

        let lower = message.to_lowercase();
        if lower.contains("draw") {
            GameOutcome::Draw
        } else if lower.contains("player x wins") || lower.contains("you win") {
            GameOutcome::PlayerWin
        } else if lower.contains("player o wins") || lower.contains("you lose") {
            GameOutcome::OpponentWin
        } else {
            GameOutcome::Ended
        }
    }
}
