//! Board vocabulary for the client. Game rules live on the service.

mod outcome;
mod position;
mod types;

pub use outcome::{DEFAULT_CONTINUATION_MARKER, GameOutcome};
pub use position::Position;
pub use types::{Board, BoardLengthError, Cell};
