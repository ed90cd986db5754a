//! Remote gateway to the training and play service.
//!
//! The gateway issues exactly two kinds of request and maps every failure
//! into a [`GatewayError`]. It never retries; the session controller decides
//! what a failure means for the game.

mod error;
mod http;

pub use error::{GatewayError, GatewayErrorKind};
pub use http::HttpGateway;

use crate::games::tictactoe::{Board, GameOutcome};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Authoritative result of a simulated move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateReply {
    /// Board after the player's move and the model's reply.
    pub board: Board,
    /// Human-readable description from the service.
    pub message: String,
    /// Whether the game goes on.
    pub outcome: GameOutcome,
}

/// Body of `POST /simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Board including the player's new mark.
    pub board: Board,
}

/// Response body of `POST /simulate`.
///
/// `outcome` is optional; older services only send the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Board after the model's reply.
    pub board: Board,
    /// Free-text description of the move.
    pub message: String,
    /// Structured outcome, when the service provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameOutcome>,
}

/// Status body the service sends alongside training and error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// `"success"` or `"error"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Explanation.
    #[serde(default)]
    pub message: Option<String>,
}

/// The two requests the client can make of the service.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Asks the service to start training its model.
    async fn start_training(&self) -> Result<(), GatewayError>;

    /// Sends the board with the player's move and returns the service's answer.
    async fn simulate_move(&self, board: &Board) -> Result<SimulateReply, GatewayError>;
}
