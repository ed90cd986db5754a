//! Session state and its transition function.

use crate::gateway::SimulateReply;
use crate::games::tictactoe::{Board, Cell, GameOutcome, Position};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::{debug, info, warn};

/// Lifecycle of the remote model's training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum TrainingStatus {
    /// No training requested yet.
    #[default]
    #[display("Not Started")]
    NotStarted,
    /// Training request sent, no answer yet.
    #[display("In Progress...")]
    InProgress,
    /// The service accepted the training request.
    #[display("Completed")]
    Completed,
    /// The training request failed.
    #[display("Error")]
    Failed,
}

/// Who may change the board next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Turn {
    /// The local player may select a cell.
    #[default]
    #[display("Your turn")]
    PlayerTurn,
    /// The service is playing its reply.
    #[display("Model is thinking...")]
    OpponentTurn,
    /// No more moves until a new game starts.
    #[display("Game over")]
    GameOver,
}

/// What happens to an unconfirmed mark when its simulate request fails.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Clear the optimistic mark and hand the turn back.
    #[default]
    #[strum(serialize = "rollback")]
    Rollback,
    /// Leave the optimistic mark on the board.
    #[serde(rename = "keep")]
    #[strum(serialize = "keep")]
    KeepOptimistic,
}

/// Identifies one issued request so late answers can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{}", _0)]
pub struct RequestId(pub u64);

/// The request currently awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// Waiting on `POST /train`.
    Training(RequestId),
    /// Waiting on `POST /simulate` for the mark placed at `position`.
    Simulate {
        /// Request identifier.
        id: RequestId,
        /// Cell holding the unconfirmed mark.
        position: Position,
    },
}

impl Pending {
    /// Identifier of the pending request.
    pub fn id(&self) -> RequestId {
        match self {
            Pending::Training(id) => *id,
            Pending::Simulate { id, .. } => *id,
        }
    }
}

/// Inputs to the state machine: user intents and request outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User asked to train the model.
    TrainingRequested,
    /// Training request succeeded.
    TrainingSucceeded(RequestId),
    /// Training request failed.
    TrainingFailed {
        /// Which request.
        id: RequestId,
        /// Diagnostic for display.
        reason: String,
    },
    /// User picked a cell.
    CellSelected(Position),
    /// Simulate request returned a board.
    SimulateSucceeded {
        /// Which request.
        id: RequestId,
        /// Authoritative answer.
        reply: SimulateReply,
    },
    /// Simulate request failed.
    SimulateFailed {
        /// Which request.
        id: RequestId,
        /// Diagnostic for display.
        reason: String,
    },
    /// User asked for a fresh board.
    NewGameRequested,
}

/// Side effect a transition asks the controller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Issue `POST /train`.
    StartTraining(RequestId),
    /// Issue `POST /simulate` with this board.
    SimulateMove {
        /// Request identifier to report back with.
        id: RequestId,
        /// Board including the optimistic mark.
        board: Board,
    },
}

/// Everything the view renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    training: TrainingStatus,
    board: Board,
    turn: Turn,
    message: Option<String>,
    outcome: Option<GameOutcome>,
    pending: Option<Pending>,
    last_error: Option<String>,
    policy: FailurePolicy,
    next_request: u64,
}

impl SessionState {
    /// Fresh session with the default failure policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session with the given failure policy.
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Training lifecycle.
    pub fn training(&self) -> TrainingStatus {
        self.training
    }

    /// Current board, including any unconfirmed mark.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose move it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Last message from the service.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Outcome of the last simulated move.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Request awaiting an answer, if any.
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Last failure shown to the user.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Failure policy in force.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a training request would be accepted now.
    pub fn can_train(&self) -> bool {
        !self.is_busy()
            && matches!(
                self.training,
                TrainingStatus::NotStarted | TrainingStatus::Failed
            )
    }

    /// Whether selecting `pos` would be accepted now.
    pub fn can_select(&self, pos: Position) -> bool {
        self.training == TrainingStatus::Completed
            && self.turn == Turn::PlayerTurn
            && !self.is_busy()
            && self.board.is_empty(pos)
    }

    /// Whether a new game may be started now.
    pub fn can_start_new_game(&self) -> bool {
        !self.is_busy()
    }

    fn issue_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn pending_matches(&self, id: RequestId) -> bool {
        self.pending.map(|p| p.id()) == Some(id)
    }

    /// Applies one event and returns the next state plus any request to issue.
    ///
    /// Events that fail their guard leave the state untouched and issue nothing.
    pub fn apply(mut self, event: Event) -> (Self, Option<Command>) {
        match event {
            Event::TrainingRequested => {
                if !self.can_train() {
                    debug!(training = %self.training, busy = self.is_busy(), "Ignoring training request");
                    return (self, None);
                }
                let id = self.issue_id();
                info!(request = %id, "Training requested");
                self.training = TrainingStatus::InProgress;
                self.pending = Some(Pending::Training(id));
                self.last_error = None;
                (self, Some(Command::StartTraining(id)))
            }

            Event::TrainingSucceeded(id) => {
                if !matches!(self.pending, Some(Pending::Training(p)) if p == id) {
                    warn!(request = %id, "Ignoring stale training response");
                    return (self, None);
                }
                info!(request = %id, "Training completed");
                self.training = TrainingStatus::Completed;
                self.pending = None;
                (self, None)
            }

            Event::TrainingFailed { id, reason } => {
                if !matches!(self.pending, Some(Pending::Training(p)) if p == id) {
                    warn!(request = %id, "Ignoring stale training failure");
                    return (self, None);
                }
                warn!(request = %id, reason = %reason, "Training failed");
                self.training = TrainingStatus::Failed;
                self.pending = None;
                self.last_error = Some(format!("Training failed: {}", reason));
                (self, None)
            }

            Event::CellSelected(pos) => {
                if !self.can_select(pos) {
                    debug!(
                        position = ?pos,
                        training = %self.training,
                        turn = %self.turn,
                        busy = self.is_busy(),
                        "Ignoring cell selection"
                    );
                    return (self, None);
                }
                let id = self.issue_id();
                info!(request = %id, position = pos.label(), "Player moved");
                self.board = self.board.with(pos, Cell::PlayerMark);
                self.turn = Turn::OpponentTurn;
                self.pending = Some(Pending::Simulate { id, position: pos });
                self.last_error = None;
                let board = self.board;
                (self, Some(Command::SimulateMove { id, board }))
            }

            Event::SimulateSucceeded { id, reply } => {
                let Some(Pending::Simulate { position, .. }) =
                    self.pending.filter(|_| self.pending_matches(id))
                else {
                    warn!(request = %id, "Ignoring stale simulate response");
                    return (self, None);
                };
                if reply.board.get(position) != Cell::PlayerMark {
                    warn!(
                        request = %id,
                        position = position.label(),
                        "Service board does not echo the player's mark"
                    );
                }
                info!(request = %id, outcome = ?reply.outcome, "Board confirmed");
                self.board = reply.board;
                self.turn = if reply.outcome.is_terminal() {
                    Turn::GameOver
                } else {
                    Turn::PlayerTurn
                };
                self.message = Some(reply.message);
                self.outcome = Some(reply.outcome);
                self.pending = None;
                self.last_error = None;
                (self, None)
            }

            Event::SimulateFailed { id, reason } => {
                let Some(Pending::Simulate { position, .. }) =
                    self.pending.filter(|_| self.pending_matches(id))
                else {
                    warn!(request = %id, "Ignoring stale simulate failure");
                    return (self, None);
                };
                warn!(request = %id, reason = %reason, policy = ?self.policy, "Move failed");
                if self.policy == FailurePolicy::Rollback {
                    self.board = self.board.with(position, Cell::Empty);
                }
                self.turn = Turn::PlayerTurn;
                self.pending = None;
                self.last_error = Some(format!("Move failed: {}", reason));
                (self, None)
            }

            Event::NewGameRequested => {
                if !self.can_start_new_game() {
                    debug!("Ignoring new game while a request is pending");
                    return (self, None);
                }
                info!("Starting a new game");
                self.board = Board::new();
                self.turn = Turn::PlayerTurn;
                self.message = None;
                self.outcome = None;
                self.last_error = None;
                (self, None)
            }
        }
    }
}
