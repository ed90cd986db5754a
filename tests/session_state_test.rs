//! Transition-table tests for the session state machine.

mod common;

use common::{board, continuing};
use tictactoe_trainer::{
    Board, Cell, Command, Event, FailurePolicy, GameOutcome, Pending, Position, RequestId,
    SessionState, SimulateReply, TrainingStatus, Turn,
};

fn trained(policy: FailurePolicy) -> SessionState {
    let (state, cmd) = SessionState::with_policy(policy).apply(Event::TrainingRequested);
    let Some(Command::StartTraining(id)) = cmd else {
        panic!("expected a training command");
    };
    state.apply(Event::TrainingSucceeded(id)).0
}

fn select(state: SessionState, pos: Position) -> (SessionState, RequestId, Board) {
    let (state, cmd) = state.apply(Event::CellSelected(pos));
    match cmd {
        Some(Command::SimulateMove { id, board }) => (state, id, board),
        other => panic!("expected a simulate command, got {:?}", other),
    }
}

#[test]
fn selection_before_training_is_a_noop() {
    let state = SessionState::new();
    let (after, cmd) = state.clone().apply(Event::CellSelected(Position::Center));
    assert!(cmd.is_none());
    assert_eq!(after, state);
    assert!(after.board().is_blank());
}

#[test]
fn no_status_but_completed_accepts_selections() {
    let not_started = SessionState::new();
    let (in_progress, _) = SessionState::new().apply(Event::TrainingRequested);
    let (failed, _) = in_progress.clone().apply(Event::TrainingFailed {
        id: RequestId(1),
        reason: "down".into(),
    });

    for state in [not_started, in_progress, failed] {
        for pos in Position::ALL {
            let (after, cmd) = state.clone().apply(Event::CellSelected(pos));
            assert!(cmd.is_none(), "{:?} accepted at {:?}", pos, state.training());
            assert_eq!(after.board(), state.board());
        }
    }
}

#[test]
fn training_walks_through_in_progress_to_completed() {
    let state = SessionState::new();
    assert_eq!(state.training(), TrainingStatus::NotStarted);

    let (state, cmd) = state.apply(Event::TrainingRequested);
    assert_eq!(state.training(), TrainingStatus::InProgress);
    assert_eq!(cmd, Some(Command::StartTraining(RequestId(1))));
    assert!(!state.can_select(Position::TopLeft));

    let (state, cmd) = state.apply(Event::TrainingSucceeded(RequestId(1)));
    assert!(cmd.is_none());
    assert_eq!(state.training(), TrainingStatus::Completed);
    assert!(state.can_select(Position::TopLeft));
}

#[test]
fn second_training_request_while_in_progress_is_ignored() {
    let (state, _) = SessionState::new().apply(Event::TrainingRequested);
    let (after, cmd) = state.clone().apply(Event::TrainingRequested);
    assert!(cmd.is_none());
    assert_eq!(after, state);
}

#[test]
fn optimistic_mark_then_authoritative_board() {
    let (state, id, sent) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    assert_eq!(sent, board("X........"));
    assert_eq!(*state.board(), board("X........"));
    assert_eq!(state.turn(), Turn::OpponentTurn);
    assert_eq!(
        state.pending(),
        Some(Pending::Simulate {
            id,
            position: Position::TopLeft
        })
    );

    let (state, _) = state.apply(Event::SimulateSucceeded {
        id,
        reply: continuing("X...O...."),
    });
    assert_eq!(*state.board(), board("X...O...."));
    assert_eq!(state.turn(), Turn::PlayerTurn);
    assert_eq!(state.message(), Some("O jogo continua"));
    assert!(!state.is_busy());
}

#[test]
fn authoritative_board_replaces_everything() {
    let (state, id, _) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    // Server disagrees with more than the reply move; it still wins.
    let (state, _) = state.apply(Event::SimulateSucceeded {
        id,
        reply: continuing("XO......O"),
    });
    assert_eq!(*state.board(), board("XO......O"));
}

#[test]
fn terminal_message_ends_the_game() {
    let (state, id, _) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    let (state, _) = state.apply(Event::SimulateSucceeded {
        id,
        reply: SimulateReply {
            board: board("XXXOO...."),
            message: "Player wins".into(),
            outcome: GameOutcome::from_message("Player wins", "continua"),
        },
    });
    assert_eq!(state.turn(), Turn::GameOver);

    for pos in Position::ALL {
        let (after, cmd) = state.clone().apply(Event::CellSelected(pos));
        assert!(cmd.is_none());
        assert_eq!(after, state);
    }
}

#[test]
fn occupied_cell_is_never_reselected() {
    let (state, id, _) = select(trained(FailurePolicy::Rollback), Position::Center);
    let (state, _) = state.apply(Event::SimulateSucceeded {
        id,
        reply: continuing("O...X...."),
    });

    for pos in [Position::TopLeft, Position::Center] {
        let (after, cmd) = state.clone().apply(Event::CellSelected(pos));
        assert!(cmd.is_none());
        assert_eq!(after, state);
    }
}

#[test]
fn double_select_while_pending_issues_one_request() {
    let (state, _, _) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    let (after, cmd) = state.clone().apply(Event::CellSelected(Position::BottomRight));
    assert!(cmd.is_none());
    assert_eq!(after, state);
    assert_eq!(after.board().get(Position::BottomRight), Cell::Empty);
}

#[test]
fn failure_rolls_back_optimistic_mark_by_default() {
    let (state, id, _) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    let (state, _) = state.apply(Event::SimulateFailed {
        id,
        reason: "network error: connection refused".into(),
    });
    assert!(state.board().is_blank());
    assert_eq!(state.turn(), Turn::PlayerTurn);
    assert_eq!(state.training(), TrainingStatus::Completed);
    assert!(state.last_error().unwrap().contains("connection refused"));
    assert!(state.can_select(Position::TopLeft));
}

#[test]
fn failure_keeps_optimistic_mark_when_configured() {
    let (state, id, _) = select(trained(FailurePolicy::KeepOptimistic), Position::TopLeft);
    let (state, _) = state.apply(Event::SimulateFailed {
        id,
        reason: "network error".into(),
    });
    assert_eq!(*state.board(), board("X........"));
    assert_eq!(state.training(), TrainingStatus::Completed);
    assert_ne!(state.turn(), Turn::GameOver);
    assert!(state.last_error().is_some());
}

#[test]
fn late_answer_after_failure_is_ignored() {
    let (state, id, _) = select(trained(FailurePolicy::Rollback), Position::TopLeft);
    let (state, _) = state.apply(Event::SimulateFailed {
        id,
        reason: "request timed out".into(),
    });
    let (after, _) = state.clone().apply(Event::SimulateSucceeded {
        id,
        reply: continuing("X...O...."),
    });
    assert_eq!(after, state);
}

#[test]
fn new_game_keeps_the_configured_policy() {
    let state = trained(FailurePolicy::KeepOptimistic);
    assert_eq!(state.policy(), FailurePolicy::KeepOptimistic);

    let (state, id, _) = select(state, Position::TopLeft);
    let (state, _) = state.apply(Event::SimulateFailed {
        id,
        reason: "network error".into(),
    });
    let (state, _) = state.apply(Event::NewGameRequested);
    assert!(state.board().is_blank());
    assert_eq!(state.policy(), FailurePolicy::KeepOptimistic);
    assert_eq!(SessionState::new().policy(), FailurePolicy::Rollback);
}
