//! Session controller: training status, board reconciliation and turn gating.
//!
//! [`SessionState::apply`] is a pure transition function from
//! `(state, event)` to `(state, command)`. [`SessionController`] wraps it with
//! the async plumbing that turns commands into gateway calls and feeds their
//! outcomes back in as events.

mod controller;
mod state;

pub use controller::SessionController;
pub use state::{
    Command, Event, FailurePolicy, Pending, RequestId, SessionState, TrainingStatus, Turn,
};
