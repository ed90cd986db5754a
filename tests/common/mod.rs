//! Scripted gateway shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tictactoe_trainer::{
    Board, Cell, GameOutcome, Gateway, GatewayError, GatewayErrorKind, SimulateReply,
};

/// Gateway that replays canned answers and records what it was asked.
#[derive(Default)]
pub struct ScriptedGateway {
    training: Mutex<VecDeque<Result<(), GatewayError>>>,
    simulate: Mutex<VecDeque<Result<SimulateReply, GatewayError>>>,
    delay: Option<Duration>,
    panics: bool,
    pub training_calls: Mutex<usize>,
    pub simulate_calls: Mutex<Vec<Board>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call panics instead of answering.
    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    pub fn train_ok(self) -> Self {
        self.training.lock().unwrap().push_back(Ok(()));
        self
    }

    pub fn train_err(self, kind: GatewayErrorKind) -> Self {
        self.training
            .lock()
            .unwrap()
            .push_back(Err(GatewayError::new(kind)));
        self
    }

    pub fn simulate_ok(self, reply: SimulateReply) -> Self {
        self.simulate.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn simulate_err(self, kind: GatewayErrorKind) -> Self {
        self.simulate
            .lock()
            .unwrap()
            .push_back(Err(GatewayError::new(kind)));
        self
    }

    pub fn training_calls(&self) -> usize {
        *self.training_calls.lock().unwrap()
    }

    pub fn simulate_calls(&self) -> Vec<Board> {
        self.simulate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn start_training(&self) -> Result<(), GatewayError> {
        *self.training_calls.lock().unwrap() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics {
            panic!("scripted training panic");
        }
        let next = self.training.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(GatewayError::new(GatewayErrorKind::Network("no script".into()))))
    }

    async fn simulate_move(&self, board: &Board) -> Result<SimulateReply, GatewayError> {
        self.simulate_calls.lock().unwrap().push(*board);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics {
            panic!("scripted simulate panic");
        }
        let next = self.simulate.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(GatewayError::new(GatewayErrorKind::Network("no script".into()))))
    }
}

/// Builds a board from a 9-character pattern of `X`, `O` and `.`.
pub fn board(pattern: &str) -> Board {
    let mut cells = [Cell::Empty; 9];
    for (cell, ch) in cells.iter_mut().zip(pattern.chars()) {
        *cell = match ch {
            'X' => Cell::PlayerMark,
            'O' => Cell::OpponentMark,
            _ => Cell::Empty,
        };
    }
    Board::from_cells(cells)
}

/// Reply that keeps the game going.
pub fn continuing(pattern: &str) -> SimulateReply {
    SimulateReply {
        board: board(pattern),
        message: "O jogo continua".into(),
        outcome: GameOutcome::Continue,
    }
}
