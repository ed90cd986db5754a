//! Drives the session state machine against a gateway.

use super::state::{Command, Event, SessionState};
use crate::gateway::{Gateway, GatewayError, GatewayErrorKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};

/// Owns the session state and turns commands into gateway calls.
///
/// State only changes inside [`dispatch`](Self::dispatch) and the completion
/// handlers, all on the caller's task. Requests run on spawned tasks and report
/// back over a channel as [`Event`]s.
pub struct SessionController<G> {
    state: SessionState,
    gateway: Arc<G>,
    request_timeout: Duration,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
}

impl<G: Gateway + 'static> SessionController<G> {
    /// Creates a controller with a fresh session.
    pub fn new(gateway: G, state: SessionState, request_timeout: Duration) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state,
            gateway: Arc::new(gateway),
            request_timeout,
            completions_tx,
            completions_rx,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The gateway requests go through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Applies an event and starts whatever request it calls for.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let (next, command) = state.apply(event);
        self.state = next;
        if let Some(command) = command {
            self.spawn(command);
        }
    }

    /// Applies every completion that has already arrived. Never waits.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.completions_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `false` if nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if !self.state.is_busy() {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Waits until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn spawn(&self, command: Command) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.completions_tx.clone();
        let limit = self.request_timeout;

        debug!(?command, "Issuing request");
        tokio::spawn(async move {
            let fallback = command.clone();
            // The request runs on its own task so a panic still produces a completion.
            let event = match tokio::spawn(run_request(gateway, command, limit)).await {
                Ok(event) => event,
                Err(e) => {
                    error!(error = %e, "Request task died");
                    failure_event(&fallback, format!("request aborted: {}", e))
                }
            };
            if tx.send(event).is_err() {
                warn!("Session closed before request finished");
            }
        });
    }
}

async fn run_request<G: Gateway>(gateway: Arc<G>, command: Command, limit: Duration) -> Event {
    match command {
        Command::StartTraining(id) => match bounded(limit, gateway.start_training()).await {
            Ok(()) => Event::TrainingSucceeded(id),
            Err(e) => Event::TrainingFailed {
                id,
                reason: e.summary(),
            },
        },
        Command::SimulateMove { id, board } => {
            match bounded(limit, gateway.simulate_move(&board)).await {
                Ok(reply) => Event::SimulateSucceeded { id, reply },
                Err(e) => Event::SimulateFailed {
                    id,
                    reason: e.summary(),
                },
            }
        }
    }
}

fn failure_event(command: &Command, reason: String) -> Event {
    match command {
        Command::StartTraining(id) => Event::TrainingFailed { id: *id, reason },
        Command::SimulateMove { id, .. } => Event::SimulateFailed { id: *id, reason },
    }
}

async fn bounded<T>(
    limit: Duration,
    request: impl std::future::Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    match timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Request timed out");
            Err(GatewayError::new(GatewayErrorKind::Timeout))
        }
    }
}
