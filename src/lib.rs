//! Tic-tac-toe trainer client.
//!
//! Triggers training of a remotely hosted model and lets a user play against
//! it once trained. All game and model logic lives on the service; this crate
//! owns only the client-side state machine and its HTTP contract.
//!
//! # Architecture
//!
//! - **Session**: pure state machine plus a controller that runs requests
//! - **Gateway**: `POST /train` and `POST /simulate` over reqwest
//! - **Config**: TOML file, environment and CLI layering
//! - **TUI**: ratatui front end that renders the session
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_trainer::{ClientConfig, Event, HttpGateway, SessionController, SessionState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let gateway = HttpGateway::from_config(&config)?;
//! let mut controller = SessionController::new(
//!     gateway,
//!     SessionState::with_policy(*config.on_simulate_failure()),
//!     config.request_timeout(),
//! );
//!
//! controller.dispatch(Event::TrainingRequested);
//! controller.settle().await;
//! println!("Status: {}", controller.state().training());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
mod gateway;
mod session;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, ConfigOverrides, ENV_LOG_FILE, ENV_SERVER_URL, ENV_TIMEOUT_SECS};

// Crate-level exports - Gateway
pub use gateway::{
    Gateway, GatewayError, GatewayErrorKind, HttpGateway, ServiceStatus, SimulateReply,
    SimulateRequest, SimulateResponse,
};

// Crate-level exports - Session state machine
pub use session::{
    Command, Event, FailurePolicy, Pending, RequestId, SessionController, SessionState,
    TrainingStatus, Turn,
};

// Crate-level exports - Board types
pub use games::tictactoe::{
    Board, BoardLengthError, Cell, DEFAULT_CONTINUATION_MARKER, GameOutcome, Position,
};
