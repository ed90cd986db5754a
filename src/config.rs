//! Client configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file, environment variables (`TRAINER_SERVER_URL`,
//! `TRAINER_TIMEOUT_SECS`, `TRAINER_LOG_FILE`) and command-line flags.

use crate::games::tictactoe::DEFAULT_CONTINUATION_MARKER;
use crate::session::FailurePolicy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding the service address.
pub const ENV_SERVER_URL: &str = "TRAINER_SERVER_URL";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TRAINER_TIMEOUT_SECS";
/// Environment variable overriding the TUI log file.
pub const ENV_LOG_FILE: &str = "TRAINER_LOG_FILE";

/// Configuration for the training and play client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the service.
    server_url: String,

    /// Upper bound for any single request.
    request_timeout_secs: u64,

    /// Substring marking a message as "game continues".
    continuation_marker: String,

    /// What to do with the optimistic mark when a move fails.
    on_simulate_failure: FailurePolicy,

    /// Where the TUI writes its log.
    log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            continuation_marker: DEFAULT_CONTINUATION_MARKER.to_string(),
            on_simulate_failure: FailurePolicy::Rollback,
            log_file: PathBuf::from("tictactoe_trainer.log"),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    ///
    /// The result is not validated; later layers may still fix it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Builds the effective configuration from every layer and validates it once.
    ///
    /// Starts from the file if one is given (defaults otherwise), then applies
    /// `lookup` as the environment, then `overrides`.
    #[instrument(skip(lookup, overrides))]
    pub fn resolve(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env(lookup)?.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from an environment lookup.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            debug!(server_url = %url, "Server URL from environment");
            self.server_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                ConfigError::new(format!("{} must be a whole number, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        if let Some(path) = lookup(ENV_LOG_FILE) {
            self.log_file = PathBuf::from(path);
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(url) = &overrides.server_url {
            self = self.with_server_url(url.clone());
        }
        if let Some(secs) = overrides.timeout_secs {
            self = self.with_timeout_secs(secs);
        }
        if let Some(policy) = overrides.on_simulate_failure {
            self = self.with_failure_policy(policy);
        }
        self
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Overrides the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_simulate_failure = policy;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(ConfigError::new("server_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "server_url must start with http:// or https://, got {:?}",
                url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be > 0".to_string()));
        }
        if self.continuation_marker.is_empty() {
            return Err(ConfigError::new("continuation_marker must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Service base URL.
    pub server_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Failure policy for unconfirmed marks.
    pub on_simulate_failure: Option<FailurePolicy>,
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
