//! HTTP gateway backed by reqwest.

use super::{
    Gateway, GatewayError, GatewayErrorKind, ServiceStatus, SimulateReply, SimulateRequest,
    SimulateResponse,
};
use crate::config::ClientConfig;
use crate::games::tictactoe::{Board, GameOutcome};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Talks to the service over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
    continuation_marker: String,
}

impl HttpGateway {
    /// Creates a gateway for `base_url` with a per-request timeout.
    #[instrument(skip_all, fields(base_url = %base_url, timeout_ms = timeout.as_millis() as u64))]
    pub fn new(
        base_url: String,
        timeout: Duration,
        continuation_marker: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!("HTTP gateway ready");
        Ok(Self {
            base_url,
            client,
            continuation_marker: continuation_marker.into(),
        })
    }

    /// Creates a gateway from client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.server_url().clone(),
            config.request_timeout(),
            config.continuation_marker().clone(),
        )
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Builds a status error, pulling the service's message out of the body if present.
    #[track_caller]
    fn status_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
        let message = serde_json::from_str::<ServiceStatus>(body)
            .ok()
            .and_then(|s| s.message)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });
        GatewayError::new(GatewayErrorKind::Status {
            code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn start_training(&self) -> Result<(), GatewayError> {
        info!("Requesting model training");

        let response = self.client.post(self.url("train")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Got training response");

        if !status.is_success() {
            warn!(status = %status, "Training request rejected");
            return Err(Self::status_error(status, &body));
        }

        if let Ok(ServiceStatus {
            message: Some(message),
            ..
        }) = serde_json::from_str::<ServiceStatus>(&body)
        {
            info!(message = %message, "Training accepted");
        }
        Ok(())
    }

    #[instrument(skip(self, board), fields(base_url = %self.base_url))]
    async fn simulate_move(&self, board: &Board) -> Result<SimulateReply, GatewayError> {
        debug!(board = %board.display(), "Sending board for simulation");

        let response = self
            .client
            .post(self.url("simulate"))
            .json(&SimulateRequest { board: *board })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Got simulate response");

        if !status.is_success() {
            warn!(status = %status, "Simulate request rejected");
            return Err(Self::status_error(status, &body));
        }

        let parsed: SimulateResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %body, "Simulate response failed validation");
            GatewayError::from(e)
        })?;

        let outcome = parsed.outcome.unwrap_or_else(|| {
            GameOutcome::from_message(&parsed.message, &self.continuation_marker)
        });
        info!(outcome = ?outcome, message = %parsed.message, "Move simulated");

        Ok(SimulateReply {
            board: parsed.board,
            message: parsed.message,
            outcome,
        })
    }
}
