use std::time::Duration;

use protocol::MotorCommand;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a single command poll.
///
/// Every variant is non-fatal: the control loop logs it, keeps the
/// motor's previous state and retries on the next cycle.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed command payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Pull-style client for the vision host's command endpoint.
///
/// The per-request timeout bounds every poll; polling itself runs off
/// the stepping loop so a slow link never stalls pulse timing.
#[derive(Clone)]
pub struct CommandClient {
    http: reqwest::Client,
    url: String,
}

impl CommandClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    /// Fetch the latest motor command. The request carries no body; the
    /// most recent successful response wins.
    pub async fn poll(&self) -> Result<MotorCommand, PollError> {
        let resp = self.http.post(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(PollError::Status(resp.status()));
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
