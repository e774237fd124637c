//! The remote move oracle: validates player moves and computes AI replies.

use std::time::Duration;

use derive_more::{Display, Error};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::Board;
use crate::protocol::{MoveReply, MoveReplyBody, MoveRequest, ResetReplyBody};

/// Why a round trip to the oracle did not produce a usable reply.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum OracleError {
    /// The oracle refused the request (e.g. an occupied square).
    #[display("Oracle rejected request: {}", message)]
    Rejected {
        /// Message reported by the oracle.
        message: String,
    },
    /// The request never produced a readable answer.
    #[display("Transport error: {}", message)]
    Transport {
        /// Underlying failure.
        message: String,
    },
    /// No answer arrived within the request timeout.
    #[display("No reply within {:?}", after)]
    Timeout {
        /// The timeout that expired.
        after: Duration,
    },
    /// The answer could not be decoded or contradicts the game so far.
    #[display("Malformed reply: {}", message)]
    Malformed {
        /// What was wrong with it.
        message: String,
    },
}

impl OracleError {
    /// Builds a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Builds a malformed-reply error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Short text suitable for showing to the player.
    ///
    /// Rejections carry the oracle's own wording; everything else collapses
    /// into a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::Timeout { .. } => "The AI took too long to answer. Try again.".to_string(),
            Self::Transport { .. } | Self::Malformed { .. } => {
                "Connection error. Try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Authority that validates moves and plays the AI side.
///
/// Exactly one call is outstanding per session at any time; callers bound
/// each call with their own timeout.
#[async_trait::async_trait]
pub trait MoveOracle: Send + Sync {
    /// Submits a placement (or asks the AI to open) and returns the new board.
    async fn submit(&self, request: &MoveRequest) -> Result<MoveReply, OracleError>;

    /// Asks the oracle for a fresh board.
    async fn reset(&self) -> Result<Board, OracleError>;
}

/// Oracle reached over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOracle {
    /// Creates an oracle client for the server at `base_url`.
    #[instrument(skip_all)]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Creating HTTP oracle client");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts to `path` and returns the status and raw body.
    async fn post(
        &self,
        path: &str,
        body: Option<&MoveRequest>,
    ) -> Result<(StatusCode, String), OracleError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(url = %url, status = %status, body = %text, "Oracle responded");
        Ok((status, text))
    }
}

/// Decodes a response body, preferring the oracle's `error` field over the
/// HTTP status so validation failures (sent as 400) read as rejections.
fn decode_body<T>(
    status: StatusCode,
    text: &str,
    error_of: fn(&T) -> Option<&str>,
) -> Result<T, OracleError>
where
    T: DeserializeOwned,
{
    match serde_json::from_str::<T>(text) {
        Ok(body) => {
            if !status.is_success() && error_of(&body).is_none() {
                return Err(OracleError::transport(format!("HTTP {}", status)));
            }
            Ok(body)
        }
        Err(e) if status.is_success() => Err(OracleError::malformed(e.to_string())),
        Err(_) => Err(OracleError::transport(format!("HTTP {}", status))),
    }
}

#[async_trait::async_trait]
impl MoveOracle for HttpOracle {
    #[instrument(skip(self, request), fields(placement = ?request.placement, player = %request.player))]
    async fn submit(&self, request: &MoveRequest) -> Result<MoveReply, OracleError> {
        info!("Submitting move to oracle");
        let (status, text) = self.post("/api/move", Some(request)).await?;
        let body: MoveReplyBody = decode_body(status, &text, MoveReplyBody::error)?;
        let reply = body.into_reply();
        if let Err(e) = &reply {
            warn!(error = %e, "Oracle did not accept move");
        }
        reply
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<Board, OracleError> {
        info!("Requesting board reset");
        let (status, text) = self.post("/api/reset", None).await?;
        let body: ResetReplyBody = decode_body(status, &text, ResetReplyBody::error)?;
        body.into_board()
    }
}
