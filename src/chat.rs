//! Single-shot chat client.
//!
//! Each message is one `POST /chat` round trip. There is no retry; any
//! failure is answered locally with [`CONNECTION_FALLBACK`].

use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Reply shown when the chat server cannot be reached or answers garbage.
pub const CONNECTION_FALLBACK: &str = "Sorry, connection error. Please try again.";

/// Most transcript lines kept; older ones are dropped first.
pub const TRANSCRIPT_LIMIT: usize = 200;

/// Who wrote a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Speaker {
    /// The person at the keyboard.
    #[display("you")]
    User,
    /// The chat server.
    #[display("bot")]
    Bot,
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author.
    pub speaker: Speaker,
    /// Text.
    pub text: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

/// Client for the chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    transcript: Vec<ChatMessage>,
}

impl ChatClient {
    /// Creates a chat client for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Creating chat client");
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout,
            transcript: Vec::new(),
        }
    }

    /// The most recent [`TRANSCRIPT_LIMIT`] messages, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Forgets the transcript.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Sends `message` and returns the reply to show.
    ///
    /// Blank input is not sent and yields `None`. Taking `&mut self` keeps
    /// at most one message in flight.
    #[instrument(skip(self, message), fields(len = message.len()))]
    pub async fn send(&mut self, message: &str) -> Option<String> {
        let message = message.trim();
        if message.is_empty() {
            debug!("Blank message, not sending");
            return None;
        }
        self.record(Speaker::User, message.to_string());

        let reply = match self.exchange(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                CONNECTION_FALLBACK.to_string()
            }
        };
        self.record(Speaker::Bot, reply.clone());
        Some(reply)
    }

    fn record(&mut self, speaker: Speaker, text: String) {
        self.transcript.push(ChatMessage { speaker, text });
        if self.transcript.len() > TRANSCRIPT_LIMIT {
            let excess = self.transcript.len() - TRANSCRIPT_LIMIT;
            self.transcript.drain(..excess);
        }
    }

    /// Server error bodies still carry a `response`, so the status is not
    /// consulted.
    async fn exchange(&self, message: &str) -> Result<String, reqwest::Error> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&ChatRequest { message })
            .send()
            .await?;
        let status = response.status();
        let body: ChatResponse = response.json().await?;
        debug!(%status, "Chat reply received");
        Ok(body.response)
    }
}
