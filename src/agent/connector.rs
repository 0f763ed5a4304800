//! Task connector
//!
//! Opens a client session against a resolved agent card, submits a
//! task-creation request, and normalizes whatever comes back into a
//! displayable string. Transport failures propagate as errors (they become a
//! failed task upstream); response-shape failures degrade to diagnostic
//! strings and never raise.

use crate::agent::response::{extract_response_text, parse_error};
use crate::error::HostResult;
use crate::protocol::{AgentCard, SendMessageRequest, SendMessageResponse};
use std::time::Duration;
use tracing::debug;

const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(300);

/// Connects to one remote agent and delegates tasks to it
#[derive(Debug, Clone)]
pub struct AgentConnector {
    card: AgentCard,
    timeout: Duration,
}

impl AgentConnector {
    /// Bind a connector to a resolved capability card
    pub fn new(card: AgentCard) -> Self {
        Self {
            card,
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Override the scoped-client timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The card this connector is bound to
    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    /// Send a task to the agent and return its normalized text response
    ///
    /// Reuses the caller-supplied client when given; otherwise a scoped
    /// client is created for this call and dropped on every exit path. The
    /// session id scopes tracing and the runtime's conversational memory; the
    /// submission payload itself carries no session reference.
    pub async fn send_task(
        &self,
        message: &str,
        session_id: &str,
        client: Option<&reqwest::Client>,
    ) -> HostResult<String> {
        match client {
            Some(client) => self.send_with_client(client, message, session_id).await,
            None => {
                let scoped = reqwest::Client::builder().timeout(self.timeout).build()?;
                self.send_with_client(&scoped, message, session_id).await
            }
        }
    }

    async fn send_with_client(
        &self,
        client: &reqwest::Client,
        message: &str,
        session_id: &str,
    ) -> HostResult<String> {
        let request = SendMessageRequest::user_text(message);

        debug!(
            agent = %self.card.name,
            url = %self.card.url,
            session_id = %session_id,
            request_id = %request.id,
            "Submitting task"
        );

        let http_response = client
            .post(&self.card.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let response: SendMessageResponse = match http_response.json().await {
            Ok(response) => response,
            Err(e) => return Ok(parse_error(e)),
        };

        Ok(extract_response_text(&response))
    }
}
