//! Mock implementations for testing
//!
//! Provides a scriptable AgentRuntime and card fixtures so lifecycle and
//! routing behavior can be tested without remote agents.

use crate::agent::runtime::{AgentRuntime, InvocationEvent, InvocationStream, SessionStore};
use crate::error::{HostError, HostResult};
use crate::protocol::AgentCard;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// One scripted item of a mock invocation
///
/// `Fail` becomes an `Err` stream item at send time; errors are scripted by
/// message because `HostError` itself is not clonable.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedEvent {
    Progress(Option<String>),
    Complete(Option<String>),
    Fail(String),
}

/// Mock runtime that replays a scripted invocation stream
#[derive(Default)]
pub struct MockRuntime {
    script: Vec<ScriptedEvent>,
    invoke_error: Option<String>,
    pub invocations: Arc<Mutex<Vec<(String, String)>>>,
    pub sessions: SessionStore,
}

impl MockRuntime {
    pub fn new(script: Vec<ScriptedEvent>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    /// Script a single completion carrying the given text
    pub fn single_response<S: Into<String>>(text: S) -> Self {
        Self::new(vec![ScriptedEvent::Complete(Some(text.into()))])
    }

    /// Script `working` progress items followed by a completion
    pub fn working_then_complete<S: Into<String>>(progress_items: usize, text: S) -> Self {
        let mut script: Vec<ScriptedEvent> = (0..progress_items)
            .map(|i| ScriptedEvent::Progress(Some(format!("step {}", i + 1))))
            .collect();
        script.push(ScriptedEvent::Complete(Some(text.into())));
        Self::new(script)
    }

    /// Script progress items followed by a raised invocation error
    pub fn failing_after<S: Into<String>>(progress_items: usize, error: S) -> Self {
        let mut script: Vec<ScriptedEvent> = (0..progress_items)
            .map(|i| ScriptedEvent::Progress(Some(format!("step {}", i + 1))))
            .collect();
        script.push(ScriptedEvent::Fail(error.into()));
        Self::new(script)
    }

    /// Script a runtime whose invoke call itself fails
    pub fn failing_invoke<S: Into<String>>(error: S) -> Self {
        Self {
            invoke_error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Recorded (query, session_id) pairs, in invocation order
    pub async fn get_invocations(&self) -> Vec<(String, String)> {
        self.invocations.lock().await.clone()
    }
}

#[async_trait]
impl AgentRuntime for MockRuntime {
    async fn invoke(&self, query: &str, session_id: &str) -> HostResult<InvocationStream> {
        self.invocations
            .lock()
            .await
            .push((query.to_string(), session_id.to_string()));

        if let Some(message) = &self.invoke_error {
            return Err(HostError::invocation(message.clone()));
        }

        self.sessions.get_or_create(session_id);

        let (tx, rx) = mpsc::channel(self.script.len().max(1));
        let script = self.script.clone();

        tokio::spawn(async move {
            for item in script {
                let item = match item {
                    ScriptedEvent::Progress(update) => Ok(InvocationEvent::Progress { update }),
                    ScriptedEvent::Complete(content) => Ok(InvocationEvent::Complete { content }),
                    ScriptedEvent::Fail(message) => Err(HostError::invocation(message)),
                };
                if tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}

/// Build a minimal routable card for tests
pub fn test_card(name: &str, url: &str) -> AgentCard {
    serde_json::from_value(card_json(name, url)).expect("test card should deserialize")
}

/// JSON body of a minimal card, as served from the well-known path
pub fn card_json(name: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} test agent"),
        "url": url,
        "version": "1.0.0",
        "capabilities": {"streaming": false, "pushNotifications": false},
        "defaultInputModes": ["text"],
        "defaultOutputModes": ["text"],
        "skills": []
    })
}
