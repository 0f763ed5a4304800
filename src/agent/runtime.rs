//! Agent runtime boundary
//!
//! The reasoning engine that actually answers queries lives behind the
//! [`AgentRuntime`] trait; this crate supplies session ids and consumes the
//! invocation stream without knowing anything about models or tool calling.
//! Sessions are created lazily on first use and owned by the runtime side.

use crate::error::HostResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// One item yielded by a runtime invocation
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationEvent {
    /// The runtime is still working; optional progress text
    Progress { update: Option<String> },
    /// The runtime finished; optional final content
    Complete { content: Option<String> },
}

impl InvocationEvent {
    pub fn progress<S: Into<String>>(update: S) -> Self {
        Self::Progress {
            update: Some(update.into()),
        }
    }

    pub fn complete<S: Into<String>>(content: S) -> Self {
        Self::Complete {
            content: Some(content.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

/// Stream of invocation items; an `Err` item means the invocation raised
pub type InvocationStream = mpsc::Receiver<HostResult<InvocationEvent>>;

/// External reasoning engine the host drives
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run a query within a session and stream progress/completion items
    async fn invoke(&self, query: &str, session_id: &str) -> HostResult<InvocationStream>;
}

/// Conversational session known to the runtime
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe store of sessions, created lazily on first use
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an existing session
    pub fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned()
    }

    /// Look up a session, creating it on first contact
    pub fn get_or_create(&self, session_id: &str) -> Session {
        if let Some(session) = self.get(session_id) {
            return session;
        }

        let session = Session {
            id: session_id.to_string(),
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().unwrap();
        sessions
            .entry(session_id.to_string())
            .or_insert(session)
            .clone()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().unwrap();
        sessions.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        let sessions = self.sessions.read().unwrap();
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
