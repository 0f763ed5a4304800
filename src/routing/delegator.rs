//! Delegation router
//!
//! Matches a requested agent name against the resolved card list and hands
//! the task to a connector. An unknown name is a normal, displayable outcome,
//! not a failure.

use crate::agent::connector::AgentConnector;
use crate::agent::discovery::AgentDiscovery;
use crate::error::HostResult;
use crate::protocol::AgentCard;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const DEFAULT_DELEGATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Routes messages to discovered agents by name
#[derive(Debug, Clone)]
pub struct DelegationRouter {
    discovery: AgentDiscovery,
    delegation_timeout: Duration,
}

impl DelegationRouter {
    pub fn new(discovery: AgentDiscovery) -> Self {
        Self {
            discovery,
            delegation_timeout: DEFAULT_DELEGATION_TIMEOUT,
        }
    }

    /// Override the per-delegation send timeout
    pub fn with_delegation_timeout(mut self, timeout: Duration) -> Self {
        self.delegation_timeout = timeout;
        self
    }

    /// Resolved cards for every routable agent
    pub async fn list_agents(&self) -> Vec<AgentCard> {
        self.discovery.list_agent_cards().await
    }

    /// Route a message to the named agent and return its response text
    ///
    /// Matching is case-insensitive and exact; registry order is the priority
    /// order, so the first matching card wins when names collide. Every
    /// delegation runs under a freshly generated session id: delegated
    /// sub-tasks stay independent even within the same parent session.
    pub async fn delegate(&self, agent_name: &str, message: &str) -> HostResult<String> {
        let cards = self.discovery.list_agent_cards().await;

        let Some(card) = cards.iter().find(|card| card.matches_name(agent_name)) else {
            info!(agent = %agent_name, "Delegation target not found in resolved registry");
            return Ok(format!("Agent '{agent_name}' not found"));
        };

        let session_id = Uuid::new_v4().to_string();
        debug!(
            agent = %card.name,
            url = %card.url,
            session_id = %session_id,
            "Delegating task"
        );

        AgentConnector::new(card.clone())
            .with_timeout(self.delegation_timeout)
            .send_task(message, &session_id, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AgentRegistry;

    fn router() -> DelegationRouter {
        let discovery = AgentDiscovery::new(
            AgentRegistry::from_urls(Vec::<String>::new()),
            Duration::from_secs(5),
        )
        .unwrap();
        DelegationRouter::new(discovery)
    }

    #[tokio::test]
    async fn test_unknown_agent_is_displayable_outcome() {
        let result = router().delegate("Writer", "hello").await.unwrap();
        assert_eq!(result, "Agent 'Writer' not found");
    }

    #[tokio::test]
    async fn test_empty_registry_lists_no_agents() {
        assert!(router().list_agents().await.is_empty());
    }
}
