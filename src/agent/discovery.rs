//! Agent discovery
//!
//! Resolves capability cards for every registered endpoint by querying the
//! well-known metadata path under each base URL. Each discovery pass is a
//! fresh best-effort snapshot: per-endpoint failures are logged and skipped,
//! never propagated, and survivors keep registry order.

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::protocol::AgentCard;
use crate::registry::AgentRegistry;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Well-known metadata path serving an agent's capability card
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// Discovers remote agents by fetching their capability cards
#[derive(Debug, Clone)]
pub struct AgentDiscovery {
    registry: AgentRegistry,
    client: reqwest::Client,
}

impl AgentDiscovery {
    /// Create a resolver over a registry with a fetch timeout
    ///
    /// The timeout should be generous; registered agents are LLM-backed
    /// services and can be slow even for metadata.
    pub fn new(registry: AgentRegistry, timeout: Duration) -> HostResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { registry, client })
    }

    /// Create a resolver from host configuration, loading the agent registry
    pub fn from_config(config: &HostConfig) -> HostResult<Self> {
        let registry = AgentRegistry::load(Path::new(&config.registry.agents_file));
        Self::new(
            registry,
            Duration::from_secs(config.http.discovery_timeout_secs),
        )
    }

    /// The registry backing this resolver
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Fetch the capability card of every registered endpoint
    ///
    /// One bad endpoint never fails the pass: fetch failures are logged and
    /// that endpoint is simply absent from the result. The returned cards
    /// follow registry order.
    pub async fn list_agent_cards(&self) -> Vec<AgentCard> {
        let mut cards = Vec::with_capacity(self.registry.len());

        for base_url in self.registry.base_urls() {
            match self.fetch_card(base_url).await {
                Ok(card) => {
                    debug!(agent = %card.name, url = %base_url, "Resolved agent card");
                    cards.push(card);
                }
                Err(e) => {
                    warn!(url = %base_url, error = %e, "Failed to fetch agent card");
                }
            }
        }

        cards
    }

    /// Fetch a single endpoint's card from its well-known path
    pub async fn fetch_card(&self, base_url: &str) -> HostResult<AgentCard> {
        let base = Url::parse(base_url)
            .map_err(|e| HostError::discovery(format!("invalid base URL '{base_url}': {e}")))?;
        let card_url = base
            .join(AGENT_CARD_PATH)
            .map_err(|e| HostError::discovery(format!("invalid card URL for '{base_url}': {e}")))?;

        let card = self
            .client
            .get(card_url)
            .send()
            .await?
            .error_for_status()?
            .json::<AgentCard>()
            .await?;

        Ok(card)
    }
}
