//! Host agent facade
//!
//! Ties discovery, routing, the tool registry, and the runtime collaborator
//! together behind an explicit two-phase lifecycle: `new` builds routing and
//! discovery state with no first-use side effects, `initialize` performs the
//! fallible startup work (tool registry load is fatal here), and only then
//! may `invoke` run queries.

use crate::agent::discovery::AgentDiscovery;
use crate::agent::runtime::{AgentRuntime, InvocationStream, SessionStore};
use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::protocol::AgentCard;
use crate::registry::ToolRegistry;
use crate::routing::DelegationRouter;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Instructions used when the configured instructions file is absent
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are a host agent. Discover remote agents, delegate user requests to the \
     best-matching agent by name, and relay their answers.";

/// Orchestrating host agent
pub struct HostAgent {
    config: HostConfig,
    runtime: Arc<dyn AgentRuntime>,
    discovery: AgentDiscovery,
    router: DelegationRouter,
    sessions: SessionStore,
    instructions: String,
    tools: Option<ToolRegistry>,
    initialized: bool,
}

impl HostAgent {
    /// Construct routing and discovery state
    ///
    /// Reads the agent registry file (non-fatal, may be empty) and builds the
    /// HTTP clients, but performs no capability fetches and opens no
    /// sessions.
    pub fn new(config: HostConfig, runtime: Arc<dyn AgentRuntime>) -> HostResult<Self> {
        let discovery = AgentDiscovery::from_config(&config)?;
        let router = DelegationRouter::new(discovery.clone())
            .with_delegation_timeout(Duration::from_secs(config.http.delegation_timeout_secs));

        Ok(Self {
            config,
            runtime,
            discovery,
            router,
            sessions: SessionStore::new(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            tools: None,
            initialized: false,
        })
    }

    /// Perform fallible startup work
    ///
    /// Loads the tool server registry (a bad tool registry aborts startup)
    /// and the host instructions. Idempotent: repeated calls are no-ops.
    pub async fn initialize(&mut self) -> HostResult<()> {
        if self.initialized {
            return Ok(());
        }

        info!(host = %self.config.host.id, "Initializing host agent");

        let tools = ToolRegistry::load(Path::new(&self.config.registry.tools_file))?;
        info!(servers = tools.len(), "Loaded tool server registry");

        self.instructions = self.config.load_instructions(DEFAULT_INSTRUCTIONS);

        self.tools = Some(tools);
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tool server registry; present after initialization
    pub fn tool_registry(&self) -> Option<&ToolRegistry> {
        self.tools.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn discovery(&self) -> &AgentDiscovery {
        &self.discovery
    }

    /// Resolved cards for every routable agent (tool surface)
    pub async fn list_agents(&self) -> Vec<AgentCard> {
        self.router.list_agents().await
    }

    /// Delegate a message to a named agent (tool surface)
    pub async fn delegate(&self, agent_name: &str, message: &str) -> HostResult<String> {
        self.router.delegate(agent_name, message).await
    }

    /// Run a query through the runtime within a session
    ///
    /// The session is created lazily on first contact with its id; the
    /// runtime owns the conversational memory behind it.
    pub async fn invoke(&self, query: &str, session_id: &str) -> HostResult<InvocationStream> {
        if !self.initialized {
            return Err(HostError::internal(
                "host agent not initialized; call initialize() first",
            ));
        }

        let session = self.sessions.get_or_create(session_id);
        debug!(session_id = %session.id, "Invoking host runtime");

        self.runtime.invoke(query, session_id).await
    }
}

#[async_trait]
impl AgentRuntime for HostAgent {
    async fn invoke(&self, query: &str, session_id: &str) -> HostResult<InvocationStream> {
        HostAgent::invoke(self, query, session_id).await
    }
}
