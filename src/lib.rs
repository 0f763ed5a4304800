//! agenthost - Host-side coordinator for A2A agents
//!
//! A host coordinator that discovers remote task-execution agents, routes
//! user requests to them by name, and streams task lifecycle updates back to
//! callers.
//!
//! # Overview
//!
//! This crate provides the discovery, connection, and task-delegation core of
//! a multi-agent host:
//! - Registry loading for agent endpoints and tool server launch specs
//! - Capability-card resolution over each endpoint's well-known metadata path
//! - A task connector with defensive response normalization
//! - Name-based delegation routing with first-match-wins semantics
//! - A task lifecycle driver emitting ordered status updates
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agenthost::agent::{HostAgent, HostExecutor, RequestContext};
//! use agenthost::config::HostConfig;
//! use agenthost::testing::mocks::MockRuntime;
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> agenthost::error::HostResult<()> {
//! let config = HostConfig::default();
//! let runtime = Arc::new(MockRuntime::single_response("hello from the runtime"));
//!
//! // Two-phase lifecycle: construct, then initialize, then invoke.
//! let mut host = HostAgent::new(config, runtime)?;
//! host.initialize().await?;
//!
//! // Discovery and delegation are also available directly:
//! let cards = host.list_agents().await;
//! println!("routable agents: {}", cards.len());
//!
//! // Drive a task through the lifecycle state machine.
//! let executor = HostExecutor::new(Arc::new(host));
//! let (events, mut updates) = mpsc::channel(16);
//! executor
//!     .execute(RequestContext::new("build a page", "session-1"), events)
//!     .await?;
//! while let Some(event) = updates.recv().await {
//!     println!("{:?} {:?}", event.state(), event.message_text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod registry;
pub mod routing;
pub mod testing;

pub use agent::{
    AgentConnector, AgentDiscovery, HostAgent, HostExecutor, RequestContext, SessionStore,
    TaskUpdater,
};
pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use protocol::*;
pub use registry::{AgentRegistry, ToolRegistry, ToolTransport};
pub use routing::DelegationRouter;
