//! Static registries loaded at startup
//!
//! Two registries with deliberately different failure policies: the agent
//! registry degrades to empty (discovery is best-effort), the tool registry
//! fails loudly (tool availability is load-bearing).

pub mod agents;
pub mod tools;

pub use agents::{parse_agent_registry, AgentRegistry};
pub use tools::{parse_tool_registry, ToolRegistry, ToolServerSpec, ToolTransport};
