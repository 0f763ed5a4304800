//! Wire types for the host task protocol
//!
//! Capability descriptors (agent cards) plus the task submission envelope and
//! lifecycle event types.

pub mod card;
pub mod messages;

pub use card::{AgentCapabilities, AgentCard, AgentSkill};
pub use messages::{
    Message, MessageSendParams, Part, Role, RpcError, SendMessageRequest, SendMessageResponse,
    Task, TaskEvent, TaskResponse, TaskResponseStatus, TaskState, TaskStatus, TaskStatusUpdate,
};
