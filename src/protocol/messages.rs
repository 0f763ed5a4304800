//! Task protocol message types
//!
//! Wire types for task submission (JSON-RPC request/response against a remote
//! agent) and the caller-facing task lifecycle events. The request side is
//! strict; the response side is deliberately lenient because remote agents
//! populate different subsets of the task structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message author role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One content part of a message
///
/// Submission payloads carry bare `{"text": ...}` parts; remote history
/// entries tag theirs with `"kind": "text"`. Both shapes parse into this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    /// A tagged text part, as used in lifecycle update messages
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }

    /// An untagged text part, as carried in submission payloads
    pub fn bare_text<S: Into<String>>(text: S) -> Self {
        Self {
            kind: None,
            text: Some(text.into()),
        }
    }

    /// Text content regardless of the part tag
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Non-empty text of an explicitly text-tagged part
    pub fn tagged_text(&self) -> Option<&str> {
        match (self.kind.as_deref(), self.text.as_deref()) {
            (Some("text"), Some(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// A protocol message: author role plus ordered content parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Message {
    /// Build a user message with a fresh message id and one text part
    pub fn user_text<S: Into<String>>(text: S) -> Self {
        Self {
            message_id: Some(Uuid::new_v4().to_string()),
            role: Some(Role::User),
            parts: vec![Part::bare_text(text)],
        }
    }

    /// Build an agent message with a fresh message id and one text part
    pub fn agent_text<S: Into<String>>(text: S) -> Self {
        Self {
            message_id: Some(Uuid::new_v4().to_string()),
            role: Some(Role::Agent),
            parts: vec![Part::text(text)],
        }
    }
}

/// Task lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Submitted,
    Working,
    Completed,
    Failed,
    Canceled,
}

impl TaskState {
    /// Terminal states end the task's event stream
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Canceled
        )
    }
}

/// Status of a task owned by the lifecycle driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    pub timestamp: DateTime<Utc>,
}

impl TaskStatus {
    pub fn new(state: TaskState, message: Option<Message>) -> Self {
        Self {
            state,
            message,
            timestamp: Utc::now(),
        }
    }
}

/// A unit of delegated work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Session/conversation correlation key
    pub context_id: String,
    pub status: TaskStatus,
}

impl Task {
    /// Create a fresh task in the `submitted` state for a context
    pub fn submitted<S: Into<String>>(context_id: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            context_id: context_id.into(),
            status: TaskStatus::new(TaskState::Submitted, None),
        }
    }
}

/// JSON-RPC request envelope for task submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: MessageSendParams,
}

/// Parameters of a task-submission request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageSendParams {
    pub message: Message,
}

impl SendMessageRequest {
    /// Build a submission request with fresh request and message ids
    pub fn user_text<S: Into<String>>(text: S) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Uuid::new_v4().to_string(),
            method: "message/send".to_string(),
            params: MessageSendParams {
                message: Message::user_text(text),
            },
        }
    }
}

/// JSON-RPC response envelope from a remote agent
///
/// Every field is optional: the normalization layer decides what a usable
/// response looks like, the deserializer only has to not reject it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// Task structure as returned by a remote agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskResponseStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,
}

/// Status block of a remote task response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// JSON-RPC error member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Status update emitted on the task event stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdate {
    pub task_id: String,
    pub context_id: String,
    pub status: TaskStatus,
    /// True for the single terminal update of a task
    #[serde(rename = "final")]
    pub is_final: bool,
}

/// Caller-visible task lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TaskEvent {
    /// A new task was created and entered the `submitted` state
    Task(Task),
    /// The task's status changed
    StatusUpdate(TaskStatusUpdate),
}

impl TaskEvent {
    /// The state carried by this event
    pub fn state(&self) -> TaskState {
        match self {
            TaskEvent::Task(task) => task.status.state,
            TaskEvent::StatusUpdate(update) => update.status.state,
        }
    }

    /// Text of the status message, if any
    pub fn message_text(&self) -> Option<&str> {
        let message = match self {
            TaskEvent::Task(task) => task.status.message.as_ref()?,
            TaskEvent::StatusUpdate(update) => update.status.message.as_ref()?,
        };
        message.parts.iter().find_map(|p| p.text_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_request_wire_shape() {
        let request = SendMessageRequest::user_text("build a page");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "message/send");
        assert_eq!(value["params"]["message"]["role"], "user");
        // Submission parts are bare text, no kind tag
        assert_eq!(
            value["params"]["message"]["parts"][0],
            json!({"text": "build a page"})
        );
        assert!(value["params"]["message"]["messageId"].is_string());
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_fresh_ids_per_request() {
        let a = SendMessageRequest::user_text("x");
        let b = SendMessageRequest::user_text("x");

        assert_ne!(a.id, b.id);
        assert_ne!(a.params.message.message_id, b.params.message.message_id);
    }

    #[test]
    fn test_response_with_status_and_history_parses() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": "1",
            "result": {
                "id": "task-1",
                "contextId": "ctx-1",
                "status": {"state": "completed", "message": {"parts": [{"text": "done"}]}},
                "history": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "agent", "parts": [{"kind": "text", "text": "working"}]}
                ]
            }
        }"#;

        let response: SendMessageResponse = serde_json::from_str(body).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.context_id.as_deref(), Some("ctx-1"));
        assert_eq!(
            result.status.unwrap().state,
            Some(TaskState::Completed)
        );
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.history[1].role, Some(Role::Agent));
    }

    #[test]
    fn test_response_missing_result_parses() {
        let response: SendMessageResponse =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "id": 7}"#).unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_tagged_text_requires_kind_and_content() {
        assert_eq!(Part::text("hello").tagged_text(), Some("hello"));
        assert_eq!(Part::bare_text("hello").tagged_text(), None);
        assert_eq!(Part::text("").tagged_text(), None);
        assert_eq!(
            Part {
                kind: Some("file".to_string()),
                text: Some("hello".to_string())
            }
            .tagged_text(),
            None
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Submitted.is_terminal());
        assert!(!TaskState::Working.is_terminal());
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
        assert!(TaskState::Canceled.is_terminal());
    }

    #[test]
    fn test_task_state_wire_names() {
        assert_eq!(
            serde_json::to_value(TaskState::Submitted).unwrap(),
            json!("submitted")
        );
        assert_eq!(
            serde_json::to_value(TaskState::Working).unwrap(),
            json!("working")
        );
    }

    #[test]
    fn test_status_update_final_rename() {
        let update = TaskStatusUpdate {
            task_id: "t".to_string(),
            context_id: "c".to_string(),
            status: TaskStatus::new(TaskState::Completed, Some(Message::agent_text("done"))),
            is_final: true,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["final"], true);
        assert_eq!(value["status"]["state"], "completed");
    }

    #[test]
    fn test_event_accessors() {
        let task = Task::submitted("ctx-9");
        let event = TaskEvent::Task(task.clone());
        assert_eq!(event.state(), TaskState::Submitted);
        assert_eq!(event.message_text(), None);

        let update = TaskEvent::StatusUpdate(TaskStatusUpdate {
            task_id: task.id,
            context_id: task.context_id,
            status: TaskStatus::new(TaskState::Working, Some(Message::agent_text("thinking"))),
            is_final: false,
        });
        assert_eq!(update.state(), TaskState::Working);
        assert_eq!(update.message_text(), Some("thinking"));
    }
}
