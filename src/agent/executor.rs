//! Task lifecycle driver
//!
//! Wraps a runtime invocation stream in the per-task state machine
//! (`submitted → working → completed/failed`) and emits ordered status
//! updates on the caller's event channel. The driver exclusively owns state
//! transitions: exactly one terminal update is emitted per task, and
//! cancellation is rejected outright.

use crate::agent::runtime::{AgentRuntime, InvocationEvent};
use crate::error::{HostError, HostResult};
use crate::protocol::{Message, Task, TaskEvent, TaskState, TaskStatus, TaskStatusUpdate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error};

/// Progress text used when the runtime yields none
pub const DEFAULT_WORKING_MESSAGE: &str = "The agent is still working on your request...";

/// Completion text used when the runtime yields empty content
pub const NO_RESULT_MESSAGE: &str = "No result received";

const DEFAULT_COMPLETION_GRACE: Duration = Duration::from_millis(100);

/// Incoming request as seen by the driver
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// User query text
    pub query: String,
    /// Session/conversation correlation key
    pub context_id: String,
    /// Existing task for this context, if any
    pub current_task: Option<Task>,
}

impl RequestContext {
    pub fn new<Q: Into<String>, C: Into<String>>(query: Q, context_id: C) -> Self {
        Self {
            query: query.into(),
            context_id: context_id.into(),
            current_task: None,
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.current_task = Some(task);
        self
    }
}

/// Emits status updates for one task onto the event channel
#[derive(Debug, Clone)]
pub struct TaskUpdater {
    events: mpsc::Sender<TaskEvent>,
    task_id: String,
    context_id: String,
}

impl TaskUpdater {
    pub fn new<T: Into<String>, C: Into<String>>(
        events: mpsc::Sender<TaskEvent>,
        task_id: T,
        context_id: C,
    ) -> Self {
        Self {
            events,
            task_id: task_id.into(),
            context_id: context_id.into(),
        }
    }

    /// Emit a status update carrying an agent text message
    ///
    /// The update is flagged final when the state is terminal.
    pub async fn update_status<S: Into<String>>(
        &self,
        state: TaskState,
        text: S,
    ) -> HostResult<()> {
        let update = TaskStatusUpdate {
            task_id: self.task_id.clone(),
            context_id: self.context_id.clone(),
            status: TaskStatus::new(state, Some(Message::agent_text(text))),
            is_final: state.is_terminal(),
        };

        self.events
            .send(TaskEvent::StatusUpdate(update))
            .await
            .map_err(|_| HostError::internal("task event channel closed"))
    }
}

/// Drives the task state machine over a runtime invocation
pub struct HostExecutor {
    runtime: Arc<dyn AgentRuntime>,
    completion_grace: Duration,
}

impl HostExecutor {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            runtime,
            completion_grace: DEFAULT_COMPLETION_GRACE,
        }
    }

    /// Override the post-completion grace period
    ///
    /// The grace period lets the event-delivery transport flush the terminal
    /// update before the stream is torn down. Tests shorten it to zero.
    pub fn with_completion_grace(mut self, grace: Duration) -> Self {
        self.completion_grace = grace;
        self
    }

    /// Execute a request, streaming lifecycle events to the caller
    ///
    /// Creates a `submitted` task on first contact for a context, maps each
    /// progress item to a `working` update, the first completion item to a
    /// single `completed` update, and a raised invocation to a `failed`
    /// update followed by re-raising the error.
    pub async fn execute(
        &self,
        context: RequestContext,
        events: mpsc::Sender<TaskEvent>,
    ) -> HostResult<()> {
        let RequestContext {
            query,
            context_id,
            current_task,
        } = context;

        let task = match current_task {
            Some(task) => task,
            None => {
                let task = Task::submitted(context_id);
                events
                    .send(TaskEvent::Task(task.clone()))
                    .await
                    .map_err(|_| HostError::internal("task event channel closed"))?;
                task
            }
        };

        debug!(task_id = %task.id, context_id = %task.context_id, "Executing task");
        let updater = TaskUpdater::new(events, task.id.clone(), task.context_id.clone());

        let mut stream = match self.runtime.invoke(&query, &task.context_id).await {
            Ok(stream) => stream,
            Err(e) => return self.fail(&updater, &task.id, e).await,
        };

        while let Some(item) = stream.recv().await {
            match item {
                Ok(InvocationEvent::Progress { update }) => {
                    let text = update.unwrap_or_else(|| DEFAULT_WORKING_MESSAGE.to_string());
                    updater.update_status(TaskState::Working, text).await?;
                }
                Ok(InvocationEvent::Complete { content }) => {
                    let text = match content {
                        Some(content) if !content.trim().is_empty() => content,
                        _ => NO_RESULT_MESSAGE.to_string(),
                    };
                    updater.update_status(TaskState::Completed, text).await?;
                    debug!(task_id = %task.id, "Task completed");

                    // Grace period so the delivery transport can flush the
                    // terminal update before the stream is torn down.
                    sleep(self.completion_grace).await;
                    break;
                }
                Err(e) => return self.fail(&updater, &task.id, e).await,
            }
        }

        Ok(())
    }

    /// Cancellation is not supported for host tasks
    pub async fn cancel(&self, _task_id: &str) -> HostResult<()> {
        Err(HostError::unsupported("cancel"))
    }

    /// Emit a best-effort `failed` update, then re-raise the original error
    async fn fail(
        &self,
        updater: &TaskUpdater,
        task_id: &str,
        error: HostError,
    ) -> HostResult<()> {
        error!(task_id = %task_id, error = %error, "Task invocation failed");

        let _ = updater
            .update_status(TaskState::Failed, format!("An error occurred: {error}"))
            .await;

        Err(error)
    }
}
