//! Delegation response normalization
//!
//! Remote agents return their final answer either in `status.message` or
//! buried in conversation `history`, and may legitimately send an empty final
//! message while a substantive answer sits earlier in history. This module
//! turns that into an explicit, ordered fallback chain: direct status path,
//! then newest agent history entry, then a fixed sentinel. Each extraction
//! carries a tag naming the path that produced it.

use crate::protocol::{Role, SendMessageResponse, TaskResponse};
use std::fmt;

/// Sentinel returned when a response carries no extractable text anywhere
pub const NO_TEXT_RESPONSE: &str =
    "The agent processed your request but returned no text response.";

/// Which extraction path produced the result text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// Direct path: `result.status.message.parts[0].text`
    StatusMessage,
    /// Reverse scan of `result.history` for the last agent text part
    History,
    /// Neither path yielded text; the sentinel was returned
    Sentinel,
}

/// Result of normalizing a task response into displayable text
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub path: ExtractionPath,
}

/// Format a response-shape failure as a displayable diagnostic string
///
/// Shape mismatches degrade to strings rather than raising; the caller always
/// gets something it can show the user.
pub fn parse_error(detail: impl fmt::Display) -> String {
    format!("Error parsing agent response: {detail}")
}

/// Extract displayable text from a remote task structure
///
/// The two lookup paths are ordered and must not be collapsed: the direct
/// status path wins when it holds non-whitespace text, otherwise the history
/// is scanned newest-first for an agent message with a text part.
pub fn extract_task_text(task: &TaskResponse) -> ExtractedText {
    let direct = task
        .status
        .as_ref()
        .and_then(|status| status.message.as_ref())
        .and_then(|message| message.parts.first())
        .and_then(|part| part.text_content());

    if let Some(text) = direct {
        if !text.trim().is_empty() {
            return ExtractedText {
                text: text.to_string(),
                path: ExtractionPath::StatusMessage,
            };
        }
    }

    for message in task.history.iter().rev() {
        if message.role != Some(Role::Agent) {
            continue;
        }
        if let Some(text) = message.parts.iter().find_map(|part| part.tagged_text()) {
            return ExtractedText {
                text: text.to_string(),
                path: ExtractionPath::History,
            };
        }
    }

    ExtractedText {
        text: NO_TEXT_RESPONSE.to_string(),
        path: ExtractionPath::Sentinel,
    }
}

/// Normalize a full response envelope into displayable text
///
/// A missing `result` member (with or without a JSON-RPC error in its place)
/// becomes a diagnostic string, never an error.
pub fn extract_response_text(response: &SendMessageResponse) -> String {
    match &response.result {
        Some(task) => extract_task_text(task).text,
        None => match &response.error {
            Some(error) => parse_error(format!(
                "agent returned error {}: {}",
                error.code, error.message
            )),
            None => parse_error("missing 'result' field"),
        },
    }
}
