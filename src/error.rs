//! Error types for the host coordinator
//!
//! Maps each failure class to its handling policy: configuration errors are
//! fatal, discovery errors are recovered per endpoint, transport errors
//! propagate into a failed task, and cancellation is always rejected.

use thiserror::Error;

/// Main error type for host coordinator operations
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Discovery error: {message}")]
    Discovery { message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invocation error: {message}")]
    Invocation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },
}

impl HostError {
    /// Create a discovery error
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation<S: Into<String>>(message: S) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// True for errors that must abort startup rather than degrade
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostError::Config(_))
    }
}

/// Result type for host coordinator operations
pub type HostResult<T> = Result<T, HostError>;
