//! Agent endpoint registry
//!
//! A JSON array of remote agent base URLs, loaded once at startup. Loading is
//! non-fatal by design: a missing or malformed registry degrades to an empty
//! routable set and discovery simply finds no agents.

use crate::config::ConfigError;
use std::path::Path;
use tracing::warn;

/// Ordered collection of registered agent base URLs
///
/// Registry order is significant: discovery preserves it and the delegation
/// router uses it as the first-match-wins priority order.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    base_urls: Vec<String>,
}

impl AgentRegistry {
    /// Load the registry from a JSON file
    ///
    /// A missing file, malformed JSON, or wrong top-level shape yields an
    /// empty registry; the failure is logged, never raised.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Agent registry file not readable, using empty registry");
                return Self::default();
            }
        };

        match parse_agent_registry(&content) {
            Ok(base_urls) => Self { base_urls },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Agent registry file invalid, using empty registry");
                Self::default()
            }
        }
    }

    /// Build a registry from an in-memory URL list
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// Registered base URLs in registry order
    pub fn base_urls(&self) -> &[String] {
        &self.base_urls
    }

    pub fn len(&self) -> usize {
        self.base_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_urls.is_empty()
    }
}

/// Strict parse of agent registry content
///
/// Split out from [`AgentRegistry::load`] so the failure cases stay unit
/// testable without capturing log output.
pub fn parse_agent_registry(content: &str) -> Result<Vec<String>, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        _ => Err(ConfigError::InvalidConfig(
            "agent registry must be a JSON array of base URLs".to_string(),
        )),
    }
}
