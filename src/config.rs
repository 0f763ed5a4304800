//! Configuration system for the host coordinator
//!
//! Host configuration is TOML; the agent and tool registries referenced from
//! it are JSON files with their own loaders under [`crate::registry`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Main host configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    pub host: HostSection,
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub http: HttpSection,
}

/// Host identity section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostSection {
    /// Host identifier (must match [a-zA-Z0-9._-]+)
    pub id: String,
    /// Description of what this host does
    pub description: String,
    /// Optional file holding the host's system instructions
    pub instructions_file: Option<String>,
}

/// Registry file locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySection {
    /// JSON array of remote agent base URLs
    #[serde(default = "default_agents_file")]
    pub agents_file: String,
    /// JSON object of tool server launch specs under "mcpServers"
    #[serde(default = "default_tools_file")]
    pub tools_file: String,
}

fn default_agents_file() -> String {
    "agent_registry.json".to_string()
}

fn default_tools_file() -> String {
    "mcp_config.json".to_string()
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            agents_file: default_agents_file(),
            tools_file: default_tools_file(),
        }
    }
}

/// Outbound HTTP behavior
///
/// Timeouts default to minutes rather than seconds: remote agents are
/// LLM-backed services and a single task can legitimately run that long.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpSection {
    /// Timeout for capability-card fetches, in seconds
    #[serde(default = "default_timeout_secs")]
    pub discovery_timeout_secs: u64,
    /// Timeout for task submission calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub delegation_timeout_secs: u64,
    /// Grace period after a completion update before the event stream halts,
    /// in milliseconds
    #[serde(default = "default_completion_grace_ms")]
    pub completion_grace_ms: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_completion_grace_ms() -> u64 {
    100
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            discovery_timeout_secs: default_timeout_secs(),
            delegation_timeout_secs: default_timeout_secs(),
            completion_grace_ms: default_completion_grace_ms(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to parse registry JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Invalid host ID format: {0}")]
    InvalidHostId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HostConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: HostConfig = toml::from_str(&content)?;

        validate_host_id(&config.host.id)?;

        Ok(config)
    }

    /// Read the host instructions file, falling back to the default text
    pub fn load_instructions(&self, default: &str) -> String {
        match &self.host.instructions_file {
            Some(path) => load_instructions_file(path, default),
            None => default.to_string(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: HostSection {
                id: "host-agent".to_string(),
                description: "Routes user requests to discovered remote agents".to_string(),
                instructions_file: None,
            },
            registry: RegistrySection::default(),
            http: HttpSection::default(),
        }
    }
}

/// Load instruction text from a file, returning the default on any failure
///
/// Missing or unreadable instruction files are never fatal: the host can run
/// with its built-in default instructions.
pub fn load_instructions_file(path: &str, default: &str) -> String {
    if path.is_empty() {
        return default.to_string();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to load instructions file, using default");
            default.to_string()
        }
    }
}

/// Validate host ID format
fn validate_host_id(host_id: &str) -> Result<(), ConfigError> {
    let valid_chars = host_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    if host_id.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidHostId(format!(
            "Host ID '{host_id}' must match pattern [a-zA-Z0-9._-]+"
        )));
    }

    Ok(())
}
