//! Tool server registry
//!
//! A JSON object keyed `mcpServers`, mapping server names to launch specs.
//! Unlike the agent registry, loading failures here are fatal: downstream
//! logic assumes configured tools exist, so there is no sensible empty
//! fallback.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Launch spec for one tool server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolServerSpec {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Transport selected by a tool server spec
#[derive(Debug, Clone, PartialEq)]
pub enum ToolTransport {
    /// Streaming HTTP endpoint
    StreamableHttp { url: String },
    /// Subprocess launched over stdio
    Stdio { command: String, args: Vec<String> },
}

impl ToolServerSpec {
    /// Resolve the transport for this spec
    ///
    /// The sentinel command `streamable_http` selects an HTTP transport with
    /// `args[0]` as the endpoint URL; any other command is a stdio launch
    /// spec.
    pub fn transport(&self) -> Result<ToolTransport, ConfigError> {
        if self.command == "streamable_http" {
            let url = self.args.first().ok_or_else(|| {
                ConfigError::InvalidConfig(
                    "streamable_http tool server requires an endpoint URL as args[0]".to_string(),
                )
            })?;
            Ok(ToolTransport::StreamableHttp { url: url.clone() })
        } else {
            Ok(ToolTransport::Stdio {
                command: self.command.clone(),
                args: self.args.clone(),
            })
        }
    }
}

/// Named collection of tool server launch specs
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    servers: HashMap<String, ToolServerSpec>,
}

impl ToolRegistry {
    /// Load the registry from a JSON config file
    ///
    /// Missing file, malformed JSON, a non-object top level, and a missing
    /// `mcpServers` key are all configuration errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let servers = parse_tool_registry(&content)?;
        Ok(Self { servers })
    }

    /// All configured servers, keyed by name
    pub fn servers(&self) -> &HashMap<String, ToolServerSpec> {
        &self.servers
    }

    pub fn get(&self, name: &str) -> Option<&ToolServerSpec> {
        self.servers.get(name)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Strict parse of tool registry content
pub fn parse_tool_registry(
    content: &str,
) -> Result<HashMap<String, ToolServerSpec>, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let serde_json::Value::Object(mut root) = value else {
        return Err(ConfigError::InvalidConfig(
            "tool registry must be a JSON object".to_string(),
        ));
    };

    let servers = root.remove("mcpServers").ok_or_else(|| {
        ConfigError::InvalidConfig("'mcpServers' key not found in tool registry".to_string())
    })?;

    Ok(serde_json::from_value(servers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "mcpServers": {
            "terminal": {"command": "python", "args": ["terminal_server.py"]},
            "search": {"command": "streamable_http", "args": ["http://localhost:9000/mcp"]}
        }
    }"#;

    #[test]
    fn test_parse_valid_registry() {
        let servers = parse_tool_registry(VALID).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers["terminal"].command, "python");
        assert_eq!(servers["search"].args, ["http://localhost:9000/mcp"]);
    }

    #[test]
    fn test_parse_missing_mcp_servers_key_is_error() {
        let result = parse_tool_registry(r#"{"servers": {}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_non_object_is_error() {
        let result = parse_tool_registry(r#"["not", "an", "object"]"#);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        let result = parse_tool_registry("{ broken");
        assert!(matches!(result, Err(ConfigError::JsonParse(_))));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = ToolRegistry::load(Path::new("/nonexistent/mcp_config.json"));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{VALID}").unwrap();

        let registry = ToolRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("terminal").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_stdio_transport() {
        let spec = ToolServerSpec {
            command: "python".to_string(),
            args: vec!["server.py".to_string()],
        };

        let transport = spec.transport().unwrap();
        assert_eq!(
            transport,
            ToolTransport::Stdio {
                command: "python".to_string(),
                args: vec!["server.py".to_string()],
            }
        );
    }

    #[test]
    fn test_streamable_http_transport() {
        let spec = ToolServerSpec {
            command: "streamable_http".to_string(),
            args: vec!["http://localhost:9000/mcp".to_string()],
        };

        let transport = spec.transport().unwrap();
        assert_eq!(
            transport,
            ToolTransport::StreamableHttp {
                url: "http://localhost:9000/mcp".to_string(),
            }
        );
    }

    #[test]
    fn test_streamable_http_without_url_is_error() {
        let spec = ToolServerSpec {
            command: "streamable_http".to_string(),
            args: vec![],
        };

        assert!(matches!(
            spec.transport(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }
}
