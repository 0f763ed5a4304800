//! Agent capability descriptors
//!
//! An agent card is the metadata document a remote agent serves from its
//! well-known path. Cards are fetched fresh on every discovery pass, so a
//! descriptor is only as fresh as its last fetch; callers tolerate staleness
//! between discovery and delegation.

use serde::{Deserialize, Serialize};

/// Capability descriptor for a remote agent
///
/// Deserialization is lenient: remote implementations differ in which
/// optional fields they populate, and a sparse card is still routable as long
/// as it carries a name and URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Agent name; case-insensitive match key within a registry snapshot
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base endpoint for task submission
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_input_modes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_output_modes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<AgentSkill>,
}

/// Interaction-mode flags advertised by an agent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

/// A single skill advertised on an agent card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl AgentCard {
    /// Case-insensitive name match used by the delegation router
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_card_round_trip() {
        let json = r#"{
            "name": "Writer",
            "description": "Writes web pages",
            "url": "http://localhost:11000",
            "version": "1.0.0",
            "capabilities": {"streaming": true, "pushNotifications": false},
            "defaultInputModes": ["text"],
            "defaultOutputModes": ["text"],
            "skills": [
                {
                    "id": "build_website",
                    "name": "Build Website",
                    "description": "Creates simple HTML pages",
                    "tags": ["web", "html"],
                    "examples": ["Build me a landing page"]
                }
            ]
        }"#;

        let card: AgentCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Writer");
        assert_eq!(card.url, "http://localhost:11000");
        assert!(card.capabilities.streaming);
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].id, "build_website");

        let serialized = serde_json::to_value(&card).unwrap();
        assert_eq!(serialized["defaultInputModes"][0], "text");
        assert_eq!(serialized["capabilities"]["pushNotifications"], false);
    }

    #[test]
    fn test_sparse_card_parses() {
        let json = r#"{"name": "Minimal", "url": "http://localhost:12000"}"#;

        let card: AgentCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Minimal");
        assert_eq!(card.description, "");
        assert!(!card.capabilities.streaming);
        assert!(card.skills.is_empty());
    }

    #[test]
    fn test_card_missing_name_is_rejected() {
        let json = r#"{"url": "http://localhost:12000"}"#;
        assert!(serde_json::from_str::<AgentCard>(json).is_err());
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let card: AgentCard =
            serde_json::from_str(r#"{"name": "Writer", "url": "http://a"}"#).unwrap();

        assert!(card.matches_name("writer"));
        assert!(card.matches_name("WRITER"));
        assert!(card.matches_name("Writer"));
        assert!(!card.matches_name("writer2"));
    }
}
