//! RelayConfig - Config Loader output
//!
//! Describes the full relay setup: gateway endpoint, diagnostics, and the
//! topic subscription table.

use serde::{Deserialize, Serialize};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Full relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Gateway settings
    pub gateway: GatewayConfig,

    /// Topic subscription table
    pub topics: Vec<TopicBinding>,
}

/// Gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the function gateway (e.g. "http://gateway:8080/function").
    /// Joined with the function identifier by a single `/`; a trailing slash
    /// is trimmed during validation.
    pub url: String,

    /// Echo response bodies to stdout in addition to the result channel
    #[serde(default)]
    pub print_response: bool,

    /// Per-request timeout in seconds (None = transport default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// One topic -> functions subscription entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicBinding {
    /// Event classification string (exact match)
    pub topic: String,

    /// Functions invoked for this topic, in invocation order
    pub functions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let json = r#"{
            "gateway": { "url": "http://gw:8080" },
            "topics": [ { "topic": "t", "functions": ["f"] } ]
        }"#;
        let config: RelayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, ConfigVersion::V1);
        assert!(!config.gateway.print_response);
        assert!(config.gateway.timeout_secs.is_none());
    }
}
