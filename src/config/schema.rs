//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so a minimal file (or none at all) is valid.

use serde::{Deserialize, Serialize};

use crate::routing::Rule;

/// Root configuration for the routing gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Dynamic routing rules.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Dynamic routing configuration.
///
/// Also the shape of a standalone rule file: `{ "rules": [...] }`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Mount prefix removed from request paths before matching.
    pub context_path: String,

    /// Ordered rules. Absent or empty means every request passes through.
    pub rules: Option<Vec<Rule>>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.routing.context_path, "");
        assert!(config.routing.rules.is_none());
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_rule_file_keeps_order() {
        let config: RoutingConfig = serde_json::from_str(
            r#"{ "rules": [
                { "pattern": "/v1/ecom/", "url": "http://host1/product" },
                { "pattern": "/v1/ecom/(.*)", "url": "http://host2/product" }
            ] }"#,
        )
        .unwrap();

        let rules = config.rules.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern, "/v1/ecom/");
        assert_eq!(rules[1].url, "http://host2/product");
    }

    #[test]
    fn test_toml_gateway_config() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [routing]
            context_path = "/products"

            [[routing.rules]]
            pattern = "/foo/(.*)"
            url = "http://host1/{{ group[0] }}"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.routing.context_path, "/products");
        assert_eq!(config.routing.rules.unwrap()[0].url, "http://host1/{{ group[0] }}");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
