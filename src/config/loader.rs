//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, RoutingConfig};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format {0:?} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Load the gateway configuration from a TOML or JSON file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    parse_file(path)
}

/// Load routing rules from either a gateway file or a bare rule file.
pub fn load_routing(path: &Path) -> Result<RoutingConfig, ConfigError> {
    let gateway: GatewayConfig = parse_file(path)?;
    if gateway.routing.rules.is_some() {
        return Ok(gateway.routing);
    }
    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_rule_file() {
        let file = write_file(
            ".json",
            r#"{ "rules": [ { "pattern": "/foo/(.*)", "url": "http://host1/" } ] }"#,
        );

        let routing = load_routing(file.path()).unwrap();
        assert_eq!(routing.rules.unwrap().len(), 1);
        assert_eq!(routing.context_path, "");
    }

    #[test]
    fn test_load_toml_gateway_file() {
        let file = write_file(
            ".toml",
            r#"
            [routing]
            context_path = "/api"
            rules = [ { pattern = "/a", url = "http://a/" } ]
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routing.context_path, "/api");

        let routing = load_routing(file.path()).unwrap();
        assert_eq!(routing, config.routing);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_file(".yaml", "rules: []");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_file(".json", r#"{ "rules": [ { "pattern": 1 } ] }"#);
        assert!(matches!(load_routing(file.path()).unwrap_err(), ConfigError::Json(_)));
    }
}
