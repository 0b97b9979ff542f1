//! Cluster environment configuration.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::StatsError;

/// Project configuration: a map of named cluster environments.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub envs: HashMap<String, EnvConfig>,
}

/// One cluster environment entry.
///
/// Immutable for the duration of an invocation; this is the connection
/// descriptor every fetch goes through.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvConfig {
    /// Base URL of the Storm UI API (scheme optional)
    pub ui: String,

    /// Storm version the cluster runs
    pub storm_version: String,

    /// Optional bearer token for the UI API
    #[serde(default)]
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

        if config.envs.is_empty() {
            anyhow::bail!("No environments found in config file");
        }

        Ok(config)
    }

    /// Look up an environment by name.
    pub fn env(&self, name: &str) -> Result<&EnvConfig> {
        self.envs
            .get(name)
            .ok_or_else(|| StatsError::EnvNotFound(name.to_string()).into())
    }
}

impl EnvConfig {
    /// UI base URL with a scheme, trailing slash trimmed.
    ///
    /// The Storm UI usually serves plain HTTP inside the cluster, so a
    /// bare `host:port` is normalized to `http://host:port`.
    pub fn base_url(&self) -> String {
        let url = if self.ui.starts_with("http://") || self.ui.starts_with("https://") {
            self.ui.clone()
        } else {
            format!("http://{}", self.ui)
        };
        url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"envs": {{"prod": {{"ui": "storm-ui:8080", "storm_version": "2.4.0"}}}}}}"#
        )
        .unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        let env = config.env("prod").unwrap();
        assert_eq!(env.ui, "storm-ui:8080");
        assert_eq!(env.storm_version, "2.4.0");
        assert!(env.token.is_none());
    }

    #[test]
    fn test_load_empty_envs() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"envs": {{}}}}"#).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("No environments")
        );
    }

    #[test]
    fn test_unknown_env() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"envs": {{"prod": {{"ui": "storm-ui:8080", "storm_version": "2.4.0"}}}}}}"#
        )
        .unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        let err = config.env("staging").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment not found in config: staging"
        );
    }

    #[test]
    fn test_base_url_normalization() {
        let env = EnvConfig {
            ui: "storm-ui:8080".to_string(),
            storm_version: "2.4.0".to_string(),
            token: None,
        };
        assert_eq!(env.base_url(), "http://storm-ui:8080");

        let env = EnvConfig {
            ui: "https://storm-ui.example.com/".to_string(),
            storm_version: "2.4.0".to_string(),
            token: None,
        };
        assert_eq!(env.base_url(), "https://storm-ui.example.com");
    }
}
