use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors raised while building a client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("host is missing")]
    MissingHost,

    #[error("port is missing")]
    MissingPort,

    #[error("invalid port: {value}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Connection settings for the document service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8118
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build from a key/value mapping. `host` and `port` are required,
    /// every other key is ignored.
    pub fn from_map(config: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = config.get("host").ok_or(ConfigError::MissingHost)?;
        let port_str = config.get("port").ok_or(ConfigError::MissingPort)?;
        let port = port_str
            .trim()
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                value: port_str.clone(),
                source,
            })?;

        Ok(Self::new(host.clone(), port))
    }

    /// Load a JSON config file; absent fields take their defaults
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
