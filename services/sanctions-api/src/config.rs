use config::{ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SDN_URL: &str = "https://www.treasury.gov/ofac/downloads/sdn.xml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    pub url: String,
    /// Read the list from disk instead of downloading it
    pub local_path: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RefreshConfig {
    pub auto_update_enabled: bool,
    pub update_interval_hours: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8087)?
            .set_default("server.workers", 4)?
            // SDN source defaults
            .set_default("source.url", DEFAULT_SDN_URL)?
            .set_default("source.timeout_seconds", 120)?
            // Refresh defaults
            .set_default("refresh.auto_update_enabled", false)?
            .set_default("refresh.update_interval_hours", 24)?;

        builder = builder.add_source(Environment::with_prefix("SANCTIONS_API").separator("__"));

        // Override from environment variables
        if let Ok(port) = env::var("SERVICE_PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        if let Ok(url) = env::var("SDN_SOURCE_URL") {
            builder = builder.set_override("source.url", url)?;
        }

        if let Ok(path) = env::var("SDN_LOCAL_PATH") {
            builder = builder.set_override("source.local_path", path)?;
        }

        builder.build()?.try_deserialize()
    }
}

impl SourceConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            local_path: None,
            timeout_seconds: 120,
        }
    }

    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_SDN_URL.to_string(),
            local_path: Some(path.into()),
            timeout_seconds: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env().unwrap();
        assert!(!config.source.url.is_empty());
        assert!(config.refresh.update_interval_hours > 0);
        assert!(config.server.workers > 0);
    }

    #[test]
    fn test_source_constructors() {
        let remote = SourceConfig::from_url("http://localhost/sdn.xml");
        assert_eq!(remote.url, "http://localhost/sdn.xml");
        assert!(remote.local_path.is_none());

        let local = SourceConfig::from_path("/tmp/sdn.xml");
        assert_eq!(local.local_path.as_deref(), Some("/tmp/sdn.xml"));
    }
}
