//! Client configuration, read from `matcher_client.ron` in the working directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use matcher_core::DEFAULT_TOP_K;
use matcher_engine::{ServiceSettings, DEFAULT_BASE_ADDRESS};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "matcher_client.ron";
/// Overrides `base_address` when set and non-empty.
pub const BASE_ADDRESS_ENV: &str = "MATCHER_BASE_ADDRESS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_address: String,
    pub top_k: u32,
    pub log_level: String,
    pub log_destination: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            top_k: DEFAULT_TOP_K,
            log_level: "info".to_string(),
            log_destination: "terminal".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn log_level(&self) -> LevelFilter {
        engine_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn log_destination(&self) -> LogDestination {
        LogDestination::parse(&self.log_destination).unwrap_or_default()
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_address: self.base_address.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_address.trim().is_empty() {
            return Err(ConfigError::Invalid("base_address is empty".into()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be at least 1".into()));
        }
        if engine_logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        if LogDestination::parse(&self.log_destination).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_destination {:?}",
                self.log_destination
            )));
        }
        Ok(())
    }
}

/// Loads the configuration file at `path`, falling back to defaults when it
/// does not exist, then applies the environment override.
pub fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
    let config = read_file(path)?;
    let config = apply_base_address_override(config, std::env::var(BASE_ADDRESS_ENV).ok());
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

fn apply_base_address_override(mut config: ClientConfig, value: Option<String>) -> ClientConfig {
    if let Some(address) = value.filter(|v| !v.trim().is_empty()) {
        config.base_address = address;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = read_file(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_address, "http://127.0.0.1:8000");
        assert_eq!(config.top_k, 5);
        assert_eq!(config.service_settings().request_timeout, None);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(base_address: "http://matcher.internal:9000", request_timeout_secs: Some(30))"#,
        )
        .unwrap();

        let config = read_file(&path).unwrap();
        assert_eq!(config.base_address, "http://matcher.internal:9000");
        assert_eq!(config.top_k, 5);
        assert_eq!(
            config.service_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(top_k: \"five\")").unwrap();

        assert!(matches!(read_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn environment_override_replaces_base_address() {
        let config = apply_base_address_override(
            ClientConfig::default(),
            Some("http://override:8000".to_string()),
        );
        assert_eq!(config.base_address, "http://override:8000");

        let unchanged = apply_base_address_override(ClientConfig::default(), Some("  ".into()));
        assert_eq!(unchanged.base_address, DEFAULT_BASE_ADDRESS);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero = ClientConfig {
            top_k: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

        let level = ClientConfig {
            log_level: "chatty".into(),
            ..ClientConfig::default()
        };
        assert!(level.validate().is_err());
        assert_eq!(level.log_level(), LevelFilter::Info);

        let both = ClientConfig {
            log_destination: "both".into(),
            ..ClientConfig::default()
        };
        assert_eq!(both.log_destination(), LogDestination::Both);
    }
}
