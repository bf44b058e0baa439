// src/config.rs

use crate::logging::{PROJECT_NAME, get_config_dir};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

lazy_static! {
    pub static ref ENDPOINT_ENV: String = format!("{}_ENDPOINT", PROJECT_NAME.clone());
}

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/upload";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("endpoint `{0}` is not a valid URL: {1}")]
    InvalidEndpoint(String, #[source] url::ParseError),

    #[error("endpoint `{0}` must use http or https")]
    UnsupportedScheme(String),
}

/// Runtime settings.
///
/// Resolved from built-in defaults, then `config.toml` in the project config
/// directory when it exists, then the `PRICELENS_ENDPOINT` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where uploads are posted.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = get_config_dir().join(CONFIG_FILE);
        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults.");
            Self::default()
        };
        let config = config.with_endpoint_override(std::env::var(ENDPOINT_ENV.as_str()).ok());
        config.endpoint_url()?;
        info!(endpoint = %config.endpoint, "Configuration loaded.");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the endpoint when an override is given and non-blank.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        self
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(self.endpoint.clone(), e))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedScheme(self.endpoint.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_upload_route() {
        let url = Config::default().endpoint_url().unwrap();
        assert_eq!(url.path(), "/upload");
        assert_eq!(url.port(), Some(5000));
    }

    #[test]
    fn reads_endpoint_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "endpoint = \"https://lens.example.com/upload\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.endpoint, "https://lens.example.com/upload");
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "").unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "endpont = \"http://x\"\n").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn override_wins_unless_blank() {
        let config = Config::default().with_endpoint_override(Some(" http://10.0.0.2:8080/upload ".into()));
        assert_eq!(config.endpoint, "http://10.0.0.2:8080/upload");

        let config = Config::default().with_endpoint_override(Some("   ".into()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn endpoint_must_be_http() {
        let bad = Config { endpoint: "ftp://files.example.com/upload".into() };
        assert!(matches!(bad.endpoint_url(), Err(ConfigError::UnsupportedScheme(_))));

        let garbage = Config { endpoint: "not a url".into() };
        assert!(matches!(garbage.endpoint_url(), Err(ConfigError::InvalidEndpoint(..))));
    }
}
