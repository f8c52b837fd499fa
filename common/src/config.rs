use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::yaml_include::{emit_yaml, load_yaml_with_includes};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const SERVER_ADDRESS_ENV: &str = "RECEIPTS_SERVER_ADDRESS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {0:?} contains no YAML document")]
    Empty(PathBuf),
    #[error("config file {0:?} includes itself")]
    IncludeCycle(PathBuf),
    #[error("invalid YAML: {0}")]
    Scan(#[from] yaml_rust2::ScanError),
    #[error("failed to render merged YAML: {0}")]
    Emit(#[from] yaml_rust2::EmitError),
    #[error("config does not match the expected shape: {0}")]
    Parse(#[from] serde_yml::Error),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CommonConfig {
    pub project_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub server_address: String,
    pub log_level: String,
    pub cors_origin: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            log_level: "info".to_string(),
            cors_origin: None,
        }
    }
}

/// How the description-length award (`price * 0.2`) is turned into whole points.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionRounding {
    /// Nearest integer, ties away from zero: 2.45 -> 2, 2.5 -> 3.
    #[default]
    HalfUp,
    /// Any fractional part rounds up: 2.45 -> 3, 2.0 -> 2.
    Ceiling,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub description_rounding: DescriptionRounding,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub backend: BackendConfig,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = load_yaml_with_includes(config_path.as_ref())?;
        Self::from_yaml_str(&emit_yaml(&yaml)?)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(contents)?)
    }

    /// Replaces the bind address when an override is present and non-empty.
    pub fn with_server_address_override(mut self, address: Option<String>) -> Self {
        if let Some(address) = address.filter(|a| !a.trim().is_empty()) {
            self.backend.server_address = address;
        }
        self
    }
}
