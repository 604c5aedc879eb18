use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitecraft_engine::{GenerateSettings, DEFAULT_BASE_URL};
use sitecraft_logging::LogDestination;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "sitecraft.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("unknown log destination {0:?} (expected file, terminal or both)")]
    LogDestination(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin of the generation API; the endpoint path is appended.
    pub base_url: String,
    /// Unset means no client-side timeout.
    pub request_timeout_secs: Option<u64>,
    pub download_dir: PathBuf,
    pub preview_path: PathBuf,
    pub log_destination: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            download_dir: PathBuf::from("downloads"),
            preview_path: PathBuf::from("preview").join("index.html"),
            log_destination: "file".to_string(),
        }
    }
}

impl AppConfig {
    pub fn generate_settings(&self) -> GenerateSettings {
        GenerateSettings {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..GenerateSettings::default()
        }
    }

    pub fn log_destination(&self) -> Result<LogDestination, ConfigError> {
        LogDestination::parse(&self.log_destination)
            .ok_or_else(|| ConfigError::LogDestination(self.log_destination.clone()))
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
    }
}

/// Loads the config file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
