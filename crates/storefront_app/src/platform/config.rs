use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use storefront_core::{SearchCriteria, DEFAULT_PAGE_SIZE};
use storefront_engine::{ClientSettings, EngineSettings};
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "storefront.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from `storefront.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub page_size: u32,
    /// Limit for one search call; expiry counts as a failed fetch.
    pub fetch_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Directory for the saved cart and the log file.
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.endpoint,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_timeout_ms: EngineSettings::default().fetch_timeout.as_millis() as u64,
            connect_timeout_ms: client.connect_timeout.as_millis() as u64,
            request_timeout_ms: client.request_timeout.as_millis() as u64,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            state_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms.max(1)),
            request_timeout: Duration::from_millis(self.request_timeout_ms.max(1)),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms.max(1)),
        }
    }

    pub fn initial_criteria(&self) -> SearchCriteria {
        SearchCriteria::default().with_page_size(self.page_size)
    }

    /// Unknown level names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        storefront_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Loads `storefront.ron` from `dir`. A missing file yields the defaults.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    ron::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
