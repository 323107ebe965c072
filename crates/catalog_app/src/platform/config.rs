use std::fs;
use std::path::Path;
use std::time::Duration;

use catalog_core::OrderPolicy;
use catalog_engine::{FetchSettings, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub(crate) const CONFIG_FILENAME: &str = "catalog.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

/// Intra-group ordering as spelled in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) enum Ordering {
    #[default]
    NameRank,
    Price,
}

impl From<Ordering> for OrderPolicy {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::NameRank => OrderPolicy::ByNameRank,
            Ordering::Price => OrderPolicy::ByPrice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub endpoint: String,
    pub ordering: Ordering,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log: LogDestination,
    pub verbose: bool,
    /// Whether groups start expanded; collapsed groups only show their header.
    pub expand_groups: bool,
    /// Groups shown in the opposite state to `expand_groups`.
    pub toggled_groups: Vec<i64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ordering: Ordering::default(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log: LogDestination::default(),
            verbose: false,
            expand_groups: true,
            toggled_groups: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn policy(&self) -> OrderPolicy {
        self.ordering.into()
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Reads `catalog.ron` from `dir`. `Ok(None)` when the file does not exist.
pub(crate) fn load_config(dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}
