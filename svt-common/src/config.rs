//! Configuration loading and run directory layout
//!
//! The JSON config file is optional. A missing or unreadable file degrades
//! the run (no Last.fm key means every lookup falls back) but never aborts it.

use crate::time::dated_file_name;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file, relative to the working root
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable consulted for the Last.fm API key
pub const API_KEY_ENV: &str = "SVT_LAST_FM_API_KEY";

pub const LOG_DIR_NAME: &str = "logs";
pub const DATA_DIR_NAME: &str = "data";
pub const LOG_FILE_SUFFIX: &str = "run.log";
pub const DATA_FILE_SUFFIX: &str = "strobeck_track_data.csv";

/// Contents of `config.json`
///
/// Only `LAST_FM_API_KEY` is expected in practice; the remaining keys override
/// the built-in scrape targets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JsonConfig {
    #[serde(rename = "LAST_FM_API_KEY", default)]
    pub last_fm_api_key: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub filmmaker_path: Option<String>,

    #[serde(default)]
    pub lastfm_api_url: Option<String>,

    /// HTTP timeout; unset keeps the transport default (no timeout)
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    #[serde(default)]
    pub log_level: Option<String>,
}

/// Load `config.json` from `path`
pub fn load_json_config(path: &Path) -> Result<JsonConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: JsonConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Resolve the Last.fm API key
///
/// **Priority:** explicit (command line) → ENV → config file
///
/// Returns `None` when no source carries a valid key.
pub fn resolve_api_key(explicit: Option<&str>, config: &JsonConfig) -> Option<String> {
    let env_key = std::env::var(API_KEY_ENV).ok();

    let candidates: [(&str, Option<&str>); 3] = [
        ("command line", explicit),
        ("environment", env_key.as_deref()),
        ("config file", config.last_fm_api_key.as_deref()),
    ];

    let valid: Vec<(&str, &str)> = candidates
        .iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (*source, k)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Last.fm API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            valid[0].0
        );
    }

    match valid.first() {
        Some((source, key)) => {
            info!("Last.fm API key loaded from {}", source);
            Some(key.trim().to_string())
        }
        None => {
            warn!("Last.fm API key not configured, track lookups will use fallback records");
            None
        }
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Directory layout for one run: `logs/` and `data/` under a root folder
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR_NAME)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR_NAME)
    }

    /// Create the log and data directories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [self.log_dir(), self.data_dir()] {
            if dir.exists() && !dir.is_dir() {
                return Err(Error::Config(format!(
                    "Path exists but is not a directory: {}",
                    dir.display()
                )));
            }
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }

    /// `logs/{date}_run.log`
    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.log_dir().join(dated_file_name(date, LOG_FILE_SUFFIX))
    }

    /// `data/{date}_strobeck_track_data.csv`
    pub fn data_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir().join(dated_file_name(date, DATA_FILE_SUFFIX))
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(DEFAULT_CONFIG_FILE)
    }
}
