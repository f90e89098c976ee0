//! Application configuration.
//!
//! Defaults are compiled in. An optional JSON file named by
//! `ALLIANCE_RULES_CONFIG` can override any field, and
//! `ALLIANCE_RULES_SHEET_URL` overrides the sheet URL on top of that.

use crate::logging::{LogConfig, LogFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_PATH_ENV: &str = "ALLIANCE_RULES_CONFIG";
/// Environment variable overriding the sheet URL.
pub const SHEET_URL_ENV: &str = "ALLIANCE_RULES_SHEET_URL";

/// Published CSV export of the rules sheet.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTdeCuHt2ILatPX7la48DIoUotPouNakqGB7Qx6uhxmXFvv06_FNeu-nVLFc0hNPGs92a0YPhSdlfNl/pub?output=csv";

/// Alliances in the Non-Aggression Pact.
pub const DEFAULT_ALLIANCES: [&str; 11] = [
    "WCE",
    "VRG",
    "SUP",
    "QAP",
    "SLG",
    "PHA",
    "WOW",
    "420",
    "RKS",
    "GOD",
    "HPF Happy Farms",
];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sheet_url: String,
    pub alliances: Vec<String>,
    /// Zero means the default timeout.
    pub request_timeout_secs: u64,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            alliances: DEFAULT_ALLIANCES.iter().map(|s| s.to_string()).collect(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let sheet_url = std::env::var(SHEET_URL_ENV).ok();
        Self::from_sources(path.as_deref(), sheet_url)
    }

    /// Defaults, then the file at `path` if any, then `sheet_url` if any.
    pub fn from_sources(path: Option<&Path>, sheet_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(url) = sheet_url.filter(|u| !u.trim().is_empty()) {
            config.sheet_url = url.trim().to_string();
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Logging settings. An unknown level name falls back to info.
    pub fn log_config(&self) -> LogConfig {
        let level = self.log_level.trim().parse().unwrap_or(Level::INFO);
        LogConfig::default()
            .with_level(level)
            .with_format(self.log_format)
    }

    /// Split the roster for the two-column sidebar; the first column gets the
    /// extra name when the count is odd.
    pub fn alliance_columns(&self) -> (&[String], &[String]) {
        let mid = self.alliances.len().div_ceil(2);
        self.alliances.split_at(mid)
    }
}
