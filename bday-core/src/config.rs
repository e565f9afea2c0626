//! Global bday configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{BdayError, BdayResult};
use crate::upcoming::DEFAULT_UPCOMING_DAYS;

static DEFAULT_DATA_PATH: &str = "~/.local/share/bday";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_upcoming_days() -> i64 {
    DEFAULT_UPCOMING_DAYS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Which store to read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Remote,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Remote => write!(f, "remote"),
        }
    }
}

/// Configuration at ~/.config/bday/config.toml, overridable with
/// `BDAY_*` environment variables (e.g. `BDAY_API_URL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BdayConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BdayConfig {
    fn default() -> Self {
        BdayConfig {
            backend: BackendKind::default(),
            data_dir: default_data_path(),
            api_url: None,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BdayConfig {
    pub fn config_path() -> BdayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BdayError::Config("Could not determine config directory".into()))?
            .join("bday");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template first
    /// if there is no config file yet.
    pub fn load() -> BdayResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path, true)
    }

    /// Load from `path`, optionally layering `BDAY_*` environment variables on top.
    pub fn load_from(path: &Path, with_env: bool) -> BdayResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("BDAY").try_parsing(true));
        }

        let config: BdayConfig = builder
            .build()
            .map_err(|e| BdayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BdayError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> BdayResult<()> {
        if self.upcoming_days < 0 {
            return Err(BdayError::Config(format!(
                "upcoming_days must not be negative (got {})",
                self.upcoming_days
            )));
        }
        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BdayResult<()> {
        let contents = format!(
            "\
# bday configuration

# Where birthdays are stored: \"local\" or \"remote\"
# backend = \"local\"

# Data directory for the local backend:
# data_dir = \"{DEFAULT_DATA_PATH}\"

# API gateway for the remote backend (or set BDAY_API_URL):
# api_url = \"https://example.execute-api.eu-west-2.amazonaws.com\"

# How many days ahead the dashboard looks for birthdays:
# upcoming_days = {DEFAULT_UPCOMING_DAYS}

# Seconds before an API request gives up:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BdayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BdayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
