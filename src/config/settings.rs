//! User settings for moneylover-cli
//!
//! Service hosts, transport behaviour and output preferences. Every field has a
//! default so a partial `config.json` still loads.

use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::MoneyLoverPaths;
use crate::api::endpoints::{DEFAULT_OAUTH_URL, DEFAULT_WEB_URL};
use crate::api::transport::DEFAULT_TIMEOUT_SECS;
use crate::api::{Endpoints, TransportConfig};
use crate::error::MoneyLoverError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for moneylover-cli
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Web host serving the domain API
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// OAuth host issuing tokens
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Dump raw requests and responses to stderr
    #[serde(default)]
    pub debug_payload: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Days of history `transaction list` shows when no range is given
    #[serde(default = "default_transaction_days")]
    pub transaction_days: u32,
}

/// Newest settings schema this build understands
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_web_url() -> String {
    DEFAULT_WEB_URL.to_string()
}

fn default_oauth_url() -> String {
    DEFAULT_OAUTH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_transaction_days() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            web_url: default_web_url(),
            oauth_url: default_oauth_url(),
            timeout_secs: default_timeout_secs(),
            debug_payload: false,
            date_format: default_date_format(),
            transaction_days: default_transaction_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &MoneyLoverPaths) -> Result<Self, MoneyLoverError> {
        let settings_path = paths.settings_file();

        let settings = read_json::<Settings, _>(&settings_path)
            .map_err(|e| MoneyLoverError::Config(format!("Failed to load settings: {}", e)))?
            .unwrap_or_default();

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyLoverPaths) -> Result<(), MoneyLoverError> {
        paths.ensure_directories()?;
        write_json_atomic(&paths.settings_file(), self)
    }

    /// Check the settings make sense
    pub fn validate(&self) -> Result<(), MoneyLoverError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(MoneyLoverError::Config(format!(
                "settings schema version {} is newer than this build supports ({})",
                self.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }

        for (name, url) in [("web_url", &self.web_url), ("oauth_url", &self.oauth_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(MoneyLoverError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(MoneyLoverError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(MoneyLoverError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Service endpoints for these settings
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.web_url, &self.oauth_url)
    }

    /// Transport configuration for these settings
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            debug_payload: self.debug_payload,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
