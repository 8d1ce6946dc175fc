#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_DATA_DIR: &str = "./quote-data";

/// Resolved runtime settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub api_endpoint: String,
    pub data_dir: String,
    pub sync_interval_secs: u64,
    pub fetch_limit: usize,
    pub notification_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            sync_interval_secs: 30,
            fetch_limit: crate::core::sync::DEFAULT_FETCH_LIMIT,
            notification_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl ConfigProvider for Settings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    fn fetch_limit(&self) -> usize {
        self.fetch_limit
    }

    fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("data_dir", &self.data_dir)?;
        validate_positive_number("sync_interval_secs", self.sync_interval_secs, 1)?;
        validate_positive_number("fetch_limit", self.fetch_limit as u64, 1)?;
        validate_positive_number("notification_secs", self.notification_secs, 1)?;
        validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        Ok(())
    }
}
