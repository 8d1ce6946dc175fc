use crate::config::Settings;
use crate::utils::error::{QuoteError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub remote: Option<RemoteConfig>,
    pub sync: Option<SyncConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub endpoint: Option<String>,
    pub fetch_limit: Option<usize>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    pub interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub notification_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QUOTE_API})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays every value present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(data_dir) = self.storage.as_ref().and_then(|s| s.data_dir.clone()) {
            settings.data_dir = data_dir;
        }

        if let Some(remote) = &self.remote {
            if let Some(endpoint) = &remote.endpoint {
                settings.api_endpoint = endpoint.clone();
            }
            if let Some(limit) = remote.fetch_limit {
                settings.fetch_limit = limit;
            }
            if let Some(timeout) = remote.request_timeout_seconds {
                settings.request_timeout_secs = timeout;
            }
        }

        if let Some(interval) = self.sync.as_ref().and_then(|s| s.interval_seconds) {
            settings.sync_interval_secs = interval;
        }

        if let Some(seconds) = self.display.as_ref().and_then(|d| d.notification_seconds) {
            settings.notification_secs = seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/quotes"

[remote]
endpoint = "https://api.example.com/posts"
fetch_limit = 5
request_timeout_seconds = 3

[sync]
interval_seconds = 60

[display]
notification_seconds = 8
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings);

        assert_eq!(settings.data_dir, "/var/lib/quotes");
        assert_eq!(settings.api_endpoint, "https://api.example.com/posts");
        assert_eq!(settings.fetch_limit, 5);
        assert_eq!(settings.request_timeout_secs, 3);
        assert_eq!(settings.sync_interval_secs, 60);
        assert_eq!(settings.notification_secs, 8);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("[sync]\ninterval_seconds = 15\n").unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings);

        assert_eq!(settings.sync_interval_secs, 15);
        assert_eq!(settings, Settings {
            sync_interval_secs: 15,
            ..Settings::default()
        });
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUOTE_SYNC_TEST_ENDPOINT", "https://test.api.com/posts");

        let toml_content = r#"
[remote]
endpoint = "${QUOTE_SYNC_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.remote.unwrap().endpoint.as_deref(),
            Some("https://test.api.com/posts")
        );

        std::env::remove_var("QUOTE_SYNC_TEST_ENDPOINT");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[sync\ninterval_seconds = ");
        assert!(matches!(result, Err(QuoteError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.storage.unwrap().data_dir.as_deref(),
            Some("./from-file")
        );
    }
}
