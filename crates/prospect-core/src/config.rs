//! Application configuration model (`config.toml`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of `config.toml`. Every section falls back to defaults when absent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where and how to reach the credential authority.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    pub base_url: String,
    /// Role discriminator sent with every request
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_kind() -> String {
    "participant".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            kind: default_kind(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Optional overrides for the data files; unset means the default location.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.auth.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_auth_section() {
        let config: RootConfig = toml::from_str(
            r#"
            [auth]
            base_url = "https://auth.example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.base_url, "https://auth.example.org");
        assert_eq!(config.auth.kind, "participant");
        assert!(config.storage.records_file.is_none());
    }
}
