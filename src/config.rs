//! Configuration management for the catalog client
//!
//! Configuration is layered: built-in defaults, then a TOML file, then
//! environment variables, then command-line flags (applied by the CLI).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{FetchMode, ServiceConfig, TransportConfig, UrlLayout};
use crate::constants::{self, limits};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote catalog settings
    pub catalog: CatalogConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// How translations of one item are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationFetch {
    Sequential,
    Concurrent,
}

/// TOML-friendly catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfigToml {
    /// Base URL the catalog is published under
    pub base_url: String,
    /// Translation fetch scheduling
    pub translation_fetch: TranslationFetch,
    /// In-flight limit for concurrent translation fetches
    pub max_concurrent_translations: usize,
}

impl Default for CatalogConfigToml {
    fn default() -> Self {
        Self {
            base_url: constants::layout::DEFAULT_BASE_URL.to_string(),
            translation_fetch: TranslationFetch::Sequential,
            max_concurrent_translations: limits::DEFAULT_MAX_CONCURRENT_TRANSLATIONS,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        let runtime = TransportConfig::default();
        Self {
            tcp_nodelay: runtime.tcp_nodelay,
            pool_max_per_host: runtime.pool_max_per_host,
            request_timeout_secs: runtime.request_timeout.as_secs(),
            connect_timeout_secs: runtime.connect_timeout.as_secs(),
            rate_limit_rps: runtime.rate_limit_rps,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, else the first one found)
    /// 3. Environment variables
    ///
    /// # Errors
    ///
    /// Fails if an explicitly requested file is missing, if a file cannot
    /// be parsed, or if the result does not validate
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(constants::env::BASE_URL) {
            debug!("Base URL overridden from {}", constants::env::BASE_URL);
            self.catalog.base_url = base_url;
        }
        if let Some(level) = lookup(constants::env::LOG_LEVEL) {
            self.logging.level = level;
        }
    }

    /// Checks values that would otherwise fail later at runtime
    pub fn validate(&self) -> ConfigResult<()> {
        if let Err(e) = UrlLayout::new(&self.catalog.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "catalog.base_url".to_string(),
                value: self.catalog.base_url.clone(),
                reason: e.to_string(),
            });
        }
        if self.catalog.max_concurrent_translations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog.max_concurrent_translations".to_string(),
                value: "0".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        if self.client.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Convert to the runtime service configuration
    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.catalog.base_url.clone(),
            transport: self.client.to_runtime_config(),
            translation_mode: self.catalog.fetch_mode(),
        }
    }

    /// Writes the default config to `path` unless the file exists
    ///
    /// Returns whether a file was created.
    pub async fn write_default(path: &Path) -> ConfigResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Created default configuration file: {}", path.display());
        Ok(true)
    }

    /// Renders the configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths: Vec<PathBuf> = constants::config::LOCAL_FILES
            .iter()
            .map(PathBuf::from)
            .collect();
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(constants::config::APP_DIR)
            .join(constants::config::FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    fn generate_default_config_content() -> String {
        let defaults = Self::default();
        format!(
            r#"# Catalog Client Configuration
# You can customize any of these settings to suit your needs.

[catalog]
# Base URL the catalog is published under. Expected layout:
#   {{base_url}}/content/index.json
#   {{base_url}}/content/<file_path>
#   {{base_url}}/translations/<language>/<content_id>.json
base_url = "{}"

# "sequential" fetches one translation at a time, "concurrent" overlaps them
translation_fetch = "sequential"
max_concurrent_translations = {}

[client]
# HTTP client settings
tcp_nodelay = true
pool_max_per_host = {}
request_timeout_secs = {}
connect_timeout_secs = {}
rate_limit_rps = {}

[logging]
level = "warn"  # error, warn, info, debug, trace
"#,
            defaults.catalog.base_url,
            defaults.catalog.max_concurrent_translations,
            defaults.client.pool_max_per_host,
            defaults.client.request_timeout_secs,
            defaults.client.connect_timeout_secs,
            defaults.client.rate_limit_rps,
        )
    }
}

impl CatalogConfigToml {
    /// Runtime scheduling mode for translation fetches
    pub fn fetch_mode(&self) -> FetchMode {
        match self.translation_fetch {
            TranslationFetch::Sequential => FetchMode::Sequential,
            TranslationFetch::Concurrent => FetchMode::Concurrent {
                limit: self.max_concurrent_translations,
            },
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime TransportConfig
    pub fn to_runtime_config(&self) -> TransportConfig {
        TransportConfig {
            tcp_nodelay: self.tcp_nodelay,
            pool_max_per_host: self.pool_max_per_host,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            rate_limit_rps: self.rate_limit_rps,
            ..TransportConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.client.rate_limit_rps, limits::DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.catalog.fetch_mode(), FetchMode::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_file_parses_to_defaults() {
        let content = AppConfig::generate_default_config_content();
        let parsed: AppConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed, AppConfig::default());
        assert!(content.contains("[catalog]"));
        assert!(content.contains("[client]"));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(temp_dir.path().join("nope.toml"))).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.toml");
        tokio::fs::write(
            &path,
            r#"
[catalog]
base_url = "https://cdn.example.org/library"
translation_fetch = "concurrent"
max_concurrent_translations = 2
"#,
        )
        .await
        .unwrap();

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config.catalog.base_url, "https://cdn.example.org/library");
        assert_eq!(
            config.catalog.fetch_mode(),
            FetchMode::Concurrent { limit: 2 }
        );
        assert_eq!(config.client, ClientConfigToml::default());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&path, "[catalog\nbase_url = 1").await.unwrap();

        let result = AppConfig::load_from_file(&path).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            (constants::env::BASE_URL, "http://localhost:8080"),
            (constants::env::LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.base_url, "http://localhost:8080");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = AppConfig::default();
        config.client.rate_limit_rps = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.catalog.max_concurrent_translations = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_write_default_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        assert!(AppConfig::write_default(&path).await.unwrap());
        tokio::fs::write(&path, "# edited").await.unwrap();
        assert!(!AppConfig::write_default(&path).await.unwrap());

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "# edited");
    }

    #[test]
    fn test_to_service_config() {
        let mut config = AppConfig::default();
        config.client.request_timeout_secs = 5;
        let service = config.to_service_config();
        assert_eq!(service.transport.request_timeout, Duration::from_secs(5));
        assert_eq!(service.base_url, config.catalog.base_url);
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
