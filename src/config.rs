//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::series::Period;
use crate::source::{AssetClientConfig, DEFAULT_SOURCE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// History endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,

    /// `0` waits indefinitely
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn client_config(&self) -> AssetClientConfig {
        AssetClientConfig {
            url: self.url.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub default_period: Period,
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    590
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            default_period: Period::default(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tvl-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = lookup("TVL_SOURCE_URL") {
            self.source.url = url;
        }
        if let Some(timeout) = lookup("TVL_REQUEST_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(t) => self.source.request_timeout_secs = t,
                Err(_) => tracing::warn!("Ignoring invalid TVL_REQUEST_TIMEOUT_SECS: {}", timeout),
            }
        }

        // Chart overrides
        if let Some(period) = lookup("TVL_DEFAULT_PERIOD") {
            match period.parse() {
                Ok(p) => self.chart.default_period = p,
                Err(e) => tracing::warn!("Ignoring TVL_DEFAULT_PERIOD: {}", e),
            }
        }

        // Server overrides
        if let Some(host) = lookup("TVL_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TVL_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("TVL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TVL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# TVL Dashboard Configuration
#
# Environment variables override these settings:
# - TVL_SOURCE_URL
# - TVL_REQUEST_TIMEOUT_SECS
# - TVL_DEFAULT_PERIOD
# - TVL_SERVER_HOST
# - TVL_SERVER_PORT
# - TVL_LOG_LEVEL
# - TVL_LOG_FORMAT

[source]
# Asset details endpoint returning farm, asset and tvlStakedHistory
url = "{url}"

# Request timeout in seconds (0 = wait indefinitely)
request_timeout_secs = 30

[chart]
# Chart size in pixels
width = 1080
height = 590

# Initially selected lookback window: 7, 14, 30 or 90 days
default_period = 7

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8090

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        url = DEFAULT_SOURCE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.request_timeout_secs, 30);
        assert_eq!(config.chart.width, 1080);
        assert_eq!(config.chart.height, 590);
        assert_eq!(config.chart.default_period, Period::Week);
        assert_eq!(config.server.addr(), "127.0.0.1:8090");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(Path::new("generated"), &generate_default_config()).unwrap();
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.chart.default_period, Period::Week);
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[chart]\ndefault_period = 30\n\n[server]\nport = 9000\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.chart.default_period, Period::Month);
        assert_eq!(config.chart.width, 1080);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_period_rejected() {
        let result = Config::parse(Path::new("bad"), "[chart]\ndefault_period = 10\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("TVL_SOURCE_URL", "http://localhost:9999/asset"),
            ("TVL_REQUEST_TIMEOUT_SECS", "0"),
            ("TVL_DEFAULT_PERIOD", "90d"),
            ("TVL_SERVER_PORT", "not-a-port"),
            ("TVL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.url, "http://localhost:9999/asset");
        assert_eq!(config.source.request_timeout_secs, 0);
        assert_eq!(config.chart.default_period, Period::Quarter);
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_client_config() {
        let config = SourceConfig {
            url: "http://example.test".to_string(),
            request_timeout_secs: 5,
        };
        let client = config.client_config();
        assert_eq!(client.url, "http://example.test");
        assert_eq!(client.request_timeout_secs, 5);
    }
}
