//! Configuration loading and typed config structures.
//!
//! The configuration lives in `schoolfeed-config.yaml` in the working
//! directory. Every field has a default, so a missing file or section means
//! "run with defaults": an in-memory store served on port 8080.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default location of the configuration file.
pub const CONFIG_FILE: &str = "schoolfeed-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {value}")]
    Override {
        /// Environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
///
/// Mirrors the structure of `schoolfeed-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Document store selection and connection settings.
    #[serde(default)]
    pub store: StoreSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeedConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `DRAGONFLY_URL` overrides `store.dragonfly_url`
    /// - `SCHOOLFEED_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Override`] if an environment override is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load `schoolfeed-config.yaml` from the working directory, falling back
    /// to defaults (plus environment overrides) when it does not exist.
    ///
    /// # Errors
    ///
    /// See [`FeedConfig::from_file`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            return Self::from_file(path);
        }
        tracing::info!(path = CONFIG_FILE, "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if `SCHOOLFEED_PORT` is not a port.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("DRAGONFLY_URL") {
            self.store.dragonfly_url = url;
        }
        if let Some(port) = lookup("SCHOOLFEED_PORT") {
            self.server.port = port.parse().map_err(|_parse_error| ConfigError::Override {
                name: "SCHOOLFEED_PORT",
                value: port.clone(),
            })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which document store implementation to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process store; data is lost on restart.
    #[default]
    Memory,
    /// Shared `Dragonfly` instance.
    Dragonfly,
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreSettings {
    /// Store implementation.
    #[serde(default)]
    pub backend: StoreKind,

    /// Dragonfly (Redis-compatible) URL.
    #[serde(default = "default_dragonfly_url")]
    pub dragonfly_url: String,

    /// Prefix for every Dragonfly key.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Upper bound on a single store round-trip, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl StoreSettings {
    /// The request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreKind::default(),
            dragonfly_url: default_dragonfly_url(),
            namespace: default_namespace(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_dragonfly_url() -> String {
    String::from("redis://localhost:6379")
}

fn default_namespace() -> String {
    String::from("schoolfeed")
}

const fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    String::from("info")
}
