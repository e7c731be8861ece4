//! Configuration for the echomap engine
//!
//! Configuration is layered: builder-supplied defaults, then an optional
//! TOML file, then `ECHOMAP_*` environment variables. Nested fields use a
//! double underscore in the environment, e.g.
//! `ECHOMAP_DISCOVERY__DEFAULT_RADIUS=2.5`.

use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source failed to load or merge
    #[error("Configuration error: {0}")]
    Load(#[from] figment::Error),
}

/// Log verbosity levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by the tracing filter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted
    pub level: LogLevel,

    /// Output format
    pub format: LogFormat,

    /// Whether to install a stdout subscriber at all
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            stdout: true,
        }
    }
}

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Radius applied to nearby queries that do not supply one.
    ///
    /// Measured in degree-units against the engine's planar distance, not in
    /// kilometers.
    pub default_radius: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { default_radius: 10.0 }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EchomapConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Discovery configuration
    pub discovery: DiscoveryConfig,
}

/// Builder for [`EchomapConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: EchomapConfig,
    file: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Create a builder carrying the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default nearby-search radius in degree-units
    pub fn with_default_radius(mut self, radius: f64) -> Self {
        self.config.discovery.default_radius = radius;
        self
    }

    /// Set the minimum log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log output format
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Disable the stdout log subscriber
    pub fn without_stdout_logging(mut self) -> Self {
        self.config.logging.stdout = false;
        self
    }

    /// Merge a TOML configuration file over the builder values
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Resolve the final configuration.
    ///
    /// Precedence, lowest to highest: builder values, TOML file, environment.
    pub fn build(self) -> Result<EchomapConfig, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(self.config));

        if let Some(file) = self.file {
            figment = figment.merge(Toml::file(file));
        }

        figment = figment.merge(Env::prefixed("ECHOMAP_").split("__"));

        Ok(figment.extract()?)
    }
}
