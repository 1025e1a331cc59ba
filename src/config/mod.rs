//! Configuration module for the route tree tool.
//!
//! This module loads settings from files (TOML, YAML, JSON) and overrides
//! them with environment variables. All configuration values are validated
//! for correctness before use.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::config::ConfigError;

pub mod routes;

pub use routes::RouteConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "RTREE";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the route tree tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RtreeConfig {
    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,

    /// Routes registered in the tree, in registration order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl RtreeConfig {
    /// A configuration with a handful of sample routes, used by `gen-config`.
    pub fn sample() -> Self {
        Self {
            log: LogConfig::default(),
            routes: routes::sample_routes(),
        }
    }
}

impl Validate for RtreeConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.log.validate()?;
        routes::validate_routes(&self.routes)?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: false,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for the route tree tool.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, the file and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(RtreeConfig)` if the configuration was loaded and validated
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<RtreeConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&RtreeConfig::default()).map_err(map_source_error)?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };

            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(map_source_error)?;

        let rtree_config: RtreeConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        rtree_config.validate()?;

        tracing::debug!(routes = rtree_config.routes.len(), "configuration loaded");

        Ok(rtree_config)
    }
}

/// Maps an error from the `config` crate while building sources.
fn map_source_error(error: ExternalConfigError) -> ConfigError {
    match error {
        ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
        ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
            "{}: {cause}",
            uri.unwrap_or_else(|| "<unknown>".to_string())
        )),
        other => ConfigError::Other(other.to_string()),
    }
}
