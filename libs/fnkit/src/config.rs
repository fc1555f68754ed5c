//! Typed configuration.
//!
//! Layered with `figment`, lowest priority first:
//!
//! 1. built-in defaults (`FnkitConfig::default()`)
//! 2. an optional YAML file
//! 3. environment variables prefixed with `FNKIT__`, `__` separating nested
//!    keys (`FNKIT__ACCUMULATOR__K1=5`)
//!
//! CLI overrides are applied by the binary on top of the extracted value.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::accumulator::{AccumulatorConstants, OverflowPolicy};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FNKIT__";

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Configuration error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FnkitConfig {
    pub accumulator: AccumulatorConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// Constants and overflow policy for accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccumulatorConfig {
    pub k1: i64,
    pub k2: i64,
    pub overflow: OverflowPolicy,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        let constants = AccumulatorConstants::default();
        Self {
            k1: constants.k1,
            k2: constants.k2,
            overflow: OverflowPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Preload `add`, `subtract` and `multiply`.
    pub builtins: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { builtins: true }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level, used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl FnkitConfig {
    /// Builds the layered figment without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads defaults, the optional YAML file and environment overrides.
    ///
    /// # Errors
    /// Returns `ConfigError::FileNotFound` if `path` is given but is not a file,
    /// `ConfigError::Invalid` if any layer fails to deserialize, and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.is_file()
        {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let config: Self = Self::figment(path).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::InvalidValue` for an unknown logging level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !KNOWN_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!(
                    "'{}' is not one of {}",
                    self.logging.level,
                    KNOWN_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}
