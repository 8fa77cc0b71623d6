pub mod schema;

use schema::{ConfigSchemaError, Validate};
use thiserror::Error as ThisError;

pub use schema::{FeeConfig, KitConfig, LogConfig, TokenConfig};

/// Errors related to configuration parsing.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    #[error("toml serialize error: {0}")]
    CannotSerializeToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

impl KitConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Return the config as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::CannotSerializeToml(e.to_string()))
    }
}

///
/// TESTS
///
