mod log;
mod token;

pub use log::*;
pub use token::*;

use crate::{identity::IdentityName, token::TokenVariant};
use candid::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

pub const NAME_MAX_BYTES: usize = 40;

fn validate_identity_name(name: &IdentityName) -> Result<(), ConfigSchemaError> {
    if name.as_str().is_empty() {
        return Err(ConfigSchemaError::ValidationError(
            "identity name must not be empty".to_string(),
        ));
    }

    if name.as_str().len() > NAME_MAX_BYTES {
        return Err(ConfigSchemaError::ValidationError(format!(
            "identity '{name}' exceeds {NAME_MAX_BYTES} bytes",
        )));
    }

    Ok(())
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// Defaults
///

mod defaults {
    use crate::identity::IdentityName;

    pub fn host() -> String {
        "http://127.0.0.1:8000".to_string()
    }

    pub const fn default_identity() -> IdentityName {
        IdentityName::MAIN
    }
}

///
/// KitConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KitConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::default_identity")]
    pub default_identity: IdentityName,

    #[serde(default)]
    pub identities: BTreeMap<IdentityName, Principal>,

    #[serde(default)]
    pub tokens: BTreeMap<TokenVariant, TokenConfig>,

    #[serde(default)]
    pub log: LogConfig,
}

impl KitConfig {
    /// Get a token configuration by variant.
    #[must_use]
    pub fn get_token(&self, variant: TokenVariant) -> Option<&TokenConfig> {
        self.tokens.get(&variant)
    }
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            default_identity: defaults::default_identity(),
            identities: BTreeMap::new(),
            tokens: BTreeMap::new(),
            log: LogConfig::default(),
        }
    }
}

impl Validate for KitConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.host.trim().is_empty() {
            return Err(ConfigSchemaError::ValidationError(
                "host must not be empty".to_string(),
            ));
        }

        validate_identity_name(&self.default_identity)?;
        for name in self.identities.keys() {
            validate_identity_name(name)?;
        }

        if !self.identities.is_empty() && !self.identities.contains_key(&self.default_identity) {
            return Err(ConfigSchemaError::ValidationError(format!(
                "default identity '{}' is not listed in identities",
                self.default_identity
            )));
        }

        for (variant, token) in &self.tokens {
            token
                .validate()
                .map_err(|ConfigSchemaError::ValidationError(msg)| {
                    ConfigSchemaError::ValidationError(format!("token '{variant}': {msg}"))
                })?;
        }

        Ok(())
    }
}
