use crate::{config::ConfigError, token::TokenVariant};
use dft_types::CodecError;
use thiserror::Error as ThisError;

///
/// TestkitError
///

#[derive(Debug, ThisError)]
pub enum TestkitError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("identity '{0}' is already registered")]
    DuplicateIdentity(String),

    #[error("token '{0}' has no configuration")]
    TokenNotConfigured(TokenVariant),

    #[error("unknown identity '{0}'")]
    UnknownIdentity(String),

    #[error("unknown token variant '{0}'")]
    UnknownTokenVariant(String),
}
