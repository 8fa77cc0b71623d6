use derive_more::Display;
use thiserror::Error as ThisError;

///
/// CodecError
///
/// Validation failures raised by the account and amount codecs.
///
/// Every variant is a pure input problem: nothing here is transient, so
/// callers should surface it rather than retry. Use [`CodecError::class`]
/// when only the broad category matters.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("subaccount must be {expected} bytes, got {actual}")]
    InvalidSubaccountLength { expected: usize, actual: usize },

    #[error("subaccount tag {tag} is out of range (expected 0..=255)")]
    SubaccountTagOutOfRange { tag: u32 },

    #[error("amount '{amount}' is negative")]
    NegativeAmount { amount: String },

    #[error("amount '{amount}' is not a decimal numeral: {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("amount '{amount}' has more fractional digits than {decimals} decimals allow")]
    PrecisionLoss { amount: String, decimals: u32 },

    #[error("hex string has odd length {len}")]
    InvalidHexLength { len: usize },

    #[error("invalid hex character {ch:?} at position {index}")]
    InvalidHexCharacter { ch: char, index: usize },

    #[error("account identifier must be {expected} bytes, got {actual}")]
    InvalidAccountIdLength { expected: usize, actual: usize },

    #[error("checksum failed for {hex}, expected check bytes {expected} but found {found}")]
    ChecksumMismatch {
        hex: String,
        expected: String,
        found: String,
    },

    #[error("invalid token holder format: '{0}'")]
    InvalidTokenHolder(String),
}

impl CodecError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSubaccountLength { .. }
            | Self::SubaccountTagOutOfRange { .. }
            | Self::NegativeAmount { .. }
            | Self::InvalidAmount { .. }
            | Self::PrecisionLoss { .. } => ErrorClass::InvalidArgument,

            Self::InvalidHexLength { .. }
            | Self::InvalidHexCharacter { .. }
            | Self::InvalidAccountIdLength { .. }
            | Self::ChecksumMismatch { .. }
            | Self::InvalidTokenHolder(_) => ErrorClass::MalformedInput,
        }
    }

    pub(crate) fn invalid_amount(amount: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidAmount {
            amount: amount.into(),
            reason: reason.to_string(),
        }
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    /// A caller-supplied value is outside the accepted domain.
    InvalidArgument,

    /// Encoded text or bytes could not be decoded.
    MalformedInput,
}

///
/// TESTS
///
