//!
//! Lowercase hex helpers shared by the account codecs.
//!

use crate::CodecError;

/// Render bytes as lowercase hex, two characters per byte, no prefix.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string. Upper and lower case digits may be mixed.
pub fn from_hex(s: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(s).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            CodecError::InvalidHexCharacter { ch: c, index }
        }
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            CodecError::InvalidHexLength { len: s.len() }
        }
    })
}

///
/// TESTS
///
