use crate::CodecError;

///
/// Subaccount
///

pub type Subaccount = [u8; 32];

pub const SUBACCOUNT_LEN: usize = 32;

pub const DEFAULT_SUBACCOUNT: &Subaccount = &[0; SUBACCOUNT_LEN];

/// Subaccount whose first byte is `tag` and the rest zero.
#[must_use]
pub const fn subaccount_from_byte(tag: u8) -> Subaccount {
    let mut subaccount = [0; SUBACCOUNT_LEN];
    subaccount[0] = tag;

    subaccount
}

/// Subaccount for a numeric tag; tags wider than one byte are rejected, never truncated.
pub fn derive_subaccount(tag: u32) -> Result<Subaccount, CodecError> {
    let byte = u8::try_from(tag).map_err(|_| CodecError::SubaccountTagOutOfRange { tag })?;

    Ok(subaccount_from_byte(byte))
}

/// Copy a caller-supplied slice into a subaccount, checking the length.
pub fn subaccount_from_slice(bytes: &[u8]) -> Result<Subaccount, CodecError> {
    Subaccount::try_from(bytes).map_err(|_| CodecError::InvalidSubaccountLength {
        expected: SUBACCOUNT_LEN,
        actual: bytes.len(),
    })
}

#[must_use]
pub fn is_default_subaccount(subaccount: &Subaccount) -> bool {
    subaccount == DEFAULT_SUBACCOUNT
}

///
/// TESTS
///
