use crate::{
    CodecError,
    encoding::{from_hex, to_hex},
    subaccount::{DEFAULT_SUBACCOUNT, Subaccount, subaccount_from_slice},
};
use candid::{
    CandidType, Principal,
    types::{Serializer, Type, TypeInner},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224};
use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

///
/// Constants
///

/// Prefixed to every account hash so the owner bytes cannot collide with
/// other SHA-224 uses of the same principal.
pub const ACCOUNT_DOMAIN_SEPARATOR: &[u8] = b"\x0Aaccount-id";

pub const ACCOUNT_HASH_LEN: usize = 28;
pub const ACCOUNT_CHECKSUM_LEN: usize = 4;
pub const ACCOUNT_ID_LEN: usize = ACCOUNT_CHECKSUM_LEN + ACCOUNT_HASH_LEN;

///
/// AccountIdentifier
///
/// Backed by the 28-byte SHA-224 digest. The canonical form prepends the
/// big-endian CRC-32 of that digest, giving 32 bytes or 64 hex characters.
///
/// Serde and Candid always see the hex string.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AccountIdentifier {
    pub hash: [u8; ACCOUNT_HASH_LEN],
}

impl AccountIdentifier {
    #[must_use]
    pub fn new(owner: Principal, subaccount: Option<Subaccount>) -> Self {
        let subaccount = subaccount.as_ref().unwrap_or(DEFAULT_SUBACCOUNT);

        let mut hasher = Sha224::new();
        hasher.update(ACCOUNT_DOMAIN_SEPARATOR);
        hasher.update(owner.as_slice());
        hasher.update(subaccount);

        Self {
            hash: hasher.finalize().into(),
        }
    }

    /// Like [`Self::new`], for subaccounts that arrive as unchecked bytes.
    pub fn try_new(owner: Principal, subaccount: Option<&[u8]>) -> Result<Self, CodecError> {
        let subaccount = subaccount.map(subaccount_from_slice).transpose()?;

        Ok(Self::new(owner, subaccount))
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            hash: [0; ACCOUNT_HASH_LEN],
        }
    }

    #[must_use]
    pub fn generate_checksum(&self) -> [u8; ACCOUNT_CHECKSUM_LEN] {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.hash);

        hasher.finalize().to_be_bytes()
    }

    /// Canonical bytes: checksum followed by the hash.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ACCOUNT_ID_LEN] {
        let mut bytes = [0; ACCOUNT_ID_LEN];
        bytes[..ACCOUNT_CHECKSUM_LEN].copy_from_slice(&self.generate_checksum());
        bytes[ACCOUNT_CHECKSUM_LEN..].copy_from_slice(&self.hash);

        bytes
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        to_hex(&self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        let bytes = from_hex(s)?;

        Self::from_slice(&bytes)
    }

    /// Decode canonical bytes, rejecting any identifier whose checksum does not match.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != ACCOUNT_ID_LEN {
            return Err(CodecError::InvalidAccountIdLength {
                expected: ACCOUNT_ID_LEN,
                actual: bytes.len(),
            });
        }

        let (found, body) = bytes.split_at(ACCOUNT_CHECKSUM_LEN);
        let mut hash = [0; ACCOUNT_HASH_LEN];
        hash.copy_from_slice(body);

        let account_id = Self { hash };
        let expected = account_id.generate_checksum();

        if expected != found {
            return Err(CodecError::ChecksumMismatch {
                hex: to_hex(bytes),
                expected: to_hex(&expected),
                found: to_hex(found),
            });
        }

        Ok(account_id)
    }
}

impl Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// accepts principal text (default subaccount) or checksummed hex
impl FromStr for AccountIdentifier {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Principal::from_text(s) {
            Ok(principal) => Ok(Self::new(principal, None)),
            Err(_) => Self::from_hex(s),
        }
    }
}

impl From<Principal> for AccountIdentifier {
    fn from(owner: Principal) -> Self {
        Self::new(owner, None)
    }
}

impl From<Account> for AccountIdentifier {
    fn from(account: Account) -> Self {
        account.account_identifier()
    }
}

impl CandidType for AccountIdentifier {
    fn _ty() -> Type {
        TypeInner::Text.into()
    }

    fn idl_serialize<S>(&self, serializer: S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        self.to_hex().idl_serialize(serializer)
    }
}

impl Serialize for AccountIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

///
/// Account
///
/// Owner plus optional subaccount, the pre-image of an [`AccountIdentifier`].
/// A missing subaccount and the all-zero subaccount are the same account.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Account {
    pub owner: Principal,
    pub subaccount: Option<Subaccount>,
}

impl Account {
    #[must_use]
    pub const fn new(owner: Principal, subaccount: Option<Subaccount>) -> Self {
        Self { owner, subaccount }
    }

    /// Subaccount the ledger hashes: the explicit one, or all zeros.
    #[must_use]
    pub fn effective_subaccount(&self) -> &Subaccount {
        self.subaccount.as_ref().unwrap_or(DEFAULT_SUBACCOUNT)
    }

    #[must_use]
    pub fn account_identifier(&self) -> AccountIdentifier {
        AccountIdentifier::new(self.owner, Some(*self.effective_subaccount()))
    }
}

impl Eq for Account {}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.effective_subaccount() == other.effective_subaccount()
    }
}

impl From<Principal> for Account {
    fn from(owner: Principal) -> Self {
        Self::new(owner, None)
    }
}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.effective_subaccount().hash(state);
    }
}

///
/// TESTS
///
