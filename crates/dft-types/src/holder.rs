use crate::{AccountIdentifier, CodecError, Subaccount};
use candid::{CandidType, Principal};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

///
/// TokenHolder
///
/// Whoever can own a balance: a bare principal (default subaccount) or a
/// derived account identifier.
///

#[derive(
    CandidType, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum TokenHolder {
    Account(AccountIdentifier),
    Principal(Principal),
    None,
}

impl TokenHolder {
    /// Principal holders stay principals; a subaccount forces an account identifier.
    #[must_use]
    pub fn new(owner: Principal, subaccount: Option<Subaccount>) -> Self {
        match subaccount {
            Some(sub) => Self::Account(AccountIdentifier::new(owner, Some(sub))),
            None => Self::Principal(owner),
        }
    }

    /// The account identifier balances are keyed by, if any.
    #[must_use]
    pub fn account_identifier(&self) -> Option<AccountIdentifier> {
        match self {
            Self::Account(id) => Some(*id),
            Self::Principal(owner) => Some(AccountIdentifier::new(*owner, None)),
            Self::None => None,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl Display for TokenHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(id) => write!(f, "{id}"),
            Self::Principal(owner) => write!(f, "{owner}"),
            Self::None => Ok(()),
        }
    }
}

impl FromStr for TokenHolder {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(owner) = Principal::from_text(s) {
            return Ok(Self::Principal(owner));
        }

        AccountIdentifier::from_hex(s)
            .map(Self::Account)
            .map_err(|_| CodecError::InvalidTokenHolder(s.to_string()))
    }
}

impl From<Principal> for TokenHolder {
    fn from(owner: Principal) -> Self {
        Self::Principal(owner)
    }
}

impl From<AccountIdentifier> for TokenHolder {
    fn from(id: AccountIdentifier) -> Self {
        Self::Account(id)
    }
}

///
/// TESTS
///
