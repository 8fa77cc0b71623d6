//!
//! Named test identities and the accounts derived from them.
//!
//! The registry is an ordinary value built once by the harness and passed to
//! step code by reference. Key material stays with whatever produced the
//! principals; only the principal is kept here.
//!

use crate::{
    TestkitError,
    config::KitConfig,
    log::{Logger, Topic},
};
use candid::{CandidType, Principal};
use derive_more::Display;
use dft_types::{Account, AccountIdentifier, Subaccount, TokenHolder, subaccount_from_byte};
use serde::{Deserialize, Serialize};
use std::{
    borrow::{Borrow, Cow},
    collections::BTreeMap,
};

///
/// IdentityName
///
/// Stored as `Cow<'static, str>` so known constants can be zero-copy while
/// dynamic values allocate only when needed.
///

#[derive(
    CandidType, Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct IdentityName(pub Cow<'static, str>);

impl IdentityName {
    pub const MAIN: Self = Self(Cow::Borrowed("dft_main"));
    pub const MINER: Self = Self(Cow::Borrowed("dft_miner"));
    pub const RECEIVER: Self = Self(Cow::Borrowed("dft_receiver"));
    pub const FEE_CHARGER: Self = Self(Cow::Borrowed("dft_fee_charger"));

    #[must_use]
    pub const fn new(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    #[must_use]
    pub const fn owned(s: String) -> Self {
        Self(Cow::Owned(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IdentityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for IdentityName {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for IdentityName {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

/// Identity names the step definitions expect to exist.
pub const DEFAULT_IDENTITIES: &[&str] = &[
    "dft_main",
    "dft_miner",
    "dft_user1",
    "dft_user2",
    "dft_user3",
    "dft_user4",
    "dft_user5",
    "dft_user6",
    "dft_user7",
    "dft_user8",
    "dft_user9",
    "dft_user10",
    "dft_user11",
    "dft_user12",
    "dft_user13",
    "dft_receiver",
    "dft_fee_charger",
];

///
/// IdentityRegistry
///

#[derive(Clone, Debug)]
pub struct IdentityRegistry {
    default: IdentityName,
    principals: BTreeMap<IdentityName, Principal>,
    logger: Logger,
}

impl IdentityRegistry {
    #[must_use]
    pub fn new(default: impl Into<IdentityName>) -> Self {
        Self {
            default: default.into(),
            principals: BTreeMap::new(),
            logger: Logger::default(),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Build a registry holding every identity listed in the config.
    pub fn from_config(config: &KitConfig) -> Result<Self, TestkitError> {
        let mut registry =
            Self::new(config.default_identity.clone()).with_logger(config.log.logger());

        for (name, principal) in &config.identities {
            registry.register(name.clone(), *principal)?;
        }

        Ok(registry)
    }

    /// Add an identity; returns its default account identifier.
    pub fn register(
        &mut self,
        name: impl Into<IdentityName>,
        principal: Principal,
    ) -> Result<AccountIdentifier, TestkitError> {
        let name = name.into();
        if self.principals.contains_key(&name) {
            return Err(TestkitError::DuplicateIdentity(name.to_string()));
        }

        let account_id = AccountIdentifier::new(principal, None);
        crate::log!(
            self.logger,
            Topic::Identity,
            Info,
            "registered {name} principal={principal} account={account_id}"
        );

        self.principals.insert(name, principal);

        Ok(account_id)
    }

    #[must_use]
    pub const fn default_name(&self) -> &IdentityName {
        &self.default
    }

    pub fn names(&self) -> impl Iterator<Item = &IdentityName> {
        self.principals.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.principals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    /// Principal for `name`, or for the default identity when `name` is `None`.
    pub fn principal(&self, name: Option<&str>) -> Result<Principal, TestkitError> {
        let name = name.unwrap_or_else(|| self.default.as_str());

        self.principals
            .get(name)
            .copied()
            .ok_or_else(|| TestkitError::UnknownIdentity(name.to_string()))
    }

    /// Subaccount `index` of any identity; index 0 is the default subaccount.
    #[must_use]
    pub const fn subaccount(index: u8) -> Subaccount {
        subaccount_from_byte(index)
    }

    pub fn account(&self, name: Option<&str>, index: u8) -> Result<Account, TestkitError> {
        let owner = self.principal(name)?;

        Ok(Account::new(owner, Some(Self::subaccount(index))))
    }

    pub fn account_id(
        &self,
        name: Option<&str>,
        index: u8,
    ) -> Result<AccountIdentifier, TestkitError> {
        Ok(self.account(name, index)?.account_identifier())
    }

    pub fn account_id_hex(&self, name: Option<&str>, index: u8) -> Result<String, TestkitError> {
        Ok(self.account_id(name, index)?.to_hex())
    }

    /// Principal holder without an index, account holder with one.
    pub fn token_holder(
        &self,
        name: Option<&str>,
        index: Option<u8>,
    ) -> Result<TokenHolder, TestkitError> {
        let owner = self.principal(name)?;

        Ok(TokenHolder::new(owner, index.map(Self::subaccount)))
    }
}

///
/// TESTS
///
