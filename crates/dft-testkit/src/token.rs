use crate::TestkitError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

///
/// TokenVariant
///
/// The deployed token canisters a step can address. Step text names them by
/// canister name; the actor layer matches on the variant to pick its stub.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum TokenVariant {
    AllFeatures,
    Basic,
    Basic2,
    Burnable,
    BurnableMintable,
    Mintable,
}

impl TokenVariant {
    pub const ALL: [Self; 6] = [
        Self::AllFeatures,
        Self::Basic,
        Self::Basic2,
        Self::Burnable,
        Self::BurnableMintable,
        Self::Mintable,
    ];

    #[must_use]
    pub const fn canister_name(self) -> &'static str {
        match self {
            Self::AllFeatures => "dft_all_features",
            Self::Basic => "dft_basic",
            Self::Basic2 => "dft_basic2",
            Self::Burnable => "dft_burnable",
            Self::BurnableMintable => "dft_burnable_mintable",
            Self::Mintable => "dft_mintable",
        }
    }

    #[must_use]
    pub const fn supports_mint(self) -> bool {
        matches!(
            self,
            Self::AllFeatures | Self::BurnableMintable | Self::Mintable
        )
    }

    #[must_use]
    pub const fn supports_burn(self) -> bool {
        matches!(
            self,
            Self::AllFeatures | Self::BurnableMintable | Self::Burnable
        )
    }
}

impl Display for TokenVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canister_name())
    }
}

impl FromStr for TokenVariant {
    type Err = TestkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Self::ALL
            .into_iter()
            .find(|variant| variant.canister_name() == name)
            .ok_or_else(|| TestkitError::UnknownTokenVariant(name.to_string()))
    }
}

// canister names on the wire, so the variant can key TOML tables
impl Serialize for TokenVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.canister_name())
    }
}

impl<'de> Deserialize<'de> for TokenVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
