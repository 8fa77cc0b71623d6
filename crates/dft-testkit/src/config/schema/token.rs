use super::{ConfigSchemaError, Validate};
use dft_types::{
    CodecError, DecimalAmount, Nat, TokenFee, to_base_units, to_base_units_exact, to_decimal,
};
use serde::{Deserialize, Serialize};

///
/// TokenConfig
///
/// Per-token metadata the harness needs to translate human amounts.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    pub decimals: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<FeeConfig>,
}

impl TokenConfig {
    /// Human amount to base units at this token's decimals.
    pub fn to_base_units(&self, amount: &str) -> Result<Nat, CodecError> {
        to_base_units(amount, u32::from(self.decimals))
    }

    /// Base units back to a human amount at this token's decimals.
    #[must_use]
    pub fn to_decimal(&self, base_units: &Nat, precision: Option<u32>) -> DecimalAmount {
        to_decimal(base_units, u32::from(self.decimals), precision)
    }

    /// The fee schedule in base units; the minimum must be exact at this token's decimals.
    pub fn token_fee(&self) -> Result<Option<TokenFee>, CodecError> {
        self.fee
            .as_ref()
            .map(|fee| {
                let minimum = to_base_units_exact(&fee.minimum, u32::from(self.decimals))?;

                Ok(TokenFee::new(minimum, fee.rate, fee.rate_decimals))
            })
            .transpose()
    }
}

impl Validate for TokenConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        self.token_fee()
            .map(|_| ())
            .map_err(|e| ConfigSchemaError::ValidationError(format!("fee.minimum: {e}")))
    }
}

///
/// FeeConfig
///
/// Fee schedule with the minimum written as a human amount.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeeConfig {
    pub minimum: DecimalAmount,

    #[serde(default)]
    pub rate: u32,

    #[serde(default = "defaults::rate_decimals")]
    pub rate_decimals: u8,
}

mod defaults {
    pub const fn rate_decimals() -> u8 {
        8
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn token(decimals: u8, minimum: &str) -> TokenConfig {
        TokenConfig {
            decimals,
            fee: Some(FeeConfig {
                minimum: minimum.parse().unwrap(),
                rate: 1,
                rate_decimals: 2,
            }),
        }
    }

    #[test]
    fn fee_minimum_scales_to_base_units() {
        let fee = token(8, "0.01").token_fee().unwrap().unwrap();

        assert_eq!(fee.minimum, Nat::from(1_000_000u64));
        assert_eq!(fee.calc_transfer_fee(&Nat::from(1000u64)), Nat::from(1_000_000u64));
    }

    #[test]
    fn inexact_fee_minimum_is_rejected() {
        let err = token(2, "0.001").validate().unwrap_err();
        assert!(err.to_string().contains("fee.minimum"));
    }

    #[test]
    fn amounts_use_token_decimals() {
        let cfg = token(8, "0");

        let base = cfg.to_base_units("1.5").unwrap();
        assert_eq!(base, Nat::from(150_000_000u64));
        assert_eq!(cfg.to_decimal(&base, None).to_string(), "1.5");
    }
}
