use candid::{CandidType, Nat};
use num_bigint::BigUint;
use num_traits::pow;
use serde::{Deserialize, Serialize};

///
/// TokenFee
///
/// transfer fee = max(minimum, amount * rate / 10^rate_decimals)
/// approve fee  = minimum
///

#[derive(
    CandidType, Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct TokenFee {
    pub minimum: Nat,
    pub rate: u32,
    #[serde(rename = "rateDecimals")]
    pub rate_decimals: u8,
}

impl TokenFee {
    pub fn new(minimum: impl Into<Nat>, rate: u32, rate_decimals: u8) -> Self {
        Self {
            minimum: minimum.into(),
            rate,
            rate_decimals,
        }
    }

    #[must_use]
    pub fn calc_approve_fee(&self, _amount: &Nat) -> Nat {
        self.minimum.clone()
    }

    #[must_use]
    pub fn calc_transfer_fee(&self, amount: &Nat) -> Nat {
        let divisor = pow(BigUint::from(10u8), usize::from(self.rate_decimals));
        let rate_fee = &amount.0 * BigUint::from(self.rate) / divisor;

        if rate_fee > self.minimum.0 {
            Nat(rate_fee)
        } else {
            self.minimum.clone()
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(n: u64) -> Nat {
        Nat::from(n)
    }

    #[test]
    fn approve_fee_is_minimum() {
        let fee = TokenFee::new(1u64, 1, 8);
        assert_eq!(fee.calc_approve_fee(&nat(1000)), nat(1));

        let fee = TokenFee::new(1u64, 1, 2);
        assert_eq!(fee.calc_approve_fee(&nat(1000)), nat(1));
    }

    #[test]
    fn transfer_fee_takes_larger_of_minimum_and_rate() {
        let fee = TokenFee::new(1u64, 1, 8);
        assert_eq!(fee.calc_transfer_fee(&nat(1000)), nat(1));

        let fee = TokenFee::new(1u64, 1, 2);
        assert_eq!(fee.calc_transfer_fee(&nat(1000)), nat(10));
    }

    #[test]
    fn rate_fee_truncates() {
        // 1999 * 1 / 100 = 19.99
        let fee = TokenFee::new(0u64, 1, 2);
        assert_eq!(fee.calc_transfer_fee(&nat(1999)), nat(19));
    }

    #[test]
    fn serde_uses_camel_case_rate_decimals() {
        let fee = TokenFee::new(5u64, 2, 8);
        let json = serde_json::to_value(&fee).unwrap();

        assert_eq!(json["rateDecimals"], 8);
        assert_eq!(json["rate"], 2);
    }
}
