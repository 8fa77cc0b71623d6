//!
//! Exact conversion between human decimal amounts and integer base units.
//!
//! Every multiplication or division by `10^decimals` is a shift of the decimal
//! scale; no value ever passes through binary floating point. Where a result
//! must lose digits the rounding is round-half-up and always explicit:
//! [`to_base_units`] rounds, [`to_base_units_exact`] refuses.
//!

use crate::CodecError;
use bigdecimal::BigDecimal;
use candid::{
    CandidType, Nat,
    types::{Serializer, Type, TypeInner},
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

///
/// AmountInput
///
/// Anything a caller may hand over as a human amount. Floats are taken via
/// their shortest round-trip text, so `0.1` means exactly one tenth.
///

#[derive(Clone, Debug)]
pub enum AmountInput {
    Text(String),
    Integer(u128),
    Float(f64),
    Decimal(BigDecimal),
}

impl AmountInput {
    fn parse(self) -> Result<(BigDecimal, String), CodecError> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                let value = parse_numeral(trimmed)?;

                Ok((value, trimmed.to_string()))
            }
            Self::Integer(n) => Ok((BigDecimal::new(BigInt::from(n), 0), n.to_string())),
            Self::Float(f) if f.is_finite() => {
                let text = f.to_string();
                let value = parse_numeral(&text)?;

                Ok((value, text))
            }
            Self::Float(f) => Err(CodecError::invalid_amount(
                f.to_string(),
                "not a finite number",
            )),
            Self::Decimal(value) => {
                // BigDecimal's own rendering switches to exponent form for wide scales
                let text = value.to_string();

                Ok((value, text))
            }
        }
    }
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for AmountInput {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<u64> for AmountInput {
    fn from(n: u64) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u128> for AmountInput {
    fn from(n: u128) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for AmountInput {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<BigDecimal> for AmountInput {
    fn from(d: BigDecimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<DecimalAmount> for AmountInput {
    fn from(d: DecimalAmount) -> Self {
        Self::Decimal(d.0)
    }
}

impl From<&DecimalAmount> for AmountInput {
    fn from(d: &DecimalAmount) -> Self {
        Self::Decimal(d.0.clone())
    }
}

// -----------------------------------------------------------------------------
// Human -> base units
// -----------------------------------------------------------------------------

/// Scale a human amount up to base units, rounding any excess fraction half-up.
pub fn to_base_units(amount: impl Into<AmountInput>, decimals: u32) -> Result<Nat, CodecError> {
    scale_up(amount.into(), decimals, Rounding::HalfUp)
}

/// Scale a human amount up to base units, failing if a fraction would be left over.
pub fn to_base_units_exact(
    amount: impl Into<AmountInput>,
    decimals: u32,
) -> Result<Nat, CodecError> {
    scale_up(amount.into(), decimals, Rounding::Refuse)
}

#[derive(Clone, Copy)]
enum Rounding {
    HalfUp,
    Refuse,
}

fn scale_up(amount: AmountInput, decimals: u32, rounding: Rounding) -> Result<Nat, CodecError> {
    let (value, text) = amount.parse()?;
    if value.is_negative() {
        return Err(CodecError::NegativeAmount { amount: text });
    }

    // sign was checked above; "-0" leaves a zero magnitude
    let (digits, scale) = value.into_bigint_and_exponent();
    let (_, magnitude) = digits.into_parts();

    let Some(scale) = scale.checked_sub(i64::from(decimals)) else {
        return Err(CodecError::invalid_amount(text, "exponent out of range"));
    };

    let magnitude = if scale <= 0 {
        match shift_left(magnitude, scale.unsigned_abs()) {
            Some(shifted) => shifted,
            None => return Err(CodecError::invalid_amount(text, "exponent out of range")),
        }
    } else {
        match rounding {
            Rounding::HalfUp => round_half_up(&magnitude, scale.unsigned_abs()),
            Rounding::Refuse => {
                let (quotient, remainder) = div_rem_pow10(&magnitude, scale.unsigned_abs());
                if !remainder.is_zero() {
                    return Err(CodecError::PrecisionLoss {
                        amount: text,
                        decimals,
                    });
                }
                quotient
            }
        }
    };

    Ok(Nat(magnitude))
}

/// Largest decimal exponent (in either direction) an amount may carry when it
/// is scaled up or parsed into a [`DecimalAmount`].
pub const MAX_EXPONENT: u16 = u16::MAX;

// optional sign, digits with an optional fraction, optional signed exponent
fn is_decimal_numeral(text: &str) -> bool {
    fn all_digits(s: &str) -> bool {
        s.bytes().all(|b| b.is_ascii_digit())
    }

    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (mantissa, ""),
    };

    let mantissa_ok = all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty());
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && all_digits(e)
    });

    mantissa_ok && exponent_ok
}

fn parse_numeral(text: &str) -> Result<BigDecimal, CodecError> {
    if !is_decimal_numeral(text) {
        return Err(CodecError::invalid_amount(text, "malformed decimal numeral"));
    }

    BigDecimal::from_str(text).map_err(|e| CodecError::invalid_amount(text, e))
}

// -----------------------------------------------------------------------------
// Base units -> human
// -----------------------------------------------------------------------------

/// Scale base units down to a human amount, optionally rounded to
/// `precision` significant digits. `Some(0)` leaves the value untouched.
#[must_use]
pub fn to_decimal(base_units: &Nat, decimals: u32, precision: Option<u32>) -> DecimalAmount {
    let amount = DecimalAmount::from_base_units(base_units, decimals);

    match precision {
        Some(p) if p > 0 => amount.round_significant(p),
        _ => amount,
    }
}

/// Scale base units down to a human amount rounded to `places` fractional digits.
#[must_use]
pub fn to_decimal_places(base_units: &Nat, decimals: u32, places: u32) -> DecimalAmount {
    DecimalAmount::from_base_units(base_units, decimals).round_places(places)
}

///
/// DecimalAmount
///
/// Exact human-readable amount. Compares by value, so `1.50 == 1.5`, and
/// always renders in plain normalized form (`1.5`, `1000`, `0`).
///
/// Candid and serde encode this as `text`.
///

#[derive(Clone, Debug, Default)]
pub struct DecimalAmount(BigDecimal);

impl DecimalAmount {
    #[must_use]
    pub fn from_base_units(base_units: &Nat, decimals: u32) -> Self {
        let digits = BigInt::from_biguint(Sign::Plus, base_units.0.clone());

        Self(BigDecimal::new(digits, i64::from(decimals)))
    }

    #[must_use]
    pub const fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    /// Round to `precision` significant digits, half away from zero, then
    /// normalize.
    #[must_use]
    pub fn round_significant(&self, precision: u32) -> Self {
        let (digits, scale) = self.normalized_parts();
        if digits.is_zero() || precision == 0 {
            return Self(BigDecimal::new(digits, scale));
        }

        let len = u64::try_from(digit_count(digits.magnitude())).unwrap_or(u64::MAX);
        if len <= u64::from(precision) {
            return Self(BigDecimal::new(digits, scale));
        }

        // parsed amounts keep |scale| <= MAX_EXPONENT, so this cannot saturate
        let drop = len - u64::from(precision);
        let rounded = round_signed(&digits, drop);

        Self(BigDecimal::new(rounded, scale.saturating_sub_unsigned(drop))).normalized()
    }

    /// Round to `places` fractional digits, half away from zero, then normalize.
    #[must_use]
    pub fn round_places(&self, places: u32) -> Self {
        let (digits, scale) = self.normalized_parts();
        let places = i64::from(places);
        if scale <= places {
            return Self(BigDecimal::new(digits, scale));
        }

        let drop = (scale - places).unsigned_abs();
        let rounded = round_signed(&digits, drop);

        Self(BigDecimal::new(rounded, places)).normalized()
    }

    /// Strip trailing fractional zeros.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (digits, scale) = self.normalized_parts();

        Self(BigDecimal::new(digits, scale))
    }

    fn normalized_parts(&self) -> (BigInt, i64) {
        let (mut digits, mut scale) = self.0.as_bigint_and_exponent();
        if digits.is_zero() {
            return (digits, 0);
        }

        let ten = BigInt::from(10u8);
        while scale > 0 && (&digits % &ten).is_zero() {
            digits /= &ten;
            scale -= 1;
        }

        (digits, scale)
    }
}

impl Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (digits, scale) = self.normalized_parts();
        let negative = digits.is_negative();
        let mut plain = digits.magnitude().to_string();

        match usize::try_from(scale) {
            Ok(0) => {}
            Ok(scale) => {
                if plain.len() <= scale {
                    plain.insert_str(0, &"0".repeat(scale - plain.len() + 1));
                }
                plain.insert(plain.len() - scale, '.');
            }
            // negative scale: the value is an integer with implied trailing zeros
            Err(_) => {
                let zeros = usize::try_from(scale.unsigned_abs()).unwrap_or(0);
                plain.push_str(&"0".repeat(zeros));
            }
        }

        if negative {
            f.write_str("-")?;
        }
        f.write_str(&plain)
    }
}

impl FromStr for DecimalAmount {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Self::try_from(parse_numeral(trimmed)?)
    }
}

impl TryFrom<BigDecimal> for DecimalAmount {
    type Error = CodecError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        let (_, scale) = value.as_bigint_and_exponent();
        if scale.unsigned_abs() > u64::from(MAX_EXPONENT) {
            return Err(CodecError::invalid_amount(
                value.to_string(),
                "exponent out of range",
            ));
        }

        Ok(Self(value))
    }
}

impl From<u64> for DecimalAmount {
    fn from(value: u64) -> Self {
        Self(BigDecimal::new(BigInt::from(value), 0))
    }
}

impl PartialEq for DecimalAmount {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for DecimalAmount {}

impl PartialEq<&str> for DecimalAmount {
    fn eq(&self, other: &&str) -> bool {
        other.parse::<Self>().is_ok_and(|o| *self == o)
    }
}

impl Ord for DecimalAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for DecimalAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CandidType for DecimalAmount {
    fn _ty() -> Type {
        TypeInner::Text.into()
    }

    fn idl_serialize<S>(&self, serializer: S) -> Result<(), S::Error>
    where
        S: Serializer,
    {
        self.to_string().idl_serialize(serializer)
    }
}

impl Serialize for DecimalAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DecimalAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(serde::de::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// Digit arithmetic
// -----------------------------------------------------------------------------

// Powers are only built for exponents bounded by MAX_EXPONENT or by the digit
// count of a value already in memory.

fn pow10(exp: usize) -> BigUint {
    num_traits::pow(BigUint::from(10u8), exp)
}

fn digit_count(n: &BigUint) -> usize {
    n.to_string().len()
}

// `None` when the shift exceeds MAX_EXPONENT
fn shift_left(n: BigUint, exp: u64) -> Option<BigUint> {
    if n.is_zero() || exp == 0 {
        return Some(n);
    }
    if exp > u64::from(MAX_EXPONENT) {
        return None;
    }

    Some(n * pow10(usize::try_from(exp).ok()?))
}

fn div_rem_pow10(n: &BigUint, exp: u64) -> (BigUint, BigUint) {
    match usize::try_from(exp) {
        Ok(exp) if exp <= digit_count(n) => {
            let divisor = pow10(exp);

            (n / &divisor, n % &divisor)
        }
        // divisor wider than the value
        _ => (BigUint::zero(), n.clone()),
    }
}

// ties go up
fn round_half_up(n: &BigUint, exp: u64) -> BigUint {
    match usize::try_from(exp) {
        Ok(exp) if exp <= digit_count(n) => {
            let divisor = pow10(exp);
            let (quotient, remainder) = (n / &divisor, n % &divisor);

            if remainder * 2u8 >= divisor {
                quotient + 1u8
            } else {
                quotient
            }
        }
        // n < 10^(exp - 1), always below half the divisor
        _ => BigUint::zero(),
    }
}

// rounds the magnitude, so ties go away from zero
fn round_signed(digits: &BigInt, exp: u64) -> BigInt {
    BigInt::from_biguint(digits.sign(), round_half_up(digits.magnitude(), exp))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorClass;

    fn nat(n: u128) -> Nat {
        Nat::from(n)
    }

    #[test]
    fn scales_human_amount_to_base_units() {
        assert_eq!(to_base_units("1.5", 8).unwrap(), nat(150_000_000));
        assert_eq!(to_base_units("12.5", 17).unwrap(), nat(1_250_000_000_000_000_000));
        assert_eq!(to_base_units("0.1", 1).unwrap(), nat(1));
    }

    #[test]
    fn zero_decimals_is_identity() {
        assert_eq!(to_base_units("42", 0).unwrap(), nat(42));
        assert_eq!(to_decimal(&nat(42), 0, None).to_string(), "42");
    }

    #[test]
    fn zero_is_zero_for_any_decimals() {
        for d in [0, 1, 8, 18, 24, 40] {
            assert_eq!(to_base_units("0", d).unwrap(), nat(0));
        }
        assert_eq!(to_base_units("-0", 8).unwrap(), nat(0));
    }

    #[test]
    fn accepts_numbers() {
        assert_eq!(to_base_units(0.1_f64, 18).unwrap(), nat(100_000_000_000_000_000));
        assert_eq!(to_base_units(3_u64, 2).unwrap(), nat(300));
        assert_eq!(to_base_units(7_u128, 0).unwrap(), nat(7));
    }

    #[test]
    fn accepts_exponent_notation() {
        assert_eq!(to_base_units("1e3", 0).unwrap(), nat(1000));
        assert_eq!(to_base_units("2.5E-1", 2).unwrap(), nat(25));
    }

    #[test]
    fn large_decimals_keep_precision() {
        let base = to_base_units("123456789.123456789123456789", 30).unwrap();
        assert_eq!(
            base.0.to_string(),
            "123456789123456789123456789000000000000"
        );
    }

    #[test]
    fn excess_fraction_rounds_half_up() {
        assert_eq!(to_base_units("1.25", 1).unwrap(), nat(13));
        assert_eq!(to_base_units("1.24", 1).unwrap(), nat(12));
        assert_eq!(to_base_units("0.5", 0).unwrap(), nat(1));
        assert_eq!(to_base_units("0.49", 0).unwrap(), nat(0));
    }

    #[test]
    fn exact_variant_refuses_to_round() {
        let err = to_base_units_exact("1.25", 1).unwrap_err();
        assert_eq!(
            err,
            CodecError::PrecisionLoss {
                amount: "1.25".to_string(),
                decimals: 1
            }
        );
        assert_eq!(to_base_units_exact("1.20", 1).unwrap(), nat(12));
    }

    #[test]
    fn negative_amount_is_invalid() {
        let err = to_base_units("-1", 8).unwrap_err();
        assert_eq!(
            err,
            CodecError::NegativeAmount {
                amount: "-1".to_string()
            }
        );
        assert_eq!(err.class(), ErrorClass::InvalidArgument);
    }

    #[test]
    fn malformed_amount_is_invalid() {
        for bad in [
            "", "abc", "1.2.3", "1,5", "1_000", "1__5", "1e", "e5", ".", "--1", "1e+", "0x10",
        ] {
            let err = to_base_units(bad, 8).unwrap_err();
            assert_eq!(err.class(), ErrorClass::InvalidArgument, "input {bad:?}");
        }

        let err = to_base_units(f64::NAN, 8).unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidArgument);
    }

    #[test]
    fn extreme_exponents_never_overflow() {
        let err = to_base_units("1e9223372036854775807", 8).unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidArgument);

        let err = to_base_units("1e100000", 0).unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidArgument);

        // far below one base unit: rounds to zero without building 10^5000000000
        assert_eq!(to_base_units("1e-5000000000", 0).unwrap(), nat(0));
        assert!(matches!(
            to_base_units_exact("1e-5000000000", 0).unwrap_err(),
            CodecError::PrecisionLoss { .. }
        ));
        assert_eq!(to_base_units("0e-5000000000", 8).unwrap(), nat(0));
        assert_eq!(to_base_units("6e-1", 0).unwrap(), nat(1));
    }

    #[test]
    fn decimal_amount_rejects_extreme_exponents() {
        let err = "123456e9223372036854775807"
            .parse::<DecimalAmount>()
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::InvalidArgument);

        let d: DecimalAmount = "123456e60000".parse().unwrap();
        let expected: DecimalAmount = "1.2e60005".parse().unwrap();
        assert_eq!(d.round_significant(2), expected);
    }

    #[test]
    fn negative_values_round_away_from_zero() {
        let d: DecimalAmount = "-1.25".parse().unwrap();
        assert_eq!(d.round_significant(2).to_string(), "-1.3");
        assert_eq!(d.round_places(1).to_string(), "-1.3");

        let d: DecimalAmount = "-1.24".parse().unwrap();
        assert_eq!(d.round_significant(2).to_string(), "-1.2");
        assert_eq!(d.round_places(0).to_string(), "-1");

        let d: DecimalAmount = "-0.004".parse().unwrap();
        assert_eq!(d.round_places(2).to_string(), "0");
    }

    #[test]
    fn base_units_to_decimal() {
        assert_eq!(to_decimal(&nat(150_000_000), 8, None).to_string(), "1.5");
        assert_eq!(to_decimal(&nat(1), 18, None).to_string(), "0.000000000000000001");
        assert_eq!(to_decimal(&nat(0), 18, None).to_string(), "0");
        assert_eq!(to_decimal(&nat(1_000_000), 2, None).to_string(), "10000");
        assert!(to_decimal(&nat(150_000_000), 8, None) == "1.50");
    }

    #[test]
    fn precision_rounds_significant_digits() {
        assert_eq!(to_decimal(&nat(1_234_567), 2, Some(3)).to_string(), "12300");
        assert_eq!(to_decimal(&nat(123_456), 4, Some(4)).to_string(), "12.35");
        assert_eq!(to_decimal(&nat(999_999), 6, Some(2)).to_string(), "1");
        assert_eq!(to_decimal(&nat(150_000_000), 8, Some(5)).to_string(), "1.5");
        assert_eq!(to_decimal(&nat(123_456), 4, Some(0)).to_string(), "12.3456");
    }

    #[test]
    fn places_round_fractional_digits() {
        assert_eq!(to_decimal_places(&nat(123_456), 4, 2).to_string(), "12.35");
        assert_eq!(to_decimal_places(&nat(123_446), 4, 2).to_string(), "12.34");
        assert_eq!(to_decimal_places(&nat(120_000), 4, 2).to_string(), "12");
        assert_eq!(to_decimal_places(&nat(5), 1, 0).to_string(), "1");
    }

    #[test]
    fn decimal_amount_round_trips_via_serde() {
        let d: DecimalAmount = "12.345".parse().unwrap();
        assert_eq!(d.to_string(), "12.345");

        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"12.345\"");

        let back: DecimalAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn decimal_amount_renders_plain() {
        let d: DecimalAmount = "1.2e3".parse().unwrap();
        assert_eq!(d.to_string(), "1200");

        let d: DecimalAmount = "-0.0500".parse().unwrap();
        assert_eq!(d.to_string(), "-0.05");
    }

    #[test]
    fn decimal_amount_feeds_back_into_codec() {
        let human = to_decimal(&nat(987_654_321), 9, None);
        assert_eq!(to_base_units(&human, 9).unwrap(), nat(987_654_321));
    }
}
