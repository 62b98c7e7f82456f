use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Fixed-point monetary amount in the ledger's base units, 18 implied
/// decimal places, `u128`-backed. Conversion is pure string/integer
/// arithmetic; no value ever passes through a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BaseAmount(u128);

impl BaseAmount {
    pub const DECIMALS: u32 = 18;

    pub const ZERO: Self = Self(0);

    const SCALE: u128 = 10u128.pow(Self::DECIMALS);

    pub const fn from_base_units(value: u128) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Parse a human decimal string ("1250.5") into base units, exactly.
    /// Inputs with more than 18 fractional digits are rejected, never rounded.
    pub fn from_decimal_str(input: &str) -> Result<Self, Error> {
        let (int_part, frac_part) = match input.split_once('.') {
            Some((i, f)) => (i, f),
            None => (input, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::InvalidAmount(format!(
                "empty amount: {:?}",
                input
            )));
        }

        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidAmount(format!(
                "malformed decimal string: {:?}",
                input
            )));
        }

        if frac_part.len() > Self::DECIMALS as usize {
            return Err(Error::InvalidAmount(format!(
                "more than {} fractional digits: {:?}",
                Self::DECIMALS,
                input
            )));
        }

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| {
                Error::InvalidAmount(format!("integer part overflow: {:?}", input))
            })?
        };

        let mut frac: u128 = 0;
        if !frac_part.is_empty() {
            // at most 18 digits, cannot overflow
            frac = frac_part.parse().map_err(|_| {
                Error::InvalidAmount(format!("malformed fraction: {:?}", input))
            })?;
            frac *= 10u128.pow(Self::DECIMALS - frac_part.len() as u32);
        }

        whole
            .checked_mul(Self::SCALE)
            .and_then(|scaled| scaled.checked_add(frac))
            .map(Self)
            .ok_or_else(|| {
                Error::InvalidAmount(format!("amount overflow: {:?}", input))
            })
    }

    /// Parse the ledger's base-unit integer string representation.
    pub fn from_base_units_str(input: &str) -> Result<Self, Error> {
        input.parse::<u128>().map(Self).map_err(|_| {
            Error::InvalidAmount(format!("malformed base units: {:?}", input))
        })
    }

    /// Render as a human decimal string with trailing zeros trimmed.
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;

        if frac == 0 {
            return whole.to_string();
        }

        let mut frac = format!("{:018}", frac);
        while frac.ends_with('0') {
            frac.pop();
        }

        format!("{}.{}", whole, frac)
    }

    /// Total cost of `shares` units at this per-share price, exact.
    pub fn checked_mul_shares(&self, shares: u64) -> Result<Self, Error> {
        self.0
            .checked_mul(u128::from(shares))
            .map(Self)
            .ok_or_else(|| {
                Error::InvalidAmount(format!(
                    "cost overflow: {} base units x {} shares",
                    self.0, shares
                ))
            })
    }
}

impl FromStr for BaseAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for BaseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

// Wire representation matches the contract's Uint128: a base-unit integer
// carried as a JSON string.
impl Serialize for BaseAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for BaseAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_base_units_str(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        let amount = BaseAmount::from_decimal_str("5").unwrap();
        assert_eq!(amount.get(), 5_000_000_000_000_000_000);
        assert_eq!(amount.to_decimal_string(), "5");
    }

    #[test]
    fn parses_fractional_amounts() {
        let amount = BaseAmount::from_decimal_str("0.01").unwrap();
        assert_eq!(amount.get(), 10_000_000_000_000_000);
        assert_eq!(amount.to_decimal_string(), "0.01");
    }

    #[test]
    fn parses_bare_fraction() {
        let amount = BaseAmount::from_decimal_str(".5").unwrap();
        assert_eq!(amount.to_decimal_string(), "0.5");
    }

    #[test]
    fn round_trips_all_18_fraction_digits() {
        let input = "1.123456789012345678";
        let amount = BaseAmount::from_decimal_str(input).unwrap();
        assert_eq!(amount.to_decimal_string(), input);
    }

    #[test]
    fn rejects_more_than_18_fraction_digits() {
        assert!(matches!(
            BaseAmount::from_decimal_str("0.1234567890123456789"),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", ".", "abc", "1.2.3", "1,5", "-4", "1e18", " 1"] {
            assert!(
                BaseAmount::from_decimal_str(input).is_err(),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        // u128::MAX has 39 digits; a 40-digit integer part cannot fit
        let too_big = "9".repeat(40);
        assert!(BaseAmount::from_decimal_str(&too_big).is_err());
    }

    #[test]
    fn share_cost_is_exact_fixed_point() {
        let price = BaseAmount::from_decimal_str("0.01").unwrap();
        let cost = price.checked_mul_shares(5).unwrap();
        assert_eq!(cost.to_decimal_string(), "0.05");
    }

    #[test]
    fn share_cost_overflow_is_rejected() {
        let price = BaseAmount::from_base_units(u128::MAX / 2);
        assert!(price.checked_mul_shares(3).is_err());
    }

    #[test]
    fn wire_format_is_base_unit_string() {
        let amount = BaseAmount::from_decimal_str("2.5").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, r#""2500000000000000000""#);

        let parsed: BaseAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
    }

    #[test]
    fn trims_trailing_zeros() {
        let amount = BaseAmount::from_decimal_str("7.500").unwrap();
        assert_eq!(amount.to_decimal_string(), "7.5");
    }
}
