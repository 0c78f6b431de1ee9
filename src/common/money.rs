use bigdecimal::{BigDecimal, ParseBigDecimalError};
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
const SCALE: i64 = 10_000;
// Window on the decimal exponent and digit count accepted from text. Scaling
// cost grows with the exponent, so anything outside is refused up front.
const MIN_EXPONENT_SCALE: i64 = -19;
const MAX_EXPONENT_SCALE: i64 = 28;
const MAX_DIGITS: u64 = 64;

#[derive(Debug, Clone, Copy, Default)]
/// Monetary value stored as a count of 1/10000 units.
///
/// Amounts reach the ledger as decimal text; parsing goes through
/// `BigDecimal` and rounds to 4 decimal places, so `"100.5"` and
/// `"100.50000"` denote the same value.
///
/// # Examples
/// ```
/// use pocket_ledger::common::money::Money;
///
/// let amount: Money = "100.5".parse().unwrap();
/// assert_eq!(amount.as_i64(), 1_005_000);
/// assert_eq!(amount.to_string_4dp(), "100.5000");
/// ```
pub struct Money(i64);

impl Money {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn to_string_4dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.4}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        let (_, scale) = bd.as_bigint_and_exponent();
        if !(MIN_EXPONENT_SCALE..=MAX_EXPONENT_SCALE).contains(&scale) {
            return Err(ParseBigDecimalError::Other("amount exponent out of range".into()));
        }
        if bd.digits() > MAX_DIGITS {
            return Err(ParseBigDecimalError::Other("amount has too many digits".into()));
        }

        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

// Snapshots keep amounts human-readable.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_4dp())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}
