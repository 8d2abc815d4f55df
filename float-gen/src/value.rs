use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Standard, Uniform};
use rand::Rng;
use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GenError;

pub const NUM_DECIMAL_PLACES: u32 = 1;

/// Bounds of the uniform draw, before rounding
pub const LOWER_BOUND: f64 = 1.0;
pub const UPPER_BOUND: f64 = 100.1;

/// 1.0
pub const MIN_VALUE: Decimal = Decimal::from_parts(10, 0, 0, false, NUM_DECIMAL_PLACES);
/// 100.1
pub const MAX_VALUE: Decimal = Decimal::from_parts(1001, 0, 0, false, NUM_DECIMAL_PLACES);

/// A generated number in `[1.0, 100.1]` with exactly one fractional digit.
///
/// The inner [Decimal] always carries a scale of [`NUM_DECIMAL_PLACES`], so the
/// text form keeps its trailing digit (`1.0`, not `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(Decimal);

/// Uniform distribution over `[LOWER_BOUND, UPPER_BOUND]`, rounded to one fractional digit.
#[derive(Debug, Clone, Copy)]
pub struct ValueDistribution(Uniform<f64>);

fn round_to_tenth(decimal: Decimal) -> Decimal {
    decimal.round_dp_with_strategy(NUM_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

impl Value {
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// The integer part, e.g. `42` for `42.7`
    #[must_use]
    pub fn whole(&self) -> u32 {
        self.0.trunc().to_u32().unwrap_or_default()
    }

    fn from_sample(sample: f64) -> Self {
        let mut decimal = Decimal::from_f64_retain(sample)
            .map_or(MIN_VALUE, round_to_tenth)
            .clamp(MIN_VALUE, MAX_VALUE);
        decimal.rescale(NUM_DECIMAL_PLACES);
        Value(decimal)
    }
}

impl TryFrom<Decimal> for Value {
    type Error = GenError;
    fn try_from(decimal: Decimal) -> Result<Self, Self::Error> {
        let mut decimal = decimal.normalize();
        if decimal.scale() > NUM_DECIMAL_PLACES {
            return Err(GenError::TooPrecise);
        }
        if decimal < MIN_VALUE || decimal > MAX_VALUE {
            return Err(GenError::OutOfRange);
        }
        decimal.rescale(NUM_DECIMAL_PLACES);
        Ok(Value(decimal))
    }
}

impl TryFrom<f64> for Value {
    type Error = GenError;
    fn try_from(float: f64) -> Result<Self, Self::Error> {
        if !float.is_finite() {
            return Err(GenError::InvalidFloat);
        }
        // exact binary value, so ties are judged on what the float really holds
        let decimal = Decimal::from_f64_retain(float).ok_or(GenError::OutOfRange)?;
        Value::try_from(round_to_tenth(decimal))
    }
}

impl FromStr for Value {
    type Err = GenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim()).map_err(|_| GenError::InvalidFloat)?;
        Value::try_from(decimal)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl Default for ValueDistribution {
    fn default() -> Self {
        ValueDistribution(Uniform::new_inclusive(LOWER_BOUND, UPPER_BOUND))
    }
}

impl Distribution<Value> for ValueDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::from_sample(self.0.sample(rng))
    }
}

impl Distribution<Value> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        ValueDistribution::default().sample(rng)
    }
}
