//! Descriptive statistics over extracted integers.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use std::fmt;

/// A statistic that is whole whenever the data allows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(#[serde(serialize_with = "serialize_integer")] BigInt),
    Decimal(f64),
}

impl Number {
    fn ratio(numerator: BigInt, denominator: BigInt) -> Self {
        let (quotient, remainder) = numerator.div_rem(&denominator);
        if remainder.is_zero() {
            return Number::Integer(quotient);
        }
        let value = BigRational::new(numerator, denominator);
        Number::Decimal(value.to_f64().unwrap_or(f64::NAN))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Decimal(x) => write!(f, "{}", x),
        }
    }
}

/// JSON number when it fits an `i64`, decimal string otherwise.
pub(crate) fn serialize_integer<S: Serializer>(n: &BigInt, s: S) -> Result<S::Ok, S::Error> {
    match n.to_i64() {
        Some(small) => s.serialize_i64(small),
        None => s.collect_str(n),
    }
}

pub(crate) fn serialize_integers<S: Serializer>(ns: &[BigInt], s: S) -> Result<S::Ok, S::Error> {
    struct Item<'a>(&'a BigInt);

    impl Serialize for Item<'_> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            serialize_integer(self.0, s)
        }
    }

    s.collect_seq(ns.iter().map(Item))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modes {
    /// Values sharing the highest frequency, in order of first appearance.
    #[serde(serialize_with = "serialize_integers")]
    pub values: Vec<BigInt>,
    pub frequency: usize,
}

pub fn mode(numbers: &[BigInt]) -> Option<Modes> {
    let mut counts: Vec<(&BigInt, usize)> = Vec::new();
    for n in numbers {
        match counts.iter_mut().find(|(value, _)| *value == n) {
            Some((_, count)) => *count += 1,
            None => counts.push((n, 1)),
        }
    }
    let frequency = counts.iter().map(|(_, c)| *c).max()?;
    let values = counts
        .into_iter()
        .filter(|(_, c)| *c == frequency)
        .map(|(value, _)| value.clone())
        .collect();
    Some(Modes { values, frequency })
}

pub fn mean(numbers: &[BigInt]) -> Option<Number> {
    if numbers.is_empty() {
        return None;
    }
    let sum: BigInt = numbers.iter().sum();
    Some(Number::ratio(sum, BigInt::from(numbers.len())))
}

pub fn median(numbers: &[BigInt]) -> Option<Number> {
    if numbers.is_empty() {
        return None;
    }
    let mut sorted: Vec<&BigInt> = numbers.iter().collect();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return Some(Number::Integer(sorted[mid].clone()));
    }
    let pair = sorted[mid - 1] + sorted[mid];
    Some(Number::ratio(pair, BigInt::from(2u8)))
}

pub fn range(numbers: &[BigInt]) -> Option<BigInt> {
    let max = numbers.iter().max()?;
    let min = numbers.iter().min()?;
    Some(max - min)
}
