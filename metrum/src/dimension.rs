//! Canonical dimension vectors
//!
//! A `DimensionVector` maps base-unit names to non-zero integer exponents.
//! Two unit expressions are dimensionally equal exactly when their vectors
//! compare equal.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::{Div, Mul};

/// Base-unit name -> exponent. Zero exponents are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DimensionVector {
    exponents: BTreeMap<String, i64>,
}

impl DimensionVector {
    /// The dimensionless unit (`1`)
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single base dimension raised to `exponent`
    pub fn base(name: impl Into<String>, exponent: i64) -> Self {
        let mut exponents = BTreeMap::new();
        if exponent != 0 {
            exponents.insert(name.into(), exponent);
        }
        Self { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Exponent of `name`, 0 when absent
    pub fn exponent(&self, name: &str) -> i64 {
        self.exponents.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, i64> {
        self.exponents.iter()
    }

    /// Add `exponent` to the entry for `name`, dropping it if it reaches 0
    pub fn accumulate(&mut self, name: &str, exponent: i64) {
        if exponent == 0 {
            return;
        }
        let current = self.exponent(name);
        let updated = current.saturating_add(exponent);
        if updated == 0 {
            self.exponents.remove(name);
        } else {
            self.exponents.insert(name.to_string(), updated);
        }
    }

    /// Exponent-wise sum
    pub fn mul(&self, other: &DimensionVector) -> DimensionVector {
        let mut result = self.clone();
        for (name, exponent) in &other.exponents {
            result.accumulate(name, *exponent);
        }
        result
    }

    /// `self * other^-1`
    pub fn div(&self, other: &DimensionVector) -> DimensionVector {
        self.mul(&other.negate())
    }

    pub fn negate(&self) -> DimensionVector {
        self.pow(-1)
    }

    /// Multiply every exponent by `n`
    pub fn pow(&self, n: i64) -> DimensionVector {
        self.exponents
            .iter()
            .map(|(name, exponent)| (name.clone(), exponent.saturating_mul(n)))
            .collect()
    }

    /// Drop zero exponents. Vectors built through this API are already
    /// normalized, so this is only needed for maps assembled by hand.
    pub fn normalize(map: BTreeMap<String, i64>) -> DimensionVector {
        map.into_iter().collect()
    }

    pub fn into_inner(self) -> BTreeMap<String, i64> {
        self.exponents
    }
}

impl FromIterator<(String, i64)> for DimensionVector {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut result = DimensionVector::dimensionless();
        for (name, exponent) in iter {
            result.accumulate(&name, exponent);
        }
        result
    }
}

impl<'a> FromIterator<(&'a str, i64)> for DimensionVector {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        let mut result = DimensionVector::dimensionless();
        for (name, exponent) in iter {
            result.accumulate(name, exponent);
        }
        result
    }
}

impl<'a> IntoIterator for &'a DimensionVector {
    type Item = (&'a String, &'a i64);
    type IntoIter = btree_map::Iter<'a, String, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.exponents.iter()
    }
}

impl Mul for &DimensionVector {
    type Output = DimensionVector;

    fn mul(self, rhs: &DimensionVector) -> DimensionVector {
        DimensionVector::mul(self, rhs)
    }
}

impl Div for &DimensionVector {
    type Output = DimensionVector;

    fn div(self, rhs: &DimensionVector) -> DimensionVector {
        DimensionVector::div(self, rhs)
    }
}

impl<'de> Deserialize<'de> for DimensionVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, i64>::deserialize(deserializer)?;
        Ok(DimensionVector::normalize(map))
    }
}
