//! Numbers with units
//!
//! Unit-aware arithmetic:
//! - `+` and `-` need identical units
//! - `*` and `/` combine units
//! - `sqrt` halves every exponent, which must be even
//!
//! # Examples
//! ```text
//! 3 m + 4 m      = 7 m
//! 3 m + 4 s      -> units mismatch
//! 6 m / 2 s      = 3 m s⁻¹
//! sqrt(16 m²)    = 4 m
//! ```

use crate::dimension::DimensionVector;
use crate::error::MetrumError;
use crate::printer::display_units;
use crate::MetrumResult;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Decimal,
    pub units: DimensionVector,
}

impl Quantity {
    pub fn new(value: Decimal, units: DimensionVector) -> Self {
        Self { value, units }
    }

    pub fn dimensionless(value: Decimal) -> Self {
        Self::new(value, DimensionVector::dimensionless())
    }

    pub fn add(&self, other: &Quantity) -> MetrumResult<Quantity> {
        self.require_same_units(other)?;
        let value = self
            .value
            .checked_add(other.value)
            .ok_or_else(|| overflow("addition"))?;
        Ok(Quantity::new(value, self.units.clone()))
    }

    pub fn sub(&self, other: &Quantity) -> MetrumResult<Quantity> {
        self.require_same_units(other)?;
        let value = self
            .value
            .checked_sub(other.value)
            .ok_or_else(|| overflow("subtraction"))?;
        Ok(Quantity::new(value, self.units.clone()))
    }

    pub fn mul(&self, other: &Quantity) -> MetrumResult<Quantity> {
        let value = self
            .value
            .checked_mul(other.value)
            .ok_or_else(|| overflow("multiplication"))?;
        Ok(Quantity::new(value, self.units.mul(&other.units)))
    }

    pub fn div(&self, other: &Quantity) -> MetrumResult<Quantity> {
        if other.value.is_zero() {
            return Err(MetrumError::InvalidOperation("Division by zero".to_string()));
        }
        let value = self
            .value
            .checked_div(other.value)
            .ok_or_else(|| overflow("division"))?;
        Ok(Quantity::new(value, self.units.div(&other.units)))
    }

    /// Multiply by a plain number
    pub fn scale(&self, factor: Decimal) -> MetrumResult<Quantity> {
        self.mul(&Quantity::dimensionless(factor))
    }

    pub fn sqrt(&self) -> MetrumResult<Quantity> {
        if let Some((name, exponent)) = self.units.iter().find(|(_, e)| *e % 2 != 0) {
            return Err(MetrumError::InvalidOperation(format!(
                "Cannot take the square root of '{}': exponent {} of '{}' is odd",
                display_units(&self.units),
                exponent,
                name
            )));
        }
        let value = self.value.sqrt().ok_or_else(|| {
            MetrumError::InvalidOperation(format!(
                "Cannot take the square root of negative value {}",
                self.value
            ))
        })?;
        let units = self
            .units
            .iter()
            .map(|(name, exponent)| (name.clone(), exponent / 2))
            .collect();
        Ok(Quantity::new(value, units))
    }

    fn require_same_units(&self, other: &Quantity) -> MetrumResult<()> {
        if self.units == other.units {
            Ok(())
        } else {
            Err(MetrumError::UnitsMismatch {
                left: display_units(&self.units),
                right: display_units(&other.units),
            })
        }
    }
}

fn overflow(operation: &str) -> MetrumError {
    MetrumError::InvalidOperation(format!("Arithmetic overflow in {}", operation))
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, display_units(&self.units))
        }
    }
}
