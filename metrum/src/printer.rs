//! Display form of dimension vectors: `kg m² s⁻³`

use crate::dimension::DimensionVector;
use crate::parser::scanner::{superscript_of, SUPERSCRIPT_MINUS};

/// Render `units` as space-separated `name` / `name` + superscript exponent.
///
/// The dimensionless vector prints as the empty string.
pub fn print_units(units: &DimensionVector) -> String {
    units
        .iter()
        .map(|(name, exponent)| print_term(name, *exponent))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_term(name: &str, exponent: i64) -> String {
    if exponent == 1 {
        name.to_string()
    } else {
        format!("{}{}", name, superscript(exponent))
    }
}

/// Superscript digits for `n`, with a superscript minus when negative
pub fn superscript(n: i64) -> String {
    let mut result = String::new();
    if n < 0 {
        result.push(SUPERSCRIPT_MINUS);
    }
    result.extend(n.unsigned_abs().to_string().chars().filter_map(superscript_of));
    result
}

/// Like `print_units`, but the dimensionless vector prints as `1`
pub fn display_units(units: &DimensionVector) -> String {
    if units.is_dimensionless() {
        "1".to_string()
    } else {
        print_units(units)
    }
}
