//! AST infrastructure types
//!
//! This module contains the small value types shared by the parser and the
//! resolver:
//! - `Span` for tracking source locations
//! - `Term` for a single `(unit name, exponent)` pair
//! - `UnitExpression` for the raw, unresolved output of the parser

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[start, end)` range in a unit expression source.
///
/// Offsets count Unicode scalar values (`char`s), not bytes, so they line up
/// with what a user sees in an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span marking an insertion point
    pub fn empty_at(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One `(name, exponent)` term of a unit expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub exponent: i64,
    /// Source range of the token the term came from
    pub span: Span,
}

impl Term {
    pub fn new(name: impl Into<String>, exponent: i64, span: Span) -> Self {
        Self {
            name: name.into(),
            exponent,
            span,
        }
    }
}

/// Ordered list of raw terms as written in the source.
///
/// Nothing is resolved or merged yet: `m m` is two terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitExpression {
    pub terms: Vec<Term>,
}

impl UnitExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Append all terms of `other`
    pub fn extend(&mut self, other: UnitExpression) {
        self.terms.extend(other.terms);
    }

    /// Negate every exponent (used for the denominator of a fraction)
    pub fn reciprocal(mut self) -> Self {
        for term in &mut self.terms {
            term.exponent = term.exponent.saturating_neg();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for UnitExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if term.exponent == 1 {
                write!(f, "{}", term.name)?;
            } else {
                write!(f, "{}^{}", term.name, term.exponent)?;
            }
        }
        Ok(())
    }
}
