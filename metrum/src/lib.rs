//! # Metrum Engine
//!
//! **Dimensional analysis for unit expressions**
//!
//! Metrum reads physical unit expressions such as `m s^-2` or `kg m² / s³`,
//! resolves unit names through a unit system and reduces the result to a
//! canonical dimension vector. Two expressions denote the same dimensions
//! exactly when their vectors are equal.
//!
//! ## Quick Start
//!
//! ```rust
//! use metrum::{Engine, MetrumResult};
//!
//! fn main() -> MetrumResult<()> {
//!     let engine = Engine::new();
//!
//!     let acceleration = engine.parse_units("m s^-2")?;
//!     assert_eq!(acceleration, engine.parse_units("m/s^2")?);
//!     assert_eq!(engine.print_units(&acceleration), "SI.metre SI.second⁻²");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. The scanner splits the source into positioned tokens
//! 2. The parser reads them into a raw list of `(unit, exponent)` terms,
//!    recording diagnostics instead of stopping at the first error
//! 3. The evaluator expands aliases and compound units, detecting circular
//!    definitions, and folds everything into a `DimensionVector`
//! 4. On failure the message builder writes every diagnostic into the source
//!    text at the position it refers to
//!
//! ## Unit systems
//!
//! A `UnitSystem` maps names to base units, aliases or products of other
//! units. Names it does not know are treated as base units, so
//! `UnitSystem::empty()` is useful for purely syntactic work.

pub mod analysis;
pub mod ast;
pub mod diagnostics;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod message_builder;
pub mod parser;
pub mod printer;
pub mod quantity;
pub mod resource_limits;
pub mod unit_system;
pub mod validator;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use ast::{Span, Term, UnitExpression};
pub use diagnostics::{Diagnostic, DiagnosticData, MessageCatalog, MessageId};
pub use dimension::DimensionVector;
pub use engine::{parse_units, resolve, Engine, Resolution};
pub use error::{FormattedError, MetrumError};
pub use evaluator::{evaluate, Evaluation};
pub use message_builder::{DiagnosticRenderer, InlineRenderer};
pub use parser::{parse_expression, scan, ParseOutput, ParserContext, Token, TokenKind};
pub use printer::{display_units, print_units};
pub use quantity::Quantity;
pub use resource_limits::ResourceLimits;
pub use unit_system::{UnitDefinition, UnitSystem, UnitSystemFile};
pub use validator::{ValidationReport, Validator};

/// Result type for metrum operations
pub type MetrumResult<T> = Result<T, MetrumError>;

#[cfg(test)]
mod tests;
