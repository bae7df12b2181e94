//! Resolution of unit expressions
//!
//! Resolves a raw `UnitExpression` by:
//! 1. Expanding each term through the unit system (aliases are renamed,
//!    compound expressions are inlined with multiplied exponents)
//! 2. Detecting circular definitions along the way
//! 3. Folding every base unit reached into one `DimensionVector`
//!
//! Each name is expanded at most once per call; later references reuse
//! its resolved vector raised to the new exponent.

pub mod context;

use crate::ast::{Span, UnitExpression};
use crate::diagnostics::Diagnostic;
use crate::dimension::DimensionVector;
use crate::parser::ParserContext;
use context::ExpansionContext;
use std::rc::Rc;

/// Resolved units plus any problems found while expanding them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub units: DimensionVector,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every term of `expression` against the context's unit system.
///
/// A cycle only stops expansion of the branch it was found on: the cyclic
/// name is folded as a base unit and the remaining terms are still resolved.
pub fn evaluate(expression: &UnitExpression, context: &ParserContext<'_>) -> Evaluation {
    let mut expansion = ExpansionContext::new(context.unit_system, context.messages);

    for term in &expression.terms {
        let resolved = resolve(&mut expansion, &term.name, term.span);
        expansion.fold(&resolved, term.exponent);
    }

    Evaluation {
        units: expansion.units,
        diagnostics: expansion.diagnostics,
    }
}

/// Resolve `name` to its base units for exponent 1. `span` is the source
/// term that started the expansion and anchors every diagnostic it raises.
fn resolve(
    context: &mut ExpansionContext<'_>,
    name: &str,
    span: Span,
) -> Rc<DimensionVector> {
    let mut ready = context.enter(name, span);

    loop {
        if let Some(resolved) = ready.take() {
            match context.frames.last_mut() {
                Some(frame) => frame.absorb(resolved),
                None => return resolved,
            }
        }

        let next = match context.frames.last_mut() {
            Some(frame) => frame.advance(),
            None => return Rc::new(DimensionVector::dimensionless()),
        };

        ready = match next {
            Some(("", _)) => Some(context.empty_reference(span)),
            Some((sub_name, _)) => context.enter(sub_name, span),
            None => context.leave(),
        };
    }
}
