//! Grammar rules for unit expressions
//!
//! ```text
//! units               = units-body EOF
//! units-body          = terms1("/") ( "/" terms1(never) )?
//! terms1(stop)        = term tail-terms(stop)
//! tail-terms          = ( "*"? term )*
//! term                = Id exponent? | "1"
//! exponent            = "^" integer | superscript-integer
//! integer             = "-"? Natural
//! superscript-integer = "⁻"? SuperscriptNatural
//! ```
//!
//! Rules never abort. A missing token produces a diagnostic plus a placeholder
//! value, and an unexpected token is consumed as a one-off term, so a single
//! pass reports every problem in the input.

use crate::ast::{Span, Term, UnitExpression};
use crate::diagnostics::{DiagnosticData, MessageId};
use crate::parser::scanner::{Token, TokenKind};
use crate::parser::stream::TokenStream;

/// Token that ends a term list without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Slash,
    Never,
}

impl Stop {
    fn matches(self, kind: &TokenKind) -> bool {
        matches!((self, kind), (Stop::Slash, TokenKind::Slash))
    }
}

type Parsed<'a, T> = (TokenStream<'a>, T);

/// Parse a complete expression and flag leftover input
pub fn units(stream: TokenStream<'_>) -> Parsed<'_, UnitExpression> {
    let (stream, expression) = units_body(stream);

    if stream.is_at_end() || stream.has_diagnostics() {
        return (stream, expression);
    }

    let span = stream.missing_span();
    (
        stream.report(MessageId::EndOfSourceIsRequired, span),
        expression,
    )
}

fn units_body(stream: TokenStream<'_>) -> Parsed<'_, UnitExpression> {
    let (stream, mut expression) = match stream.peek_kind() {
        None | Some(TokenKind::Slash) => (stream, UnitExpression::new()),
        Some(_) => terms1(stream, Stop::Slash),
    };

    if !matches!(stream.peek_kind(), Some(TokenKind::Slash)) {
        return (stream, expression);
    }

    let (stream, _) = stream.take();

    let (stream, denominator) = if stream.is_at_end() {
        (stream, UnitExpression::new())
    } else {
        terms1(stream, Stop::Never)
    };

    expression.extend(denominator.reciprocal());
    (stream, expression)
}

fn terms1(stream: TokenStream<'_>, stop: Stop) -> Parsed<'_, UnitExpression> {
    let (stream, mut expression) = term(stream, stop);
    let (stream, tail) = tail_terms(stream, stop);
    expression.extend(tail);
    (stream, expression)
}

fn tail_terms(mut stream: TokenStream<'_>, stop: Stop) -> Parsed<'_, UnitExpression> {
    let mut expression = UnitExpression::new();

    loop {
        let next = match stream.peek() {
            None => break,
            Some(token) if stop.matches(&token.kind) => break,
            Some(token) if matches!(token.kind, TokenKind::Star) => {
                let (after_star, _) = stream.take();
                term(after_star, stop)
            }
            Some(token) if matches!(token.kind, TokenKind::Id(_)) || is_one(token) => {
                term(stream, stop)
            }
            Some(_) => break,
        };
        stream = next.0;
        expression.extend(next.1);
    }

    (stream, expression)
}

fn term(stream: TokenStream<'_>, stop: Stop) -> Parsed<'_, UnitExpression> {
    let token = match stream.peek() {
        Some(token) if !stop.matches(&token.kind) => token,
        _ => {
            let span = stream.missing_span();
            return (
                stream.report(MessageId::UnitNameOr1IsRequired, span),
                UnitExpression::new(),
            );
        }
    };

    let (stream, _) = stream.take();
    match &token.kind {
        TokenKind::Id(name) => {
            let (stream, exponent) = exponent(stream, token.span);
            let term = Term::new(name.clone(), exponent, token.span);
            (stream, UnitExpression::from_terms(vec![term]))
        }
        _ if is_one(token) => (stream, UnitExpression::new()),
        _ => {
            let surface = token.surface();
            let stream = stream.report_with(
                MessageId::UnexpectedTokenUnitNameOr1IsRequired,
                token.span,
                DiagnosticData::UnexpectedToken {
                    token: surface.clone(),
                },
            );
            let term = Term::new(format!("({})", surface), 1, token.span);
            (stream, UnitExpression::from_terms(vec![term]))
        }
    }
}

/// The literal `1`. Zero-padded forms such as `01` are not accepted.
fn is_one(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Natural(1)) && token.span.len() == 1
}

/// Optional exponent following the unit name at `name_span`
fn exponent(stream: TokenStream<'_>, name_span: Span) -> Parsed<'_, i64> {
    match stream.peek_kind() {
        Some(TokenKind::Caret) => {
            let (stream, _) = stream.take();
            integer(stream)
        }
        Some(TokenKind::SuperscriptMinus) | Some(TokenKind::SuperscriptNatural(_)) => {
            superscript_integer(stream)
        }
        // `m-2`: the caret was left out
        Some(TokenKind::Minus) => {
            let stream = stream.report(
                MessageId::ExponentSymbolIsRequired,
                Span::empty_at(name_span.end),
            );
            integer(stream)
        }
        _ => (stream, 1),
    }
}

fn integer(stream: TokenStream<'_>) -> Parsed<'_, i64> {
    let (stream, negative) = match stream.peek_kind() {
        Some(TokenKind::Minus) => (stream.take().0, true),
        _ => (stream, false),
    };

    let (stream, magnitude) = stream.expect(MessageId::NumberIsRequired, |kind| match kind {
        TokenKind::Natural(n) => Some(*n),
        _ => None,
    });

    (stream, signed(magnitude, negative))
}

fn superscript_integer(stream: TokenStream<'_>) -> Parsed<'_, i64> {
    let (stream, negative) = match stream.peek_kind() {
        Some(TokenKind::SuperscriptMinus) => (stream.take().0, true),
        _ => (stream, false),
    };

    let (stream, magnitude) = stream.expect(MessageId::NumberIsRequired, |kind| match kind {
        TokenKind::SuperscriptNatural(n) => Some(*n),
        _ => None,
    });

    (stream, signed(magnitude, negative))
}

/// Missing numbers default to an exponent of 1
fn signed(magnitude: Option<u64>, negative: bool) -> i64 {
    let Some(magnitude) = magnitude else {
        return 1;
    };
    let value = i64::try_from(magnitude).unwrap_or(i64::MAX);
    if negative {
        -value
    } else {
        value
    }
}
