use crate::ast::UnitExpression;
use crate::diagnostics::{Diagnostic, MessageCatalog};
use crate::unit_system::UnitSystem;

pub mod scanner;
pub mod stream;
pub mod units;

pub use scanner::{scan, Token, TokenKind};
pub use stream::TokenStream;

/// Configuration threaded through every parse call
#[derive(Debug, Clone, Copy)]
pub struct ParserContext<'a> {
    /// Text for diagnostics
    pub messages: &'a MessageCatalog,
    /// Units available to the resolver
    pub unit_system: &'a UnitSystem,
}

impl<'a> ParserContext<'a> {
    pub fn new(messages: &'a MessageCatalog, unit_system: &'a UnitSystem) -> Self {
        Self {
            messages,
            unit_system,
        }
    }
}

/// Outcome of parsing one source string.
///
/// `expression` is always usable, even when `diagnostics` is non-empty: it
/// holds the best-effort reading with placeholders for missing parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub expression: UnitExpression,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scan and parse `source` into a raw unit expression
pub fn parse_expression(source: &str, context: &ParserContext<'_>) -> ParseOutput {
    let tokens = scan(source);
    parse_tokens(&tokens, context)
}

/// Parse an already scanned token list
pub fn parse_tokens(tokens: &[Token], context: &ParserContext<'_>) -> ParseOutput {
    let stream = TokenStream::new(tokens, context);
    let (stream, expression) = units::units(stream);
    ParseOutput {
        expression,
        diagnostics: stream.into_diagnostics(),
    }
}
