//! Persistent token cursor used by the grammar rules
//!
//! A `TokenStream` is a value: every consuming operation takes the stream by
//! value and hands back the advanced stream. The consumed and remaining halves
//! always concatenate to the full token list, and diagnostics only grow.

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticData, MessageId};
use crate::parser::scanner::{Token, TokenKind};
use crate::parser::ParserContext;

#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    position: usize,
    diagnostics: Vec<Diagnostic>,
    context: &'a ParserContext<'a>,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token], context: &'a ParserContext<'a>) -> Self {
        Self {
            tokens,
            position: 0,
            diagnostics: Vec::new(),
            context,
        }
    }

    pub fn consumed(&self) -> &'a [Token] {
        &self.tokens[..self.position]
    }

    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position..]
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Next token without consuming it
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    /// Consume the next token, if any
    pub fn take(mut self) -> (Self, Option<&'a Token>) {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        (self, token)
    }

    /// Insertion point for a token that should have been here: the end of the
    /// last consumed token, or 0 at the start of input.
    pub fn missing_span(&self) -> Span {
        let position = self
            .consumed()
            .last()
            .map(|token| token.span.end)
            .unwrap_or(0);
        Span::empty_at(position)
    }

    pub fn report(self, id: MessageId, span: Span) -> Self {
        self.report_with(id, span, DiagnosticData::None)
    }

    pub fn report_with(mut self, id: MessageId, span: Span, data: DiagnosticData) -> Self {
        let diagnostic =
            Diagnostic::from_catalog(self.context.messages, id, span).with_data(data);
        self.diagnostics.push(diagnostic);
        self
    }

    /// Consume the next token if `accept` maps it to a value. Otherwise leave
    /// the stream where it is and report `id` at the missing-token position.
    pub fn expect<T>(
        self,
        id: MessageId,
        accept: impl FnOnce(&'a TokenKind) -> Option<T>,
    ) -> (Self, Option<T>) {
        match self.peek_kind().and_then(accept) {
            Some(value) => {
                let (stream, _) = self.take();
                (stream, Some(value))
            }
            None => {
                let span = self.missing_span();
                (self.report(id, span), None)
            }
        }
    }
}
