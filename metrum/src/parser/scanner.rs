//! Scanner: source text to positioned tokens
//!
//! The scanner never fails. Every character either belongs to a token or is
//! whitespace, so any input produces a token list.

use crate::ast::Span;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "value")]
pub enum TokenKind {
    /// Maximal run of identifier characters
    Id(String),
    /// Maximal run of ASCII digits
    Natural(u64),
    /// Maximal run of superscript digits (`⁰`..`⁹`)
    SuperscriptNatural(u64),
    Minus,
    SuperscriptMinus,
    Caret,
    Star,
    Slash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The token as it would be written in source
    pub fn surface(&self) -> String {
        match &self.kind {
            TokenKind::Id(name) => name.clone(),
            TokenKind::Natural(n) => format!("{:0>width$}", n, width = self.span.len()),
            TokenKind::SuperscriptNatural(n) => {
                n.to_string().chars().filter_map(superscript_of).collect()
            }
            TokenKind::Minus => "-".to_string(),
            TokenKind::SuperscriptMinus => "⁻".to_string(),
            TokenKind::Caret => "^".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.surface())
    }
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
pub(crate) const SUPERSCRIPT_MINUS: char = '⁻';

/// Decimal value of a superscript digit
pub(crate) fn superscript_digit(c: char) -> Option<u64> {
    SUPERSCRIPT_DIGITS
        .iter()
        .position(|&d| d == c)
        .map(|index| index as u64)
}

/// Superscript form of an ASCII digit
pub(crate) fn superscript_of(c: char) -> Option<char> {
    c.to_digit(10).map(|d| SUPERSCRIPT_DIGITS[d as usize])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    SuperscriptDigit,
    Symbol,
    Whitespace,
    Identifier,
}

fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if superscript_digit(c).is_some() {
        CharClass::SuperscriptDigit
    } else if matches!(c, '-' | '^' | '*' | '/' | SUPERSCRIPT_MINUS) {
        CharClass::Symbol
    } else if c.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Identifier
    }
}

fn symbol(c: char) -> Option<TokenKind> {
    match c {
        '-' => Some(TokenKind::Minus),
        '^' => Some(TokenKind::Caret),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        SUPERSCRIPT_MINUS => Some(TokenKind::SuperscriptMinus),
        _ => None,
    }
}

/// Split `source` into tokens. Spans count `char`s, not bytes.
pub fn scan(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < chars.len() {
        let start = position;
        let class = classify(chars[position]);

        match class {
            CharClass::Whitespace => {
                position += 1;
            }
            CharClass::Symbol => {
                position += 1;
                if let Some(kind) = symbol(chars[start]) {
                    tokens.push(Token::new(kind, Span::new(start, position)));
                }
            }
            CharClass::Digit => {
                let mut value: u64 = 0;
                while position < chars.len() && classify(chars[position]) == CharClass::Digit {
                    let digit = chars[position].to_digit(10).map(u64::from).unwrap_or(0);
                    value = value.saturating_mul(10).saturating_add(digit);
                    position += 1;
                }
                tokens.push(Token::new(
                    TokenKind::Natural(value),
                    Span::new(start, position),
                ));
            }
            CharClass::SuperscriptDigit => {
                let mut value: u64 = 0;
                while let Some(digit) = chars.get(position).copied().and_then(superscript_digit) {
                    value = value.saturating_mul(10).saturating_add(digit);
                    position += 1;
                }
                tokens.push(Token::new(
                    TokenKind::SuperscriptNatural(value),
                    Span::new(start, position),
                ));
            }
            CharClass::Identifier => {
                while position < chars.len()
                    && classify(chars[position]) == CharClass::Identifier
                {
                    position += 1;
                }
                let name: String = chars[start..position].iter().collect();
                tokens.push(Token::new(TokenKind::Id(name), Span::new(start, position)));
            }
        }
    }

    tokens
}
