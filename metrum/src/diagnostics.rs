//! Diagnostics and message catalogs
//!
//! Every problem found while scanning, parsing or resolving a unit expression
//! is recorded as a `Diagnostic` anchored to a source `Span`. The text of a
//! diagnostic comes from a `MessageCatalog`, which may override the built-in
//! English messages per `MessageId`.

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifies a kind of diagnostic independent of its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageId {
    #[serde(rename = "Number_is_required")]
    NumberIsRequired,
    #[serde(rename = "Exponent_symbol_is_required")]
    ExponentSymbolIsRequired,
    #[serde(rename = "Unit_name_or_1_is_required")]
    UnitNameOr1IsRequired,
    #[serde(rename = "Unexpected_token__Unit_name_or_1_is_required")]
    UnexpectedTokenUnitNameOr1IsRequired,
    #[serde(rename = "Fraction_symbol_required")]
    FractionSymbolRequired,
    #[serde(rename = "End_of_source_is_required")]
    EndOfSourceIsRequired,
    #[serde(rename = "Units_include_circular_references")]
    UnitsIncludeCircularReferences,
    #[serde(rename = "internal_error")]
    InternalError,
}

impl MessageId {
    pub const ALL: [MessageId; 8] = [
        MessageId::NumberIsRequired,
        MessageId::ExponentSymbolIsRequired,
        MessageId::UnitNameOr1IsRequired,
        MessageId::UnexpectedTokenUnitNameOr1IsRequired,
        MessageId::FractionSymbolRequired,
        MessageId::EndOfSourceIsRequired,
        MessageId::UnitsIncludeCircularReferences,
        MessageId::InternalError,
    ];

    /// Stable identifier, as used in message catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageId::NumberIsRequired => "Number_is_required",
            MessageId::ExponentSymbolIsRequired => "Exponent_symbol_is_required",
            MessageId::UnitNameOr1IsRequired => "Unit_name_or_1_is_required",
            MessageId::UnexpectedTokenUnitNameOr1IsRequired => {
                "Unexpected_token__Unit_name_or_1_is_required"
            }
            MessageId::FractionSymbolRequired => "Fraction_symbol_required",
            MessageId::EndOfSourceIsRequired => "End_of_source_is_required",
            MessageId::UnitsIncludeCircularReferences => "Units_include_circular_references",
            MessageId::InternalError => "internal_error",
        }
    }

    /// Built-in English text
    pub fn default_text(&self) -> &'static str {
        match self {
            MessageId::NumberIsRequired => "Number is required",
            MessageId::ExponentSymbolIsRequired => "Exponent symbol ( ^ ) is required",
            MessageId::UnitNameOr1IsRequired => "Unit name or 1 is required",
            MessageId::UnexpectedTokenUnitNameOr1IsRequired => {
                "Unexpected token. Unit name or 1 is required"
            }
            MessageId::FractionSymbolRequired => "Fraction symbol ( / ) required",
            MessageId::EndOfSourceIsRequired => "End of source is required",
            MessageId::UnitsIncludeCircularReferences => "Units include circular references",
            MessageId::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overrides for diagnostic message text.
///
/// Ids without an override fall back to `MessageId::default_text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: HashMap<MessageId, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, id: MessageId, text: impl Into<String>) -> Self {
        self.messages.insert(id, text.into());
        self
    }

    pub fn insert(&mut self, id: MessageId, text: impl Into<String>) {
        self.messages.insert(id, text.into());
    }

    /// Text for `id`, falling back to the built-in English message
    pub fn message(&self, id: MessageId) -> &str {
        self.messages
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.default_text())
    }

    /// Later overrides win
    pub fn merge(&mut self, other: MessageCatalog) {
        self.messages.extend(other.messages);
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Structured context attached to a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticData {
    #[default]
    None,
    /// Surface form of a token that could not be used
    UnexpectedToken { token: String },
    /// A unit whose definition reaches itself
    CircularReference { unit: String, path: Vec<String> },
    /// A malformed unit system entry
    InternalError { detail: String },
}

/// A single problem found in a unit expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: MessageId,
    pub message: String,
    pub span: Span,
    #[serde(default)]
    pub data: DiagnosticData,
}

impl Diagnostic {
    pub fn new(id: MessageId, message: impl Into<String>, span: Span) -> Self {
        Self {
            id,
            message: message.into(),
            span,
            data: DiagnosticData::None,
        }
    }

    pub fn with_data(mut self, data: DiagnosticData) -> Self {
        self.data = data;
        self
    }

    /// Build a diagnostic using the catalog's text for `id`
    pub fn from_catalog(catalog: &MessageCatalog, id: MessageId, span: Span) -> Self {
        Self::new(id, catalog.message(id), span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)?;
        match &self.data {
            DiagnosticData::None => Ok(()),
            DiagnosticData::UnexpectedToken { token } => write!(f, " (token '{}')", token),
            DiagnosticData::CircularReference { path, .. } => {
                write!(f, " ({})", path.join(" → "))
            }
            DiagnosticData::InternalError { detail } => write!(f, " ({})", detail),
        }
    }
}
