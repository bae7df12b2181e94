use crate::diagnostics::{Diagnostic, MessageId};
use std::fmt;
use thiserror::Error;

/// A source string that failed to parse or resolve, with every diagnostic
/// found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedError {
    /// The unit expression as written
    pub source: String,
    /// `source` annotated with inline markers for each diagnostic
    pub message: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl FormattedError {
    pub fn new(
        source: impl Into<String>,
        message: impl Into<String>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            diagnostics,
        }
    }

    pub fn has(&self, id: MessageId) -> bool {
        self.diagnostics.iter().any(|d| d.id == id)
    }
}

impl fmt::Display for FormattedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error types for metrum
#[derive(Debug, Clone, Error)]
pub enum MetrumError {
    /// A unit expression with diagnostics
    #[error("Invalid units: {0}")]
    Units(Box<FormattedError>),

    /// Arithmetic on quantities whose units differ
    #[error("Units mismatch: '{left}' and '{right}'")]
    UnitsMismatch { left: String, right: String },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(
        "Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}"
    )]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// A unit system or message catalog could not be loaded
    #[error("Unit system error: {0}")]
    UnitSystem(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

impl MetrumError {
    pub fn units(error: FormattedError) -> Self {
        MetrumError::Units(Box::new(error))
    }

    /// The formatted parse failure, if this is one
    pub fn formatted(&self) -> Option<&FormattedError> {
        match self {
            MetrumError::Units(details) => Some(details),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MetrumError {
    fn from(err: serde_json::Error) -> Self {
        MetrumError::UnitSystem(format!("Invalid JSON: {}", err))
    }
}

impl From<std::fmt::Error> for MetrumError {
    fn from(err: std::fmt::Error) -> Self {
        MetrumError::Engine(format!("Format error: {}", err))
    }
}
