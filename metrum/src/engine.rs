use crate::ast::UnitExpression;
use crate::diagnostics::{Diagnostic, MessageCatalog};
use crate::dimension::DimensionVector;
use crate::error::{FormattedError, MetrumError};
use crate::evaluator::evaluate;
use crate::message_builder::{DiagnosticRenderer, InlineRenderer};
use crate::parser::{parse_expression, ParserContext};
use crate::printer;
use crate::quantity::Quantity;
use crate::unit_system::{UnitSystem, UnitSystemFile};
use crate::validator::{ValidationReport, Validator};
use crate::{MetrumResult, ResourceLimits};
use rust_decimal::Decimal;

/// Everything learned from one source string: the raw expression, the
/// resolved units and all diagnostics from parsing and resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub source: String,
    pub expression: UnitExpression,
    pub units: DimensionVector,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The units, or every diagnostic rendered into the source by `renderer`
    pub fn into_result(self, renderer: &dyn DiagnosticRenderer) -> MetrumResult<DimensionVector> {
        if self.diagnostics.is_empty() {
            return Ok(self.units);
        }
        let message = renderer.render(&self.source, &self.diagnostics);
        Err(MetrumError::units(FormattedError::new(
            self.source,
            message,
            self.diagnostics,
        )))
    }
}

/// Scan, parse and resolve `source`. Never fails: problems are collected in
/// the returned diagnostics.
pub fn resolve(source: &str, context: &ParserContext<'_>) -> Resolution {
    let parsed = parse_expression(source, context);
    let evaluation = evaluate(&parsed.expression, context);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(evaluation.diagnostics);

    Resolution {
        source: source.to_string(),
        expression: parsed.expression,
        units: evaluation.units,
        diagnostics,
    }
}

/// Parse `source` against `unit_system`.
///
/// Uses the built-in English messages when `messages` is `None`.
pub fn parse_units(
    source: &str,
    unit_system: &UnitSystem,
    messages: Option<&MessageCatalog>,
) -> MetrumResult<DimensionVector> {
    let defaults = MessageCatalog::default();
    let context = ParserContext::new(messages.unwrap_or(&defaults), unit_system);
    resolve(source, &context).into_result(&InlineRenderer::default())
}

/// The metrum engine.
///
/// Holds a unit system, a message catalog and resource limits, and parses
/// unit expressions against them.
pub struct Engine {
    unit_system: UnitSystem,
    messages: MessageCatalog,
    validator: Validator,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::si(),
            messages: MessageCatalog::default(),
            validator: Validator,
            limits: ResourceLimits::default(),
        }
    }
}

impl Engine {
    /// Engine with the SI unit system and English messages
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the unit system
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Use custom resource limits
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn unit_system(&self) -> &UnitSystem {
        &self.unit_system
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Merge `system` into the loaded units. Entries of the same name are
    /// replaced.
    pub fn add_unit_system(&mut self, system: UnitSystem) -> MetrumResult<()> {
        let new_entries = system
            .iter()
            .filter(|(name, _)| !self.unit_system.contains(name))
            .count();
        let total = self.unit_system.len() + new_entries;
        if total > self.limits.max_unit_system_entries {
            return Err(MetrumError::ResourceLimitExceeded {
                limit_name: "max_unit_system_entries".to_string(),
                limit_value: self.limits.max_unit_system_entries.to_string(),
                actual_value: total.to_string(),
                suggestion: "Load fewer units or raise the limit".to_string(),
            });
        }
        self.unit_system.merge(system);
        Ok(())
    }

    /// Load a JSON unit system file (`{"units": {...}, "messages": {...}}`)
    pub fn add_unit_system_json(&mut self, json: &str) -> MetrumResult<()> {
        let file = UnitSystemFile::from_json(json)?;
        self.add_unit_system(file.units)?;
        self.messages.merge(file.messages);
        Ok(())
    }

    /// Merge message overrides. Later overrides win.
    pub fn add_messages(&mut self, messages: MessageCatalog) {
        self.messages.merge(messages);
    }

    /// Scan, parse and resolve without turning diagnostics into an error.
    /// Only resource limits can fail.
    pub fn resolve(&self, source: &str) -> MetrumResult<Resolution> {
        self.check_source_size(source)?;
        let context = ParserContext::new(&self.messages, &self.unit_system);
        Ok(resolve(source, &context))
    }

    pub fn parse_units(&self, source: &str) -> MetrumResult<DimensionVector> {
        self.render_with(&InlineRenderer::default(), source)
    }

    /// Like `parse_units`, with failures rendered by `renderer`
    pub fn render_with(
        &self,
        renderer: &dyn DiagnosticRenderer,
        source: &str,
    ) -> MetrumResult<DimensionVector> {
        self.resolve(source)?.into_result(renderer)
    }

    pub fn print_units(&self, units: &DimensionVector) -> String {
        printer::print_units(units)
    }

    /// Whether both expressions denote the same dimensions
    pub fn check_equivalent(&self, left: &str, right: &str) -> MetrumResult<bool> {
        let left = self.parse_units(left)?;
        let right = self.parse_units(right)?;
        Ok(left == right)
    }

    /// A number with the units written in `units`
    pub fn measure(&self, value: Decimal, units: &str) -> MetrumResult<Quantity> {
        Ok(Quantity::new(value, self.parse_units(units)?))
    }

    /// Check the loaded unit system for circular and dangling definitions
    pub fn validate(&self) -> ValidationReport {
        self.validator.validate(&self.unit_system)
    }

    fn check_source_size(&self, source: &str) -> MetrumResult<()> {
        let length = source.chars().count();
        if length > self.limits.max_source_chars {
            return Err(MetrumError::ResourceLimitExceeded {
                limit_name: "max_source_chars".to_string(),
                limit_value: format!("{} characters", self.limits.max_source_chars),
                actual_value: format!("{} characters", length),
                suggestion: "Shorten the unit expression".to_string(),
            });
        }
        Ok(())
    }
}
