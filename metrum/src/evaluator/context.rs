//! Expansion state for resolving one unit expression
//!
//! Contains all state needed during a single evaluation call. Definitions
//! are expanded on an explicit frame stack so deep alias chains never grow
//! the native call stack.

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticData, MessageCatalog, MessageId};
use crate::dimension::DimensionVector;
use crate::unit_system::{UnitDefinition, UnitSystem};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
enum FrameTerms<'a> {
    Alias(&'a str),
    Expression(&'a [(String, i64)]),
}

/// A unit definition whose terms are being resolved
#[derive(Debug)]
pub struct Frame<'a> {
    pub name: String,
    terms: FrameTerms<'a>,
    next: usize,
    /// Exponent of the sub-term currently being resolved
    pending_exponent: i64,
    units: DimensionVector,
    /// An alias resolves to exactly its target's vector
    shared: Option<Rc<DimensionVector>>,
}

impl<'a> Frame<'a> {
    fn new(name: &str, terms: FrameTerms<'a>) -> Self {
        Self {
            name: name.to_string(),
            terms,
            next: 0,
            pending_exponent: 1,
            units: DimensionVector::dimensionless(),
            shared: None,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.terms, FrameTerms::Alias(_))
    }

    /// Move to the next sub-term, or `None` once all of them are folded
    pub fn advance(&mut self) -> Option<(&'a str, i64)> {
        let term = match self.terms {
            FrameTerms::Alias(target) => (self.next == 0).then_some((target, 1)),
            FrameTerms::Expression(terms) => terms
                .get(self.next)
                .map(|(name, exponent)| (name.as_str(), *exponent)),
        };
        if let Some((_, exponent)) = term {
            self.next += 1;
            self.pending_exponent = exponent;
        }
        term
    }

    /// Fold the resolved vector of the current sub-term
    pub fn absorb(&mut self, resolved: Rc<DimensionVector>) {
        match self.terms {
            FrameTerms::Alias(_) => self.shared = Some(resolved),
            FrameTerms::Expression(_) => {
                for (name, exponent) in resolved.iter() {
                    self.units
                        .accumulate(name, exponent.saturating_mul(self.pending_exponent));
                }
            }
        }
    }

    fn finish(self) -> (String, Rc<DimensionVector>) {
        let resolved = match self.shared {
            Some(shared) => shared,
            None => Rc::new(self.units),
        };
        (self.name, resolved)
    }
}

/// Context for resolving the terms of one unit expression
///
/// Contains:
/// - The unit system and message catalog (read-only)
/// - The frames of the definitions being expanded and their positions
/// - Vectors of names already resolved during this call
/// - The dimension vector folded so far
/// - Diagnostics
pub struct ExpansionContext<'a> {
    pub unit_system: &'a UnitSystem,

    pub messages: &'a MessageCatalog,

    /// Definitions being expanded, innermost last
    pub frames: Vec<Frame<'a>>,

    /// Index into `frames` of every name on the current expansion chain
    pub chain: HashMap<String, usize>,

    /// Vectors of names whose expansion finished, for exponent 1
    pub resolved: HashMap<String, Rc<DimensionVector>>,

    /// Names found to be part of a cycle. They are reported once and
    /// folded as base units whenever reached again.
    pub cyclic: HashSet<String>,

    /// Product of all folded terms
    pub units: DimensionVector,

    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ExpansionContext<'a> {
    pub fn new(unit_system: &'a UnitSystem, messages: &'a MessageCatalog) -> Self {
        Self {
            unit_system,
            messages,
            frames: Vec::new(),
            chain: HashMap::new(),
            resolved: HashMap::new(),
            cyclic: HashSet::new(),
            units: DimensionVector::dimensionless(),
            diagnostics: Vec::new(),
        }
    }

    /// Start resolving `name`. Returns its vector when it is known without
    /// expanding anything, otherwise pushes a frame for its definition.
    pub fn enter(&mut self, name: &str, span: Span) -> Option<Rc<DimensionVector>> {
        if self.cyclic.contains(name) {
            return Some(Rc::new(DimensionVector::base(name, 1)));
        }

        if let Some(&start) = self.chain.get(name) {
            self.report_cycle(name, start, span);
            return Some(Rc::new(DimensionVector::base(name, 1)));
        }

        if let Some(resolved) = self.resolved.get(name) {
            return Some(Rc::clone(resolved));
        }

        let unit_system = self.unit_system;
        let terms = match unit_system.get(name) {
            None | Some(UnitDefinition::Definition) => {
                return Some(Rc::new(DimensionVector::base(name, 1)));
            }
            Some(UnitDefinition::Alias(target)) => FrameTerms::Alias(target),
            Some(UnitDefinition::Expression(terms)) => FrameTerms::Expression(terms),
        };

        self.chain.insert(name.to_string(), self.frames.len());
        self.frames.push(Frame::new(name, terms));
        None
    }

    /// Pop the innermost frame and remember its vector
    pub fn leave(&mut self) -> Option<Rc<DimensionVector>> {
        let frame = self.frames.pop()?;
        let (name, resolved) = frame.finish();
        self.chain.remove(&name);
        self.resolved.insert(name, Rc::clone(&resolved));
        Some(resolved)
    }

    /// A definition refers to an empty name: report it and stand in the
    /// defining unit itself as a base unit
    pub fn empty_reference(&mut self, span: Span) -> Rc<DimensionVector> {
        let Some(frame) = self.frames.last() else {
            return Rc::new(DimensionVector::dimensionless());
        };
        let name = frame.name.clone();
        let detail = if frame.is_alias() {
            format!("'{}' is an alias of an empty name", name)
        } else {
            format!("'{}' refers to an empty unit name", name)
        };
        self.report_internal(detail, span);
        Rc::new(DimensionVector::base(name, 1))
    }

    /// Multiply `resolved^exponent` into the result
    pub fn fold(&mut self, resolved: &DimensionVector, exponent: i64) {
        for (name, base_exponent) in resolved.iter() {
            self.units
                .accumulate(name, base_exponent.saturating_mul(exponent));
        }
    }

    /// Report the cycle closed by reaching `name` again, once per name.
    /// `start` is the frame where `name` is being expanded.
    fn report_cycle(&mut self, name: &str, start: usize, span: Span) {
        if !self.cyclic.insert(name.to_string()) {
            return;
        }

        let path: Vec<String> = self
            .frames
            .get(start..)
            .unwrap_or_default()
            .iter()
            .map(|frame| frame.name.clone())
            .chain(std::iter::once(name.to_string()))
            .collect();

        let diagnostic = Diagnostic::from_catalog(
            self.messages,
            MessageId::UnitsIncludeCircularReferences,
            span,
        )
        .with_data(DiagnosticData::CircularReference {
            unit: name.to_string(),
            path,
        });
        self.diagnostics.push(diagnostic);
    }

    pub fn report_internal(&mut self, detail: String, span: Span) {
        let diagnostic = Diagnostic::from_catalog(self.messages, MessageId::InternalError, span)
            .with_data(DiagnosticData::InternalError { detail });
        self.diagnostics.push(diagnostic);
    }
}
