use crate::analysis::{build_dependency_graph, dangling_references, topological_sort};
use crate::unit_system::UnitSystem;
use serde::Serialize;

/// What the validator found in a unit system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Defined units in dependency order (a unit comes after everything it
    /// refers to). Cyclic units are left out.
    pub order: Vec<String>,
    /// Units on a circular definition or depending on one, sorted
    pub cyclic_units: Vec<String>,
    /// `(unit, reference)` pairs where `reference` is not defined. These
    /// resolve as base units, so they are reported but not fatal.
    pub dangling_references: Vec<(String, String)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.cyclic_units.is_empty()
    }
}

/// Checks a unit system as a whole, before any expression is parsed against it
#[derive(Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, system: &UnitSystem) -> ValidationReport {
        let graph = build_dependency_graph(system);
        let sorted = topological_sort(&graph);

        let order = sorted
            .order
            .into_iter()
            .filter(|name| system.contains(name))
            .collect();

        ValidationReport {
            order,
            cyclic_units: sorted.blocked.into_iter().collect(),
            dangling_references: dangling_references(system),
        }
    }
}
