//! Unit systems
//!
//! A unit system names units and says how each one resolves. It is plain data
//! and can be loaded from JSON:
//!
//! ```json
//! {
//!   "units": {
//!     "SI.metre": null,
//!     "m": "SI.metre",
//!     "W": [["kg", 1], ["m", 2], ["s", -3]]
//!   }
//! }
//! ```
//!
//! Names that a unit system does not mention resolve as base units.

use crate::diagnostics::MessageCatalog;
use crate::error::MetrumError;
use crate::MetrumResult;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// How a unit name resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitDefinition {
    /// A base unit
    Definition,
    /// Another name for `0`
    Alias(String),
    /// Product of `(name, exponent)` terms
    Expression(Vec<(String, i64)>),
}

impl UnitDefinition {
    /// Unit names this definition refers to
    pub fn references(&self) -> Vec<&str> {
        match self {
            UnitDefinition::Definition => Vec::new(),
            UnitDefinition::Alias(target) => vec![target.as_str()],
            UnitDefinition::Expression(terms) => {
                terms.iter().map(|(name, _)| name.as_str()).collect()
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UnitDefinition::Definition => "definition",
            UnitDefinition::Alias(_) => "alias",
            UnitDefinition::Expression(_) => "expression",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitSystem {
    units: BTreeMap<String, UnitDefinition>,
}

impl UnitSystem {
    /// No units at all: every name is its own base unit
    pub fn empty() -> Self {
        Self::default()
    }

    /// SI base units with their short and long names
    pub fn si() -> Self {
        let mut system = Self::empty();
        for (base, aliases) in [
            ("SI.metre", &["m", "metre"][..]),
            ("SI.second", &["s", "second"][..]),
            ("SI.kilogram", &["kg", "kilogram"][..]),
            ("SI.milli", &["milli"][..]),
        ] {
            system.define(base);
            for alias in aliases {
                system.alias(*alias, base);
            }
        }
        system
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: UnitDefinition) {
        self.units.insert(name.into(), definition);
    }

    pub fn define(&mut self, name: impl Into<String>) {
        self.insert(name, UnitDefinition::Definition);
    }

    pub fn alias(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.insert(name, UnitDefinition::Alias(target.into()));
    }

    pub fn expression<N: Into<String>>(
        &mut self,
        name: impl Into<String>,
        terms: impl IntoIterator<Item = (N, i64)>,
    ) {
        let terms = terms
            .into_iter()
            .map(|(unit, exponent)| (unit.into(), exponent))
            .collect();
        self.insert(name, UnitDefinition::Expression(terms));
    }

    pub fn with(mut self, name: impl Into<String>, definition: UnitDefinition) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&UnitDefinition> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, UnitDefinition> {
        self.units.iter()
    }

    /// Entries of `other` replace entries of the same name
    pub fn merge(&mut self, other: UnitSystem) {
        self.units.extend(other.units);
    }

    /// Parse a unit system file, see `UnitSystemFile`
    pub fn from_json(json: &str) -> MetrumResult<Self> {
        Ok(UnitSystemFile::from_json(json)?.units)
    }
}

impl<'a> IntoIterator for &'a UnitSystem {
    type Item = (&'a String, &'a UnitDefinition);
    type IntoIter = btree_map::Iter<'a, String, UnitDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

impl FromIterator<(String, UnitDefinition)> for UnitSystem {
    fn from_iter<I: IntoIterator<Item = (String, UnitDefinition)>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

/// On-disk form: units plus optional message overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSystemFile {
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub messages: MessageCatalog,
}

impl UnitSystemFile {
    pub fn from_json(json: &str) -> MetrumResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| MetrumError::UnitSystem(format!("Invalid unit system: {}", e)))
    }
}
