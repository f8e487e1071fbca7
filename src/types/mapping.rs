//! Mappings from library elements to target representations.
//!
//! A mapping binds the elements of one library, restricted to one element
//! type, to the representation rules of one target. The rules themselves
//! (component names, property transformers) are opaque to the registry.
//!
//! # Example
//!
//! ```yaml
//! type: mapping
//! name: material-react
//! library: material
//! target: react
//! elementType: component
//! elements:
//!   button: { import: "@mui/material/Button" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::registry::Registry;

use super::{Library, Target};

/// Declarative definition of a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDef {
    /// Mapping name (unique identifier).
    pub name: String,
    /// Name of the source library.
    pub library: String,
    /// Name of the target platform.
    pub target: String,
    /// The kind of library element this mapping covers.
    #[serde(alias = "element_type")]
    pub element_type: String,
    /// Representation rules keyed by element name.
    #[serde(default)]
    pub elements: BTreeMap<String, Value>,
}

impl MappingDef {
    pub fn new(
        name: impl Into<String>,
        library: impl Into<String>,
        target: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            library: library.into(),
            target: target.into(),
            element_type: element_type.into(),
            elements: BTreeMap::new(),
        }
    }

    /// Add a representation rule for an element.
    pub fn rule(mut self, element: impl Into<String>, rule: Value) -> Self {
        self.elements.insert(element.into(), rule);
        self
    }
}

/// A registered mapping.
///
/// Peers are stored by name and resolved through the owning [`Registry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    name: String,
    library: String,
    target: String,
    element_type: String,
    rules: BTreeMap<String, Value>,
}

impl Mapping {
    pub fn new(def: MappingDef) -> Self {
        Self {
            name: def.name,
            library: def.library,
            target: def.target,
            element_type: def.element_type,
            rules: def.elements,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the source library.
    pub fn library_name(&self) -> &str {
        &self.library
    }

    /// Name of the target platform.
    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// All representation rules, keyed by element name.
    pub fn rules(&self) -> &BTreeMap<String, Value> {
        &self.rules
    }

    /// The representation rule for one element.
    pub fn rule(&self, element: &str) -> Option<&Value> {
        self.rules.get(element)
    }

    /// Check whether this mapping covers elements of `element_type` from `source`.
    pub fn matches(&self, source: &str, element_type: &str) -> bool {
        self.library == source && self.element_type == element_type
    }

    /// Resolve the source library in `registry`.
    pub fn library<'r>(&self, registry: &'r Registry) -> Result<&'r Library> {
        registry.library(&self.library)
    }

    /// Resolve the target in `registry`.
    pub fn target<'r>(&self, registry: &'r Registry) -> Result<&'r Target> {
        registry.target(&self.target)
    }
}
