//! Element libraries.
//!
//! A library is a named collection of UI element schemas. It is the source
//! side of every mapping: mappings translate a library's elements into a
//! target platform's representation.
//!
//! # Example
//!
//! ```yaml
//! type: library
//! name: material
//! elements:
//!   button:
//!     props: [label, disabled]
//!   card:
//!     props: [title]
//! gui:
//!   icon: palette
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The schema of a single element. Its shape belongs to the library author.
pub type ElementSchema = Value;

/// Declarative definition of a library, as found in a plugin payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryDef {
    /// Library name (unique identifier).
    pub name: String,
    /// Element schemas keyed by element name.
    #[serde(default)]
    pub elements: BTreeMap<String, ElementSchema>,
    /// GUI metadata shipped with the library itself.
    #[serde(default)]
    pub gui: BTreeMap<String, Value>,
}

impl LibraryDef {
    /// Create a definition with no elements.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: BTreeMap::new(),
            gui: BTreeMap::new(),
        }
    }

    /// Add an element schema.
    pub fn element(mut self, name: impl Into<String>, schema: ElementSchema) -> Self {
        self.elements.insert(name.into(), schema);
        self
    }
}

/// A registered element library.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    name: String,
    elements: BTreeMap<String, ElementSchema>,
    gui: BTreeMap<String, Value>,
    /// Names of mappings that use this library as their source, in adoption order.
    mappings: Vec<String>,
}

impl Library {
    /// Create a library from its definition.
    pub fn new(def: LibraryDef) -> Self {
        Self {
            name: def.name,
            elements: def.elements,
            gui: def.gui,
            mappings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All element schemas, keyed by element name.
    pub fn elements(&self) -> &BTreeMap<String, ElementSchema> {
        &self.elements
    }

    /// Get a single element schema.
    pub fn element(&self, name: &str) -> Option<&ElementSchema> {
        self.elements.get(name)
    }

    /// GUI metadata accumulated from the definition and any `gui` plugins.
    pub fn gui(&self) -> &BTreeMap<String, Value> {
        &self.gui
    }

    /// Names of the mappings this library has adopted.
    pub fn mappings(&self) -> &[String] {
        &self.mappings
    }

    /// Check whether a mapping has been adopted.
    pub fn has_mapping(&self, name: &str) -> bool {
        self.mappings.iter().any(|m| m == name)
    }

    /// Record a mapping that reads from this library.
    ///
    /// Adopting the same name twice is a no-op, so re-registered mappings
    /// keep their original position.
    pub(crate) fn adopt_mapping(&mut self, name: &str) {
        if !self.has_mapping(name) {
            self.mappings.push(name.to_string());
        }
    }

    /// Merge GUI metadata. Later keys replace earlier ones.
    pub(crate) fn attach_gui(&mut self, metadata: BTreeMap<String, Value>) {
        self.gui.extend(metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_from_def() {
        let def = LibraryDef::new("material").element("button", json!({"props": ["label"]}));
        let library = Library::new(def);

        assert_eq!(library.name(), "material");
        assert_eq!(library.element("button"), Some(&json!({"props": ["label"]})));
        assert!(library.element("card").is_none());
        assert!(library.mappings().is_empty());
    }

    #[test]
    fn test_adopt_mapping_is_idempotent() {
        let mut library = Library::new(LibraryDef::new("material"));
        library.adopt_mapping("material-react");
        library.adopt_mapping("material-vue");
        library.adopt_mapping("material-react");

        assert_eq!(library.mappings(), &["material-react", "material-vue"]);
    }

    #[test]
    fn test_attach_gui_merges() {
        let mut def = LibraryDef::new("material");
        def.gui.insert("icon".to_string(), json!("palette"));
        let mut library = Library::new(def);

        let mut metadata = BTreeMap::new();
        metadata.insert("icon".to_string(), json!("brush"));
        metadata.insert("category".to_string(), json!("inputs"));
        library.attach_gui(metadata);

        assert_eq!(library.gui().get("icon"), Some(&json!("brush")));
        assert_eq!(library.gui().get("category"), Some(&json!("inputs")));
    }

    #[test]
    fn test_parse_library_def_defaults() {
        let def: LibraryDef = serde_json::from_value(json!({"name": "bare"})).unwrap();
        assert_eq!(def.name, "bare");
        assert!(def.elements.is_empty());
        assert!(def.gui.is_empty());
    }
}
