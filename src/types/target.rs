//! Target platforms.
//!
//! A target is a named output platform (e.g. `react`, `swiftui`). Targets are
//! never declared by payload; they come into existence when the first mapping
//! or generator for them is registered, or explicitly via
//! [`Registry::use_target`](crate::registry::Registry::use_target).

use crate::registry::Registry;

use super::{Generator, Mapping};

/// A registered output platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    /// Adopted mapping names, in adoption order.
    mappings: Vec<String>,
    /// Name of the bound generator.
    generator: Option<String>,
}

impl Target {
    /// Create a target with no mappings and no generator.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mappings: Vec::new(),
            generator: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the mappings this target has adopted.
    pub fn mappings(&self) -> &[String] {
        &self.mappings
    }

    /// Check whether a mapping has been adopted.
    pub fn has_mapping(&self, name: &str) -> bool {
        self.mappings.iter().any(|m| m == name)
    }

    /// Name of the generator bound to this target.
    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    /// Resolve the bound generator in `registry`.
    ///
    /// A generator re-registered for another target no longer counts.
    pub fn generator<'r>(&self, registry: &'r Registry) -> Option<&'r Generator> {
        self.generator
            .as_deref()
            .and_then(|name| registry.generator(name))
            .filter(|generator| generator.target_name() == self.name)
    }

    /// Find the mapping for elements of `element_type` from library `source`.
    ///
    /// Only mappings that still declare this target are considered. When
    /// several match, the one first adopted last wins. Re-registering a
    /// mapping keeps its original adoption position.
    pub fn resolve<'r>(
        &self,
        registry: &'r Registry,
        source: &str,
        element_type: &str,
    ) -> Option<&'r Mapping> {
        self.adopted(registry)
            .into_iter()
            .rev()
            .find(|mapping| mapping.matches(source, element_type))
    }

    /// The adopted mappings that still point at this target.
    pub fn adopted<'r>(&self, registry: &'r Registry) -> Vec<&'r Mapping> {
        self.mappings
            .iter()
            .filter_map(|m| registry.mapping(m))
            .filter(|mapping| mapping.target_name() == self.name)
            .collect()
    }

    pub(crate) fn adopt_mapping(&mut self, name: &str) {
        if !self.has_mapping(name) {
            self.mappings.push(name.to_string());
        }
    }

    /// Bind a generator, returning the previously bound name.
    pub(crate) fn bind_generator(&mut self, name: &str) -> Option<String> {
        self.generator.replace(name.to_string())
    }
}
