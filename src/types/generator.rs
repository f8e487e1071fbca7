//! Code generators.
//!
//! A generator produces output artifacts for exactly one target. Once
//! registered, the link is bidirectional: the generator names its target and
//! the target names the generator.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::registry::Registry;

use super::{Emitter, Target};

/// Declarative definition of a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDef {
    /// Generator name (unique identifier).
    pub name: String,
    /// Name of the target this generator emits for.
    pub target: String,
    /// Generator-specific options, passed through untouched.
    #[serde(default)]
    pub options: Value,
}

/// A registered generator.
#[derive(Clone)]
pub struct Generator {
    name: String,
    target: String,
    options: Value,
    emitter: Option<Arc<dyn Emitter>>,
}

impl Generator {
    /// Create a generator with no emitter attached.
    pub fn new(def: GeneratorDef) -> Self {
        Self {
            name: def.name,
            target: def.target,
            options: def.options,
            emitter: None,
        }
    }

    /// Attach the emitter that does the actual code generation.
    pub fn with_emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    pub fn emitter(&self) -> Option<&dyn Emitter> {
        self.emitter.as_deref()
    }

    /// Resolve the target in `registry`.
    pub fn target<'r>(&self, registry: &'r Registry) -> Result<&'r Target> {
        registry.target(&self.target)
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("options", &self.options)
            .field("emitter", &self.emitter.is_some())
            .finish()
    }
}

impl From<GeneratorDef> for Generator {
    fn from(def: GeneratorDef) -> Self {
        Self::new(def)
    }
}
