//! The plugin registry.
//!
//! The registry owns five name-keyed collections (libraries, mappings,
//! targets, generators, publishers) and the rules that keep them linked as
//! plugins are registered one at a time:
//!
//! - libraries, mappings and publishers overwrite on a repeated name
//! - `use_target` refuses a repeated name, but mappings and generators
//!   create their target implicitly when it is missing
//! - a mapping's library must already be loaded; libraries are never
//!   created implicitly
//! - a target holds at most one generator; binding another replaces it
//!
//! # Example
//!
//! ```ignore
//! use mosaic::registry::Registry;
//! use mosaic::types::{LibraryDef, MappingDef};
//!
//! let mut registry = Registry::new();
//! registry.use_library(LibraryDef::new("material"));
//! registry.use_mapping(MappingDef::new("material-react", "material", "react", "component"))?;
//!
//! let mapping = registry.map("react", "material", "component");
//! ```

pub mod types;

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{MosaicError, Result};
use crate::plugin::{GuiDef, Plugin, PluginKind};
use crate::types::{
    Artifact, Generator, Library, LibraryDef, Mapping, MappingDef, Publisher, Target,
};

pub use types::EntityKind;

/// Name-keyed storage for every registered entity.
#[derive(Debug, Default)]
pub struct Registry {
    libraries: HashMap<String, Library>,
    mappings: HashMap<String, Mapping>,
    targets: HashMap<String, Target>,
    generators: HashMap<String, Generator>,
    publishers: HashMap<String, Publisher>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a classified plugin.
    pub fn use_plugin(&mut self, plugin: Plugin) -> Result<()> {
        match plugin {
            Plugin::Library(def) => {
                self.use_library(def);
                Ok(())
            }
            Plugin::Mapping(def) => self.use_mapping(def),
            Plugin::Generator(def) => {
                self.use_generator(Generator::new(def));
                Ok(())
            }
            Plugin::Publisher(def) => {
                self.use_publisher(Publisher::new(def));
                Ok(())
            }
            Plugin::Gui(def) => self.use_gui(def),
        }
    }

    /// Classify and register a loosely-typed payload.
    pub fn use_payload(&mut self, payload: Value) -> Result<PluginKind> {
        let plugin = Plugin::from_value(payload)?;
        let kind = plugin.kind();
        self.use_plugin(plugin)?;
        Ok(kind)
    }

    // -- Libraries --

    /// Register a library, replacing any library with the same name.
    ///
    /// Mappings adopted by a replaced library are not carried over.
    pub fn use_library(&mut self, def: LibraryDef) {
        let library = Library::new(def);
        debug!(library = library.name(), "registered library");
        if self
            .libraries
            .insert(library.name().to_string(), library)
            .is_some()
        {
            debug!("replaced existing library");
        }
    }

    /// Get a library by name.
    pub fn library(&self, name: &str) -> Result<&Library> {
        self.libraries.get(name).ok_or_else(|| not_loaded(name))
    }

    fn library_mut(&mut self, name: &str) -> Result<&mut Library> {
        self.libraries.get_mut(name).ok_or_else(|| not_loaded(name))
    }

    /// Attach GUI metadata to a loaded library.
    pub fn use_gui(&mut self, gui: GuiDef) -> Result<()> {
        let library = self.library_mut(&gui.library)?;
        library.attach_gui(gui.metadata);
        debug!(library = %gui.library, "attached gui metadata");
        Ok(())
    }

    // -- Targets --

    /// Register an empty target. Fails if the name is taken.
    pub fn use_target(&mut self, name: impl Into<String>) -> Result<&Target> {
        let name = name.into();
        if self.targets.contains_key(&name) {
            return Err(MosaicError::AlreadyRegistered { name });
        }
        debug!(target_name = %name, "registered target");
        let target = self
            .targets
            .entry(name.clone())
            .or_insert_with(|| Target::new(name));
        Ok(&*target)
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Result<&Target> {
        self.targets
            .get(name)
            .ok_or_else(|| MosaicError::NoSuchTarget {
                name: name.to_string(),
            })
    }

    /// Get a target, creating it if missing.
    fn ensure_target(&mut self, name: &str) -> &mut Target {
        if !self.targets.contains_key(name) {
            info!(target_name = name, "auto-created target");
        }
        self.targets
            .entry(name.to_string())
            .or_insert_with(|| Target::new(name))
    }

    // -- Mappings --

    /// Register a mapping and link it to its target and library.
    ///
    /// The target is created when missing. The library must already be
    /// loaded; if it is not, the call fails with `NotLoaded`, the mapping is
    /// not stored, and the target (possibly just created) is left without it.
    pub fn use_mapping(&mut self, def: MappingDef) -> Result<()> {
        let mapping = Mapping::new(def);
        let name = mapping.name().to_string();
        let target = mapping.target_name().to_string();
        let library = mapping.library_name().to_string();

        self.ensure_target(&target);
        self.library(&library)?;

        if self.mappings.insert(name.clone(), mapping).is_some() {
            debug!(mapping = %name, "replaced existing mapping");
        }
        self.ensure_target(&target).adopt_mapping(&name);
        self.library_mut(&library)?.adopt_mapping(&name);

        debug!(mapping = %name, %library, target_name = %target, "registered mapping");
        Ok(())
    }

    /// Get a mapping by name.
    pub fn mapping(&self, name: &str) -> Option<&Mapping> {
        self.mappings.get(name)
    }

    /// Resolve the mapping a target uses for `element_type` elements of `source`.
    ///
    /// Returns `None` when the target does not exist.
    pub fn map(&self, target: &str, source: &str, element_type: &str) -> Option<&Mapping> {
        self.targets
            .get(target)?
            .resolve(self, source, element_type)
    }

    // -- Generators --

    /// Register a generator and bind it to its target.
    ///
    /// The target is created when missing. A generator already bound to the
    /// target is replaced without error.
    pub fn use_generator(&mut self, generator: Generator) {
        let name = generator.name().to_string();
        let target = generator.target_name().to_string();

        if let Some(previous) = self.ensure_target(&target).bind_generator(&name) {
            if previous != name {
                info!(
                    target_name = %target,
                    previous = %previous,
                    generator = %name,
                    "replaced generator for target"
                );
            }
        }
        self.generators.insert(name.clone(), generator);

        debug!(generator = %name, target_name = %target, "registered generator");
    }

    /// Get a generator by name.
    pub fn generator(&self, name: &str) -> Option<&Generator> {
        self.generators.get(name)
    }

    // -- Publishers --

    /// Register a publisher, replacing any publisher with the same name.
    pub fn use_publisher(&mut self, publisher: Publisher) {
        debug!(publisher = publisher.name(), "registered publisher");
        self.publishers
            .insert(publisher.name().to_string(), publisher);
    }

    /// Get a publisher by name.
    pub fn publisher(&self, name: &str) -> Option<&Publisher> {
        self.publishers.get(name)
    }

    // -- Capabilities --

    /// Run the generator bound to `target` over the target's mappings.
    pub fn generate(&self, target: &str) -> Result<Vec<Artifact>> {
        let target = self.target(target)?;
        let generator = target
            .generator(self)
            .ok_or_else(|| MosaicError::MissingCapability {
                entity: "target",
                name: target.name().to_string(),
                capability: "generator",
            })?;
        let emitter = generator
            .emitter()
            .ok_or_else(|| MosaicError::MissingCapability {
                entity: "generator",
                name: generator.name().to_string(),
                capability: "emitter",
            })?;

        let mappings = target.adopted(self);
        debug!(
            target_name = target.name(),
            generator = generator.name(),
            mappings = mappings.len(),
            "generating"
        );
        emitter.emit(target, &mappings)
    }

    /// Ship artifacts through a named publisher.
    pub fn publish(&self, publisher: &str, artifacts: &[Artifact]) -> Result<()> {
        let publisher = self
            .publishers
            .get(publisher)
            .ok_or_else(|| MosaicError::MissingCapability {
                entity: "registry",
                name: publisher.to_string(),
                capability: "publisher",
            })?;
        let deployer = publisher
            .deployer()
            .ok_or_else(|| MosaicError::MissingCapability {
                entity: "publisher",
                name: publisher.name().to_string(),
                capability: "deployer",
            })?;

        debug!(publisher = publisher.name(), artifacts = artifacts.len(), "publishing");
        deployer.deploy(artifacts)
    }

    // -- Inventory --

    /// Get all libraries.
    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.values()
    }

    /// Get all targets.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Get all mappings.
    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.values()
    }

    /// Get all generators.
    pub fn generators(&self) -> impl Iterator<Item = &Generator> {
        self.generators.values()
    }

    /// Get all publishers.
    pub fn publishers(&self) -> impl Iterator<Item = &Publisher> {
        self.publishers.values()
    }

    /// Sorted names of every entity of one kind.
    pub fn names(&self, kind: EntityKind) -> Vec<&str> {
        let mut names: Vec<&str> = match kind {
            EntityKind::Library => self.libraries.keys().map(String::as_str).collect(),
            EntityKind::Target => self.targets.keys().map(String::as_str).collect(),
            EntityKind::Mapping => self.mappings.keys().map(String::as_str).collect(),
            EntityKind::Generator => self.generators.keys().map(String::as_str).collect(),
            EntityKind::Publisher => self.publishers.keys().map(String::as_str).collect(),
        };
        names.sort_unstable();
        names
    }

    /// Get the total number of entities.
    pub fn len(&self) -> usize {
        self.libraries.len()
            + self.mappings.len()
            + self.targets.len()
            + self.generators.len()
            + self.publishers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_loaded(name: &str) -> MosaicError {
    MosaicError::NotLoaded {
        name: name.to_string(),
    }
}
