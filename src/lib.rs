//! mosaic - Plugin registry for design-to-code pipelines
//!
//! Element libraries, per-platform mappings, generators and publishers are
//! registered from plugin payloads, files, directories or URLs. The registry
//! answers which mapping a target uses for a library's element type.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod plugin;
pub mod registry;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_sources, DiscoveryResult, Manifest, ScanResult};
pub use error::{MosaicError, Result};
pub use plugin::{
    load, Environment, GuiDef, LoadOptions, LoadReport, LoadedPlugin, Loader, Plugin, PluginKind,
    PluginSource,
};
pub use registry::{EntityKind, Registry};
pub use types::{
    Artifact, Deployer, Emitter, Generator, GeneratorDef, Library, LibraryDef, Mapping, MappingDef,
    Publisher, PublisherDef, Target,
};
pub use validation::{validate_registry, Diagnostic, Severity, ValidationResult};
