mod capability;
mod generator;
mod library;
mod mapping;
mod publisher;
mod target;

pub use capability::{Artifact, Deployer, Emitter};
pub use generator::{Generator, GeneratorDef};
pub use library::{ElementSchema, Library, LibraryDef};
pub use mapping::{Mapping, MappingDef};
pub use publisher::{Publisher, PublisherDef};
pub use target::Target;
