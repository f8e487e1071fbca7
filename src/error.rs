use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mosaic operations
#[derive(Error, Diagnostic, Debug)]
pub enum MosaicError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mosaic::io))]
    Io { path: PathBuf, message: String },

    #[error("Cannot load plugins from the file system in a {environment} context")]
    #[diagnostic(
        code(mosaic::environment),
        help("Pass the plugin payload directly or load it from a URL")
    )]
    Environment { environment: String },

    #[error("Plugin file not found: {}", .path.display())]
    #[diagnostic(code(mosaic::not_found))]
    NotFound { path: PathBuf },

    #[error("Parse error: {message}")]
    #[diagnostic(code(mosaic::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to fetch {url}: {message}")]
    #[diagnostic(code(mosaic::fetch))]
    Fetch { url: String, message: String },

    #[error("Unrecognized plugin type in {payload}")]
    #[diagnostic(
        code(mosaic::plugin::unrecognized),
        help("The `type` field must be one of: library, mapping, generator, publisher, gui")
    )]
    UnrecognizedType { payload: String },

    #[error("Library '{name}' is not loaded")]
    #[diagnostic(
        code(mosaic::registry::not_loaded),
        help("Load library plugins before any mapping or gui plugin that references them")
    )]
    NotLoaded { name: String },

    #[error("Target '{name}' is already registered")]
    #[diagnostic(code(mosaic::registry::already_registered))]
    AlreadyRegistered { name: String },

    #[error("No such target: '{name}'")]
    #[diagnostic(
        code(mosaic::registry::no_such_target),
        help("Targets are created by registering a mapping or a generator for them")
    )]
    NoSuchTarget { name: String },

    #[error("{entity} '{name}' has no {capability} attached")]
    #[diagnostic(code(mosaic::capability))]
    MissingCapability {
        entity: &'static str,
        name: String,
        capability: &'static str,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(mosaic::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(mosaic::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MosaicError>;
