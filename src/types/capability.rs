//! Runtime capabilities attached to generators and publishers.
//!
//! Payload files only declare generators and publishers. The code that emits
//! or ships output is supplied by the host application as trait objects.

use std::path::PathBuf;

use crate::error::Result;

use super::{Mapping, Target};

/// A generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the output root.
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Emits artifacts for one target.
pub trait Emitter: Send + Sync {
    /// Produce artifacts for `target` from the mappings it has adopted.
    fn emit(&self, target: &Target, mappings: &[&Mapping]) -> Result<Vec<Artifact>>;
}

/// Ships generated artifacts somewhere.
pub trait Deployer: Send + Sync {
    fn deploy(&self, artifacts: &[Artifact]) -> Result<()>;
}
