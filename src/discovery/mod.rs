//! Plugin discovery for mosaic projects.
//!
//! This module finds the plugin sources of a project, either from a
//! `mosaic.yaml` manifest or by convention (a `plugins/` directory), and
//! loads them into a registry.
//!
//! # Example
//!
//! ```ignore
//! use mosaic::discovery::discover;
//!
//! let result = discover("./my-project")?;
//! let (registry, report) = result.into_registry()?;
//! println!("Loaded {} plugins", report.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::plugin::{is_url, Loader, LoadReport, PluginSource};
use crate::registry::Registry;

pub use manifest::{Manifest, DEFAULT_PLUGIN_DIR};
pub use scanner::{detect_plugin_kind, is_excluded, scan_directory, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "mosaic.yaml";

/// The plugin sources of a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no mosaic.yaml found).
    pub manifest: Manifest,

    /// Whether a mosaic.yaml manifest was found.
    pub has_manifest: bool,

    /// Sources to load, in order.
    pub sources: Vec<PluginSource>,
}

impl DiscoveryResult {
    /// Load every source into a fresh registry.
    pub fn into_registry(self) -> Result<(Registry, LoadReport)> {
        let mut registry = Registry::new();
        let report = self.load_into(&mut registry)?;
        Ok((registry, report))
    }

    /// Load every source into an existing registry.
    pub fn load_into(self, registry: &mut Registry) -> Result<LoadReport> {
        let mut loader = Loader::new(registry, self.manifest.load_options());
        for source in self.sources {
            loader.load(source)?;
        }
        Ok(loader.finish())
    }
}

/// Discover the plugin sources of a project directory.
///
/// Uses the `mosaic.yaml` manifest in `root` if there is one; otherwise
/// falls back to the `plugins/` directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = if manifest.plugins.is_empty() && !root.join(DEFAULT_PLUGIN_DIR).is_dir() {
        Vec::new()
    } else {
        resolve_sources(&manifest.effective_plugins(), &root)
    };
    debug!(root = %root.display(), has_manifest, sources = sources.len(), "discovered project");

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        sources,
    })
}

/// Use explicit sources (paths or URLs) with no manifest lookup.
pub fn discover_sources(sources: &[String]) -> DiscoveryResult {
    let root = PathBuf::from(".");
    DiscoveryResult {
        sources: resolve_sources(sources, &root),
        root,
        manifest: Manifest::default(),
        has_manifest: false,
    }
}

/// Turn source strings into plugin sources, resolving paths against `root`.
fn resolve_sources(sources: &[String], root: &Path) -> Vec<PluginSource> {
    sources
        .iter()
        .map(|source| {
            if is_url(source) || Path::new(source).is_absolute() {
                PluginSource::parse(source)
            } else {
                PluginSource::File(root.join(source))
            }
        })
        .collect()
}
