//! Sequential plugin loader.
//!
//! Resolves plugin sources into payloads and feeds them to a [`Registry`]
//! one at a time. Every source, including nested sequences and fetches,
//! completes before the next begins, so later plugins can rely on entities
//! registered by earlier ones. The first failure aborts the remaining
//! sources and leaves earlier registrations in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, trace};

use crate::discovery::scan_directory;
use crate::error::{MosaicError, Result};
use crate::registry::Registry;

use super::source::{fetch_document, read_document};
use super::{Environment, Plugin, PluginKind, PluginSource};

/// Options for loading plugins.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Execution context; file sources need `Host`.
    pub environment: Environment,
    /// HTTP timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Patterns skipped when scanning directories.
    pub excludes: Vec<String>,
}

/// A plugin that was registered during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPlugin {
    pub kind: PluginKind,
    pub name: String,
    /// The file, URL or `inline` the payload came from.
    pub origin: String,
}

/// Plugins registered by a load, in registration order.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub plugins: Vec<LoadedPlugin>,
}

impl LoadReport {
    /// Number of plugins of one kind.
    pub fn count(&self, kind: PluginKind) -> usize {
        self.plugins.iter().filter(|p| p.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedPlugin> {
        self.plugins.iter()
    }
}

/// What relative sources inside a document resolve against.
#[derive(Debug, Clone)]
enum Base {
    Dir(PathBuf),
    Url(Url),
}

/// Loads plugin sources into a registry.
pub struct Loader<'r> {
    registry: &'r mut Registry,
    options: LoadOptions,
    client: Option<Client>,
    report: LoadReport,
    /// Files and URLs currently being loaded, outermost first.
    active: Vec<String>,
}

impl<'r> Loader<'r> {
    pub fn new(registry: &'r mut Registry, options: LoadOptions) -> Self {
        Self {
            registry,
            options,
            client: None,
            report: LoadReport::default(),
            active: Vec::new(),
        }
    }

    /// Load one source to completion.
    pub fn load(&mut self, source: impl Into<PluginSource>) -> Result<()> {
        self.load_source(source.into(), None, "inline")
    }

    /// Finish loading and return what was registered.
    pub fn finish(self) -> LoadReport {
        self.report
    }

    fn load_source(
        &mut self,
        source: PluginSource,
        base: Option<&Base>,
        origin: &str,
    ) -> Result<()> {
        trace!(source = %source.describe(), origin, "resolving plugin source");

        match source {
            PluginSource::Plugin(plugin) => self.register(plugin, origin),
            PluginSource::Payload(value) => self.register(Plugin::from_value(value)?, origin),
            PluginSource::Sequence(items) => {
                for item in items {
                    self.load_source(item, base, origin)?;
                }
                Ok(())
            }
            PluginSource::File(path) => match base {
                Some(Base::Url(url)) if path.is_relative() => {
                    let joined = url.join(&path.to_string_lossy()).map_err(|e| {
                        MosaicError::Fetch {
                            url: url.to_string(),
                            message: format!("cannot resolve '{}': {}", path.display(), e),
                        }
                    })?;
                    self.load_url(joined)
                }
                Some(Base::Dir(dir)) if path.is_relative() => self.load_path(&dir.join(path)),
                _ => self.load_path(&path),
            },
            PluginSource::Url(url) => {
                let parsed = Url::parse(&url).map_err(|e| MosaicError::Fetch {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
                self.load_url(parsed)
            }
        }
    }

    fn load_path(&mut self, path: &Path) -> Result<()> {
        self.options.environment.require_files()?;

        if path.is_dir() {
            let scan = scan_directory(path, &self.options.excludes);
            debug!(dir = %path.display(), files = scan.total(), "scanned plugin directory");
            for file in scan.ordered() {
                self.load_path(&file)?;
            }
            return Ok(());
        }

        let document = read_document(path)?;
        let origin = path.display().to_string();
        let key = fs::canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();
        let base = path.parent().map(|p| Base::Dir(p.to_path_buf()));
        self.enter(key, &origin)?;
        let result = self.load_source(PluginSource::from(document), base.as_ref(), &origin);
        self.active.pop();
        result
    }

    fn load_url(&mut self, url: Url) -> Result<()> {
        let origin = url.to_string();
        self.enter(origin.clone(), &origin)?;
        let result = self.fetch_and_load(url, &origin);
        self.active.pop();
        result
    }

    fn fetch_and_load(&mut self, url: Url, origin: &str) -> Result<()> {
        let document = fetch_document(self.client(origin)?, origin)?;
        self.load_source(PluginSource::from(document), Some(&Base::Url(url)), origin)
    }

    /// Mark a document as in progress, refusing one that is already open.
    fn enter(&mut self, key: String, origin: &str) -> Result<()> {
        if self.active.contains(&key) {
            let mut chain: Vec<&str> = self.active.iter().map(String::as_str).collect();
            chain.push(&key);
            return Err(MosaicError::Parse {
                message: format!("cyclic plugin reference to {}: {}", origin, chain.join(" -> ")),
                help: Some("A plugin document must not reference itself, directly or through other documents".to_string()),
            });
        }
        self.active.push(key);
        Ok(())
    }

    fn client(&mut self, url: &str) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.options.timeout)
                .build()
                .map_err(|e| MosaicError::Fetch {
                    url: url.to_string(),
                    message: e.to_string(),
                })?,
        };
        Ok(&*self.client.insert(client))
    }

    fn register(&mut self, plugin: Plugin, origin: &str) -> Result<()> {
        let loaded = LoadedPlugin {
            kind: plugin.kind(),
            name: plugin.name().to_string(),
            origin: origin.to_string(),
        };
        self.registry.use_plugin(plugin)?;
        self.report.plugins.push(loaded);
        Ok(())
    }
}

/// Load `source` into `registry`.
pub fn load(
    registry: &mut Registry,
    source: impl Into<PluginSource>,
    options: &LoadOptions,
) -> Result<LoadReport> {
    let mut loader = Loader::new(registry, options.clone());
    loader.load(source)?;
    Ok(loader.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn library() -> serde_json::Value {
        json!({"type": "library", "name": "material", "elements": {"button": {}}})
    }

    fn mapping() -> serde_json::Value {
        json!({
            "type": "mapping",
            "name": "material-react",
            "library": "material",
            "target": "react",
            "elementType": "component"
        })
    }

    #[test]
    fn test_load_sequence_in_order() {
        let mut registry = Registry::new();
        let report = load(
            &mut registry,
            json!([library(), mapping()]),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.plugins[0].kind, PluginKind::Library);
        assert_eq!(report.plugins[1].kind, PluginKind::Mapping);
        assert!(registry.target("react").is_ok());
    }

    #[test]
    fn test_reversed_sequence_fails_at_mapping() {
        let mut registry = Registry::new();
        let err = load(
            &mut registry,
            json!([mapping(), library()]),
            &LoadOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, MosaicError::NotLoaded { .. }));
        // The library after the failure was never loaded.
        assert!(registry.library("material").is_err());
    }

    #[test]
    fn test_failure_keeps_earlier_registrations() {
        let mut registry = Registry::new();
        let err = load(
            &mut registry,
            json!([library(), {"type": "theme"}, {"type": "publisher", "name": "s3"}]),
            &LoadOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, MosaicError::UnrecognizedType { .. }));
        assert!(registry.library("material").is_ok());
        assert!(registry.publisher("s3").is_none());
    }

    #[test]
    fn test_file_with_relative_references() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("libs")).unwrap();
        fs::write(
            dir.path().join("libs/material.json"),
            library().to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("plugins.json"),
            json!(["libs/material.json", mapping()]).to_string(),
        )
        .unwrap();

        let mut registry = Registry::new();
        let report = load(
            &mut registry,
            dir.path().join("plugins.json"),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(report.len(), 2);
        assert!(report.plugins[0].origin.ends_with("material.json"));
        assert!(registry.library("material").unwrap().has_mapping("material-react"));
    }

    #[test]
    fn test_directory_loads_in_dependency_order() {
        let dir = tempdir().unwrap();
        // Names sort mapping-first; the scanner must still load the library first.
        fs::write(
            dir.path().join("a.mapping.json"),
            mapping().to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("z.library.yaml"),
            "type: library\nname: material\n",
        )
        .unwrap();

        let mut registry = Registry::new();
        let report = load(
            &mut registry,
            dir.path().to_path_buf(),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(report.count(PluginKind::Library), 1);
        assert_eq!(report.count(PluginKind::Mapping), 1);
    }

    #[test]
    fn test_browser_environment_rejects_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("material.json");
        fs::write(&path, library().to_string()).unwrap();

        let options = LoadOptions {
            environment: Environment::Browser,
            ..Default::default()
        };
        let mut registry = Registry::new();
        let err = load(&mut registry, path, &options).unwrap_err();

        assert!(matches!(err, MosaicError::Environment { .. }));
    }

    #[test]
    fn test_browser_environment_allows_payloads() {
        let options = LoadOptions {
            environment: Environment::Browser,
            ..Default::default()
        };
        let mut registry = Registry::new();
        load(&mut registry, library(), &options).unwrap();

        assert!(registry.library("material").is_ok());
    }

    #[test]
    fn test_self_referencing_file_is_cyclic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loop.json");
        fs::write(&path, r#"["loop.json"]"#).unwrap();

        let mut registry = Registry::new();
        let err = load(&mut registry, path, &LoadOptions::default()).unwrap_err();

        match err {
            MosaicError::Parse { message, .. } => assert!(message.contains("cyclic")),
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_mutually_referencing_files_are_cyclic() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            json!([library(), "b.json"]).to_string(),
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), r#"["a.json"]"#).unwrap();

        let mut registry = Registry::new();
        let err = load(
            &mut registry,
            dir.path().join("a.json"),
            &LoadOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, MosaicError::Parse { .. }));
        // Work done before the cycle was found stays registered.
        assert!(registry.library("material").is_ok());
    }

    #[test]
    fn test_same_file_twice_in_sequence_is_not_cyclic() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("material.json"), library().to_string()).unwrap();
        fs::write(
            dir.path().join("plugins.json"),
            json!(["material.json", "material.json"]).to_string(),
        )
        .unwrap();

        let mut registry = Registry::new();
        let report = load(
            &mut registry,
            dir.path().join("plugins.json"),
            &LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(report.count(PluginKind::Library), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::new();
        let err = load(
            &mut registry,
            dir.path().join("nope.json"),
            &LoadOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, MosaicError::NotFound { .. }));
    }
}
