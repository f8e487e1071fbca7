//! File system scanner for discovering plugin files.
//!
//! Recursively scans directories for files named after their plugin kind
//! (`material.library.json`, `react.mapping.yaml`, ...).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::plugin::PluginKind;

/// Extensions accepted after the kind suffix.
const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Result of scanning a directory for plugin files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub libraries: Vec<PathBuf>,
    pub guis: Vec<PathBuf>,
    pub mappings: Vec<PathBuf>,
    pub generators: Vec<PathBuf>,
    pub publishers: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.libraries.len()
            + self.guis.len()
            + self.mappings.len()
            + self.generators.len()
            + self.publishers.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get files of a specific plugin kind.
    pub fn files_of_kind(&self, kind: PluginKind) -> &[PathBuf] {
        match kind {
            PluginKind::Library => &self.libraries,
            PluginKind::Gui => &self.guis,
            PluginKind::Mapping => &self.mappings,
            PluginKind::Generator => &self.generators,
            PluginKind::Publisher => &self.publishers,
        }
    }

    fn files_of_kind_mut(&mut self, kind: PluginKind) -> &mut Vec<PathBuf> {
        match kind {
            PluginKind::Library => &mut self.libraries,
            PluginKind::Gui => &mut self.guis,
            PluginKind::Mapping => &mut self.mappings,
            PluginKind::Generator => &mut self.generators,
            PluginKind::Publisher => &mut self.publishers,
        }
    }

    /// All files in load order: grouped by kind so dependencies come first,
    /// sorted by path within each kind.
    pub fn ordered(&self) -> Vec<PathBuf> {
        PluginKind::LOAD_ORDER
            .into_iter()
            .flat_map(|kind| {
                let mut files = self.files_of_kind(kind).to_vec();
                files.sort();
                files
            })
            .collect()
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.libraries.extend(other.libraries);
        self.guis.extend(other.guis);
        self.mappings.extend(other.mappings);
        self.generators.extend(other.generators);
        self.publishers.extend(other.publishers);
    }
}

/// Scan a directory for plugin files, skipping paths matching `excludes`.
pub fn scan_directory(root: &Path, excludes: &[String]) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || is_excluded(path, excludes) {
            continue;
        }

        if let Some(kind) = detect_plugin_kind(path) {
            result.files_of_kind_mut(kind).push(path.to_path_buf());
        }
    }

    result
}

/// Detect the plugin kind from a file name like `material.library.json`.
pub fn detect_plugin_kind(path: &Path) -> Option<PluginKind> {
    let filename = path.file_name()?.to_str()?;
    let (stem, extension) = filename.rsplit_once('.')?;
    if !EXTENSIONS.contains(&extension) {
        return None;
    }
    let (_, kind) = stem.rsplit_once('.')?;
    PluginKind::parse(kind)
}

/// Check if a path matches any exclude pattern.
pub fn is_excluded(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    patterns
        .iter()
        .any(|pattern| matches_pattern(&path_str, pattern))
}

/// Simple glob pattern matching.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        // **/dir/* matches anything inside dir anywhere in the path
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_plugin_kind() {
        assert_eq!(
            detect_plugin_kind(Path::new("material.library.json")),
            Some(PluginKind::Library)
        );
        assert_eq!(
            detect_plugin_kind(Path::new("material.gui.yaml")),
            Some(PluginKind::Gui)
        );
        assert_eq!(
            detect_plugin_kind(Path::new("plugins/react.mapping.yml")),
            Some(PluginKind::Mapping)
        );
        assert_eq!(
            detect_plugin_kind(Path::new("react.generator.json")),
            Some(PluginKind::Generator)
        );
        assert_eq!(
            detect_plugin_kind(Path::new("s3.publisher.json")),
            Some(PluginKind::Publisher)
        );
    }

    #[test]
    fn test_detect_plugin_kind_rejects_others() {
        assert_eq!(detect_plugin_kind(Path::new("material.json")), None);
        assert_eq!(detect_plugin_kind(Path::new("material.library.md")), None);
        assert_eq!(detect_plugin_kind(Path::new("material.theme.json")), None);
        assert_eq!(detect_plugin_kind(Path::new("mosaic.yaml")), None);
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("material.library.json"), "{}").unwrap();
        fs::write(dir.path().join("nested/react.mapping.yaml"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let result = scan_directory(dir.path(), &[]);

        assert_eq!(result.total(), 2);
        assert_eq!(result.libraries.len(), 1);
        assert_eq!(result.mappings.len(), 1);
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_directory(Path::new("/nonexistent/mosaic/plugins"), &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ordered_groups_by_kind() {
        let result = ScanResult {
            libraries: vec![PathBuf::from("b.library.json"), PathBuf::from("a.library.json")],
            mappings: vec![PathBuf::from("a.mapping.json")],
            publishers: vec![PathBuf::from("0.publisher.json")],
            ..Default::default()
        };

        assert_eq!(
            result.ordered(),
            vec![
                PathBuf::from("a.library.json"),
                PathBuf::from("b.library.json"),
                PathBuf::from("a.mapping.json"),
                PathBuf::from("0.publisher.json"),
            ]
        );
    }

    #[test]
    fn test_exclude_patterns() {
        let patterns = vec!["**/drafts/*".to_string(), "*.yml".to_string()];

        assert!(is_excluded(Path::new("plugins/drafts/x.library.json"), &patterns));
        assert!(is_excluded(Path::new("plugins/x.mapping.yml"), &patterns));
        assert!(!is_excluded(Path::new("plugins/x.library.json"), &patterns));
    }
}
