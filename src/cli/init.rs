//! Init command implementation.
//!
//! Generates a `mosaic.yaml` manifest from discovered plugin files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{MosaicError, Result};
use crate::output::{plural, Printer};
use crate::plugin::PluginKind;

/// Initialize a mosaic project by generating a mosaic.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing mosaic.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(MosaicError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &args.path.display().to_string());
    let scan = scan_directory(&args.path, &[]);

    // Directories are listed in the order they must load: a directory
    // holding libraries comes before one holding only mappings.
    let mut dirs: BTreeMap<String, PluginKind> = BTreeMap::new();
    for kind in PluginKind::LOAD_ORDER {
        for file in scan.files_of_kind(kind) {
            let dir = relative_dir(file, &args.path);
            dirs.entry(dir)
                .and_modify(|earliest| *earliest = (*earliest).min(kind))
                .or_insert(kind);
        }
    }
    let mut ordered: Vec<(String, PluginKind)> = dirs.into_iter().collect();
    ordered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let manifest = Manifest {
        plugins: ordered.into_iter().map(|(dir, _)| dir).collect(),
        ..Default::default()
    };

    fs::write(&manifest_path, manifest.to_yaml()?).map_err(|e| MosaicError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !manifest.plugins.is_empty() {
        printer.info("Discovered", &manifest.plugins.join(", "));
    }

    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(scan.total(), "plugin", "plugins")
        ),
    );

    Ok(())
}

/// The file's directory relative to the project root, with a trailing slash.
fn relative_dir(file: &Path, root: &Path) -> String {
    let parent = file.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(parent);

    if relative == Path::new("") {
        ".".to_string()
    } else {
        format!("{}/", relative.display())
    }
}
