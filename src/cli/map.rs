//! Map command implementation.
//!
//! Resolves a mapping and prints it as JSON on stdout.

use clap::Args;
use serde_json::json;

use crate::error::{MosaicError, Result};
use crate::output::Printer;
use crate::types::Mapping;

/// Resolve the mapping a target uses for a library's element type
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Target platform name
    pub target: String,

    /// Source library name
    pub library: String,

    /// Element type
    #[arg(value_name = "TYPE")]
    pub element_type: String,

    /// Plugin files, directories or URLs (default: mosaic.yaml in the current directory)
    pub sources: Vec<String>,
}

pub fn run(args: MapArgs, printer: &Printer) -> Result<()> {
    let registry = super::load_registry(&args.sources, printer)?;

    // Surface the target diagnostic before the softer "no mapping" error.
    registry.target(&args.target)?;

    let mapping = registry
        .map(&args.target, &args.library, &args.element_type)
        .ok_or_else(|| MosaicError::Build {
            message: format!(
                "Target '{}' has no mapping for '{}' elements of library '{}'",
                args.target, args.element_type, args.library
            ),
            help: Some("Run `mosaic list --links` to see the mappings each target has".to_string()),
        })?;

    let rendered = serde_json::to_string_pretty(&to_json(mapping)).map_err(|e| MosaicError::Build {
        message: e.to_string(),
        help: None,
    })?;
    println!("{}", rendered);

    Ok(())
}

fn to_json(mapping: &Mapping) -> serde_json::Value {
    json!({
        "name": mapping.name(),
        "library": mapping.library_name(),
        "target": mapping.target_name(),
        "elementType": mapping.element_type(),
        "elements": mapping.rules(),
    })
}
