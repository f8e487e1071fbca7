//! List command implementation.
//!
//! Loads plugins and prints an organized inventory.

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::registry::{EntityKind, Registry};

/// List registered entities
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Plugin files, directories or URLs (default: mosaic.yaml in the current directory)
    pub sources: Vec<String>,

    /// Show links between targets, libraries, mappings and generators
    #[arg(long)]
    pub links: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let registry = super::load_registry(&args.sources, printer)?;

    if args.links {
        print_links(&registry, printer);
    } else {
        print_inventory(&registry, printer);
    }

    Ok(())
}

fn print_inventory(registry: &Registry, printer: &Printer) {
    for kind in EntityKind::ALL {
        let names = registry.names(kind);
        if names.is_empty() {
            continue;
        }
        printer.info(kind.plural(), &names.join(", "));
    }
}

fn print_links(registry: &Registry, printer: &Printer) {
    let arrow = printer.dim("->");

    for name in registry.names(EntityKind::Target) {
        let Ok(target) = registry.target(name) else {
            continue;
        };
        let generator = target
            .generator_name()
            .map(|g| format!(" [{}]", printer.cyan(g)))
            .unwrap_or_default();
        printer.info(
            "target",
            &format!("{}{} {} {}", name, generator, arrow, target.mappings().join(", ")),
        );
    }

    for name in registry.names(EntityKind::Library) {
        let Ok(library) = registry.library(name) else {
            continue;
        };
        printer.info(
            "library",
            &format!("{} {} {}", name, arrow, library.mappings().join(", ")),
        );
    }
}
