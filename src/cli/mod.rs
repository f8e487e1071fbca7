pub mod completions;
pub mod init;
pub mod list;
pub mod map;
pub mod validate;

use clap::{ArgAction, Parser, Subcommand};

use crate::discovery::{discover, discover_sources};
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::plugin::{LoadReport, PluginKind};
use crate::registry::Registry;

/// mosaic - Compose element libraries, mappings and generators
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load plugins and list registered entities
    List(list::ListArgs),

    /// Resolve the mapping a target uses for a library's element type
    Map(map::MapArgs),

    /// Load plugins and check the registry for problems
    Validate(validate::ValidateArgs),

    /// Initialize a mosaic project (generates mosaic.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the given sources, or the project in the current directory.
pub(crate) fn load_registry(sources: &[String], printer: &Printer) -> Result<Registry> {
    let discovery = if sources.is_empty() {
        discover(".")?
    } else {
        discover_sources(sources)
    };

    let (registry, report) = discovery.into_registry()?;
    printer.status("Loaded", &summarize(&report));
    Ok(registry)
}

/// e.g. "2 libraries, 3 mappings, 1 generator"
fn summarize(report: &LoadReport) -> String {
    if report.is_empty() {
        return "no plugins".to_string();
    }

    PluginKind::LOAD_ORDER
        .into_iter()
        .filter_map(|kind| {
            let n = report.count(kind);
            if n == 0 {
                return None;
            }
            Some(match kind {
                PluginKind::Library => plural(n, "library", "libraries"),
                PluginKind::Gui => plural(n, "gui extension", "gui extensions"),
                PluginKind::Mapping => plural(n, "mapping", "mappings"),
                PluginKind::Generator => plural(n, "generator", "generators"),
                PluginKind::Publisher => plural(n, "publisher", "publishers"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::LoadedPlugin;

    fn loaded(kind: PluginKind, name: &str) -> LoadedPlugin {
        LoadedPlugin {
            kind,
            name: name.to_string(),
            origin: "inline".to_string(),
        }
    }

    #[test]
    fn test_summarize() {
        let report = LoadReport {
            plugins: vec![
                loaded(PluginKind::Library, "material"),
                loaded(PluginKind::Library, "carbon"),
                loaded(PluginKind::Mapping, "material-react"),
            ],
        };
        assert_eq!(summarize(&report), "2 libraries, 1 mapping");
        assert_eq!(summarize(&LoadReport::default()), "no plugins");
    }

    #[test]
    fn test_cli_parses_map_command() {
        let cli = Cli::parse_from(["mosaic", "-vv", "map", "react", "material", "component", "plugins/"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.target, "react");
                assert_eq!(args.sources, vec!["plugins/"]);
            }
            other => panic!("expected map command, got {:?}", other),
        }
    }
}
