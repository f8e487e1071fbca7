use clap::Parser;
use miette::Result;
use mosaic::cli::{Cli, Commands};
use mosaic::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::List(args) => mosaic::cli::list::run(args, &printer)?,
        Commands::Map(args) => mosaic::cli::map::run(args, &printer)?,
        Commands::Validate(args) => mosaic::cli::validate::run(args, &printer)?,
        Commands::Init(args) => mosaic::cli::init::run(args, &printer)?,
        Commands::Completions(args) => mosaic::cli::completions::run(args)?,
    }

    Ok(())
}

/// `MOSAIC_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MOSAIC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("mosaic={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
