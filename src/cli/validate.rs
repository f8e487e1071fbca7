use clap::Args;

use crate::error::{MosaicError, Result};
use crate::output::Printer;
use crate::validation::{print_diagnostics, validate_registry};

/// Load plugins and check the registry for problems
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Plugin files, directories or URLs (default: mosaic.yaml in the current directory)
    pub sources: Vec<String>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let registry = super::load_registry(&args.sources, printer)?;
    let result = validate_registry(&registry);

    print_diagnostics(&result, printer);

    if result.has_errors() || (args.strict && result.has_warnings()) {
        return Err(MosaicError::Validation {
            message: format!(
                "{} error(s), {} warning(s)",
                result.error_count(),
                result.warning_count()
            ),
            help: None,
        });
    }

    Ok(())
}
