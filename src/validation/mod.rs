//! Validation system for the plugin registry.
//!
//! Registration only enforces the invariants it must (library before
//! mapping, unique explicit targets). These checks report the softer
//! problems a loaded registry can still have. Used by `mosaic validate`.

mod checks;
mod diagnostic;

pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};
use crate::registry::Registry;

/// Run all validation checks against the registry.
pub fn validate_registry(registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_targets_without_generator(registry));
    result.merge(checks::check_unused_libraries(registry));
    result.merge(checks::check_unknown_elements(registry));
    result.merge(checks::check_stale_links(registry));

    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("{}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else if result.has_warnings() {
        printer.warning("Passed", &format!("with {}", warnings));
    } else {
        printer.status("Passed", "no problems found");
    }
}
