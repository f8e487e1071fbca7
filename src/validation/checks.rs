//! Validation checks for the plugin registry.
//!
//! Each check takes a `&Registry` and returns a `ValidationResult`.
//! Entities are visited in name order so output is stable.

use crate::registry::{EntityKind, Registry};

use super::diagnostic::{Diagnostic, ValidationResult};

/// Warn about targets nothing can generate code for.
pub fn check_targets_without_generator(registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for name in registry.names(EntityKind::Target) {
        let Ok(target) = registry.target(name) else {
            continue;
        };
        if target.generator_name().is_none() {
            result.push(
                Diagnostic::warning(
                    "mosaic::validate::target-without-generator",
                    format!("Target '{}' has no generator", name),
                )
                .about(EntityKind::Target, name)
                .with_help(format!("Load a generator plugin with `target: {}`", name)),
            );
        }
    }

    result
}

/// Warn about libraries no mapping reads from.
pub fn check_unused_libraries(registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for name in registry.names(EntityKind::Library) {
        let Ok(library) = registry.library(name) else {
            continue;
        };
        if library.mappings().is_empty() {
            result.push(
                Diagnostic::warning(
                    "mosaic::validate::unused-library",
                    format!("Library '{}' is not used by any mapping", name),
                )
                .about(EntityKind::Library, name),
            );
        }
    }

    result
}

/// Check that mapping rules only name elements their library defines.
///
/// Libraries without element schemas are not checked.
pub fn check_unknown_elements(registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for name in registry.names(EntityKind::Mapping) {
        let Some(mapping) = registry.mapping(name) else {
            continue;
        };
        let Ok(library) = mapping.library(registry) else {
            continue;
        };
        if library.elements().is_empty() {
            continue;
        }

        for element in mapping.rules().keys() {
            if library.element(element).is_none() {
                result.push(
                    Diagnostic::error(
                        "mosaic::validate::unknown-element",
                        format!(
                            "Mapping '{}' has a rule for '{}', which library '{}' does not define",
                            name,
                            element,
                            library.name()
                        ),
                    )
                    .about(EntityKind::Mapping, name),
                );
            }
        }
    }

    result
}

/// Warn about links left inconsistent by overwritten entities.
///
/// Overwriting a mapping or generator under an existing name can move it to
/// another target or library; the old owner keeps the name. Overwriting a
/// library drops the mappings it had adopted.
pub fn check_stale_links(registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for name in registry.names(EntityKind::Target) {
        let Ok(target) = registry.target(name) else {
            continue;
        };

        for mapping_name in target.mappings() {
            let points_here = registry
                .mapping(mapping_name)
                .is_some_and(|m| m.target_name() == name);
            if !points_here {
                result.push(stale(
                    EntityKind::Target,
                    name,
                    format!(
                        "Target '{}' lists mapping '{}', which now maps to another target",
                        name, mapping_name
                    ),
                ));
            }
        }

        let bound = target.generator_name().and_then(|g| registry.generator(g));
        if let Some(generator) = bound {
            if generator.target_name() != name {
                result.push(stale(
                    EntityKind::Target,
                    name,
                    format!(
                        "Target '{}' is bound to generator '{}', which now targets '{}'",
                        name,
                        generator.name(),
                        generator.target_name()
                    ),
                ));
            }
        }
    }

    for name in registry.names(EntityKind::Library) {
        let Ok(library) = registry.library(name) else {
            continue;
        };
        for mapping_name in library.mappings() {
            let reads_here = registry
                .mapping(mapping_name)
                .is_some_and(|m| m.library_name() == name);
            if !reads_here {
                result.push(stale(
                    EntityKind::Library,
                    name,
                    format!(
                        "Library '{}' lists mapping '{}', which now reads from another library",
                        name, mapping_name
                    ),
                ));
            }
        }
    }

    for name in registry.names(EntityKind::Mapping) {
        let Some(mapping) = registry.mapping(name) else {
            continue;
        };
        if let Ok(library) = mapping.library(registry) {
            if !library.has_mapping(name) {
                result.push(stale(
                    EntityKind::Mapping,
                    name,
                    format!(
                        "Mapping '{}' is not adopted by library '{}' (was the library reloaded?)",
                        name,
                        library.name()
                    ),
                ));
            }
        }
    }

    result
}

fn stale(kind: EntityKind, name: &str, message: String) -> Diagnostic {
    Diagnostic::warning("mosaic::validate::stale-link", message)
        .about(kind, name)
        .with_help("Load each plugin name once, or reload its dependents after it")
}
