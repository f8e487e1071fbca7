//! Findings reported by registry checks.

use std::fmt;

use crate::registry::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One finding about the registry, optionally tied to a single entity.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// e.g. `mosaic::validate::stale-link`
    pub code: String,
    /// `kind:name` of the entity involved.
    pub subject: Option<String>,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            subject: None,
            message: message.into(),
            help: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn about(mut self, kind: EntityKind, name: &str) -> Self {
        self.subject = Some(format!("{}:{}", kind, name));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Everything the checks found, in the order they found it.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// True when nothing at all was reported.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Findings whose subject is `kind:name`.
    pub fn about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.subject.as_deref() == Some(subject))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_severity() {
        let mut result = ValidationResult::new();
        assert!(result.is_ok());

        result.push(Diagnostic::warning("mosaic::validate::unused-library", "carbon is unused"));
        assert!(!result.is_ok());
        assert!(result.has_warnings());
        assert!(!result.has_errors());

        result.push(Diagnostic::error("mosaic::validate::unknown-element", "no slider"));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut first = ValidationResult::new();
        first.push(Diagnostic::error("mosaic::a", "first"));
        let mut second = ValidationResult::new();
        second.push(Diagnostic::warning("mosaic::b", "second"));

        first.merge(second);
        let messages: Vec<&str> = first.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_subject_lookup() {
        let mut result = ValidationResult::new();
        result.push(
            Diagnostic::warning("mosaic::validate::target-without-generator", "react has none")
                .about(EntityKind::Target, "react")
                .with_help("Load a generator for react"),
        );

        let found: Vec<&Diagnostic> = result.about("target:react").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].help.as_deref(), Some("Load a generator for react"));
        assert_eq!(result.about("target:vue").count(), 0);
    }
}
