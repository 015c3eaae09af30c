//! Validation of a tile library and map before export.
//!
//! Runs a suite of checks and reports errors and warnings. Used by both
//! `isopack validate` and `isopack export` (which refuses to encode when
//! errors are present, so authoring mistakes surface with coordinates
//! instead of as mid-export aborts).

mod checks;

use std::fmt;

use crate::registry::TileLibrary;
use crate::types::TileMap;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code (e.g. "isopack::validate::frame-height").
    pub code: &'static str,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Iterate all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if no diagnostics were reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &crate::output::Printer) {
    for d in result.iter() {
        let is_error = d.severity == Severity::Error;
        eprintln!(
            "  {}[{}]: {}",
            printer.severity(&d.severity.to_string(), is_error),
            d.code,
            d.message
        );
        if let Some(help) = &d.help {
            eprintln!("    help: {}", help);
        }
    }
}

/// Run all validation checks against a library and map.
pub fn validate_assets(library: &TileLibrary, map: &TileMap) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_library_not_empty(library));
    result.merge(checks::check_frame_heights(library));
    result.merge(checks::check_frame_dimensions(library));
    result.merge(checks::check_animation_frame_counts(library));
    result.merge(checks::check_index_capacity(library));
    result.merge(checks::check_map_references(library, map));
    result.merge(checks::check_map_classes(map));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnimatedTile, Bitmap, Pixel, TileRef};

    fn library_with(names: &[&str]) -> TileLibrary {
        let mut library = TileLibrary::new();
        for name in names {
            library
                .insert(AnimatedTile::still(
                    *name,
                    Bitmap::filled(8, 8, Pixel::WHITE).unwrap(),
                ))
                .unwrap();
        }
        library
    }

    #[test]
    fn test_clean_assets_validate() {
        let library = library_with(&["groundGrass0", "wallBrick0"]);
        let mut map = TileMap::new(2, 2, TileRef::single("groundGrass0"));
        map.paint_cell(0, 0, "wallBrick0", false).unwrap();

        let result = validate_assets(&library, &map);
        assert!(result.is_clean(), "{:?}", result);
    }

    #[test]
    fn test_missing_reference_is_error() {
        let library = library_with(&["groundGrass0"]);
        let map = TileMap::new(1, 1, TileRef::single("groundMoss"));

        let result = validate_assets(&library, &map);
        assert!(result.has_errors());
    }

    #[test]
    fn test_result_counts() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::error("isopack::validate::test", "boom"));
        result.push(Diagnostic::warning("isopack::validate::test", "hmm"));

        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_errors());
        assert!(!result.is_clean());
    }
}
