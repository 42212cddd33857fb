//! Diagnostic reporting.
//!
//! This module provides the `DiagnosticReporter`, which collects diagnostics
//! during parsing and formats them for presentation. In verbose mode each
//! record is followed by the offending source line with a column marker.

use std::fmt::Write as _;
use std::io::{self, Write};

use mod2c_source::Source;

use super::error::Diagnostic;
use crate::diagnostics::DiagnosticLevel;

/// Collects and formats diagnostic messages.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    /// Collection of diagnostics, in detection order
    diagnostics: Vec<Diagnostic>,
    /// Whether to print source lines with a column marker
    verbose: bool,
}

impl DiagnosticReporter {
    /// Create a new diagnostic reporter.
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: Vec::new(), verbose: false } }

    /// Create a reporter that prints source lines with a column marker.
    #[must_use]
    pub const fn verbose() -> Self { Self { diagnostics: Vec::new(), verbose: true } }

    /// Add a diagnostic to the collection.
    pub fn add(&mut self, diagnostic: Diagnostic) { self.diagnostics.push(diagnostic); }

    /// Check if there are any error-level diagnostics.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    /// Get the number of diagnostics.
    #[must_use]
    pub const fn len(&self) -> usize { self.diagnostics.len() }

    /// Check if there are no diagnostics.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.diagnostics.is_empty() }

    /// Get the collected diagnostics, in detection order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Format and return all diagnostics as a string.
    #[must_use]
    pub fn emit(&self, filename: &str, source: Option<&Source<'_>>) -> String {
        let mut output = String::new();

        for diagnostic in &self.diagnostics {
            self.format_diagnostic(&mut output, filename, source, diagnostic);
        }

        output
    }

    /// Print all diagnostics to the given writer.
    ///
    /// ## Errors
    ///
    /// Returns an I/O error if writing to the output writer fails.
    pub fn print<W: Write>(
        &self,
        writer: &mut W,
        filename: &str,
        source: Option<&Source<'_>>,
    ) -> io::Result<()> {
        write!(writer, "{}", self.emit(filename, source))
    }

    /// Format a single diagnostic and append it to the given string.
    fn format_diagnostic(
        &self,
        output: &mut String,
        filename: &str,
        source: Option<&Source<'_>>,
        diagnostic: &Diagnostic,
    ) {
        let _ = writeln!(
            output,
            "{}: {} at {}:{}:{}",
            diagnostic.level,
            diagnostic.message,
            filename,
            diagnostic.pos.line,
            diagnostic.pos.column
        );

        // Verbose mode: show the source line with a column marker
        if self.verbose
            && let Some(line_text) = source.and_then(|s| s.line_text(diagnostic.pos.line))
        {
            let _ = writeln!(output, "{:>4} | {}", diagnostic.pos.line, line_text);

            let marker_spaces = " ".repeat(diagnostic.pos.column.saturating_sub(1));
            let marker_width = diagnostic.lexeme.chars().count().max(1);
            let marker = "^".repeat(marker_width);

            let _ = writeln!(output, "     | {marker_spaces}{marker}");
        }
    }
}
