//! Diagnostics for the parser.
//!
//! Syntax errors, semantic errors and warnings are collected as values by a
//! [`DiagnosticReporter`] and counted on a [`Statistics`] aggregate; nothing
//! in the parser aborts on bad input.

pub mod error;
pub mod reporter;
pub mod stats;

pub use error::{Diagnostic, DiagnosticLevel, ParseWarning, SemanticError, SyntaxError};
pub use reporter::DiagnosticReporter;
pub use stats::Statistics;
