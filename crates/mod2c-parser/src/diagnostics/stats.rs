//! Parse statistics.

/// Counters maintained during one parse.
///
/// All counters increase monotonically; the core is single-threaded, so
/// plain integers suffice. The aggregate is returned to the caller by copy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Number of warnings
    pub warning_count: u32,
    /// Number of syntax errors
    pub syntax_error_count: u32,
    /// Number of semantic errors
    pub semantic_error_count: u32,
    /// Number of source lines
    pub line_count: u32,
}

impl Statistics {
    /// Creates a zeroed statistics aggregate.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Counts one warning.
    pub fn count_warning(&mut self) { self.warning_count += 1; }

    /// Counts one syntax error.
    pub fn count_syntax_error(&mut self) { self.syntax_error_count += 1; }

    /// Counts one semantic error.
    pub fn count_semantic_error(&mut self) { self.semantic_error_count += 1; }

    /// True if no errors of either category were counted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.syntax_error_count == 0 && self.semantic_error_count == 0
    }
}
