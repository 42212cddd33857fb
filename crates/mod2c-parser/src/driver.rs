//! The parse driver.
//!
//! Validates the source path, runs the start symbol, wraps the module in
//! the `FILE` envelope, finalises the statistics and hands everything to
//! the caller. Errors in the source never abort a parse; only an unusable
//! path or suffix prevents one, reported through [`Status`].

use std::path::Path;

use mod2c_ast::{Ast, NodeId, NodeKind};
use mod2c_source::{SourceError, SourceName, read_source};

use crate::diagnostics::{DiagnosticReporter, Statistics};
use crate::parser::Parser;

/// Driver status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The unit was parsed; diagnostics, if any, are in the statistics
    Success,
    /// A caller-supplied reference was unusable
    InvalidReference,
    /// The path has no usable basename, or the file cannot be read
    InvalidPathname,
    /// The suffix does not name a known source type
    InvalidSourcetype,
    /// Memory could not be obtained
    AllocationFailed,
}

/// The result of a parse: the AST with its root, the statistics, the
/// status, and the collected diagnostics.
#[derive(Debug)]
pub struct Parse {
    /// The AST arena
    pub ast: Ast,
    /// The root `FILE` node, or the empty node if nothing was parsed
    pub root: NodeId,
    /// Statistics counters
    pub stats: Statistics,
    /// Driver status
    pub status: Status,
    /// Collected diagnostics, in detection order
    pub reporter: DiagnosticReporter,
}

impl Parse {
    fn failed(status: Status) -> Self {
        Self {
            ast: Ast::new(),
            root: Ast::empty(),
            stats: Statistics::new(),
            status,
            reporter: DiagnosticReporter::new(),
        }
    }

    /// The module node inside the `FILE` envelope.
    #[must_use]
    pub fn module(&self) -> NodeId { self.ast.child(self.root, 2) }
}

/// Parses the compilation unit in the file at `path`.
///
/// The file name is validated first: the basename must be shaped like a
/// module identifier and the suffix must be `.def` or `.mod`. A failed
/// validation returns a status and no AST; anything else parses to
/// completion.
#[must_use]
pub fn parse_file(path: &Path) -> Parse {
    let (name, text) = match read_source(path) {
        Ok(read) => read,
        Err(SourceError::InvalidSourcetype { .. }) => {
            return Parse::failed(Status::InvalidSourcetype);
        }
        Err(SourceError::InvalidPathname { .. } | SourceError::Unreadable { .. }) => {
            return Parse::failed(Status::InvalidPathname);
        }
    };

    run(Parser::new(&text).with_source_name(name.clone()), name.filename())
}

/// Parses a compilation unit from a string, without file-convention
/// checks. Used by tests and tools that do not go through the filesystem.
#[must_use]
pub fn parse_source(text: &str) -> Parse { run(Parser::new(text), "") }

/// Parses a compilation unit from a string against a validated source
/// name, enabling the basename and suffix checks.
#[must_use]
pub fn parse_named_source(text: &str, name: &SourceName) -> Parse {
    run(Parser::new(text).with_source_name(name.clone()), name.filename())
}

fn run(mut parser: Parser<'_>, filename: &str) -> Parse {
    let module = parser.parse_compilation_unit();
    parser.finalize_line_count();

    let digest = parser.digest();
    let root = wrap_file(&mut parser, filename, digest, module);

    let (ast, stats, reporter) = parser.into_parts();

    Parse { ast, root, stats, status: Status::Success, reporter }
}

/// Builds the `(FILE (FNAME name) (KEY digest) module)` envelope.
fn wrap_file(parser: &mut Parser<'_>, filename: &str, digest: u64, module: NodeId) -> NodeId {
    let name_lexeme = parser.intern(filename);
    let key_lexeme = parser.intern(&format!("{digest:016x}"));

    let ast = parser.ast_mut();
    let name = ast.terminal(NodeKind::Filename, name_lexeme);
    let key = ast.terminal(NodeKind::DigestKey, key_lexeme);

    ast.node(NodeKind::File, &[name, key, module])
}
