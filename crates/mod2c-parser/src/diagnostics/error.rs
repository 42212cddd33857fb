//! Error types for the parser.
//!
//! Two error categories are counted separately: syntax errors (token-level
//! mismatches detected by the match primitives) and semantic errors
//! (identifier checks that do not affect parsing). Warnings cover soft
//! conditions such as an empty implementation module.

use std::fmt;

use mod2c_source::{ModuleKind, Position};
use thiserror::Error;

use crate::lexer::TokenKind;

/// Represents the severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// A syntax or semantic error
    Error,
    /// A warning about a suspicious but legal construct
    Warning,
}

impl DiagnosticLevel {
    /// Returns a string representation of the diagnostic level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Token-level mismatches detected by the match primitives.
#[derive(Debug, Error, Clone)]
pub enum SyntaxError {
    /// The lookahead does not match the expected token.
    #[error("expected {expected}, found '{found}'")]
    MissingToken {
        /// The expected token
        expected: TokenKind,
        /// The offending lexeme
        found: String,
    },
    /// The lookahead is not a member of the expected set.
    #[error("expected one of: {expected}; found '{found}'")]
    MissingSet {
        /// The expected set, preformatted
        expected: String,
        /// The offending lexeme
        found: String,
    },
    /// The lookahead is not the required pseudo-reserved identifier.
    #[error("expected '{expected}', found '{found}'")]
    MissingPseudoTerminal {
        /// The required identifier lexeme
        expected: &'static str,
        /// The offending lexeme
        found: String,
    },
    /// The lexer produced a malformed token.
    #[error("malformed token '{found}'")]
    MalformedToken {
        /// The offending lexeme
        found: String,
    },
    /// Input continues after the closing `'.'` of the compilation unit.
    #[error("unexpected input after end of compilation unit")]
    TrailingInput,
}

/// Identifier-level checks that do not affect parsing.
#[derive(Debug, Error, Clone)]
pub enum SemanticError {
    /// The module identifier does not match the source file's basename.
    #[error("module identifier '{found}' does not match file basename '{expected}'")]
    BasenameMismatch {
        /// The file basename
        expected: String,
        /// The module identifier
        found: String,
    },
    /// The module kind is not admitted by the source file's suffix.
    #[error("{kind} not permitted in a '.{suffix}' source file")]
    ModuleKindMismatch {
        /// The parsed module kind
        kind: ModuleKind,
        /// The file suffix
        suffix: String,
    },
    /// The identifier after `END` does not repeat the opening identifier.
    #[error("closing identifier '{found}' does not match '{expected}'")]
    ClosingIdentMismatch {
        /// The opening identifier
        expected: String,
        /// The closing identifier
        found: String,
    },
    /// An identifier occurs twice in one identifier list.
    #[error("duplicate identifier '{ident}' in identifier list")]
    DuplicateIdent {
        /// The duplicated identifier
        ident: String,
    },
    /// The identifier in binding position is not a bindable identifier.
    #[error("'{ident}' is not a bindable identifier")]
    UnknownBindable {
        /// The rejected identifier
        ident: String,
    },
    /// `OPAQUE` occurred outside an interface module.
    #[error("OPAQUE is only permitted in interface modules")]
    OpaqueNotPermitted,
}

/// Soft conditions worth flagging.
#[derive(Debug, Error, Clone)]
pub enum ParseWarning {
    /// An implementation module with neither declarations nor an
    /// initialisation body.
    #[error("implementation module has no declarations and no initialisation body")]
    EmptyImplementationModule,
}

/// A diagnostic record: severity, position, offending lexeme and message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity
    pub level: DiagnosticLevel,
    /// Source position the diagnostic points at
    pub pos: Position,
    /// The offending lexeme, if any
    pub lexeme: String,
    /// The formatted message
    pub message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic from a syntax error.
    #[must_use]
    pub fn syntax(error: &SyntaxError, pos: Position, lexeme: &str) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            pos,
            lexeme: lexeme.to_string(),
            message: error.to_string(),
        }
    }

    /// Creates an error diagnostic from a semantic error.
    #[must_use]
    pub fn semantic(error: &SemanticError, pos: Position, lexeme: &str) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            pos,
            lexeme: lexeme.to_string(),
            message: error.to_string(),
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(warning: &ParseWarning, pos: Position) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            pos,
            lexeme: String::new(),
            message: warning.to_string(),
        }
    }
}
