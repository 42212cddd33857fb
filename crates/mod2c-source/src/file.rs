//! Source file conventions of the dialect.
//!
//! A compilation unit's file name carries meaning: the basename must match
//! the outer module identifier (checked semantically during parsing), and the
//! suffix conveys which module kinds are acceptable. `.def` files hold
//! interface modules; `.mod` files hold implementation or program modules.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// The kind of compilation unit, resolved from the opening keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// `INTERFACE MODULE`
    Interface,
    /// `IMPLEMENTATION MODULE`
    Implementation,
    /// `MODULE`
    Program,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface => write!(f, "interface module"),
            Self::Implementation => write!(f, "implementation module"),
            Self::Program => write!(f, "program module"),
        }
    }
}

/// The module kinds a source file's suffix admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.def` — an interface module is expected
    Interface,
    /// `.mod` — an implementation or program module is expected
    ImplementationOrProgram,
}

impl SourceKind {
    /// Resolves a file suffix to the expected source kind.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "def" => Some(Self::Interface),
            "mod" => Some(Self::ImplementationOrProgram),
            _ => None,
        }
    }

    /// Returns true if a module of the given kind may live in a file of
    /// this kind.
    #[must_use]
    pub const fn admits(self, kind: ModuleKind) -> bool {
        match self {
            Self::Interface => matches!(kind, ModuleKind::Interface),
            Self::ImplementationOrProgram => {
                matches!(kind, ModuleKind::Implementation | ModuleKind::Program)
            }
        }
    }
}

/// Errors produced while validating a source path.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path has no usable basename, or the basename is not a valid
    /// module identifier.
    #[error("invalid pathname '{path}'")]
    InvalidPathname {
        /// The offending path
        path: String,
    },
    /// The suffix does not name a known source kind.
    #[error("invalid source file type '.{suffix}'")]
    InvalidSourcetype {
        /// The offending suffix
        suffix: String,
    },
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Unreadable {
        /// The offending path
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// A validated source file name.
///
/// Carries the pieces the parser needs for its semantic checks: the basename
/// (compared against the module identifier) and the expected source kind.
#[derive(Debug, Clone)]
pub struct SourceName {
    filename: String,
    basename: String,
    suffix: String,
    kind: SourceKind,
}

impl SourceName {
    /// Validates a path against the dialect's file conventions.
    ///
    /// ## Errors
    ///
    /// Returns [`SourceError::InvalidPathname`] if the path has no basename
    /// or the basename is not shaped like a module identifier, and
    /// [`SourceError::InvalidSourcetype`] if the suffix is not `.def` or
    /// `.mod`.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let invalid = || SourceError::InvalidPathname { path: path.display().to_string() };

        let filename = path.file_name().and_then(|name| name.to_str()).ok_or_else(invalid)?;
        let basename = path.file_stem().and_then(|stem| stem.to_str()).ok_or_else(invalid)?;

        if !is_module_ident(basename) {
            return Err(invalid());
        }

        let suffix = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        let kind = SourceKind::from_suffix(suffix)
            .ok_or_else(|| SourceError::InvalidSourcetype { suffix: suffix.to_string() })?;

        Ok(Self {
            filename: filename.to_string(),
            basename: basename.to_string(),
            suffix: suffix.to_string(),
            kind,
        })
    }

    /// The full file name, e.g. `Foo.def`.
    #[must_use]
    pub fn filename(&self) -> &str { &self.filename }

    /// The basename, e.g. `Foo`.
    #[must_use]
    pub fn basename(&self) -> &str { &self.basename }

    /// The suffix without the dot, e.g. `def`.
    #[must_use]
    pub fn suffix(&self) -> &str { &self.suffix }

    /// The module kinds this file admits.
    #[must_use]
    pub const fn kind(&self) -> SourceKind { self.kind }
}

/// Checks whether a basename is shaped like a module identifier: a letter
/// followed by letters and digits.
fn is_module_ident(text: &str) -> bool {
    let mut chars = text.chars();

    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Reads a source file after validating its name.
///
/// ## Errors
///
/// Returns the validation errors of [`SourceName::from_path`], or
/// [`SourceError::Unreadable`] if the file cannot be read.
pub fn read_source(path: &Path) -> Result<(SourceName, String), SourceError> {
    let name = SourceName::from_path(path)?;

    let text = std::fs::read_to_string(path)
        .map_err(|source| SourceError::Unreadable { path: path.display().to_string(), source })?;

    Ok((name, text))
}
