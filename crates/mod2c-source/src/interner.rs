//! The interned lexeme repository.
//!
//! Every identifier and literal lexeme the lexer produces is canonicalised
//! through an [`Interner`], so that two occurrences of the same text share
//! one allocation. Equality between two [`Lexeme`]s from the same repository
//! is a pointer comparison; comparison falls back to content so that lexemes
//! from different parser instances (as in tests) still compare correctly.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHashSet;

/// A canonical reference to an interned string.
///
/// Cheap to clone; lives as long as any holder keeps it, independently of
/// the repository it was interned in.
#[derive(Debug, Clone)]
pub struct Lexeme(Rc<str>);

impl Lexeme {
    /// Returns the textual content of the lexeme.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Returns true for the empty lexeme.
    ///
    /// The empty lexeme stands in for a missing or rejected lexeme, e.g. an
    /// unrecognised binding target.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns true if both lexemes are the same canonical reference.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool { self.same(other) || self.0 == other.0 }
}

impl Eq for Lexeme {}

impl Hash for Lexeme {
    fn hash<H: Hasher>(&self, state: &mut H) { self.0.hash(state); }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl AsRef<str> for Lexeme {
    fn as_ref(&self) -> &str { &self.0 }
}

/// The lexeme repository.
///
/// Read-mostly; a parser context looks up or creates canonical references
/// through this single-threaded API. Sharing one repository across several
/// concurrent parser contexts would require an exclusive lock at this
/// boundary; within one context access is uncontended.
#[derive(Debug, Default)]
pub struct Interner {
    entries: FxHashSet<Rc<str>>,
}

impl Interner {
    /// Creates a new repository holding only the empty lexeme.
    #[must_use]
    pub fn new() -> Self {
        let mut interner = Self { entries: FxHashSet::default() };
        let _ = interner.intern("");

        interner
    }

    /// Returns the canonical lexeme for the given text, interning it on
    /// first sight.
    pub fn intern(&mut self, text: &str) -> Lexeme {
        if let Some(existing) = self.entries.get(text) {
            return Lexeme(Rc::clone(existing));
        }

        let entry: Rc<str> = Rc::from(text);
        let _ = self.entries.insert(Rc::clone(&entry));

        Lexeme(entry)
    }

    /// Returns the canonical empty lexeme.
    pub fn empty(&mut self) -> Lexeme { self.intern("") }

    /// Number of distinct lexemes in the repository.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// True if the repository holds no lexemes at all.
    ///
    /// A freshly created repository is never empty: it holds the empty
    /// lexeme.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
