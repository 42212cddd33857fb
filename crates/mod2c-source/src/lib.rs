//! # mod2c Source
//!
//! Source file handling for the mod2c translator front end.
//!
//! This crate provides the pieces of the front end that deal with where code
//! comes from rather than what it means:
//!
//! - Path validation and the file-suffix conventions of the dialect
//!   (`.def` interface modules, `.mod` implementation and program modules)
//! - Position tracking and line lookup for diagnostic rendering
//! - The interned lexeme repository shared by the lexer and the AST

pub mod file;
pub mod interner;
pub mod types;

pub use file::{ModuleKind, SourceError, SourceKind, SourceName, read_source};
pub use interner::{Interner, Lexeme};
pub use types::{Position, Source};
