//! # mod2c Parser
//!
//! The syntactic analysis core of the mod2c translator: an LL(1)
//! recursive-descent parser for the bootstrap subset of the dialect.
//!
//! The parser recognises the three compilation-unit forms (interface,
//! implementation and program modules), builds an AST whose node kinds are
//! named by the grammar, and recovers from syntax errors without aborting:
//! panic-mode resynchronisation against FIRST/FOLLOW sets keeps the parse
//! going and leaves empty-node placeholders where input was missing. Errors
//! are never propagated upward; callers observe them through the statistics
//! counters and the collected diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use mod2c_parser::parse_source;
//!
//! let parse = parse_source("MODULE Counter; BEGIN value := 0 END Counter.");
//!
//! assert!(parse.stats.is_clean());
//! assert_eq!(parse.stats.line_count, 1);
//! ```

pub mod diagnostics;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod productions;
pub mod token_set;

pub use driver::{Parse, Status, parse_file, parse_named_source, parse_source};
pub use parser::Parser;
