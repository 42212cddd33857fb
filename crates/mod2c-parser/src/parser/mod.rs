//! Parser module for the bootstrap subset of the dialect.
//!
//! This module provides the core parsing machinery: the parser context with
//! its one-token lookahead, and the match & resync primitives every
//! production builds on. The productions themselves live in the submodules,
//! one file per grammar area.
//!
//! The parser never aborts on bad input. A mismatch is reported, counted,
//! and answered with panic-mode resynchronisation: tokens are consumed until
//! the lookahead lies in a FOLLOW set of the current production (or at end
//! of file, which unconditionally stops every skip). Productions always
//! return a node; holes left by recovery are empty-node placeholders.

pub mod declaration;
pub mod expressions;
pub mod module;
pub mod statements;
pub mod types;

use mod2c_ast::{Ast, NodeId, NodeKind};
use mod2c_source::{Lexeme, ModuleKind, Position, SourceName};

use crate::diagnostics::{
    Diagnostic,
    DiagnosticReporter,
    ParseWarning,
    SemanticError,
    Statistics,
    SyntaxError,
};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::token_set::TokenSet;

/// The parser context.
///
/// Owns the lexer, the AST under construction, the diagnostic reporter and
/// the statistics aggregate. One context parses one compilation unit; the
/// context is not shared between threads.
#[derive(Debug)]
pub struct Parser<'src> {
    /// Lexer providing tokens
    lexer: Lexer<'src>,
    /// Current token (the lookahead)
    current: Token,
    /// One token beyond the lookahead
    next: Token,
    /// AST under construction
    ast: Ast,
    /// Diagnostic collection
    reporter: DiagnosticReporter,
    /// Statistics counters
    stats: Statistics,
    /// Module kind, resolved by the opening keywords
    module_kind: Option<ModuleKind>,
    /// Validated source name, when parsing from a file
    source_name: Option<SourceName>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source code.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);

        let current = Self::pull(&mut lexer);
        let next = Self::pull(&mut lexer);

        Self {
            lexer,
            current,
            next,
            ast: Ast::new(),
            reporter: DiagnosticReporter::new(),
            stats: Statistics::new(),
            module_kind: None,
            source_name: None,
        }
    }

    /// Attach a validated source name, enabling the basename and suffix
    /// checks.
    #[must_use]
    pub fn with_source_name(mut self, name: SourceName) -> Self {
        self.source_name = Some(name);
        self
    }

    /// Use a verbose reporter that renders source lines with a marker.
    #[must_use]
    pub fn with_verbose_reporter(mut self) -> Self {
        self.reporter = DiagnosticReporter::verbose();
        self
    }

    fn pull(lexer: &mut Lexer<'src>) -> Token {
        match lexer.next() {
            Some(token) => token,
            None => lexer.eof_token(),
        }
    }

    /// Consume the current token and return it, shifting the lookahead.
    pub(crate) fn advance(&mut self) -> Token {
        let upcoming = Self::pull(&mut self.lexer);

        std::mem::replace(&mut self.current, std::mem::replace(&mut self.next, upcoming))
    }

    /// Look at the current token without consuming it.
    #[inline]
    pub(crate) const fn current_token(&self) -> &Token { &self.current }

    /// Look one token beyond the lookahead.
    #[inline]
    pub(crate) const fn peek_token(&self) -> &Token { &self.next }

    /// Check if the current token is of the specified kind.
    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool { self.current.kind == kind }

    /// Check if the current token is a member of the given set.
    #[inline]
    pub(crate) fn at_set(&self, set: TokenSet) -> bool { set.contains(self.current.kind) }

    /// Check for end of input.
    #[inline]
    pub(crate) fn at_eof(&self) -> bool { self.at(TokenKind::EndOfFile) }

    // ------------------------------------------------------------------
    // Match & resync primitives
    // ------------------------------------------------------------------

    /// Succeeds without consuming if the lookahead equals `expected`;
    /// otherwise reports a syntax error and returns false.
    pub(crate) fn expect_token(&mut self, expected: TokenKind) -> bool {
        if self.at(expected) {
            return true;
        }

        let error = self.missing_token_error(expected);
        self.syntax_error(&error);

        false
    }

    /// Succeeds without consuming if the lookahead is in `expected`;
    /// otherwise reports a syntax error and returns false.
    pub(crate) fn expect_set(&mut self, expected: TokenSet) -> bool {
        if self.at_set(expected) {
            return true;
        }

        let found = self.current.lexeme.as_str().to_string();
        let error = if self.at(TokenKind::Malformed) {
            SyntaxError::MalformedToken { found }
        } else {
            SyntaxError::MissingSet { expected: expected.to_string(), found }
        };
        self.syntax_error(&error);

        false
    }

    /// Consumes tokens until the lookahead is `target` or end of file.
    pub(crate) fn skip_to_token(&mut self, target: TokenKind) {
        while !self.at(target) && !self.at_eof() {
            let _ = self.advance();
        }
    }

    /// Consumes tokens until the lookahead is a member of `set` or end of
    /// file.
    pub(crate) fn skip_to_set(&mut self, set: TokenSet) {
        while !self.at_set(set) && !self.at_eof() {
            let _ = self.advance();
        }
    }

    /// Consumes tokens until the lookahead is `target`, a member of `set`,
    /// or end of file.
    pub(crate) fn skip_to_token_or_set(&mut self, target: TokenKind, set: TokenSet) {
        while !self.at(target) && !self.at_set(set) && !self.at_eof() {
            let _ = self.advance();
        }
    }

    /// Consumes tokens until the lookahead is one of the listed kinds or
    /// end of file.
    pub(crate) fn skip_to_token_list(&mut self, targets: &[TokenKind]) {
        while !targets.contains(&self.current.kind) && !self.at_eof() {
            let _ = self.advance();
        }
    }

    /// Matches and consumes `expected`, resynchronising on failure.
    ///
    /// On a mismatch the parser reports, skips to `expected` or a member of
    /// `resync`, and consumes the expected token if the skip landed on it.
    /// Returns whether the token was ultimately consumed.
    pub(crate) fn require(&mut self, expected: TokenKind, resync: TokenSet) -> bool {
        if self.expect_token(expected) {
            let _ = self.advance();
            return true;
        }

        self.skip_to_token_or_set(expected, resync);
        if self.at(expected) {
            let _ = self.advance();
            return true;
        }

        false
    }

    /// Parses an identifier terminal, or recovers to `resync` and returns
    /// the empty node.
    pub(crate) fn ident_or_empty(&mut self, resync: TokenSet) -> NodeId {
        if self.expect_token(TokenKind::Ident) {
            return self.ident_terminal();
        }

        self.skip_to_token_or_set(TokenKind::Ident, resync);
        if self.at(TokenKind::Ident) {
            return self.ident_terminal();
        }

        Ast::empty()
    }

    /// Consumes the current identifier into an `IDENT` terminal node.
    pub(crate) fn ident_terminal(&mut self) -> NodeId {
        let token = self.advance();

        self.ast.terminal(NodeKind::Ident, token.lexeme)
    }

    /// Succeeds without consuming if the lookahead is an identifier with
    /// exactly the given pseudo-reserved lexeme; otherwise reports a syntax
    /// error and returns false.
    pub(crate) fn expect_pseudo_terminal(&mut self, expected: &'static str) -> bool {
        if self.at(TokenKind::Ident) && self.current.lexeme.as_str() == expected {
            return true;
        }

        let found = self.current.lexeme.as_str().to_string();
        self.syntax_error(&SyntaxError::MissingPseudoTerminal { expected, found });

        false
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn missing_token_error(&self, expected: TokenKind) -> SyntaxError {
        let found = self.current.lexeme.as_str().to_string();

        if self.at(TokenKind::Malformed) {
            SyntaxError::MalformedToken { found }
        } else {
            SyntaxError::MissingToken { expected, found }
        }
    }

    /// Reports a syntax error at the current token and counts it.
    pub(crate) fn syntax_error(&mut self, error: &SyntaxError) {
        let diagnostic = Diagnostic::syntax(error, self.current.pos, self.current.lexeme.as_str());
        self.reporter.add(diagnostic);
        self.stats.count_syntax_error();
    }

    /// Reports a semantic error and counts it.
    pub(crate) fn semantic_error(&mut self, error: &SemanticError, pos: Position, lexeme: &str) {
        self.reporter.add(Diagnostic::semantic(error, pos, lexeme));
        self.stats.count_semantic_error();
    }

    /// Reports a warning and counts it.
    pub(crate) fn warning(&mut self, warning: &ParseWarning, pos: Position) {
        self.reporter.add(Diagnostic::warning(warning, pos));
        self.stats.count_warning();
    }

    // ------------------------------------------------------------------
    // Context accessors
    // ------------------------------------------------------------------

    /// The AST under construction.
    #[must_use]
    pub const fn ast(&self) -> &Ast { &self.ast }

    /// Mutable access to the AST builder.
    pub(crate) fn ast_mut(&mut self) -> &mut Ast { &mut self.ast }

    /// The module kind, once the opening keywords resolved it.
    #[must_use]
    pub const fn module_kind(&self) -> Option<ModuleKind> { self.module_kind }

    pub(crate) fn set_module_kind(&mut self, kind: ModuleKind) { self.module_kind = Some(kind); }

    /// The validated source name, when parsing from a file.
    #[must_use]
    pub const fn source_name(&self) -> Option<&SourceName> { self.source_name.as_ref() }

    /// The statistics collected so far.
    #[must_use]
    pub const fn stats(&self) -> &Statistics { &self.stats }

    /// The diagnostics collected so far.
    #[must_use]
    pub const fn reporter(&self) -> &DiagnosticReporter { &self.reporter }

    /// The digest the lexer has accumulated so far.
    #[must_use]
    pub const fn digest(&self) -> u64 { self.lexer.digest() }

    /// Interns a lexeme through the shared repository.
    pub(crate) fn intern(&mut self, text: &str) -> Lexeme {
        self.lexer.interner_mut().intern(text)
    }

    /// Finalises the line counter from the lexer.
    pub(crate) fn finalize_line_count(&mut self) {
        self.stats.line_count = u32::try_from(self.lexer.line_count()).unwrap_or(u32::MAX);
    }

    /// Dissolves the parser into the AST, the statistics and the collected
    /// diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Ast, Statistics, DiagnosticReporter) {
        (self.ast, self.stats, self.reporter)
    }
}
