//! # Lexer module for the dialect.
//!
//! This module is responsible for converting source code into tokens. It
//! uses the `logos` crate for tokenization and adds the bookkeeping the
//! parser and driver need on top:
//!
//! - Line/column positions per token
//! - An accumulating digest over all significant lexemes (the module `KEY`
//!   used for change detection)
//! - Lexeme interning through the shared repository
//! - Malformed input surfaced as `Malformed` tokens instead of aborting

mod token;

use std::hash::Hasher;

use logos::Lexer as LogosLexer;
use mod2c_source::{Interner, Lexeme, Source};
use rustc_hash::FxHasher;
pub use token::{Token, TokenKind};

/// The lexer: a forward stream of tokens over one source buffer.
pub struct Lexer<'src> {
    /// The inner logos lexer
    inner: LogosLexer<'src, TokenKind>,
    /// Source view for position lookup
    source: Source<'src>,
    /// The lexeme repository
    interner: Interner,
    /// Accumulating digest over significant lexemes
    digest: u64,
    /// The canonical empty lexeme
    empty: Lexeme,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer").field("digest", &self.digest).finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut interner = Interner::new();
        let empty = interner.empty();

        Self { inner: LogosLexer::new(source), source: Source::new(source), interner, digest: 0, empty }
    }

    /// Folds a lexeme into the accumulating digest.
    fn fold_digest(&mut self, lexeme: &str) {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.digest);
        hasher.write(lexeme.as_bytes());
        self.digest = hasher.finish();
    }

    /// The digest accumulated so far.
    #[must_use]
    pub const fn digest(&self) -> u64 { self.digest }

    /// Number of lines in the source buffer.
    #[must_use]
    pub fn line_count(&self) -> usize { self.source.line_count() }

    /// The lexeme repository.
    pub fn interner_mut(&mut self) -> &mut Interner { &mut self.interner }

    /// The canonical empty lexeme.
    #[must_use]
    pub fn empty_lexeme(&self) -> Lexeme { self.empty.clone() }

    /// A synthetic end-of-file token positioned one past the last character.
    #[must_use]
    pub fn eof_token(&self) -> Token {
        Token::new(TokenKind::EndOfFile, self.empty.clone(), self.source.position(self.source.code.len()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        let text = self.inner.slice();
        let pos = self.source.position(span.start);

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => TokenKind::Malformed,
        };

        self.fold_digest(text);
        let lexeme = self.interner.intern(text);

        Some(Token::new(kind, lexeme, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|token| token.kind).collect()
    }

    #[test]
    fn keywords_and_idents() {
        assert_eq!(
            kinds("INTERFACE MODULE Foo"),
            [TokenKind::Interface, TokenKind::Module, TokenKind::Ident]
        );
        // Reserved words are case sensitive
        assert_eq!(kinds("interface"), [TokenKind::Ident]);
        // A keyword prefix does not split an identifier
        assert_eq!(kinds("ENDING"), [TokenKind::Ident]);
    }

    #[test]
    fn compound_punctuation() {
        assert_eq!(
            kinds(":= :: : .. . == = ++ + -- -"),
            [
                TokenKind::Assign,
                TokenKind::DoubleColon,
                TokenKind::Colon,
                TokenKind::DotDot,
                TokenKind::Dot,
                TokenKind::Identity,
                TokenKind::Equal,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::MinusMinus,
                TokenKind::Minus,
            ]
        );
    }

    #[test]
    fn literal_classes() {
        assert_eq!(kinds("42 0x2A 0b101010"), [TokenKind::WholeNumber; 3]);
        assert_eq!(kinds("3.14 1.0e6 2.5e-3"), [TokenKind::RealNumber; 3]);
        assert_eq!(kinds("0u41"), [TokenKind::CharCode]);
        assert_eq!(kinds("\"hi\" 'there'"), [TokenKind::QuotedLiteral; 2]);
    }

    #[test]
    fn subrange_does_not_eat_dotdot() {
        assert_eq!(
            kinds("[1 .. 9]"),
            [
                TokenKind::LeftBracket,
                TokenKind::WholeNumber,
                TokenKind::DotDot,
                TokenKind::WholeNumber,
                TokenKind::RightBracket,
            ]
        );
        assert_eq!(
            kinds("1..9"),
            [TokenKind::WholeNumber, TokenKind::DotDot, TokenKind::WholeNumber]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("a (* comment *) b"), [TokenKind::Ident, TokenKind::Ident]);
        assert_eq!(kinds("a (* nested (* deeper *) out *) b"), [TokenKind::Ident, TokenKind::Ident]);
        assert_eq!(kinds("a ! rest of line\nb"), [TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn unterminated_comment_is_malformed() {
        assert_eq!(kinds("a (* no end"), [TokenKind::Ident, TokenKind::Malformed]);
    }

    #[test]
    fn malformed_input_does_not_stop_the_stream() {
        assert_eq!(kinds("a $ b"), [TokenKind::Ident, TokenKind::Malformed, TokenKind::Ident]);
    }

    #[test]
    fn positions_are_one_indexed() {
        let tokens: Vec<Token> = Lexer::new("MODULE Foo;\nEND Foo.").collect();

        assert_eq!(tokens[0].pos.line, 1);
        assert_eq!(tokens[0].pos.column, 1);
        assert_eq!(tokens[1].pos.column, 8);
        assert_eq!(tokens[3].pos.line, 2);
        assert_eq!(tokens[3].pos.column, 1);
    }

    #[test]
    fn digest_tracks_significant_content() {
        let mut plain = Lexer::new("MODULE Foo; END Foo.");
        let mut commented = Lexer::new("MODULE (* x *) Foo; END Foo.");
        let mut changed = Lexer::new("MODULE Bar; END Bar.");

        for lexer in [&mut plain, &mut commented, &mut changed] {
            while lexer.next().is_some() {}
        }

        // Comments and whitespace do not contribute to the digest
        assert_eq!(plain.digest(), commented.digest());
        assert_ne!(plain.digest(), changed.digest());
    }
}
