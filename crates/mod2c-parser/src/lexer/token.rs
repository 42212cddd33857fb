//! Token definitions for the bootstrap subset of the dialect.
//!
//! This module defines the token kinds recognised by the lexer and the token
//! structure handed to the parser.

use std::fmt::{self, Display, Formatter};

use logos::{FilterResult, Logos};
use mod2c_source::{Lexeme, Position};

/// Consumes a `(* ... *)` block comment, honouring nesting.
///
/// Returns an error when the comment is unterminated, which surfaces as a
/// malformed token at the opening delimiter.
fn block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> FilterResult<(), ()> {
    let remainder = lex.remainder();
    let bytes = remainder.as_bytes();
    let mut depth = 1usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'(', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b')') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return FilterResult::Skip;
                }
            }
            _ => i += 1,
        }
    }

    lex.bump(remainder.len());
    FilterResult::Error(())
}

/// Represents the type of token in the dialect.
///
/// This enum contains all token types recognised by the lexer: reserved
/// words, punctuation, literal classes, identifiers, and the synthetic
/// end-of-file and malformed tokens.
#[derive(Logos, Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"![^\n]*")]
pub enum TokenKind {
    // Reserved words
    #[token("ALIAS")]
    Alias,
    #[token("AND")]
    And,
    #[token("ARRAY")]
    Array,
    #[token("BEGIN")]
    Begin,
    #[token("CASE")]
    Case,
    #[token("CONST")]
    Const,
    #[token("COPY")]
    Copy,
    #[token("DIV")]
    Div,
    #[token("DO")]
    Do,
    #[token("ELSE")]
    Else,
    #[token("ELSIF")]
    Elsif,
    #[token("END")]
    End,
    #[token("EXIT")]
    Exit,
    #[token("FOR")]
    For,
    #[token("IF")]
    If,
    #[token("IMPLEMENTATION")]
    Implementation,
    #[token("IMPORT")]
    Import,
    #[token("IN")]
    In,
    #[token("INTERFACE")]
    Interface,
    #[token("LOOP")]
    Loop,
    #[token("MOD")]
    Mod,
    #[token("MODULE")]
    Module,
    #[token("NEW")]
    New,
    #[token("NOP")]
    Nop,
    #[token("NOT")]
    Not,
    #[token("OF")]
    Of,
    #[token("OPAQUE")]
    Opaque,
    #[token("OR")]
    Or,
    #[token("POINTER")]
    Pointer,
    #[token("PROCEDURE")]
    Procedure,
    #[token("READ")]
    Read,
    #[token("RECORD")]
    Record,
    #[token("RELEASE")]
    Release,
    #[token("REPEAT")]
    Repeat,
    #[token("RETAIN")]
    Retain,
    #[token("SET")]
    Set,
    #[token("THEN")]
    Then,
    #[token("TO")]
    To,
    #[token("TYPE")]
    Type,
    #[token("UNTIL")]
    Until,
    #[token("VAR")]
    Var,
    #[token("WHILE")]
    While,
    #[token("WRITE")]
    Write,

    // Punctuation
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token(":=")]
    Assign,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("^")]
    Caret,
    #[token("@")]
    At,
    #[token("|")]
    Bar,

    // Operators
    #[token("=")]
    Equal,
    #[token("==")]
    Identity,
    #[token("#")]
    Hash,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("-")]
    Minus,
    #[token("--")]
    MinusMinus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[token("&")]
    Ampersand,

    // Literals
    #[regex(r"0x[0-9A-F]+")]
    #[regex(r"0b[01]+")]
    #[regex(r"[0-9]+")]
    WholeNumber,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    RealNumber,
    #[regex(r"0u[0-9A-F]+")]
    CharCode,
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    QuotedLiteral,

    // Identifiers
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Ident,

    // Comments (block comments nest)
    #[token("(*", block_comment)]
    Comment,

    // Synthetic tokens
    EndOfFile,
    Malformed,
}

impl TokenKind {
    /// The number of token kinds; bounds the token-set bit width.
    pub const COUNT: usize = Self::ALL.len();

    /// All token kinds, in discriminant order.
    pub const ALL: &'static [Self] = &[
        Self::Alias,
        Self::And,
        Self::Array,
        Self::Begin,
        Self::Case,
        Self::Const,
        Self::Copy,
        Self::Div,
        Self::Do,
        Self::Else,
        Self::Elsif,
        Self::End,
        Self::Exit,
        Self::For,
        Self::If,
        Self::Implementation,
        Self::Import,
        Self::In,
        Self::Interface,
        Self::Loop,
        Self::Mod,
        Self::Module,
        Self::New,
        Self::Nop,
        Self::Not,
        Self::Of,
        Self::Opaque,
        Self::Or,
        Self::Pointer,
        Self::Procedure,
        Self::Read,
        Self::Record,
        Self::Release,
        Self::Repeat,
        Self::Retain,
        Self::Set,
        Self::Then,
        Self::To,
        Self::Type,
        Self::Until,
        Self::Var,
        Self::While,
        Self::Write,
        Self::Dot,
        Self::DotDot,
        Self::Comma,
        Self::Semicolon,
        Self::Colon,
        Self::DoubleColon,
        Self::Assign,
        Self::LeftParen,
        Self::RightParen,
        Self::LeftBracket,
        Self::RightBracket,
        Self::Caret,
        Self::At,
        Self::Bar,
        Self::Equal,
        Self::Identity,
        Self::Hash,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Plus,
        Self::PlusPlus,
        Self::Minus,
        Self::MinusMinus,
        Self::Asterisk,
        Self::Slash,
        Self::Backslash,
        Self::Ampersand,
        Self::WholeNumber,
        Self::RealNumber,
        Self::CharCode,
        Self::QuotedLiteral,
        Self::Ident,
        Self::Comment,
        Self::EndOfFile,
        Self::Malformed,
    ];

    /// The position of this kind within [`Self::ALL`], used by token sets.
    #[must_use]
    pub const fn index(self) -> usize { self as usize }
}

impl Display for TokenKind {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            // Reserved words
            Self::Alias => write!(f, "ALIAS"),
            Self::And => write!(f, "AND"),
            Self::Array => write!(f, "ARRAY"),
            Self::Begin => write!(f, "BEGIN"),
            Self::Case => write!(f, "CASE"),
            Self::Const => write!(f, "CONST"),
            Self::Copy => write!(f, "COPY"),
            Self::Div => write!(f, "DIV"),
            Self::Do => write!(f, "DO"),
            Self::Else => write!(f, "ELSE"),
            Self::Elsif => write!(f, "ELSIF"),
            Self::End => write!(f, "END"),
            Self::Exit => write!(f, "EXIT"),
            Self::For => write!(f, "FOR"),
            Self::If => write!(f, "IF"),
            Self::Implementation => write!(f, "IMPLEMENTATION"),
            Self::Import => write!(f, "IMPORT"),
            Self::In => write!(f, "IN"),
            Self::Interface => write!(f, "INTERFACE"),
            Self::Loop => write!(f, "LOOP"),
            Self::Mod => write!(f, "MOD"),
            Self::Module => write!(f, "MODULE"),
            Self::New => write!(f, "NEW"),
            Self::Nop => write!(f, "NOP"),
            Self::Not => write!(f, "NOT"),
            Self::Of => write!(f, "OF"),
            Self::Opaque => write!(f, "OPAQUE"),
            Self::Or => write!(f, "OR"),
            Self::Pointer => write!(f, "POINTER"),
            Self::Procedure => write!(f, "PROCEDURE"),
            Self::Read => write!(f, "READ"),
            Self::Record => write!(f, "RECORD"),
            Self::Release => write!(f, "RELEASE"),
            Self::Repeat => write!(f, "REPEAT"),
            Self::Retain => write!(f, "RETAIN"),
            Self::Set => write!(f, "SET"),
            Self::Then => write!(f, "THEN"),
            Self::To => write!(f, "TO"),
            Self::Type => write!(f, "TYPE"),
            Self::Until => write!(f, "UNTIL"),
            Self::Var => write!(f, "VAR"),
            Self::While => write!(f, "WHILE"),
            Self::Write => write!(f, "WRITE"),

            // Punctuation
            Self::Dot => write!(f, "."),
            Self::DotDot => write!(f, ".."),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::Colon => write!(f, ":"),
            Self::DoubleColon => write!(f, "::"),
            Self::Assign => write!(f, ":="),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::Caret => write!(f, "^"),
            Self::At => write!(f, "@"),
            Self::Bar => write!(f, "|"),

            // Operators
            Self::Equal => write!(f, "="),
            Self::Identity => write!(f, "=="),
            Self::Hash => write!(f, "#"),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::Plus => write!(f, "+"),
            Self::PlusPlus => write!(f, "++"),
            Self::Minus => write!(f, "-"),
            Self::MinusMinus => write!(f, "--"),
            Self::Asterisk => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Backslash => write!(f, "\\"),
            Self::Ampersand => write!(f, "&"),

            // Literals
            Self::WholeNumber => write!(f, "<whole number>"),
            Self::RealNumber => write!(f, "<real number>"),
            Self::CharCode => write!(f, "<character code>"),
            Self::QuotedLiteral => write!(f, "<quoted literal>"),

            // Identifiers
            Self::Ident => write!(f, "<identifier>"),

            // Comments
            Self::Comment => write!(f, "<comment>"),

            // Synthetic tokens
            Self::EndOfFile => write!(f, "<end of file>"),
            Self::Malformed => write!(f, "<malformed token>"),
        }
    }
}

/// Represents a token of the dialect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The interned lexeme of the token.
    pub lexeme: Lexeme,
    /// The source position of the token's first character.
    pub pos: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: Lexeme, pos: Position) -> Self {
        Self { kind, lexeme, pos }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind { self.kind }

    /// Returns the interned lexeme.
    #[must_use]
    pub const fn lexeme(&self) -> &Lexeme { &self.lexeme }

    /// Checks if the token is of the specified kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}
