//! Production metadata: FIRST and FOLLOW sets.
//!
//! One [`Production`] per non-terminal of the grammar. The FIRST/FOLLOW
//! tables below are derived from the grammar in one place; recovery code
//! must look sets up here rather than spelling them out inline.
//!
//! FOLLOW sets are used as resynchronisation targets. Where a non-terminal
//! occurs in several contexts its FOLLOW set is the union over all of them;
//! a superset only makes recovery stop earlier, never later.

use crate::lexer::TokenKind;
use crate::token_set::TokenSet;

/// Relational operators (expression level 1).
pub const REL_OPS: TokenSet = TokenSet::of(&[
    TokenKind::Equal,
    TokenKind::Hash,
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Identity,
    TokenKind::In,
]);

/// Additive operators (expression level 2).
pub const ADD_OPS: TokenSet = TokenSet::of(&[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Or,
    TokenKind::Ampersand,
    TokenKind::Backslash,
]);

/// Multiplicative operators (expression level 3).
pub const MUL_OPS: TokenSet = TokenSet::of(&[
    TokenKind::Asterisk,
    TokenKind::Slash,
    TokenKind::Div,
    TokenKind::Mod,
    TokenKind::And,
]);

const LITERALS: TokenSet = TokenSet::of(&[
    TokenKind::WholeNumber,
    TokenKind::RealNumber,
    TokenKind::CharCode,
    TokenKind::QuotedLiteral,
]);

const FIRST_DEFINITION: TokenSet = TokenSet::of(&[
    TokenKind::Const,
    TokenKind::Type,
    TokenKind::Var,
    TokenKind::Procedure,
]);

const FIRST_DECLARATION: TokenSet = FIRST_DEFINITION.with(TokenKind::To);

const FIRST_TYPE: TokenSet = TokenSet::of(&[
    TokenKind::Alias,
    TokenKind::Ident,
    TokenKind::LeftBracket,
    TokenKind::LeftParen,
    TokenKind::Set,
    TokenKind::Array,
    TokenKind::Record,
    TokenKind::Pointer,
    TokenKind::Procedure,
]);

const FIRST_STATEMENT: TokenSet = TokenSet::of(&[
    TokenKind::New,
    TokenKind::Retain,
    TokenKind::Release,
    TokenKind::Copy,
    TokenKind::Read,
    TokenKind::Write,
    TokenKind::If,
    TokenKind::Case,
    TokenKind::Loop,
    TokenKind::While,
    TokenKind::Repeat,
    TokenKind::For,
    TokenKind::Exit,
    TokenKind::Nop,
    TokenKind::To,
    TokenKind::Ident,
]);

const FIRST_FACTOR: TokenSet =
    LITERALS.union(TokenSet::of(&[TokenKind::LeftParen, TokenKind::Ident]));

const FIRST_TERM: TokenSet = FIRST_FACTOR.with(TokenKind::Not);

const FIRST_EXPRESSION: TokenSet = FIRST_TERM.with(TokenKind::Minus);

const FOLLOW_SEQUENCE: TokenSet = TokenSet::of(&[
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Elsif,
    TokenKind::Until,
    TokenKind::Bar,
    TokenKind::EndOfFile,
]);

const FOLLOW_STATEMENT: TokenSet = FOLLOW_SEQUENCE.with(TokenKind::Semicolon);

const FOLLOW_EXPRESSION: TokenSet = TokenSet::of(&[
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Elsif,
    TokenKind::Until,
    TokenKind::Then,
    TokenKind::Do,
    TokenKind::Of,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::RightParen,
    TokenKind::RightBracket,
    TokenKind::DotDot,
    TokenKind::Bar,
    TokenKind::EndOfFile,
]);

const FOLLOW_SIMPLE_EXPRESSION: TokenSet = FOLLOW_EXPRESSION.union(REL_OPS);
const FOLLOW_TERM: TokenSet = FOLLOW_SIMPLE_EXPRESSION.union(ADD_OPS);
const FOLLOW_SIMPLE_TERM: TokenSet = FOLLOW_TERM.union(MUL_OPS);
const FOLLOW_SIMPLE_FACTOR: TokenSet = FOLLOW_SIMPLE_TERM.with(TokenKind::DoubleColon);

const FOLLOW_TYPE: TokenSet = TokenSet::of(&[
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::RightParen,
    TokenKind::EndOfFile,
]);

const FOLLOW_DEF_ELEMENT: TokenSet = FIRST_DEFINITION.union(TokenSet::of(&[
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::EndOfFile,
]));

const FOLLOW_DECL_ELEMENT: TokenSet =
    FOLLOW_DEF_ELEMENT.union(TokenSet::of(&[TokenKind::To, TokenKind::Begin]));

/// The non-terminals of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    CompilationUnit,
    InterfaceModule,
    ImplementationModule,
    ProgramModule,
    Import,
    DefinitionSection,
    Declaration,
    ConstDefinition,
    ConstDeclaration,
    TypeDefinition,
    TypeDeclaration,
    VarDeclaration,
    IdentList,
    Qualident,
    Type,
    AliasType,
    SubrangeType,
    EnumType,
    SetType,
    ArrayType,
    RecordType,
    FieldList,
    PointerType,
    IndeterminateTarget,
    IndeterminateField,
    ProcedureType,
    FormalType,
    ProcedureHeader,
    ProcedureSignature,
    ProcedureDeclaration,
    BindingSpecifier,
    FormalParams,
    Block,
    PrivateBlock,
    StatementSequence,
    Statement,
    NewStatement,
    RetainStatement,
    ReleaseStatement,
    CopyStatement,
    ReadStatement,
    WriteStatement,
    IfStatement,
    CaseStatement,
    Case,
    LoopStatement,
    WhileStatement,
    RepeatStatement,
    ForStatement,
    ToDoList,
    UpdateOrProcCall,
    Expression,
    SimpleExpression,
    Term,
    SimpleTerm,
    Factor,
    SimpleFactor,
    SourceDesignator,
    TargetDesignator,
    PlainDesignator,
    ExpressionList,
}

impl Production {
    /// The FIRST set of the production.
    #[must_use]
    pub const fn first(self) -> TokenSet {
        match self {
            Self::CompilationUnit => TokenSet::of(&[
                TokenKind::Interface,
                TokenKind::Implementation,
                TokenKind::Module,
            ]),
            Self::InterfaceModule => TokenSet::of(&[TokenKind::Interface]),
            Self::ImplementationModule => TokenSet::of(&[TokenKind::Implementation]),
            Self::ProgramModule => TokenSet::of(&[TokenKind::Module]),
            Self::Import => TokenSet::of(&[TokenKind::Import]),
            Self::DefinitionSection => FIRST_DEFINITION,
            Self::Declaration => FIRST_DECLARATION,
            Self::ConstDefinition => TokenSet::of(&[TokenKind::LeftBracket, TokenKind::Ident]),
            Self::ConstDeclaration
            | Self::TypeDefinition
            | Self::TypeDeclaration
            | Self::VarDeclaration
            | Self::IdentList
            | Self::Qualident
            | Self::ProcedureSignature
            | Self::SourceDesignator
            | Self::TargetDesignator
            | Self::PlainDesignator
            | Self::UpdateOrProcCall => TokenSet::of(&[TokenKind::Ident]),
            Self::Type => FIRST_TYPE,
            Self::AliasType => TokenSet::of(&[TokenKind::Alias]),
            Self::SubrangeType => TokenSet::of(&[TokenKind::LeftBracket]),
            Self::EnumType => TokenSet::of(&[TokenKind::LeftParen]),
            Self::SetType => TokenSet::of(&[TokenKind::Set]),
            Self::ArrayType => TokenSet::of(&[TokenKind::Array]),
            Self::RecordType | Self::IndeterminateTarget => TokenSet::of(&[TokenKind::Record]),
            Self::FieldList => TokenSet::of(&[TokenKind::Ident]),
            Self::PointerType => TokenSet::of(&[TokenKind::Pointer]),
            Self::IndeterminateField => TokenSet::of(&[TokenKind::Plus]),
            Self::ProcedureType
            | Self::ProcedureHeader
            | Self::ProcedureDeclaration => TokenSet::of(&[TokenKind::Procedure]),
            Self::FormalType => TokenSet::of(&[TokenKind::Array, TokenKind::Ident]),
            Self::BindingSpecifier => TokenSet::of(&[
                TokenKind::New,
                TokenKind::Read,
                TokenKind::Write,
                TokenKind::Retain,
                TokenKind::Release,
                TokenKind::Ident,
            ]),
            Self::FormalParams => {
                TokenSet::of(&[TokenKind::Const, TokenKind::Var, TokenKind::Ident])
            }
            Self::Block => FIRST_DECLARATION.with(TokenKind::Begin),
            Self::PrivateBlock => FIRST_DECLARATION.with(TokenKind::Begin).with(TokenKind::End),
            Self::StatementSequence | Self::Statement => FIRST_STATEMENT,
            Self::NewStatement => TokenSet::of(&[TokenKind::New]),
            Self::RetainStatement => TokenSet::of(&[TokenKind::Retain]),
            Self::ReleaseStatement => TokenSet::of(&[TokenKind::Release]),
            Self::CopyStatement => TokenSet::of(&[TokenKind::Copy]),
            Self::ReadStatement => TokenSet::of(&[TokenKind::Read]),
            Self::WriteStatement => TokenSet::of(&[TokenKind::Write]),
            Self::IfStatement => TokenSet::of(&[TokenKind::If]),
            Self::CaseStatement => TokenSet::of(&[TokenKind::Case]),
            Self::Case => FIRST_EXPRESSION,
            Self::LoopStatement => TokenSet::of(&[TokenKind::Loop]),
            Self::WhileStatement => TokenSet::of(&[TokenKind::While]),
            Self::RepeatStatement => TokenSet::of(&[TokenKind::Repeat]),
            Self::ForStatement => TokenSet::of(&[TokenKind::For]),
            Self::ToDoList => TokenSet::of(&[TokenKind::To]),
            Self::Expression | Self::SimpleExpression | Self::ExpressionList => FIRST_EXPRESSION,
            Self::Term | Self::SimpleTerm => FIRST_TERM,
            Self::Factor | Self::SimpleFactor => FIRST_FACTOR,
        }
    }

    /// The FOLLOW set of the production.
    #[must_use]
    pub const fn follow(self) -> TokenSet {
        match self {
            Self::CompilationUnit
            | Self::InterfaceModule
            | Self::ImplementationModule
            | Self::ProgramModule => TokenSet::of(&[TokenKind::EndOfFile]),
            Self::Import => FIRST_DECLARATION.union(TokenSet::of(&[
                TokenKind::Import,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::EndOfFile,
            ])),
            Self::DefinitionSection => FIRST_DEFINITION.union(TokenSet::of(&[
                TokenKind::End,
                TokenKind::EndOfFile,
            ])),
            Self::Declaration => FIRST_DECLARATION.union(TokenSet::of(&[
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::EndOfFile,
            ])),
            Self::ConstDefinition | Self::TypeDefinition | Self::VarDeclaration => {
                FOLLOW_DEF_ELEMENT
            }
            Self::ConstDeclaration | Self::TypeDeclaration => FOLLOW_DECL_ELEMENT,
            Self::IdentList => TokenSet::of(&[TokenKind::Colon, TokenKind::RightParen]),
            Self::Qualident => TokenSet::of(&[
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::RightParen,
                TokenKind::RightBracket,
                TokenKind::Of,
                TokenKind::End,
                TokenKind::Do,
                TokenKind::Then,
                TokenKind::Assign,
                TokenKind::EndOfFile,
            ]),
            Self::Type
            | Self::AliasType
            | Self::SubrangeType
            | Self::EnumType
            | Self::SetType
            | Self::ArrayType
            | Self::RecordType
            | Self::PointerType
            | Self::IndeterminateTarget
            | Self::ProcedureType => FOLLOW_TYPE,
            Self::FieldList => TokenSet::of(&[
                TokenKind::Semicolon,
                TokenKind::End,
                TokenKind::Plus,
                TokenKind::EndOfFile,
            ]),
            Self::IndeterminateField => {
                TokenSet::of(&[TokenKind::End, TokenKind::Semicolon, TokenKind::EndOfFile])
            }
            Self::FormalType => TokenSet::of(&[
                TokenKind::Semicolon,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::EndOfFile,
            ]),
            Self::ProcedureHeader
            | Self::ProcedureSignature
            | Self::ProcedureDeclaration => {
                TokenSet::of(&[TokenKind::Semicolon, TokenKind::EndOfFile])
            }
            Self::BindingSpecifier => {
                TokenSet::of(&[TokenKind::RightBracket, TokenKind::EndOfFile])
            }
            Self::FormalParams => TokenSet::of(&[
                TokenKind::Semicolon,
                TokenKind::RightParen,
                TokenKind::EndOfFile,
            ]),
            Self::Block | Self::PrivateBlock => {
                TokenSet::of(&[TokenKind::Ident, TokenKind::EndOfFile])
            }
            Self::StatementSequence => FOLLOW_SEQUENCE,
            Self::Statement
            | Self::NewStatement
            | Self::RetainStatement
            | Self::ReleaseStatement
            | Self::CopyStatement
            | Self::ReadStatement
            | Self::WriteStatement
            | Self::IfStatement
            | Self::CaseStatement
            | Self::LoopStatement
            | Self::WhileStatement
            | Self::RepeatStatement
            | Self::ForStatement
            | Self::ToDoList
            | Self::UpdateOrProcCall => FOLLOW_STATEMENT,
            Self::Case => TokenSet::of(&[
                TokenKind::Bar,
                TokenKind::Else,
                TokenKind::End,
                TokenKind::EndOfFile,
            ]),
            Self::Expression => FOLLOW_EXPRESSION,
            Self::SimpleExpression => FOLLOW_SIMPLE_EXPRESSION,
            Self::Term => FOLLOW_TERM,
            Self::SimpleTerm => FOLLOW_SIMPLE_TERM,
            Self::Factor => FOLLOW_SIMPLE_TERM,
            Self::SimpleFactor | Self::SourceDesignator => FOLLOW_SIMPLE_FACTOR,
            Self::TargetDesignator => FOLLOW_STATEMENT.union(TokenSet::of(&[
                TokenKind::Assign,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::LeftParen,
            ])),
            Self::PlainDesignator => FOLLOW_STATEMENT.union(TokenSet::of(&[
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Assign,
            ])),
            Self::ExpressionList => {
                TokenSet::of(&[TokenKind::RightParen, TokenKind::EndOfFile])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_forms_are_mutually_exclusive() {
        let interface = Production::InterfaceModule.first();
        let implementation = Production::ImplementationModule.first();
        let program = Production::ProgramModule.first();

        assert!(!interface.contains(TokenKind::Implementation));
        assert!(!implementation.contains(TokenKind::Module) || implementation.len() == 1);
        assert!(!program.contains(TokenKind::Interface));
        assert_eq!(
            Production::CompilationUnit.first(),
            interface.union(implementation).union(program)
        );
    }

    #[test]
    fn every_follow_set_stops_at_eof_or_structure() {
        // Termination guarantee: every resync target must contain EOF or a
        // structural terminator so skipping is bounded.
        const STRUCTURAL: TokenSet = TokenSet::of(&[
            TokenKind::EndOfFile,
            TokenKind::Semicolon,
            TokenKind::End,
            TokenKind::Dot,
        ]);

        let all = [
            Production::CompilationUnit,
            Production::Import,
            Production::DefinitionSection,
            Production::Declaration,
            Production::ConstDefinition,
            Production::Type,
            Production::Expression,
            Production::Statement,
            Production::StatementSequence,
            Production::BindingSpecifier,
            Production::FormalParams,
            Production::Block,
        ];

        for production in all {
            let follow = production.follow();
            assert!(
                follow.iter().any(|kind| STRUCTURAL.contains(kind))
                    || follow.contains(TokenKind::EndOfFile),
                "{production:?} has an unbounded resync target"
            );
        }
    }

    #[test]
    fn statement_first_set_matches_dispatch() {
        let first = Production::Statement.first();

        for kind in [
            TokenKind::New,
            TokenKind::Retain,
            TokenKind::Release,
            TokenKind::Copy,
            TokenKind::Read,
            TokenKind::Write,
            TokenKind::If,
            TokenKind::Case,
            TokenKind::Loop,
            TokenKind::While,
            TokenKind::Repeat,
            TokenKind::For,
            TokenKind::Exit,
            TokenKind::Nop,
            TokenKind::To,
            TokenKind::Ident,
        ] {
            assert!(first.contains(kind), "{kind} missing from FIRST(statement)");
        }

        assert!(!first.contains(TokenKind::End));
        assert!(!first.contains(TokenKind::Semicolon));
    }

    #[test]
    fn expression_levels_nest() {
        // FIRST(factor) ⊂ FIRST(term) ⊂ FIRST(expression)
        for kind in Production::Factor.first().iter() {
            assert!(Production::Term.first().contains(kind));
        }
        for kind in Production::Term.first().iter() {
            assert!(Production::Expression.first().contains(kind));
        }
        assert!(Production::Expression.first().contains(TokenKind::Minus));
        assert!(!Production::Factor.first().contains(TokenKind::Minus));
    }
}
