//! Compilation-unit parsing: the three module forms and import directives.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};
use mod2c_source::{Lexeme, ModuleKind};

use crate::diagnostics::{ParseWarning, SemanticError, SyntaxError};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;
use crate::token_set::TokenSet;

impl Parser<'_> {
    /// Parse a compilation unit: one of the three module forms, followed by
    /// end of input.
    ///
    /// This is the start symbol. The module form is resolved by the opening
    /// keyword; anything else is reported and skipped until a module keyword
    /// or end of file is found.
    pub fn parse_compilation_unit(&mut self) -> NodeId {
        if !self.expect_set(Production::CompilationUnit.first()) {
            self.skip_to_set(Production::CompilationUnit.first());
        }

        let module = match self.current_token().kind {
            TokenKind::Interface => self.parse_interface_module(),
            TokenKind::Implementation => self.parse_implementation_module(),
            TokenKind::Module => self.parse_program_module(),
            _ => Ast::empty(), // only reachable at end of file after recovery
        };

        // Anything after the closing '.' is reported once and consumed.
        if !self.at_eof() {
            self.syntax_error(&SyntaxError::TrailingInput);
            self.skip_to_token(TokenKind::EndOfFile);
        }

        module
    }

    /// interfaceModule :=
    ///   INTERFACE MODULE moduleIdent ';' import* definitionSection*
    ///   END moduleIdent '.'
    fn parse_interface_module(&mut self) -> NodeId {
        self.begin_module(ModuleKind::Interface);
        let _ = self.advance(); // INTERFACE
        let _ = self.require(TokenKind::Module, TokenSet::of(&[TokenKind::Ident]));

        let (ident, opening) = self.parse_module_ident();
        let _ = self.require(
            TokenKind::Semicolon,
            Production::Import.first().union(Production::DefinitionSection.first()),
        );

        let imports = self.parse_import_section();
        let definitions = self.parse_definition_sections();

        let _ = self.require(TokenKind::End, TokenSet::of(&[TokenKind::Ident, TokenKind::Dot]));
        self.parse_module_closing(opening.as_ref());

        self.ast_mut().node(NodeKind::Interface, &[ident, imports, definitions])
    }

    /// implementationModule :=
    ///   IMPLEMENTATION MODULE moduleIdent ';' import* privateBlock
    ///   moduleIdent '.'
    fn parse_implementation_module(&mut self) -> NodeId {
        self.begin_module(ModuleKind::Implementation);
        let _ = self.advance(); // IMPLEMENTATION
        let _ = self.require(TokenKind::Module, TokenSet::of(&[TokenKind::Ident]));

        let (ident, opening) = self.parse_module_ident();
        let _ = self.require(
            TokenKind::Semicolon,
            Production::Import.first().union(Production::PrivateBlock.first()),
        );

        let imports = self.parse_import_section();
        let block = self.parse_private_block();

        // An implementation module with neither declarations nor an
        // initialisation body is legal but almost certainly unintended.
        if self.ast().child(block, 0).is_empty() && self.ast().child(block, 1).is_empty() {
            let pos = self.current_token().pos;
            self.warning(&ParseWarning::EmptyImplementationModule, pos);
        }

        self.parse_module_closing(opening.as_ref());

        self.ast_mut().node(NodeKind::ImplementationModule, &[ident, imports, block])
    }

    /// programModule := MODULE moduleIdent ';' import* block moduleIdent '.'
    fn parse_program_module(&mut self) -> NodeId {
        self.begin_module(ModuleKind::Program);
        let _ = self.advance(); // MODULE

        let (ident, opening) = self.parse_module_ident();
        let _ = self.require(
            TokenKind::Semicolon,
            Production::Import.first().union(Production::Block.first()),
        );

        let imports = self.parse_import_section();
        let block = self.parse_block();

        self.parse_module_closing(opening.as_ref());

        self.ast_mut().node(NodeKind::ProgramModule, &[ident, imports, block])
    }

    /// Records the resolved module kind and checks it against the source
    /// file's suffix. The kind must be set before any child production runs.
    fn begin_module(&mut self, kind: ModuleKind) {
        self.set_module_kind(kind);

        let suffix = self
            .source_name()
            .filter(|name| !name.kind().admits(kind))
            .map(|name| name.suffix().to_string());

        if let Some(suffix) = suffix {
            let pos = self.current_token().pos;
            let lexeme = self.current_token().lexeme.as_str().to_string();
            self.semantic_error(&SemanticError::ModuleKindMismatch { kind, suffix }, pos, &lexeme);
        }
    }

    /// Parses the module identifier and checks it against the source file's
    /// basename. Returns the identifier node and the lexeme for the closing
    /// check.
    fn parse_module_ident(&mut self) -> (NodeId, Option<Lexeme>) {
        if !self.expect_token(TokenKind::Ident) {
            self.skip_to_token_list(&[TokenKind::Ident, TokenKind::Semicolon]);
            if !self.at(TokenKind::Ident) {
                return (Ast::empty(), None);
            }
        }

        let lexeme = self.current_token().lexeme.clone();
        let pos = self.current_token().pos;

        let basename = self
            .source_name()
            .filter(|name| name.basename() != lexeme.as_str())
            .map(|name| name.basename().to_string());

        if let Some(expected) = basename {
            let error =
                SemanticError::BasenameMismatch { expected, found: lexeme.as_str().to_string() };
            self.semantic_error(&error, pos, lexeme.as_str());
        }

        (self.ident_terminal(), Some(lexeme))
    }

    /// Parses the closing `moduleIdent '.'` and checks the identifier
    /// against the opening one. A mismatch is a semantic error; parsing
    /// continues either way.
    fn parse_module_closing(&mut self, opening: Option<&Lexeme>) {
        if self.expect_token(TokenKind::Ident) {
            let closing = self.current_token().lexeme.clone();
            let pos = self.current_token().pos;

            if let Some(opening) = opening
                && closing != *opening
            {
                let error = SemanticError::ClosingIdentMismatch {
                    expected: opening.as_str().to_string(),
                    found: closing.as_str().to_string(),
                };
                self.semantic_error(&error, pos, closing.as_str());
            }

            let _ = self.advance();
        } else {
            self.skip_to_token_or_set(TokenKind::Dot, TokenSet::of(&[TokenKind::EndOfFile]));
        }

        let _ = self.require(TokenKind::Dot, TokenSet::of(&[TokenKind::EndOfFile]));
    }

    /// import* — builds an `IMPLIST` node, or the empty node when the unit
    /// imports nothing.
    fn parse_import_section(&mut self) -> NodeId {
        if !self.at(TokenKind::Import) {
            return Ast::empty();
        }

        let mut imports = NodeQueue::new();
        while self.at(TokenKind::Import) {
            imports.enqueue(self.parse_import());
        }

        self.ast_mut().list_node(NodeKind::ImportList, imports)
    }

    /// import := IMPORT libIdent '+'? ( ',' libIdent '+'? )* ';'
    ///
    /// Plain imports and re-exports (marked with a `'+'` suffix) are
    /// collected into two distinct lists.
    fn parse_import(&mut self) -> NodeId {
        let _ = self.advance(); // IMPORT

        let mut plain = NodeQueue::new();
        let mut reexported = NodeQueue::new();

        loop {
            if self.expect_token(TokenKind::Ident) {
                let ident = self.ident_terminal();

                if self.at(TokenKind::Plus) {
                    let _ = self.advance();
                    reexported.enqueue(ident);
                } else {
                    plain.enqueue(ident);
                }
            } else {
                self.skip_to_set(
                    Production::Import.follow().with(TokenKind::Comma).with(TokenKind::Semicolon),
                );
            }

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let _ = self.require(TokenKind::Semicolon, Production::Import.follow());

        let plain = if plain.is_empty() {
            Ast::empty()
        } else {
            self.ast_mut().list_node(NodeKind::IdentList, plain)
        };
        let reexported = if reexported.is_empty() {
            Ast::empty()
        } else {
            self.ast_mut().list_node(NodeKind::ReExportList, reexported)
        };

        self.ast_mut().node(NodeKind::Import, &[plain, reexported])
    }
}
