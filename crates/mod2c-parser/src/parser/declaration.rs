//! Definition and declaration parsing.
//!
//! The six grammatically parallel list contexts (const/type/var ×
//! definition/declaration) run through one generic list parser driven by a
//! [`ListDescriptor`]. Procedure headers and declarations, formal
//! parameters, formal types and binding specifiers live here too.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};
use mod2c_source::ModuleKind;

use crate::diagnostics::SemanticError;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;
use crate::token_set::TokenSet;

/// The identifiers accepted as binding targets besides the bindable
/// reserved-word forms.
const BINDABLE_IDENTS: &[&str] = &["COLLATION", "TLIMIT"];

/// Descriptor for the generic list parser: the element production's parser,
/// the production id for FIRST/FOLLOW lookup, and the kind of the resulting
/// list node.
pub(crate) struct ListDescriptor {
    /// Parses one element
    pub element: fn(&mut Parser<'_>) -> NodeId,
    /// Production id used for FIRST/FOLLOW lookup
    pub production: Production,
    /// Kind of the resulting list node
    pub list_kind: NodeKind,
}

fn const_definition(parser: &mut Parser<'_>) -> NodeId { parser.parse_const_definition() }
fn const_declaration(parser: &mut Parser<'_>) -> NodeId { parser.parse_const_declaration() }
fn type_definition(parser: &mut Parser<'_>) -> NodeId { parser.parse_type_definition() }
fn var_declaration(parser: &mut Parser<'_>) -> NodeId { parser.parse_var_declaration() }

const CONST_DEFINITIONS: ListDescriptor = ListDescriptor {
    element: const_definition,
    production: Production::ConstDefinition,
    list_kind: NodeKind::ConstDefList,
};

const TYPE_DEFINITIONS: ListDescriptor = ListDescriptor {
    element: type_definition,
    production: Production::TypeDefinition,
    list_kind: NodeKind::TypeDefList,
};

const VAR_DEFINITIONS: ListDescriptor = ListDescriptor {
    element: var_declaration,
    production: Production::VarDeclaration,
    list_kind: NodeKind::VarDefList,
};

const CONST_DECLARATIONS: ListDescriptor = ListDescriptor {
    element: const_declaration,
    production: Production::ConstDeclaration,
    list_kind: NodeKind::ConstDeclList,
};

const TYPE_DECLARATIONS: ListDescriptor = ListDescriptor {
    element: type_definition,
    production: Production::TypeDeclaration,
    list_kind: NodeKind::TypeDeclList,
};

const VAR_DECLARATIONS: ListDescriptor = ListDescriptor {
    element: var_declaration,
    production: Production::VarDeclaration,
    list_kind: NodeKind::VarDeclList,
};

impl Parser<'_> {
    /// definitionSection* — builds a `DEFLIST`, or the empty node when the
    /// interface defines nothing.
    pub(crate) fn parse_definition_sections(&mut self) -> NodeId {
        if !self.at_set(Production::DefinitionSection.first()) {
            return Ast::empty();
        }

        let mut sections = NodeQueue::new();
        while self.at_set(Production::DefinitionSection.first()) {
            sections.enqueue(self.parse_definition_section());
        }

        self.ast_mut().list_node(NodeKind::DefinitionList, sections)
    }

    /// definitionSection := CONST (...)+ | TYPE (...)+ | VAR (...)+
    ///                    | procedureHeader ';'
    fn parse_definition_section(&mut self) -> NodeId {
        match self.current_token().kind {
            TokenKind::Const => {
                let _ = self.advance();
                self.parse_element_list(&CONST_DEFINITIONS)
            }
            TokenKind::Type => {
                let _ = self.advance();
                self.parse_element_list(&TYPE_DEFINITIONS)
            }
            TokenKind::Var => {
                let _ = self.advance();
                self.parse_element_list(&VAR_DEFINITIONS)
            }
            TokenKind::Procedure => {
                let header = self.parse_procedure_header();
                let _ = self.require(
                    TokenKind::Semicolon,
                    Production::DefinitionSection.follow(),
                );

                header
            }
            _ => unreachable!("definition dispatch is guarded by the caller's FIRST-set test"),
        }
    }

    /// declaration* — builds a `DECLLIST`, or the empty node when the block
    /// declares nothing.
    pub(crate) fn parse_declaration_sections(&mut self) -> NodeId {
        if !self.at_set(Production::Declaration.first()) {
            return Ast::empty();
        }

        let mut sections = NodeQueue::new();
        while self.at_set(Production::Declaration.first()) {
            sections.enqueue(self.parse_declaration());
        }

        self.ast_mut().list_node(NodeKind::DeclarationList, sections)
    }

    /// declaration := CONST (...)+ | TYPE (...)+ | VAR (...)+
    ///              | procedureDeclaration ';' | toDoList ';'
    fn parse_declaration(&mut self) -> NodeId {
        match self.current_token().kind {
            TokenKind::Const => {
                let _ = self.advance();
                self.parse_element_list(&CONST_DECLARATIONS)
            }
            TokenKind::Type => {
                let _ = self.advance();
                self.parse_element_list(&TYPE_DECLARATIONS)
            }
            TokenKind::Var => {
                let _ = self.advance();
                self.parse_element_list(&VAR_DECLARATIONS)
            }
            TokenKind::Procedure => {
                let declaration = self.parse_procedure_declaration();
                let _ = self.require(TokenKind::Semicolon, Production::Declaration.follow());

                declaration
            }
            TokenKind::To => {
                let list = self.parse_to_do_list();
                let _ = self.require(TokenKind::Semicolon, Production::Declaration.follow());

                list
            }
            _ => unreachable!("declaration dispatch is guarded by the caller's FIRST-set test"),
        }
    }

    /// The generic list parser: `E ';' ( E ';' )*` per the descriptor.
    ///
    /// Diagnostics resynchronise to `{ ';' } ∪ FIRST(E) ∪ FOLLOW(E)`, so a
    /// missing separator does not swallow the next element.
    pub(crate) fn parse_element_list(&mut self, descriptor: &ListDescriptor) -> NodeId {
        let first = descriptor.production.first();
        let follow = descriptor.production.follow();
        let resync = first.union(follow).with(TokenKind::Semicolon);

        let mut elements = NodeQueue::new();

        loop {
            if self.expect_set(first) {
                elements.enqueue((descriptor.element)(self));
                let _ = self.require(TokenKind::Semicolon, resync);
            } else {
                self.skip_to_set(resync);
                if self.at(TokenKind::Semicolon) {
                    let _ = self.advance();
                }
            }

            if !self.at_set(first) {
                break;
            }
        }

        self.ast_mut().list_node(descriptor.list_kind, elements)
    }

    /// constDefinition := ( '[' bindingSpecifier ']' )? ident
    ///                    ( ':' typeIdent )? '=' constExpression
    fn parse_const_definition(&mut self) -> NodeId {
        let binding = if self.at(TokenKind::LeftBracket) {
            let _ = self.advance();
            let binding = self.parse_binding_specifier();
            let _ = self.require(TokenKind::RightBracket, TokenSet::of(&[TokenKind::Ident]));

            binding
        } else {
            Ast::empty()
        };

        self.parse_const_body(binding, Production::ConstDefinition)
    }

    /// constDeclaration := ident ( ':' typeIdent )? '=' constExpression
    fn parse_const_declaration(&mut self) -> NodeId {
        self.parse_const_body(Ast::empty(), Production::ConstDeclaration)
    }

    fn parse_const_body(&mut self, binding: NodeId, production: Production) -> NodeId {
        let follow = production.follow();

        let ident = self.ident_or_empty(follow);

        let annotation = if self.at(TokenKind::Colon) {
            let _ = self.advance();
            self.parse_type_ident(follow)
        } else {
            Ast::empty()
        };

        let _ = self.require(TokenKind::Equal, Production::Expression.first().union(follow));

        let value = if self.expect_set(Production::Expression.first()) {
            self.parse_expression()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::ConstDef, &[binding, ident, annotation, value])
    }

    /// typeDefinition := ident '=' ( OPAQUE | type )
    ///
    /// `OPAQUE` is only legal in interface modules; elsewhere it is parsed
    /// all the same and flagged with a semantic error.
    fn parse_type_definition(&mut self) -> NodeId {
        let follow = Production::TypeDefinition.follow();

        let ident = self.ident_or_empty(follow);
        let _ = self.require(
            TokenKind::Equal,
            Production::Type.first().with(TokenKind::Opaque).union(follow),
        );

        let ty = if self.at(TokenKind::Opaque) {
            if self.module_kind() != Some(ModuleKind::Interface) {
                let pos = self.current_token().pos;
                let lexeme = self.current_token().lexeme.as_str().to_string();
                self.semantic_error(&SemanticError::OpaqueNotPermitted, pos, &lexeme);
            }
            let _ = self.advance();

            self.ast_mut().node(NodeKind::OpaqueType, &[])
        } else if self.expect_set(Production::Type.first()) {
            self.parse_type()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::TypeDef, &[ident, ty])
    }

    /// varDeclaration := identList ':' type
    fn parse_var_declaration(&mut self) -> NodeId {
        let follow = Production::VarDeclaration.follow();

        let idents = self.parse_ident_list();
        let _ = self.require(TokenKind::Colon, Production::Type.first().union(follow));

        let ty = if self.expect_set(Production::Type.first()) {
            self.parse_type()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::VarDecl, &[idents, ty])
    }

    /// identList := ident ( ',' ident )*
    ///
    /// A duplicate identifier is reported as a semantic error and dropped
    /// from the list.
    pub(crate) fn parse_ident_list(&mut self) -> NodeId {
        let mut idents = NodeQueue::new();
        let mut seen: Vec<mod2c_source::Lexeme> = Vec::new();

        loop {
            if self.expect_token(TokenKind::Ident) {
                let lexeme = self.current_token().lexeme.clone();

                if seen.contains(&lexeme) {
                    let pos = self.current_token().pos;
                    let error =
                        SemanticError::DuplicateIdent { ident: lexeme.as_str().to_string() };
                    self.semantic_error(&error, pos, lexeme.as_str());
                    let _ = self.advance(); // the duplicate is dropped
                } else {
                    seen.push(lexeme);
                    idents.enqueue(self.ident_terminal());
                }
            } else {
                self.skip_to_set(Production::IdentList.follow().with(TokenKind::Comma));
            }

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        self.ast_mut().list_node(NodeKind::IdentList, idents)
    }

    /// A named type reference: qualident, with recovery to `resync`.
    pub(crate) fn parse_type_ident(&mut self, resync: TokenSet) -> NodeId {
        if self.expect_token(TokenKind::Ident) {
            self.parse_qualident()
        } else {
            self.skip_to_token_or_set(TokenKind::Ident, resync);
            if self.at(TokenKind::Ident) { self.parse_qualident() } else { Ast::empty() }
        }
    }

    /// procedureHeader := PROCEDURE ( '[' bindingSpecifier ']' )?
    ///                    procedureSignature
    pub(crate) fn parse_procedure_header(&mut self) -> NodeId {
        let _ = self.advance(); // PROCEDURE

        let binding = if self.at(TokenKind::LeftBracket) {
            let _ = self.advance();
            let binding = self.parse_binding_specifier();
            let _ = self.require(TokenKind::RightBracket, TokenSet::of(&[TokenKind::Ident]));

            binding
        } else {
            Ast::empty()
        };

        // procedureSignature := ident ( '(' formalParams ( ';' formalParams )* ')' )?
        //                       ( ':' returnedTypeIdent )?
        let ident = self.ident_or_empty(
            Production::ProcedureSignature
                .follow()
                .with(TokenKind::LeftParen)
                .with(TokenKind::Colon),
        );

        let params = if self.at(TokenKind::LeftParen) {
            self.parse_formal_param_list()
        } else {
            Ast::empty()
        };

        let returned = if self.at(TokenKind::Colon) {
            let _ = self.advance();
            self.parse_type_ident(Production::ProcedureSignature.follow())
        } else {
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::ProcedureHeader, &[binding, ident, params, returned])
    }

    /// procedureDeclaration := procedureHeader ';' block ident
    ///
    /// The trailing identifier must repeat the header's; a mismatch is a
    /// semantic error.
    pub(crate) fn parse_procedure_declaration(&mut self) -> NodeId {
        let header = self.parse_procedure_header();
        let _ = self.require(TokenKind::Semicolon, Production::Block.first());

        let block = self.parse_block();

        if self.expect_token(TokenKind::Ident) {
            let closing = self.current_token().lexeme.clone();
            let pos = self.current_token().pos;

            let opening = self.ast().lexeme(self.ast().child(header, 1)).cloned();
            if let Some(opening) = opening
                && closing != opening
            {
                let error = SemanticError::ClosingIdentMismatch {
                    expected: opening.as_str().to_string(),
                    found: closing.as_str().to_string(),
                };
                self.semantic_error(&error, pos, closing.as_str());
            }

            let _ = self.advance();
        } else {
            self.skip_to_set(Production::ProcedureDeclaration.follow());
        }

        self.ast_mut().node(NodeKind::ProcedureDecl, &[header, block])
    }

    /// formalParams ( ';' formalParams )* inside parentheses.
    fn parse_formal_param_list(&mut self) -> NodeId {
        let _ = self.advance(); // '('

        let mut params = NodeQueue::new();
        params.enqueue(self.parse_formal_params());

        while self.at(TokenKind::Semicolon) {
            let _ = self.advance();
            params.enqueue(self.parse_formal_params());
        }

        let _ = self.require(
            TokenKind::RightParen,
            Production::ProcedureSignature.follow().with(TokenKind::Colon),
        );

        self.ast_mut().list_node(NodeKind::FormalParamList, params)
    }

    /// formalParams := ( CONST | VAR )? identList ':' formalType
    fn parse_formal_params(&mut self) -> NodeId {
        let kind = match self.current_token().kind {
            TokenKind::Const => {
                let _ = self.advance();
                NodeKind::ConstParams
            }
            TokenKind::Var => {
                let _ = self.advance();
                NodeKind::VarParams
            }
            _ => NodeKind::FormalParams,
        };

        let idents = self.parse_ident_list();
        let _ = self.require(
            TokenKind::Colon,
            Production::FormalType.first().union(Production::FormalParams.follow()),
        );

        let ty = if self.expect_set(Production::FormalType.first()) {
            self.parse_formal_type()
        } else {
            self.skip_to_set(Production::FormalParams.follow());
            Ast::empty()
        };

        self.ast_mut().node(kind, &[idents, ty])
    }

    /// formalType := ( ARRAY OF )? typeIdent | castingFormalType
    ///
    /// The casting form is triggered by the pseudo-reserved identifier
    /// `CAST`, not by a reserved word.
    pub(crate) fn parse_formal_type(&mut self) -> NodeId {
        let follow = Production::FormalType.follow();

        if self.at(TokenKind::Array) {
            let _ = self.advance();
            let _ = self.require(TokenKind::Of, TokenSet::of(&[TokenKind::Ident]).union(follow));
            let ty = self.parse_type_ident(follow);

            return self.ast_mut().node(NodeKind::OpenArray, &[ty]);
        }

        if self.at(TokenKind::Ident) && self.current_token().lexeme.as_str() == "CAST" {
            return self.parse_casting_formal_type();
        }

        self.parse_type_ident(follow)
    }

    /// castingFormalType := CAST ( ARRAY OF OCTETSEQ | ADDRESS )
    fn parse_casting_formal_type(&mut self) -> NodeId {
        let follow = Production::FormalType.follow();
        let _ = self.advance(); // CAST

        if self.at(TokenKind::Array) {
            let _ = self.advance();
            let _ = self.require(TokenKind::Of, TokenSet::of(&[TokenKind::Ident]).union(follow));

            if self.expect_pseudo_terminal("OCTETSEQ") {
                let _ = self.advance();
            } else {
                self.skip_to_set(follow);
            }

            return self.ast_mut().node(NodeKind::CastOctetSeq, &[]);
        }

        if self.expect_pseudo_terminal("ADDRESS") {
            let _ = self.advance();
        } else {
            self.skip_to_set(follow);
        }

        self.ast_mut().node(NodeKind::CastAddress, &[])
    }

    /// bindingSpecifier := NEW ( '+' | '#' )? | READ '*'? | WRITE '#'?
    ///                   | RETAIN | RELEASE | bindableIdent
    ///
    /// The canonical binding target is recorded as the lexeme of a
    /// `BINDING` terminal. An unrecognised identifier is a semantic error
    /// and records the empty lexeme.
    pub(crate) fn parse_binding_specifier(&mut self) -> NodeId {
        let canonical: &str = match self.current_token().kind {
            TokenKind::New => {
                let _ = self.advance();
                if self.at(TokenKind::Plus) {
                    let _ = self.advance();
                    "NEW+"
                } else if self.at(TokenKind::Hash) {
                    let _ = self.advance();
                    "NEW#"
                } else {
                    "NEW"
                }
            }
            TokenKind::Read => {
                let _ = self.advance();
                if self.at(TokenKind::Asterisk) {
                    let _ = self.advance();
                    "READ*"
                } else {
                    "READ"
                }
            }
            TokenKind::Write => {
                let _ = self.advance();
                if self.at(TokenKind::Hash) {
                    let _ = self.advance();
                    "WRITE#"
                } else {
                    "WRITE"
                }
            }
            TokenKind::Retain => {
                let _ = self.advance();
                "RETAIN"
            }
            TokenKind::Release => {
                let _ = self.advance();
                "RELEASE"
            }
            TokenKind::Ident => {
                let lexeme = self.current_token().lexeme.clone();

                if BINDABLE_IDENTS.contains(&lexeme.as_str()) {
                    let _ = self.advance();
                    return self.ast_mut().terminal(NodeKind::Binding, lexeme);
                }

                let pos = self.current_token().pos;
                let error = SemanticError::UnknownBindable { ident: lexeme.as_str().to_string() };
                self.semantic_error(&error, pos, lexeme.as_str());
                let _ = self.advance();
                ""
            }
            _ => {
                let _ = self.expect_set(Production::BindingSpecifier.first());
                self.skip_to_set(Production::BindingSpecifier.follow());
                ""
            }
        };

        let lexeme = self.intern(canonical);
        self.ast_mut().terminal(NodeKind::Binding, lexeme)
    }

    /// block := declaration* BEGIN statementSequence END
    ///
    /// The statement sequence may be empty; `BEGIN END` yields a
    /// `STMTSEQ` node with no children.
    pub(crate) fn parse_block(&mut self) -> NodeId {
        let declarations = self.parse_declaration_sections();

        let _ = self.require(
            TokenKind::Begin,
            Production::StatementSequence.first().with(TokenKind::End),
        );
        let statements = self.parse_statement_sequence_or_empty();
        let _ = self.require(TokenKind::End, Production::Block.follow());

        self.ast_mut().node(NodeKind::Block, &[declarations, statements])
    }

    /// privateBlock := declaration* ( BEGIN statementSequence )? END
    ///
    /// Unlike a program or procedure block, the initialisation body may be
    /// absent entirely; the statement child is then the empty node.
    pub(crate) fn parse_private_block(&mut self) -> NodeId {
        let declarations = self.parse_declaration_sections();

        let statements = if self.at(TokenKind::Begin) {
            let _ = self.advance();
            self.parse_statement_sequence_or_empty()
        } else {
            Ast::empty()
        };

        let _ = self.require(TokenKind::End, Production::PrivateBlock.follow());

        self.ast_mut().node(NodeKind::Block, &[declarations, statements])
    }
}
