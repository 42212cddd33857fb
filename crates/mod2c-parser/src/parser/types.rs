//! Type parsing.
//!
//! The `type` production is one of the three places the module kind feeds
//! into the grammar: pointer types in implementation modules are restricted
//! to a named target or an indeterminate record, while interface and program
//! modules take the determinate form. (`OPAQUE` is handled one level up, in
//! the type definition, since it is only legal as a definition's right-hand
//! side.)

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};
use mod2c_source::ModuleKind;

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;
use crate::token_set::TokenSet;

impl Parser<'_> {
    /// type := aliasType | derivedType | subrangeType | enumType | setType
    ///       | arrayType | recordType | pointerType | procedureType
    ///
    /// Callers guarantee the lookahead is in FIRST(type); the default branch
    /// cannot arise from valid dispatch.
    pub fn parse_type(&mut self) -> NodeId {
        match self.current_token().kind {
            TokenKind::Alias => self.parse_alias_type(),
            TokenKind::Ident => self.parse_qualident(), // derived type
            TokenKind::LeftBracket => self.parse_subrange_type(),
            TokenKind::LeftParen => self.parse_enum_type(),
            TokenKind::Set => self.parse_set_type(),
            TokenKind::Array => self.parse_array_type(),
            TokenKind::Record => self.parse_record_type(),
            TokenKind::Pointer => self.parse_pointer_type(),
            TokenKind::Procedure => self.parse_procedure_type(),
            _ => unreachable!("type dispatch is guarded by the caller's FIRST-set test"),
        }
    }

    /// aliasType := ALIAS OF typeIdent
    fn parse_alias_type(&mut self) -> NodeId {
        let _ = self.advance(); // ALIAS
        let _ = self.require(
            TokenKind::Of,
            TokenSet::of(&[TokenKind::Ident]).union(Production::AliasType.follow()),
        );

        let ty = self.parse_type_ident(Production::AliasType.follow());

        self.ast_mut().node(NodeKind::AliasType, &[ty])
    }

    /// subrangeType := '[' constExpression '..' constExpression ']'
    ///                 ( OF typeIdent )?
    fn parse_subrange_type(&mut self) -> NodeId {
        let follow = Production::SubrangeType.follow();
        let _ = self.advance(); // '['

        let lower = self.parse_const_expression(follow.with(TokenKind::DotDot));
        let _ = self.require(
            TokenKind::DotDot,
            Production::Expression.first().with(TokenKind::RightBracket).union(follow),
        );
        let upper = self.parse_const_expression(follow.with(TokenKind::RightBracket));

        let _ = self.require(TokenKind::RightBracket, follow.with(TokenKind::Of));

        let base = if self.at(TokenKind::Of) {
            let _ = self.advance();
            self.parse_type_ident(follow)
        } else {
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::SubrangeType, &[lower, upper, base])
    }

    /// enumType := '(' ( '+' enumTypeToExtend ',' )? identList ')'
    fn parse_enum_type(&mut self) -> NodeId {
        let follow = Production::EnumType.follow();
        let _ = self.advance(); // '('

        let base = if self.at(TokenKind::Plus) {
            let _ = self.advance();
            let base = self.parse_type_ident(follow.with(TokenKind::Comma));
            let _ = self.require(TokenKind::Comma, TokenSet::of(&[TokenKind::Ident]));

            base
        } else {
            Ast::empty()
        };

        let idents = self.parse_ident_list();
        let _ = self.require(TokenKind::RightParen, follow);

        self.ast_mut().node(NodeKind::EnumType, &[base, idents])
    }

    /// setType := SET OF ( enumTypeIdent | enumType )
    fn parse_set_type(&mut self) -> NodeId {
        let follow = Production::SetType.follow();
        let _ = self.advance(); // SET
        let _ = self.require(
            TokenKind::Of,
            TokenSet::of(&[TokenKind::Ident, TokenKind::LeftParen]).union(follow),
        );

        let element = if self.at(TokenKind::LeftParen) {
            self.parse_enum_type()
        } else {
            self.parse_type_ident(follow)
        };

        self.ast_mut().node(NodeKind::SetType, &[element])
    }

    /// arrayType := ARRAY valueCount OF type
    fn parse_array_type(&mut self) -> NodeId {
        let follow = Production::ArrayType.follow();
        let _ = self.advance(); // ARRAY

        let count = self.parse_const_expression(follow.with(TokenKind::Of));
        let _ = self.require(TokenKind::Of, Production::Type.first().union(follow));

        let element = if self.expect_set(Production::Type.first()) {
            self.parse_type()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::ArrayType, &[count, element])
    }

    /// recordType := RECORD ( '(' baseTypeIdent ')' )?
    ///               fieldList ( ';' fieldList )* END
    fn parse_record_type(&mut self) -> NodeId {
        let follow = Production::RecordType.follow();
        let _ = self.advance(); // RECORD

        let base = if self.at(TokenKind::LeftParen) {
            let _ = self.advance();
            let base = self.parse_type_ident(TokenSet::of(&[TokenKind::RightParen]));
            let _ = self.require(TokenKind::RightParen, TokenSet::of(&[TokenKind::Ident]));

            base
        } else {
            Ast::empty()
        };

        let mut fields = NodeQueue::new();
        fields.enqueue(base);

        loop {
            if self.expect_token(TokenKind::Ident) {
                fields.enqueue(self.parse_field_list());
            } else {
                self.skip_to_set(Production::FieldList.follow());
            }

            if self.at(TokenKind::Semicolon) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().list_node(NodeKind::RecordType, fields)
    }

    /// fieldList := identList ':' type
    fn parse_field_list(&mut self) -> NodeId {
        let follow = Production::FieldList.follow();

        let idents = self.parse_ident_list();
        let _ = self.require(TokenKind::Colon, Production::Type.first().union(follow));

        let ty = if self.expect_set(Production::Type.first()) {
            self.parse_type()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::Field, &[idents, ty])
    }

    /// pointerType := POINTER TO type                      (determinate)
    /// privatePointerType := POINTER TO ( typeIdent | indeterminateTarget )
    ///
    /// Implementation modules take the private form; interface and program
    /// modules the determinate one.
    fn parse_pointer_type(&mut self) -> NodeId {
        let follow = Production::PointerType.follow();
        let _ = self.advance(); // POINTER
        let _ = self.require(TokenKind::To, Production::Type.first().union(follow));

        let target = if self.module_kind() == Some(ModuleKind::Implementation) {
            if self.at(TokenKind::Record) {
                self.parse_indeterminate_target()
            } else {
                self.parse_type_ident(follow)
            }
        } else if self.expect_set(Production::Type.first()) {
            self.parse_type()
        } else {
            self.skip_to_set(follow);
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::PointerType, &[target])
    }

    /// indeterminateTarget := RECORD ( fieldList ';' )*
    ///                        indeterminateField END
    fn parse_indeterminate_target(&mut self) -> NodeId {
        let follow = Production::IndeterminateTarget.follow();
        let _ = self.advance(); // RECORD

        let mut fields = NodeQueue::new();

        while self.at(TokenKind::Ident) {
            fields.enqueue(self.parse_field_list());
            let _ = self.require(
                TokenKind::Semicolon,
                TokenSet::of(&[TokenKind::Ident, TokenKind::Plus, TokenKind::End]),
            );
        }

        let indeterminate = if self.expect_token(TokenKind::Plus) {
            self.parse_indeterminate_field()
        } else {
            self.skip_to_set(Production::IndeterminateField.follow());
            Ast::empty()
        };
        fields.enqueue(indeterminate);

        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().list_node(NodeKind::IndeterminateRecord, fields)
    }

    /// indeterminateField := '+' ident ':' ARRAY capacityIdent OF typeIdent
    fn parse_indeterminate_field(&mut self) -> NodeId {
        let follow = Production::IndeterminateField.follow();
        let _ = self.advance(); // '+'

        let ident = self.ident_or_empty(follow.with(TokenKind::Colon));
        let _ = self.require(TokenKind::Colon, TokenSet::of(&[TokenKind::Array]).union(follow));
        let _ = self.require(TokenKind::Array, TokenSet::of(&[TokenKind::Ident]).union(follow));

        let capacity = self.ident_or_empty(follow.with(TokenKind::Of));
        let _ = self.require(TokenKind::Of, TokenSet::of(&[TokenKind::Ident]).union(follow));
        let ty = self.parse_type_ident(follow);

        self.ast_mut().node(NodeKind::IndeterminateField, &[ident, capacity, ty])
    }

    /// procedureType := PROCEDURE ( '(' formalType ( ',' formalType )* ')' )?
    ///                  ( ':' returnedTypeIdent )?
    fn parse_procedure_type(&mut self) -> NodeId {
        let follow = Production::ProcedureType.follow();
        let _ = self.advance(); // PROCEDURE

        let formals = if self.at(TokenKind::LeftParen) {
            let _ = self.advance();

            let mut formals = NodeQueue::new();
            formals.enqueue(self.parse_formal_type_or_empty());

            while self.at(TokenKind::Comma) {
                let _ = self.advance();
                formals.enqueue(self.parse_formal_type_or_empty());
            }

            let _ = self.require(TokenKind::RightParen, follow.with(TokenKind::Colon));

            self.ast_mut().list_node(NodeKind::FormalTypeList, formals)
        } else {
            Ast::empty()
        };

        let returned = if self.at(TokenKind::Colon) {
            let _ = self.advance();
            self.parse_type_ident(follow)
        } else {
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::ProcedureType, &[formals, returned])
    }

    fn parse_formal_type_or_empty(&mut self) -> NodeId {
        if self.expect_set(Production::FormalType.first()) {
            self.parse_formal_type()
        } else {
            self.skip_to_set(Production::FormalType.follow());
            Ast::empty()
        }
    }
}
