//! Expression parsing: three precedence levels, all left-associative.
//!
//! - Level 1 (relational, non-chaining): `= # < <= > >= == IN`
//! - Level 2 (additive): `+ - OR & \`
//! - Level 3 (multiplicative): `* / DIV MOD AND`
//!
//! Unary minus binds as a prefix to the following factor only; `NOT` is a
//! prefix at the simple-term level; the type conversion `::` is a postfix
//! at the factor level and binds tighter than all binary operators.
//! Parenthesised expressions reset precedence and produce no node of their
//! own.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::{ADD_OPS, MUL_OPS, Production, REL_OPS};
use crate::token_set::TokenSet;

/// Maps an operator token to its AST node kind.
const fn operator_kind(token: TokenKind) -> NodeKind {
    match token {
        TokenKind::Equal => NodeKind::Eq,
        TokenKind::Hash => NodeKind::Neq,
        TokenKind::Less => NodeKind::Lt,
        TokenKind::LessEqual => NodeKind::LtEq,
        TokenKind::Greater => NodeKind::Gt,
        TokenKind::GreaterEqual => NodeKind::GtEq,
        TokenKind::Identity => NodeKind::Identity,
        TokenKind::In => NodeKind::In,
        TokenKind::Plus => NodeKind::Plus,
        TokenKind::Minus => NodeKind::Minus,
        TokenKind::Or => NodeKind::Or,
        TokenKind::Ampersand => NodeKind::Concat,
        TokenKind::Backslash => NodeKind::SetDiff,
        TokenKind::Asterisk => NodeKind::Mul,
        TokenKind::Slash => NodeKind::Quot,
        TokenKind::Div => NodeKind::Div,
        TokenKind::Mod => NodeKind::Mod,
        TokenKind::And => NodeKind::And,
        _ => unreachable!(),
    }
}

impl Parser<'_> {
    /// expression := simpleExpression ( relOp simpleExpression )?
    ///
    /// At most one relational operator per expression: relational operators
    /// do not chain.
    pub fn parse_expression(&mut self) -> NodeId {
        let left = self.parse_simple_expression();

        if self.at_set(REL_OPS) {
            let kind = operator_kind(self.current_token().kind);
            let _ = self.advance();

            let right = if self.expect_set(Production::SimpleExpression.first()) {
                self.parse_simple_expression()
            } else {
                self.skip_to_set(Production::Expression.follow());
                Ast::empty()
            };

            return self.ast_mut().node(kind, &[left, right]);
        }

        left
    }

    /// An expression with a FIRST-set guard: reports and recovers to
    /// `resync` when the lookahead cannot begin an expression, leaving an
    /// empty-node placeholder.
    pub(crate) fn parse_const_expression(&mut self, resync: TokenSet) -> NodeId {
        if self.expect_set(Production::Expression.first()) {
            self.parse_expression()
        } else {
            self.skip_to_set(resync);
            Ast::empty()
        }
    }

    /// simpleExpression := '-' factor termTail | term termTail
    ///
    /// where termTail is `( addOp term )*`. The leading minus binds to the
    /// following factor only and the negated factor continues an ordinary
    /// multiplicative chain.
    pub(crate) fn parse_simple_expression(&mut self) -> NodeId {
        let mut left = if self.at(TokenKind::Minus) {
            let _ = self.advance();

            let factor = self.parse_factor_operand();
            let negated = self.ast_mut().node(NodeKind::Neg, &[factor]);

            self.parse_term_tail(negated)
        } else {
            self.parse_term()
        };

        while self.at_set(ADD_OPS) {
            let kind = operator_kind(self.current_token().kind);
            let _ = self.advance();

            let right = if self.expect_set(Production::Term.first()) {
                self.parse_term()
            } else {
                self.skip_to_set(Production::SimpleExpression.follow());
                Ast::empty()
            };

            left = self.ast_mut().node(kind, &[left, right]);
        }

        left
    }

    /// term := simpleTerm ( mulOp simpleTerm )*
    fn parse_term(&mut self) -> NodeId {
        let first = self.parse_simple_term();

        self.parse_term_tail(first)
    }

    /// `( mulOp simpleTerm )*` continuing from an already-parsed operand.
    fn parse_term_tail(&mut self, mut left: NodeId) -> NodeId {
        while self.at_set(MUL_OPS) {
            let kind = operator_kind(self.current_token().kind);
            let _ = self.advance();

            let right = if self.expect_set(Production::SimpleTerm.first()) {
                self.parse_simple_term()
            } else {
                self.skip_to_set(Production::Term.follow());
                Ast::empty()
            };

            left = self.ast_mut().node(kind, &[left, right]);
        }

        left
    }

    /// simpleTerm := NOT? factor
    fn parse_simple_term(&mut self) -> NodeId {
        if self.at(TokenKind::Not) {
            let _ = self.advance();

            let factor = self.parse_factor_operand();
            return self.ast_mut().node(NodeKind::Not, &[factor]);
        }

        self.parse_factor()
    }

    /// factor := simpleFactor ( '::' typeIdent )?
    fn parse_factor(&mut self) -> NodeId {
        let value = self.parse_simple_factor();

        if self.at(TokenKind::DoubleColon) {
            let _ = self.advance();
            let ty = self.parse_type_ident(Production::Factor.follow());

            return self.ast_mut().node(NodeKind::TypeConv, &[value, ty]);
        }

        value
    }

    /// A factor with a FIRST-set guard, for unary operand positions.
    fn parse_factor_operand(&mut self) -> NodeId {
        if self.expect_set(Production::Factor.first()) {
            self.parse_factor()
        } else {
            self.skip_to_set(Production::Factor.follow());
            Ast::empty()
        }
    }

    /// simpleFactor := wholeNumber | realNumber | charCode | quotedLiteral
    ///               | '(' expression ')' | sourceDesignator
    fn parse_simple_factor(&mut self) -> NodeId {
        match self.current_token().kind {
            TokenKind::WholeNumber => self.parse_literal(NodeKind::IntVal),
            TokenKind::RealNumber => self.parse_literal(NodeKind::RealVal),
            TokenKind::CharCode => self.parse_literal(NodeKind::ChrVal),
            TokenKind::QuotedLiteral => self.parse_literal(NodeKind::QuotedVal),
            TokenKind::LeftParen => {
                let _ = self.advance();

                // Parentheses reset precedence; no node of their own.
                let inner = self.parse_const_expression(
                    Production::SimpleFactor.follow().with(TokenKind::RightParen),
                );
                let _ = self.require(TokenKind::RightParen, Production::SimpleFactor.follow());

                inner
            }
            TokenKind::Ident => self.parse_source_designator(),
            _ => {
                let _ = self.expect_set(Production::SimpleFactor.first());
                self.skip_to_set(Production::SimpleFactor.follow());

                Ast::empty()
            }
        }
    }

    fn parse_literal(&mut self, kind: NodeKind) -> NodeId {
        let token = self.advance();

        self.ast_mut().terminal(kind, token.lexeme)
    }

    /// expressionList := expression ( ',' expression )*
    pub(crate) fn parse_expression_list(&mut self) -> NodeId {
        let mut expressions = NodeQueue::new();

        loop {
            expressions.enqueue(
                self.parse_const_expression(
                    Production::ExpressionList.follow().with(TokenKind::Comma),
                ),
            );

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        self.ast_mut().list_node(NodeKind::ExprList, expressions)
    }
}
