//! `READ` and `WRITE` statements.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;

impl Parser<'_> {
    /// readStatement := READ ( '@' plainDesignator ':' )?
    ///                  plainDesignator ( ',' plainDesignator )*
    pub(crate) fn parse_read_statement(&mut self) -> NodeId {
        let _ = self.advance(); // READ

        let channel = self.parse_channel_prefix();

        let mut inputs = NodeQueue::new();

        loop {
            inputs.enqueue(self.parse_plain_designator());

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let inputs = self.ast_mut().list_node(NodeKind::ExprList, inputs);

        self.ast_mut().node(NodeKind::Read, &[channel, inputs])
    }

    /// writeStatement := WRITE ( '@' plainDesignator ':' )?
    ///                   outputArgs ( ',' outputArgs )*
    pub(crate) fn parse_write_statement(&mut self) -> NodeId {
        let _ = self.advance(); // WRITE

        let channel = self.parse_channel_prefix();

        let mut outputs = NodeQueue::new();

        loop {
            outputs.enqueue(self.parse_output_args());

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let outputs = self.ast_mut().list_node(NodeKind::ExprList, outputs);

        self.ast_mut().node(NodeKind::Write, &[channel, outputs])
    }

    /// The optional channel prefix `'@' plainDesignator ':'` shared by READ
    /// and WRITE.
    fn parse_channel_prefix(&mut self) -> NodeId {
        if !self.at(TokenKind::At) {
            return Ast::empty();
        }

        let _ = self.advance(); // '@'
        let channel = self.parse_plain_designator();
        let _ = self.require(
            TokenKind::Colon,
            Production::Expression.first().union(Production::WriteStatement.follow()),
        );

        channel
    }

    /// outputArgs := formattedArgs | expression
    ///
    /// formattedArgs := '#' '(' formatExpr ',' expressionList ')'
    fn parse_output_args(&mut self) -> NodeId {
        let follow = Production::WriteStatement.follow().with(TokenKind::Comma);

        if !self.at(TokenKind::Hash) {
            return self.parse_const_expression(follow);
        }

        let _ = self.advance(); // '#'
        let _ = self.require(TokenKind::LeftParen, Production::Expression.first().union(follow));

        let format = self.parse_const_expression(follow.with(TokenKind::RightParen));
        let _ = self.require(
            TokenKind::Comma,
            Production::Expression.first().with(TokenKind::RightParen).union(follow),
        );

        let values = if self.at_set(Production::Expression.first()) {
            self.parse_expression_list()
        } else {
            self.ast_mut().list_node(NodeKind::ExprList, NodeQueue::new())
        };

        let _ = self.require(TokenKind::RightParen, follow);

        self.ast_mut().node(NodeKind::FormattedArgs, &[format, values])
    }
}
