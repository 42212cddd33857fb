//! Control-flow statements: `IF`, `CASE`, `LOOP`, `WHILE`, `REPEAT`, `FOR`.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;
use crate::token_set::TokenSet;

impl Parser<'_> {
    /// ifStatement := IF boolExpression THEN statementSequence
    ///                ( ELSIF boolExpression THEN statementSequence )*
    ///                ( ELSE statementSequence )? END
    pub(crate) fn parse_if_statement(&mut self) -> NodeId {
        let follow = Production::IfStatement.follow();
        let _ = self.advance(); // IF

        let mut arms = NodeQueue::new();

        let condition = self.parse_const_expression(follow.with(TokenKind::Then));
        let _ = self.require(
            TokenKind::Then,
            Production::StatementSequence.first().with(TokenKind::End).union(follow),
        );
        let branch = self.parse_statement_sequence_or_empty();

        arms.enqueue(condition);
        arms.enqueue(branch);

        while self.at(TokenKind::Elsif) {
            let _ = self.advance();

            let condition = self.parse_const_expression(follow.with(TokenKind::Then));
            let _ = self.require(
                TokenKind::Then,
                Production::StatementSequence.first().with(TokenKind::End).union(follow),
            );
            let branch = self.parse_statement_sequence_or_empty();

            let arm = self.ast_mut().node(NodeKind::Elif, &[condition, branch]);
            arms.enqueue(arm);
        }

        if self.at(TokenKind::Else) {
            let _ = self.advance();
            let branch = self.parse_statement_sequence_or_empty();

            let arm = self.ast_mut().node(NodeKind::Else, &[branch]);
            arms.enqueue(arm);
        }

        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().list_node(NodeKind::If, arms)
    }

    /// caseStatement := CASE expression OF ( '|' case )+
    ///                  ( ELSE statementSequence )? END
    pub(crate) fn parse_case_statement(&mut self) -> NodeId {
        let follow = Production::CaseStatement.follow();
        let _ = self.advance(); // CASE

        let mut parts = NodeQueue::new();

        let selector = self.parse_const_expression(follow.with(TokenKind::Of));
        let _ = self.require(TokenKind::Of, TokenSet::of(&[TokenKind::Bar]).union(follow));
        parts.enqueue(selector);

        // At least one '|' branch is required.
        if self.expect_token(TokenKind::Bar) {
            while self.at(TokenKind::Bar) {
                let _ = self.advance();
                parts.enqueue(self.parse_case());
            }
        } else {
            self.skip_to_set(follow.union(TokenSet::of(&[TokenKind::Else, TokenKind::End])));
        }

        if self.at(TokenKind::Else) {
            let _ = self.advance();
            let branch = self.parse_statement_sequence_or_empty();

            let arm = self.ast_mut().node(NodeKind::Else, &[branch]);
            parts.enqueue(arm);
        }

        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().list_node(NodeKind::Case, parts)
    }

    /// case := caseLabels ( ',' caseLabels )* ':' statementSequence
    fn parse_case(&mut self) -> NodeId {
        let follow = Production::Case.follow();

        let mut labels = NodeQueue::new();

        loop {
            labels.enqueue(self.parse_case_labels());

            if self.at(TokenKind::Comma) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let labels = self.ast_mut().list_node(NodeKind::CaseLabelList, labels);

        let _ = self.require(
            TokenKind::Colon,
            Production::StatementSequence.first().union(follow),
        );
        let branch = self.parse_statement_sequence_or_empty();

        self.ast_mut().node(NodeKind::CaseBranch, &[labels, branch])
    }

    /// caseLabels := constExpression ( '..' constExpression )?
    fn parse_case_labels(&mut self) -> NodeId {
        let follow = Production::Case.follow().with(TokenKind::Comma).with(TokenKind::Colon);

        let lower = self.parse_const_expression(follow);

        if self.at(TokenKind::DotDot) {
            let _ = self.advance();
            let upper = self.parse_const_expression(follow);

            return self.ast_mut().node(NodeKind::Range, &[lower, upper]);
        }

        lower
    }

    /// loopStatement := LOOP statementSequence END
    pub(crate) fn parse_loop_statement(&mut self) -> NodeId {
        let _ = self.advance(); // LOOP

        let body = self.parse_statement_sequence_or_empty();
        let _ = self.require(TokenKind::End, Production::LoopStatement.follow());

        self.ast_mut().node(NodeKind::Loop, &[body])
    }

    /// whileStatement := WHILE boolExpression DO statementSequence END
    pub(crate) fn parse_while_statement(&mut self) -> NodeId {
        let follow = Production::WhileStatement.follow();
        let _ = self.advance(); // WHILE

        let condition = self.parse_const_expression(follow.with(TokenKind::Do));
        let _ = self.require(
            TokenKind::Do,
            Production::StatementSequence.first().with(TokenKind::End).union(follow),
        );

        let body = self.parse_statement_sequence_or_empty();
        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().node(NodeKind::While, &[condition, body])
    }

    /// repeatStatement := REPEAT statementSequence UNTIL boolExpression
    pub(crate) fn parse_repeat_statement(&mut self) -> NodeId {
        let follow = Production::RepeatStatement.follow();
        let _ = self.advance(); // REPEAT

        let body = self.parse_statement_sequence_or_empty();
        let _ = self.require(TokenKind::Until, Production::Expression.first().union(follow));
        let condition = self.parse_const_expression(follow);

        self.ast_mut().node(NodeKind::Repeat, &[body, condition])
    }

    /// forStatement := FOR accessor '--'? ( ',' value )? IN iterableExpr
    ///                 DO statementSequence END
    ///
    /// The `'--'` descender suffix selects descending iteration; the
    /// iterator triple is wrapped in `ASC` or `DESC` accordingly.
    pub(crate) fn parse_for_statement(&mut self) -> NodeId {
        let follow = Production::ForStatement.follow();
        let _ = self.advance(); // FOR

        let accessor = self.ident_or_empty(
            TokenSet::of(&[TokenKind::MinusMinus, TokenKind::Comma, TokenKind::In]).union(follow),
        );

        let descending = if self.at(TokenKind::MinusMinus) {
            let _ = self.advance();
            true
        } else {
            false
        };

        let value = if self.at(TokenKind::Comma) {
            let _ = self.advance();
            self.ident_or_empty(follow.with(TokenKind::In))
        } else {
            Ast::empty()
        };

        let iterator_kind = if descending { NodeKind::Descending } else { NodeKind::Ascending };
        let iterator = self.ast_mut().node(iterator_kind, &[accessor, value]);

        let _ = self.require(TokenKind::In, Production::Expression.first().union(follow));
        let iterable = self.parse_const_expression(follow.with(TokenKind::Do));

        let _ = self.require(
            TokenKind::Do,
            Production::StatementSequence.first().with(TokenKind::End).union(follow),
        );
        let body = self.parse_statement_sequence_or_empty();
        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().node(NodeKind::For, &[iterator, iterable, body])
    }
}
