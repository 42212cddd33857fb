//! Statement dispatch, statement sequences, memory-management statements,
//! assignment-or-call, and the `TO DO` list.

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;
use crate::token_set::TokenSet;

impl Parser<'_> {
    /// statementSequence := statement ( ';' statement )*
    ///
    /// Callers guarantee the lookahead is in FIRST(statement).
    pub(crate) fn parse_statement_sequence(&mut self) -> NodeId {
        let mut statements = NodeQueue::new();

        loop {
            if self.expect_set(Production::Statement.first()) {
                statements.enqueue(self.parse_statement());
            } else {
                self.skip_to_set(Production::Statement.follow());
                statements.enqueue(Ast::empty());
            }

            if self.at(TokenKind::Semicolon) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        self.ast_mut().list_node(NodeKind::StatementSequence, statements)
    }

    /// A statement sequence that may be empty, as in `BEGIN END`; an empty
    /// body yields a `STMTSEQ` node with no children and no diagnostic.
    pub(crate) fn parse_statement_sequence_or_empty(&mut self) -> NodeId {
        if self.at_set(Production::Statement.first()) {
            self.parse_statement_sequence()
        } else {
            self.ast_mut().list_node(NodeKind::StatementSequence, NodeQueue::new())
        }
    }

    /// statement — dispatch on the lookahead.
    ///
    /// The default branch is unreachable by construction: every caller
    /// tests the lookahead against FIRST(statement) first.
    pub fn parse_statement(&mut self) -> NodeId {
        match self.current_token().kind {
            TokenKind::New => self.parse_new_statement(),
            TokenKind::Retain => self.parse_retain_statement(),
            TokenKind::Release => self.parse_release_statement(),
            TokenKind::Copy => self.parse_copy_statement(),
            TokenKind::Read => self.parse_read_statement(),
            TokenKind::Write => self.parse_write_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Case => self.parse_case_statement(),
            TokenKind::Loop => self.parse_loop_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Exit => {
                let _ = self.advance();
                self.ast_mut().node(NodeKind::Exit, &[])
            }
            TokenKind::Nop => {
                let _ = self.advance();
                self.ast_mut().node(NodeKind::Nop, &[])
            }
            TokenKind::To => self.parse_to_do_list(),
            TokenKind::Ident => self.parse_update_or_proc_call(),
            _ => unreachable!("statement dispatch is guarded by the caller's FIRST-set test"),
        }
    }

    /// newStatement := NEW plainDesignator
    ///                 ( ':=' expression | CAPACITY expression )?
    ///
    /// `CAPACITY` is a pseudo-reserved identifier, recognised by lexeme.
    fn parse_new_statement(&mut self) -> NodeId {
        let follow = Production::NewStatement.follow();
        let _ = self.advance(); // NEW

        let designator = self.parse_plain_designator();

        let mut initialiser = Ast::empty();
        let mut capacity = Ast::empty();

        if self.at(TokenKind::Assign) {
            let _ = self.advance();
            initialiser = self.parse_const_expression(follow);
        } else if self.at(TokenKind::Ident) && self.current_token().lexeme.as_str() == "CAPACITY" {
            let _ = self.advance();
            capacity = self.parse_const_expression(follow);
        }

        self.ast_mut().node(NodeKind::New, &[designator, initialiser, capacity])
    }

    /// retainStatement := RETAIN plainDesignator
    fn parse_retain_statement(&mut self) -> NodeId {
        let _ = self.advance(); // RETAIN
        let designator = self.parse_plain_designator();

        self.ast_mut().node(NodeKind::Retain, &[designator])
    }

    /// releaseStatement := RELEASE plainDesignator
    fn parse_release_statement(&mut self) -> NodeId {
        let _ = self.advance(); // RELEASE
        let designator = self.parse_plain_designator();

        self.ast_mut().node(NodeKind::Release, &[designator])
    }

    /// copyStatement := COPY targetDesignator ':=' expression
    fn parse_copy_statement(&mut self) -> NodeId {
        let follow = Production::CopyStatement.follow();
        let _ = self.advance(); // COPY

        let target = self.parse_target_designator();
        let _ = self.require(TokenKind::Assign, Production::Expression.first().union(follow));
        let value = self.parse_const_expression(follow);

        self.ast_mut().node(NodeKind::Copy, &[target, value])
    }

    /// updateOrProcCall := targetDesignator
    ///                     ( ':=' expression | '++' | '--'
    ///                     | '(' expressionList? ')' )?
    ///
    /// A bare designator is a parameterless procedure call.
    fn parse_update_or_proc_call(&mut self) -> NodeId {
        let follow = Production::UpdateOrProcCall.follow();
        let target = self.parse_target_designator();

        match self.current_token().kind {
            TokenKind::Assign => {
                let _ = self.advance();
                let value = self.parse_const_expression(follow);

                self.ast_mut().node(NodeKind::Assign, &[target, value])
            }
            TokenKind::PlusPlus => {
                let _ = self.advance();
                self.ast_mut().node(NodeKind::Increment, &[target])
            }
            TokenKind::MinusMinus => {
                let _ = self.advance();
                self.ast_mut().node(NodeKind::Decrement, &[target])
            }
            TokenKind::LeftParen => {
                let _ = self.advance();

                let arguments = if self.at_set(Production::Expression.first()) {
                    self.parse_expression_list()
                } else {
                    self.ast_mut().list_node(NodeKind::ExprList, NodeQueue::new())
                };
                let _ = self.require(TokenKind::RightParen, follow);

                self.ast_mut().node(NodeKind::ProcCall, &[target, arguments])
            }
            _ => self.ast_mut().node(NodeKind::ProcCall, &[target, Ast::empty()]),
        }
    }

    /// toDoList := TO DO trackingRef? taskToDo ( ';' taskToDo )* END
    pub(crate) fn parse_to_do_list(&mut self) -> NodeId {
        let follow = Production::ToDoList.follow();
        let _ = self.advance(); // TO
        let _ = self.require(
            TokenKind::Do,
            TokenSet::of(&[TokenKind::LeftParen, TokenKind::QuotedLiteral]).union(follow),
        );

        let mut entries = NodeQueue::new();

        let tracking = if self.at(TokenKind::LeftParen) {
            self.parse_tracking_ref()
        } else {
            Ast::empty()
        };
        entries.enqueue(tracking);

        loop {
            if self.expect_token(TokenKind::QuotedLiteral) {
                entries.enqueue(self.parse_task_to_do());
            } else {
                self.skip_to_set(follow.with(TokenKind::End));
            }

            if self.at(TokenKind::Semicolon) {
                let _ = self.advance();
            } else {
                break;
            }
        }

        let _ = self.require(TokenKind::End, follow);

        self.ast_mut().list_node(NodeKind::ToDo, entries)
    }

    /// trackingRef := '(' issueId ( ',' severity )? ')'
    fn parse_tracking_ref(&mut self) -> NodeId {
        let _ = self.advance(); // '('

        let issue = self.parse_whole_number_or_empty();

        let severity = if self.at(TokenKind::Comma) {
            let _ = self.advance();
            self.parse_whole_number_or_empty()
        } else {
            Ast::empty()
        };

        let _ = self.require(
            TokenKind::RightParen,
            TokenSet::of(&[TokenKind::QuotedLiteral]).union(Production::ToDoList.follow()),
        );

        self.ast_mut().node(NodeKind::TrackingRef, &[issue, severity])
    }

    /// taskToDo := description ( ',' estimatedHours )?
    fn parse_task_to_do(&mut self) -> NodeId {
        let description = self.advance(); // the quoted literal
        let description = self.ast_mut().terminal(NodeKind::QuotedVal, description.lexeme);

        let hours = if self.at(TokenKind::Comma) {
            let _ = self.advance();
            self.parse_whole_number_or_empty()
        } else {
            Ast::empty()
        };

        self.ast_mut().node(NodeKind::Task, &[description, hours])
    }

    fn parse_whole_number_or_empty(&mut self) -> NodeId {
        if self.expect_token(TokenKind::WholeNumber) {
            let token = self.advance();

            self.ast_mut().terminal(NodeKind::IntVal, token.lexeme)
        } else {
            Ast::empty()
        }
    }
}
