//! Designator parsing.
//!
//! Three flavours share one skeleton, `qualident ( tail )*`:
//!
//! - **source** (r-value): deref, subscript and field-select tails, plus an
//!   optional final function-call tail
//! - **target** (l-value): no call tail; a subscript may be a slice
//!   `[lo .. hi?]`
//! - **plain** (operands of NEW, READ, RETAIN, RELEASE): no call tail, no
//!   slice

use mod2c_ast::{Ast, NodeId, NodeKind, NodeQueue};

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::productions::Production;

/// Which tails a designator context admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DesignatorMode {
    Source,
    Target,
    Plain,
}

impl Parser<'_> {
    /// qualident := ident ( '.' ident )*
    ///
    /// A single identifier yields a bare `IDENT` terminal; a dotted path a
    /// `QUALIDENT` node.
    pub(crate) fn parse_qualident(&mut self) -> NodeId {
        if !self.expect_token(TokenKind::Ident) {
            self.skip_to_set(Production::Qualident.follow());
            return Ast::empty();
        }

        let first = self.ident_terminal();

        if !(self.at(TokenKind::Dot) && self.peek_token().is(TokenKind::Ident)) {
            return first;
        }

        let mut parts = NodeQueue::new();
        parts.enqueue(first);

        while self.at(TokenKind::Dot) && self.peek_token().is(TokenKind::Ident) {
            let _ = self.advance(); // '.'
            parts.enqueue(self.ident_terminal());
        }

        self.ast_mut().list_node(NodeKind::Qualident, parts)
    }

    /// sourceDesignator — r-value designator, possibly a function call.
    pub(crate) fn parse_source_designator(&mut self) -> NodeId {
        self.parse_designator(DesignatorMode::Source)
    }

    /// targetDesignator — l-value designator for assignment-like contexts.
    pub(crate) fn parse_target_designator(&mut self) -> NodeId {
        self.parse_designator(DesignatorMode::Target)
    }

    /// plainDesignator — operand designator for NEW, READ, RETAIN, RELEASE.
    pub(crate) fn parse_plain_designator(&mut self) -> NodeId {
        self.parse_designator(DesignatorMode::Plain)
    }

    fn parse_designator(&mut self, mode: DesignatorMode) -> NodeId {
        let resync = match mode {
            DesignatorMode::Source => Production::SourceDesignator.follow(),
            DesignatorMode::Target => Production::TargetDesignator.follow(),
            DesignatorMode::Plain => Production::PlainDesignator.follow(),
        };

        if !self.expect_token(TokenKind::Ident) {
            self.skip_to_set(resync);
            return Ast::empty();
        }

        let head = self.parse_qualident();

        let mut parts = NodeQueue::new();
        parts.enqueue(head);

        loop {
            match self.current_token().kind {
                // derefTail — may repeat
                TokenKind::Caret => {
                    let _ = self.advance();
                    let deref = self.ast_mut().node(NodeKind::Deref, &[]);
                    parts.enqueue(deref);
                }
                // bracketTail / bracketTargetTail
                TokenKind::LeftBracket => {
                    let _ = self.advance();

                    let index = self.parse_const_expression(
                        resync.with(TokenKind::DotDot).with(TokenKind::RightBracket),
                    );

                    let selector = if mode == DesignatorMode::Target && self.at(TokenKind::DotDot)
                    {
                        let _ = self.advance();

                        let upper = if self.at_set(Production::Expression.first()) {
                            self.parse_expression()
                        } else {
                            Ast::empty()
                        };

                        self.ast_mut().node(NodeKind::Slice, &[index, upper])
                    } else {
                        self.ast_mut().node(NodeKind::Index, &[index])
                    };
                    parts.enqueue(selector);

                    let _ = self.require(TokenKind::RightBracket, resync);
                }
                // selectTail — only when the dot starts a selector, not the
                // module's closing period
                TokenKind::Dot if self.peek_token().is(TokenKind::Ident) => {
                    let _ = self.advance();
                    let ident = self.ident_terminal();

                    let selector = self.ast_mut().node(NodeKind::Select, &[ident]);
                    parts.enqueue(selector);
                }
                _ => break,
            }
        }

        let designator = if parts.len() == 1 {
            head
        } else {
            self.ast_mut().list_node(NodeKind::Designator, parts)
        };

        // Function-call tail: source designators only.
        if mode == DesignatorMode::Source && self.at(TokenKind::LeftParen) {
            let _ = self.advance();

            let arguments = if self.at_set(Production::Expression.first()) {
                self.parse_expression_list()
            } else {
                self.ast_mut().list_node(NodeKind::ExprList, NodeQueue::new())
            };
            let _ = self.require(TokenKind::RightParen, resync);

            return self.ast_mut().node(NodeKind::FunctionCall, &[designator, arguments]);
        }

        designator
    }
}
