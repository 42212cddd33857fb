//! S-expression dump of an AST.
//!
//! Trees print as `(KIND child ...)`, terminals as `(KIND "lexeme")`, and
//! the empty node as `()`. A list node with no children prints as its bare
//! kind, e.g. `(STMTSEQ)`.

use std::fmt::Write as _;

use crate::ast::{Ast, NodeId};

impl Ast {
    /// Renders the subtree rooted at `id` as a single-line s-expression.
    #[must_use]
    pub fn sexp(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out, id);

        out
    }

    fn write_sexp(&self, out: &mut String, id: NodeId) {
        if id.is_empty() {
            out.push_str("()");
            return;
        }

        let node = self.get(id);
        let _ = write!(out, "({}", node.kind.name());

        if let Some(lexeme) = &node.lexeme {
            out.push_str(" \"");
            for c in lexeme.as_str().chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }

        for &child in &node.children {
            out.push(' ');
            self.write_sexp(out, child);
        }

        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use mod2c_source::Interner;

    use super::*;
    use crate::ast::NodeQueue;
    use crate::nodes::NodeKind;

    #[test]
    fn empty_prints_as_unit() {
        let ast = Ast::new();
        assert_eq!(ast.sexp(Ast::empty()), "()");
    }

    #[test]
    fn terminal_prints_quoted_lexeme() {
        let mut ast = Ast::new();
        let mut interner = Interner::new();
        let id = ast.terminal(NodeKind::Ident, interner.intern("Foo"));

        assert_eq!(ast.sexp(id), "(IDENT \"Foo\")");
    }

    #[test]
    fn quotes_in_lexemes_are_escaped() {
        let mut ast = Ast::new();
        let mut interner = Interner::new();
        let id = ast.terminal(NodeKind::QuotedVal, interner.intern("\"hi\""));

        assert_eq!(ast.sexp(id), "(QUOTEDVAL \"\\\"hi\\\"\")");
    }

    #[test]
    fn module_shape() {
        let mut ast = Ast::new();
        let mut interner = Interner::new();

        let ident = ast.terminal(NodeKind::Ident, interner.intern("Foo"));
        let module = ast.node(NodeKind::Interface, &[ident, Ast::empty(), Ast::empty()]);

        assert_eq!(ast.sexp(module), "(INTERFACE (IDENT \"Foo\") () ())");
    }

    #[test]
    fn empty_list_prints_bare_kind() {
        let mut ast = Ast::new();
        let seq = ast.list_node(NodeKind::StatementSequence, NodeQueue::new());

        assert_eq!(ast.sexp(seq), "(STMTSEQ)");
    }
}
