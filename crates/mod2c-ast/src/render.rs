//! Source renderer.
//!
//! Renders an AST back into module source text. The output is normalised
//! (one canonical spelling per construct, composite expressions fully
//! parenthesised) rather than a reproduction of the original layout;
//! parenthesisation is safe because parentheses reset precedence without
//! producing a node, so re-parsing rendered text yields a structurally
//! equal tree.

use std::fmt::Write as _;

use crate::ast::{Ast, NodeId};
use crate::nodes::NodeKind;

impl Ast {
    /// Renders the subtree rooted at `id` as module source text.
    ///
    /// Rendering the `FILE` wrapper renders its module child; rendering an
    /// empty node yields the empty string.
    #[must_use]
    pub fn render(&self, id: NodeId) -> String {
        let mut renderer = Renderer { ast: self, out: String::new() };
        renderer.node(id);

        renderer.out
    }
}

struct Renderer<'ast> {
    ast: &'ast Ast,
    out: String,
}

impl Renderer<'_> {
    fn kind(&self, id: NodeId) -> NodeKind { self.ast.kind(id) }

    fn child(&self, id: NodeId, n: usize) -> NodeId { self.ast.child(id, n) }

    fn lexeme_of(&self, id: NodeId) -> String {
        self.ast.lexeme(id).map_or_else(String::new, |lexeme| lexeme.as_str().to_string())
    }

    fn push(&mut self, text: &str) { self.out.push_str(text); }

    /// Renders `id` if it is not the empty node, with the given text before
    /// and after it.
    fn optional(&mut self, before: &str, id: NodeId, after: &str) {
        if !id.is_empty() {
            self.push(before);
            self.node(id);
            self.push(after);
        }
    }

    /// Renders the children of `id` separated by `sep`.
    fn separated(&mut self, id: NodeId, sep: &str) {
        let children = self.ast.children(id).to_vec();
        for (i, child) in children.into_iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            self.node(child);
        }
    }

    fn node(&mut self, id: NodeId) {
        if id.is_empty() {
            return;
        }

        match self.kind(id) {
            NodeKind::Empty => {}
            NodeKind::File => self.node(self.child(id, 2)),
            NodeKind::Filename | NodeKind::DigestKey => self.push(&self.lexeme_of(id)),

            NodeKind::Interface => self.interface_module(id),
            NodeKind::ImplementationModule => self.private_module(id, "IMPLEMENTATION MODULE"),
            NodeKind::ProgramModule => self.program_module(id),

            NodeKind::ImportList => self.separated(id, ""),
            NodeKind::Import => self.import(id),
            NodeKind::IdentList | NodeKind::ReExportList => self.separated(id, ", "),

            NodeKind::DefinitionList | NodeKind::DeclarationList => self.sections(id),
            NodeKind::ConstDefList | NodeKind::ConstDeclList => self.section(id, "CONST"),
            NodeKind::TypeDefList | NodeKind::TypeDeclList => self.section(id, "TYPE"),
            NodeKind::VarDefList | NodeKind::VarDeclList => self.section(id, "VAR"),

            NodeKind::ConstDef => self.const_def(id),
            NodeKind::TypeDef => {
                self.node(self.child(id, 0));
                self.push(" = ");
                self.node(self.child(id, 1));
            }
            NodeKind::VarDecl | NodeKind::Field => {
                self.node(self.child(id, 0));
                self.push(" : ");
                self.node(self.child(id, 1));
            }
            NodeKind::ProcedureHeader => self.procedure_header(id),
            NodeKind::ProcedureDecl => self.procedure_decl(id),
            NodeKind::Binding => {
                self.push("[");
                self.push(&self.lexeme_of(id));
                self.push("]");
            }

            NodeKind::FormalParamList => self.separated(id, "; "),
            NodeKind::FormalParams => self.formal_params(id, ""),
            NodeKind::ConstParams => self.formal_params(id, "CONST "),
            NodeKind::VarParams => self.formal_params(id, "VAR "),
            NodeKind::FormalTypeList => self.separated(id, ", "),
            NodeKind::OpenArray => {
                self.push("ARRAY OF ");
                self.node(self.child(id, 0));
            }
            NodeKind::CastAddress => self.push("CAST ADDRESS"),
            NodeKind::CastOctetSeq => self.push("CAST ARRAY OF OCTETSEQ"),

            NodeKind::AliasType => {
                self.push("ALIAS OF ");
                self.node(self.child(id, 0));
            }
            NodeKind::SubrangeType => self.subrange_type(id),
            NodeKind::EnumType => self.enum_type(id),
            NodeKind::SetType => {
                self.push("SET OF ");
                self.node(self.child(id, 0));
            }
            NodeKind::ArrayType => {
                self.push("ARRAY ");
                self.node(self.child(id, 0));
                self.push(" OF ");
                self.node(self.child(id, 1));
            }
            NodeKind::RecordType => self.record_type(id),
            NodeKind::PointerType => {
                self.push("POINTER TO ");
                self.node(self.child(id, 0));
            }
            NodeKind::IndeterminateRecord => self.indeterminate_record(id),
            NodeKind::IndeterminateField => self.indeterminate_field(id),
            NodeKind::ProcedureType => self.procedure_type(id),
            NodeKind::OpaqueType => self.push("OPAQUE"),

            NodeKind::Block => {
                // Blocks are rendered by their enclosing module or
                // procedure, which owns the END and trailing identifier.
                self.block_body(id);
            }
            NodeKind::StatementSequence => self.separated(id, ";\n"),

            NodeKind::Assign => {
                self.node(self.child(id, 0));
                self.push(" := ");
                self.node(self.child(id, 1));
            }
            NodeKind::Increment => {
                self.node(self.child(id, 0));
                self.push("++");
            }
            NodeKind::Decrement => {
                self.node(self.child(id, 0));
                self.push("--");
            }
            NodeKind::ProcCall => {
                self.node(self.child(id, 0));
                let args = self.child(id, 1);
                if !args.is_empty() {
                    self.push("(");
                    self.node(args);
                    self.push(")");
                }
            }
            NodeKind::New => {
                self.push("NEW ");
                self.node(self.child(id, 0));
                self.optional(" := ", self.child(id, 1), "");
                self.optional(" CAPACITY ", self.child(id, 2), "");
            }
            NodeKind::Retain => {
                self.push("RETAIN ");
                self.node(self.child(id, 0));
            }
            NodeKind::Release => {
                self.push("RELEASE ");
                self.node(self.child(id, 0));
            }
            NodeKind::Copy => {
                self.push("COPY ");
                self.node(self.child(id, 0));
                self.push(" := ");
                self.node(self.child(id, 1));
            }
            NodeKind::Read => self.read_write(id, "READ "),
            NodeKind::Write => self.read_write(id, "WRITE "),
            NodeKind::FormattedArgs => {
                self.push("#(");
                self.node(self.child(id, 0));
                self.push(", ");
                self.node(self.child(id, 1));
                self.push(")");
            }
            NodeKind::If => self.if_statement(id),
            NodeKind::Elif => {
                self.push("ELSIF ");
                self.node(self.child(id, 0));
                self.push(" THEN\n");
                self.node(self.child(id, 1));
                self.push("\n");
            }
            NodeKind::Else => {
                self.push("ELSE\n");
                self.node(self.child(id, 0));
                self.push("\n");
            }
            NodeKind::Case => self.case_statement(id),
            NodeKind::CaseBranch => {
                self.node(self.child(id, 0));
                self.push(" :\n");
                self.node(self.child(id, 1));
                self.push("\n");
            }
            NodeKind::CaseLabelList => self.separated(id, ", "),
            NodeKind::Range => {
                self.node(self.child(id, 0));
                self.push(" .. ");
                self.node(self.child(id, 1));
            }
            NodeKind::Loop => {
                self.push("LOOP\n");
                self.node(self.child(id, 0));
                self.push("\nEND");
            }
            NodeKind::While => {
                self.push("WHILE ");
                self.node(self.child(id, 0));
                self.push(" DO\n");
                self.node(self.child(id, 1));
                self.push("\nEND");
            }
            NodeKind::Repeat => {
                self.push("REPEAT\n");
                self.node(self.child(id, 0));
                self.push("\nUNTIL ");
                self.node(self.child(id, 1));
            }
            NodeKind::For => self.for_statement(id),
            NodeKind::Ascending | NodeKind::Descending => {
                // Rendered by the FOR statement, which owns the descender
                // placement.
            }
            NodeKind::Exit => self.push("EXIT"),
            NodeKind::Nop => self.push("NOP"),
            NodeKind::ToDo => self.to_do(id),
            NodeKind::TrackingRef => {
                self.push("(");
                self.node(self.child(id, 0));
                self.optional(", ", self.child(id, 1), "");
                self.push(")");
            }
            NodeKind::Task => {
                self.node(self.child(id, 0));
                self.optional(", ", self.child(id, 1), "");
            }

            NodeKind::ExprList => self.separated(id, ", "),
            NodeKind::Eq => self.binary(id, "="),
            NodeKind::Neq => self.binary(id, "#"),
            NodeKind::Lt => self.binary(id, "<"),
            NodeKind::LtEq => self.binary(id, "<="),
            NodeKind::Gt => self.binary(id, ">"),
            NodeKind::GtEq => self.binary(id, ">="),
            NodeKind::Identity => self.binary(id, "=="),
            NodeKind::In => self.binary(id, "IN"),
            NodeKind::Plus => self.binary(id, "+"),
            NodeKind::Minus => self.binary(id, "-"),
            NodeKind::Or => self.binary(id, "OR"),
            NodeKind::Concat => self.binary(id, "&"),
            NodeKind::SetDiff => self.binary(id, "\\"),
            NodeKind::Mul => self.binary(id, "*"),
            NodeKind::Quot => self.binary(id, "/"),
            NodeKind::Div => self.binary(id, "DIV"),
            NodeKind::Mod => self.binary(id, "MOD"),
            NodeKind::And => self.binary(id, "AND"),
            NodeKind::Neg => {
                self.push("(-");
                self.node(self.child(id, 0));
                self.push(")");
            }
            NodeKind::Not => {
                self.push("(NOT ");
                self.node(self.child(id, 0));
                self.push(")");
            }
            NodeKind::TypeConv => {
                self.node(self.child(id, 0));
                self.push(" :: ");
                self.node(self.child(id, 1));
            }

            NodeKind::Designator => self.separated(id, ""),
            NodeKind::Deref => self.push("^"),
            NodeKind::Index => {
                self.push("[");
                self.node(self.child(id, 0));
                self.push("]");
            }
            NodeKind::Slice => {
                self.push("[");
                self.node(self.child(id, 0));
                self.push(" ..");
                self.optional(" ", self.child(id, 1), "");
                self.push("]");
            }
            NodeKind::Select => {
                self.push(".");
                self.node(self.child(id, 0));
            }
            NodeKind::FunctionCall => {
                self.node(self.child(id, 0));
                self.push("(");
                self.node(self.child(id, 1));
                self.push(")");
            }
            NodeKind::Qualident => self.separated(id, "."),

            NodeKind::Ident
            | NodeKind::IntVal
            | NodeKind::RealVal
            | NodeKind::ChrVal
            | NodeKind::QuotedVal => self.push(&self.lexeme_of(id)),
        }
    }

    fn binary(&mut self, id: NodeId, op: &str) {
        self.push("(");
        self.node(self.child(id, 0));
        let _ = write!(self.out, " {op} ");
        self.node(self.child(id, 1));
        self.push(")");
    }

    fn interface_module(&mut self, id: NodeId) {
        let ident = self.lexeme_of(self.child(id, 0));

        let _ = writeln!(self.out, "INTERFACE MODULE {ident};");
        self.optional("", self.child(id, 1), "");
        self.optional("", self.child(id, 2), "");
        let _ = write!(self.out, "END {ident}.");
    }

    fn private_module(&mut self, id: NodeId, heading: &str) {
        let ident = self.lexeme_of(self.child(id, 0));

        let _ = writeln!(self.out, "{heading} {ident};");
        self.optional("", self.child(id, 1), "");

        let block = self.child(id, 2);
        self.optional("", self.child(block, 0), "");
        let body = self.child(block, 1);
        if !body.is_empty() {
            self.push("BEGIN\n");
            self.node(body);
            self.push("\n");
        }

        let _ = write!(self.out, "END {ident}.");
    }

    fn program_module(&mut self, id: NodeId) {
        let ident = self.lexeme_of(self.child(id, 0));

        let _ = writeln!(self.out, "MODULE {ident};");
        self.optional("", self.child(id, 1), "");

        let block = self.child(id, 2);
        self.optional("", self.child(block, 0), "");
        self.push("BEGIN\n");
        self.node(self.child(block, 1));
        self.push("\n");

        let _ = write!(self.out, "END {ident}.");
    }

    fn import(&mut self, id: NodeId) {
        self.push("IMPORT ");

        let plain = self.child(id, 0);
        let reexported = self.child(id, 1);
        let mut first = true;

        if !plain.is_empty() {
            for child in self.ast.children(plain).to_vec() {
                if !first {
                    self.push(", ");
                }
                first = false;
                self.node(child);
            }
        }

        if !reexported.is_empty() {
            for child in self.ast.children(reexported).to_vec() {
                if !first {
                    self.push(", ");
                }
                first = false;
                self.node(child);
                self.push("+");
            }
        }

        self.push(";\n");
    }

    fn sections(&mut self, id: NodeId) {
        for section in self.ast.children(id).to_vec() {
            match self.kind(section) {
                NodeKind::ProcedureHeader | NodeKind::ProcedureDecl | NodeKind::ToDo => {
                    self.node(section);
                    self.push(";\n");
                }
                _ => self.node(section),
            }
        }
    }

    fn section(&mut self, id: NodeId, heading: &str) {
        self.push(heading);
        self.push("\n");
        for item in self.ast.children(id).to_vec() {
            self.push("  ");
            self.node(item);
            self.push(";\n");
        }
    }

    fn const_def(&mut self, id: NodeId) {
        self.optional("", self.child(id, 0), " ");
        self.node(self.child(id, 1));
        self.optional(" : ", self.child(id, 2), "");
        self.push(" = ");
        self.node(self.child(id, 3));
    }

    fn procedure_header(&mut self, id: NodeId) {
        self.push("PROCEDURE ");
        self.optional("", self.child(id, 0), " ");
        self.node(self.child(id, 1));

        let params = self.child(id, 2);
        if !params.is_empty() {
            self.push(" ( ");
            self.node(params);
            self.push(" )");
        }

        self.optional(" : ", self.child(id, 3), "");
    }

    fn procedure_decl(&mut self, id: NodeId) {
        let header = self.child(id, 0);
        let ident = self.lexeme_of(self.child(header, 1));

        self.node(header);
        self.push(";\n");

        let block = self.child(id, 1);
        self.optional("", self.child(block, 0), "");
        self.push("BEGIN\n");
        self.node(self.child(block, 1));
        self.push("\n");
        let _ = write!(self.out, "END {ident}");
    }

    fn formal_params(&mut self, id: NodeId, mode: &str) {
        self.push(mode);
        self.node(self.child(id, 0));
        self.push(" : ");
        self.node(self.child(id, 1));
    }

    fn subrange_type(&mut self, id: NodeId) {
        self.push("[");
        self.node(self.child(id, 0));
        self.push(" .. ");
        self.node(self.child(id, 1));
        self.push("]");
        self.optional(" OF ", self.child(id, 2), "");
    }

    fn enum_type(&mut self, id: NodeId) {
        self.push("( ");
        self.optional("+ ", self.child(id, 0), ", ");
        self.node(self.child(id, 1));
        self.push(" )");
    }

    fn record_type(&mut self, id: NodeId) {
        self.push("RECORD");
        let children = self.ast.children(id).to_vec();

        if let Some((&base, fields)) = children.split_first() {
            self.optional(" ( ", base, " )");
            self.push("\n");
            for (i, &field) in fields.iter().enumerate() {
                if i > 0 {
                    self.push(";\n");
                }
                self.push("  ");
                self.node(field);
            }
            self.push("\n");
        }

        self.push("END");
    }

    fn indeterminate_record(&mut self, id: NodeId) {
        self.push("RECORD\n");
        let children = self.ast.children(id).to_vec();

        if let Some((&indeterminate, fields)) = children.split_last() {
            for &field in fields {
                self.push("  ");
                self.node(field);
                self.push(";\n");
            }
            self.push("  ");
            self.node(indeterminate);
            self.push("\n");
        }

        self.push("END");
    }

    fn indeterminate_field(&mut self, id: NodeId) {
        self.push("+ ");
        self.node(self.child(id, 0));
        self.push(" : ARRAY ");
        self.node(self.child(id, 1));
        self.push(" OF ");
        self.node(self.child(id, 2));
    }

    fn procedure_type(&mut self, id: NodeId) {
        self.push("PROCEDURE");

        let formals = self.child(id, 0);
        if !formals.is_empty() {
            self.push(" ( ");
            self.node(formals);
            self.push(" )");
        }

        self.optional(" : ", self.child(id, 1), "");
    }

    fn block_body(&mut self, id: NodeId) {
        self.optional("", self.child(id, 0), "");
        let body = self.child(id, 1);
        if !body.is_empty() {
            self.push("BEGIN\n");
            self.node(body);
            self.push("\n");
        }
    }

    fn read_write(&mut self, id: NodeId, keyword: &str) {
        self.push(keyword);
        let channel = self.child(id, 0);
        if !channel.is_empty() {
            self.push("@");
            self.node(channel);
            self.push(" : ");
        }
        self.node(self.child(id, 1));
    }

    fn if_statement(&mut self, id: NodeId) {
        self.push("IF ");
        self.node(self.child(id, 0));
        self.push(" THEN\n");
        self.node(self.child(id, 1));
        self.push("\n");

        for arm in self.ast.children(id).to_vec().into_iter().skip(2) {
            self.node(arm);
        }

        self.push("END");
    }

    fn case_statement(&mut self, id: NodeId) {
        self.push("CASE ");
        self.node(self.child(id, 0));
        self.push(" OF\n");

        for branch in self.ast.children(id).to_vec().into_iter().skip(1) {
            if self.kind(branch) == NodeKind::CaseBranch {
                self.push("| ");
            }
            self.node(branch);
        }

        self.push("END");
    }

    fn for_statement(&mut self, id: NodeId) {
        let iterator = self.child(id, 0);

        self.push("FOR ");
        self.node(self.child(iterator, 0));
        if self.kind(iterator) == NodeKind::Descending {
            self.push("--");
        }
        self.optional(", ", self.child(iterator, 1), "");

        self.push(" IN ");
        self.node(self.child(id, 1));
        self.push(" DO\n");
        self.node(self.child(id, 2));
        self.push("\nEND");
    }

    fn to_do(&mut self, id: NodeId) {
        self.push("TO DO ");
        let children = self.ast.children(id).to_vec();

        if let Some((&tracking, tasks)) = children.split_first() {
            self.optional("", tracking, " ");
            for (i, &task) in tasks.iter().enumerate() {
                if i > 0 {
                    self.push("; ");
                }
                self.node(task);
            }
        }

        self.push(" END");
    }
}
