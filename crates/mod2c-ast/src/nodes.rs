//! AST node kinds.
//!
//! One variant per grammar construct. The printed names (see
//! [`NodeKind::name`]) are a stable contract for tree consumers such as the
//! C emitter and the s-expression dump.

use std::fmt;

/// The kind of an AST node, named by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The distinguished empty node; placeholder for absent optional
    /// children and recovery holes
    Empty,

    // File wrapper
    /// Root wrapper: filename, digest key, module
    File,
    /// Filename terminal
    Filename,
    /// Module digest terminal
    DigestKey,

    // Compilation units
    /// `INTERFACE MODULE`
    Interface,
    /// `IMPLEMENTATION MODULE`
    ImplementationModule,
    /// `MODULE` (program)
    ProgramModule,

    // Imports
    /// List of import directives
    ImportList,
    /// One `IMPORT` directive: plain idents and re-exported idents
    Import,
    /// Re-exported identifiers of an import directive
    ReExportList,
    /// List of identifier terminals
    IdentList,

    // Definition and declaration sections
    /// Interface definition sections
    DefinitionList,
    /// Implementation/program declaration sections
    DeclarationList,
    /// `CONST` section in an interface
    ConstDefList,
    /// `TYPE` section in an interface
    TypeDefList,
    /// `VAR` section in an interface
    VarDefList,
    /// `CONST` section in an implementation or program
    ConstDeclList,
    /// `TYPE` section in an implementation or program
    TypeDeclList,
    /// `VAR` section in an implementation or program
    VarDeclList,

    // Declarations
    /// Constant definition: binding, ident, type, value
    ConstDef,
    /// Type definition: ident, type
    TypeDef,
    /// Variable declaration: ident list, type
    VarDecl,
    /// Procedure header: binding, ident, formal params, return type
    ProcedureHeader,
    /// Procedure declaration: header, block
    ProcedureDecl,
    /// Binding specifier terminal (canonical bindable name; empty lexeme
    /// for a rejected binding target)
    Binding,

    // Formal parameters and formal types
    /// Formal parameter list of a procedure header
    FormalParamList,
    /// Value-mode formal parameters
    FormalParams,
    /// `CONST`-mode formal parameters
    ConstParams,
    /// `VAR`-mode formal parameters
    VarParams,
    /// Formal type list of a procedure type
    FormalTypeList,
    /// Open array formal type: `ARRAY OF typeIdent`
    OpenArray,
    /// Casting formal type `CAST ADDRESS`
    CastAddress,
    /// Casting formal type `CAST ARRAY OF OCTETSEQ`
    CastOctetSeq,

    // Types
    /// `ALIAS OF` type
    AliasType,
    /// Subrange type: lower, upper, base
    SubrangeType,
    /// Enumeration type: base enumeration, ident list
    EnumType,
    /// `SET OF` type
    SetType,
    /// Array type: value count, element type
    ArrayType,
    /// Record type: base type, fields
    RecordType,
    /// Record field list: ident list, type
    Field,
    /// Pointer type
    PointerType,
    /// Indeterminate record target of a private pointer type
    IndeterminateRecord,
    /// Indeterminate field: ident, capacity ident, element type
    IndeterminateField,
    /// Procedure type: formal types, return type
    ProcedureType,
    /// `OPAQUE` type (interface only)
    OpaqueType,

    // Blocks and statements
    /// Block: declarations, initialisation body
    Block,
    /// Statement sequence
    StatementSequence,
    /// Assignment: target, value
    Assign,
    /// Increment suffix `++`
    Increment,
    /// Decrement suffix `--`
    Decrement,
    /// Procedure call: designator, arguments
    ProcCall,
    /// `NEW`: designator, initialiser, capacity
    New,
    /// `RETAIN` designator
    Retain,
    /// `RELEASE` designator
    Release,
    /// `COPY`: target, value
    Copy,
    /// `READ`: channel, inputs
    Read,
    /// `WRITE`: channel, outputs
    Write,
    /// Formatted output arguments: format, values
    FormattedArgs,
    /// `IF`: condition, branch, elif/else tail
    If,
    /// `ELSIF` arm: condition, branch
    Elif,
    /// `ELSE` arm
    Else,
    /// `CASE`: expression, branches, else tail
    Case,
    /// One case branch: labels, branch
    CaseBranch,
    /// Case label list
    CaseLabelList,
    /// Label range: lower, upper
    Range,
    /// `LOOP` body
    Loop,
    /// `WHILE`: condition, body
    While,
    /// `REPEAT`: body, condition
    Repeat,
    /// `FOR`: iterator, iterable, body
    For,
    /// Ascending iterator: accessor, value
    Ascending,
    /// Descending iterator: accessor, value
    Descending,
    /// `EXIT`
    Exit,
    /// `NOP`
    Nop,
    /// `TO DO` list: tracking reference, tasks
    ToDo,
    /// Issue tracking reference: issue id, severity
    TrackingRef,
    /// One task: description, estimated hours
    Task,

    // Expressions
    /// Expression list
    ExprList,
    /// `=`
    Eq,
    /// `#`
    Neq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `==`
    Identity,
    /// `IN`
    In,
    /// `+`
    Plus,
    /// binary `-`
    Minus,
    /// `OR`
    Or,
    /// `&` concatenation
    Concat,
    /// `\` set difference
    SetDiff,
    /// `*`
    Mul,
    /// `/`
    Quot,
    /// `DIV`
    Div,
    /// `MOD`
    Mod,
    /// `AND`
    And,
    /// unary `-`
    Neg,
    /// `NOT`
    Not,
    /// `::` type conversion: expression, type
    TypeConv,

    // Designators
    /// Designator: head, selector tail
    Designator,
    /// Dereference selector `^`
    Deref,
    /// Subscript selector: index expression
    Index,
    /// Slice selector: lower, upper (assignment targets only)
    Slice,
    /// Field selector: ident
    Select,
    /// Function call: designator, arguments
    FunctionCall,
    /// Qualified identifier
    Qualident,

    // Terminals
    /// Identifier terminal
    Ident,
    /// Whole number terminal
    IntVal,
    /// Real number terminal
    RealVal,
    /// Character code terminal
    ChrVal,
    /// Quoted literal terminal
    QuotedVal,
}

impl NodeKind {
    /// The printed name of the kind, as used by the s-expression dump.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::File => "FILE",
            Self::Filename => "FNAME",
            Self::DigestKey => "KEY",
            Self::Interface => "INTERFACE",
            Self::ImplementationModule => "IMPMOD",
            Self::ProgramModule => "PGMMOD",
            Self::ImportList => "IMPLIST",
            Self::Import => "IMPORT",
            Self::ReExportList => "REEXPLIST",
            Self::IdentList => "IDENTLIST",
            Self::DefinitionList => "DEFLIST",
            Self::DeclarationList => "DECLLIST",
            Self::ConstDefList => "CONSTDEFLIST",
            Self::TypeDefList => "TYPEDEFLIST",
            Self::VarDefList => "VARDEFLIST",
            Self::ConstDeclList => "CONSTDECLLIST",
            Self::TypeDeclList => "TYPEDECLLIST",
            Self::VarDeclList => "VARDECLLIST",
            Self::ConstDef => "CONST",
            Self::TypeDef => "TYPE",
            Self::VarDecl => "VAR",
            Self::ProcedureHeader => "PROCDEF",
            Self::ProcedureDecl => "PROC",
            Self::Binding => "BINDING",
            Self::FormalParamList => "FPARAMLIST",
            Self::FormalParams => "FPARAMS",
            Self::ConstParams => "CONSTP",
            Self::VarParams => "VARP",
            Self::FormalTypeList => "FTYPELIST",
            Self::OpenArray => "OPENARRAY",
            Self::CastAddress => "CASTADDR",
            Self::CastOctetSeq => "CASTOCTSEQ",
            Self::AliasType => "ALIAS",
            Self::SubrangeType => "SUBR",
            Self::EnumType => "ENUM",
            Self::SetType => "SET",
            Self::ArrayType => "ARRAY",
            Self::RecordType => "RECORD",
            Self::Field => "FIELD",
            Self::PointerType => "POINTER",
            Self::IndeterminateRecord => "INREC",
            Self::IndeterminateField => "INFIELD",
            Self::ProcedureType => "PROCTYPE",
            Self::OpaqueType => "OPAQUE",
            Self::Block => "BLOCK",
            Self::StatementSequence => "STMTSEQ",
            Self::Assign => "ASSIGN",
            Self::Increment => "INCR",
            Self::Decrement => "DECR",
            Self::ProcCall => "PCALL",
            Self::New => "NEW",
            Self::Retain => "RETAIN",
            Self::Release => "RELEASE",
            Self::Copy => "COPY",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::FormattedArgs => "FMTARGS",
            Self::If => "IF",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::Case => "CASE",
            Self::CaseBranch => "CASEBRANCH",
            Self::CaseLabelList => "CLABELLIST",
            Self::Range => "RANGE",
            Self::Loop => "LOOP",
            Self::While => "WHILE",
            Self::Repeat => "REPEAT",
            Self::For => "FOR",
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
            Self::Exit => "EXIT",
            Self::Nop => "NOP",
            Self::ToDo => "TODO",
            Self::TrackingRef => "ISSUE",
            Self::Task => "TASK",
            Self::ExprList => "EXPRLIST",
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Lt => "LT",
            Self::LtEq => "LTEQ",
            Self::Gt => "GT",
            Self::GtEq => "GTEQ",
            Self::Identity => "IDTY",
            Self::In => "IN",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Or => "OR",
            Self::Concat => "CONCAT",
            Self::SetDiff => "SETDIFF",
            Self::Mul => "MUL",
            Self::Quot => "QUOT",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::And => "AND",
            Self::Neg => "NEG",
            Self::Not => "NOT",
            Self::TypeConv => "TYPECONV",
            Self::Designator => "DESIG",
            Self::Deref => "DEREF",
            Self::Index => "INDEX",
            Self::Slice => "SLICE",
            Self::Select => "SELECT",
            Self::FunctionCall => "FCALL",
            Self::Qualident => "QUALIDENT",
            Self::Ident => "IDENT",
            Self::IntVal => "INTVAL",
            Self::RealVal => "REALVAL",
            Self::ChrVal => "CHRVAL",
            Self::QuotedVal => "QUOTEDVAL",
        }
    }

    /// True for kinds whose nodes carry a lexeme instead of children.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Filename
                | Self::DigestKey
                | Self::Binding
                | Self::Ident
                | Self::IntVal
                | Self::RealVal
                | Self::ChrVal
                | Self::QuotedVal
        )
    }

    /// True for the three compilation-unit kinds.
    #[must_use]
    pub const fn is_module(self) -> bool {
        matches!(self, Self::Interface | Self::ImplementationModule | Self::ProgramModule)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}
