//! Property-based tests: list arities, expression precedence and
//! associativity, and fuzzing for bounded, panic-free termination.

use mod2c_ast::NodeKind;
use mod2c_parser::{Parser, parse_source};
use proptest::prelude::*;

// ============================================================================
// Definition Lists
// ============================================================================

proptest! {
    #[test]
    fn const_definition_lists_have_exactly_n_children(n in 1usize..24) {
        let definitions: String = (0..n).map(|i| format!("K{i} = {i}; ")).collect();
        let source = format!("INTERFACE MODULE Foo; CONST {definitions}END Foo.");

        let parse = parse_source(&source);
        prop_assert!(parse.stats.is_clean());

        let definition_list = parse.ast.child(parse.module(), 2);
        let section = parse.ast.child(definition_list, 0);

        prop_assert_eq!(parse.ast.kind(section), NodeKind::ConstDefList);
        prop_assert_eq!(parse.ast.children(section).len(), n);
        for &definition in parse.ast.children(section) {
            prop_assert_eq!(parse.ast.kind(definition), NodeKind::ConstDef);
        }
    }

    #[test]
    fn var_declaration_lists_have_exactly_n_children(n in 1usize..24) {
        let declarations: String = (0..n).map(|i| format!("v{i} : T{i}; ")).collect();
        let source = format!("MODULE Foo; VAR {declarations}BEGIN END Foo.");

        let parse = parse_source(&source);
        prop_assert!(parse.stats.is_clean());

        let block = parse.ast.child(parse.module(), 2);
        let declaration_list = parse.ast.child(block, 0);
        let section = parse.ast.child(declaration_list, 0);

        prop_assert_eq!(parse.ast.kind(section), NodeKind::VarDeclList);
        prop_assert_eq!(parse.ast.children(section).len(), n);
    }
}

// ============================================================================
// Expression Precedence and Associativity
// ============================================================================

/// Additive (level 2) and multiplicative (level 3) operators with their
/// node names.
const OPERATORS: &[(&str, &str, bool)] = &[
    ("+", "PLUS", false),
    ("-", "MINUS", false),
    ("OR", "OR", false),
    ("&", "CONCAT", false),
    ("\\", "SETDIFF", false),
    ("*", "MUL", true),
    ("/", "QUOT", true),
    ("DIV", "DIV", true),
    ("MOD", "MOD", true),
    ("AND", "AND", true),
];

/// Computes the expected s-expression for a flat operator chain, honouring
/// the two binary precedence levels and left-associativity.
fn expected_chain_sexp(operator_indices: &[usize]) -> String {
    let operand = |i: usize| format!("(IDENT \"x{i}\")");

    // The running multiplicative chain and the folded additive part
    let mut term = operand(0);
    let mut additive: Option<(String, &str)> = None;

    for (position, &op_index) in operator_indices.iter().enumerate() {
        let (_, name, multiplicative) = OPERATORS[op_index];
        let next = operand(position + 1);

        if multiplicative {
            term = format!("({name} {term} {next})");
        } else {
            let left = match additive.take() {
                None => term,
                Some((folded, pending)) => format!("({pending} {folded} {term})"),
            };
            additive = Some((left, name));
            term = next;
        }
    }

    match additive {
        None => term,
        Some((folded, pending)) => format!("({pending} {folded} {term})"),
    }
}

proptest! {
    #[test]
    fn operator_chains_respect_precedence_and_associativity(
        operator_indices in prop::collection::vec(0usize..OPERATORS.len(), 1..8),
    ) {
        let mut source = "x0".to_string();
        for (position, &op_index) in operator_indices.iter().enumerate() {
            let (symbol, _, _) = OPERATORS[op_index];
            source.push_str(&format!(" {symbol} x{}", position + 1));
        }

        let mut parser = Parser::new(&source);
        let expr = parser.parse_expression();
        prop_assert!(parser.stats().is_clean());

        let expected = expected_chain_sexp(&operator_indices);
        prop_assert_eq!(parser.ast().sexp(expr), expected);
    }

    #[test]
    fn one_relational_operator_tops_the_tree(
        left_ops in prop::collection::vec(0usize..OPERATORS.len(), 0..4),
        relational in prop::sample::select(vec![
            ("=", "EQ"), ("#", "NEQ"), ("<", "LT"), ("<=", "LTEQ"),
            (">", "GT"), (">=", "GTEQ"), ("==", "IDTY"), ("IN", "IN"),
        ]),
    ) {
        let mut source = "x0".to_string();
        for (position, &op_index) in left_ops.iter().enumerate() {
            let (symbol, _, _) = OPERATORS[op_index];
            source.push_str(&format!(" {symbol} x{}", position + 1));
        }
        let (rel_symbol, rel_name) = relational;
        source.push_str(&format!(" {rel_symbol} y"));

        let mut parser = Parser::new(&source);
        let expr = parser.parse_expression();
        prop_assert!(parser.stats().is_clean());

        let lhs = expected_chain_sexp(&left_ops);
        let expected = format!("({rel_name} {lhs} (IDENT \"y\"))");
        prop_assert_eq!(parser.ast().sexp(expr), expected);
    }
}

// ============================================================================
// Fuzzing
// ============================================================================

proptest! {
    #[test]
    fn arbitrary_input_terminates_without_panicking(input in "[ -~\n]{0,200}") {
        // Deterministic exit on any input: no panic, no hang, an AST handle
        // either way.
        let parse = parse_source(&input);
        let _ = parse.ast.sexp(parse.root);
    }

    #[test]
    fn token_soup_terminates_without_panicking(
        tokens in prop::collection::vec(
            prop::sample::select(vec![
                "MODULE", "INTERFACE", "IMPLEMENTATION", "IMPORT", "CONST", "TYPE",
                "VAR", "PROCEDURE", "BEGIN", "END", "IF", "THEN", "ELSE", "ELSIF",
                "CASE", "OF", "LOOP", "WHILE", "DO", "REPEAT", "UNTIL", "FOR", "IN",
                "NEW", "RETAIN", "RELEASE", "COPY", "READ", "WRITE", "EXIT", "NOP",
                "TO", "NOT", "AND", "OR", "DIV", "MOD", "POINTER", "RECORD", "SET",
                "ARRAY", "ALIAS", "OPAQUE", ";", ":", ".", "..", "::", ":=", "(",
                ")", "[", "]", "^", "@", "|", "=", "#", "<", "<=", ">", ">=", "==",
                "+", "-", "*", "/", "\\", "&", "++", "--", "x", "Foo", "42", "3.14",
                "0u41", "\"str\"", "$",
            ]),
            0..64,
        ),
    ) {
        let source = tokens.join(" ");
        let parse = parse_source(&source);

        // Statistics stay coherent: a clean parse implies no error diagnostics
        if parse.stats.syntax_error_count == 0 && parse.stats.semantic_error_count == 0 {
            prop_assert!(!parse.reporter.has_errors());
        }
    }
}
