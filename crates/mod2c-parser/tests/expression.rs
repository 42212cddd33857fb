//! Tests for expression parsing: precedence, associativity, unary
//! operators, type conversion and designators.

use mod2c_parser::Parser;

fn expr_sexp(source: &str) -> String {
    let mut parser = Parser::new(source);
    let expr = parser.parse_expression();
    assert!(
        parser.stats().is_clean(),
        "expected a clean parse of '{source}', got:\n{}",
        parser.reporter().emit("test", None)
    );

    parser.ast().sexp(expr)
}

// ============================================================================
// Literals and Primary Expressions
// ============================================================================

#[test]
fn literal_classes() {
    assert_eq!(expr_sexp("42"), "(INTVAL \"42\")");
    assert_eq!(expr_sexp("0x2A"), "(INTVAL \"0x2A\")");
    assert_eq!(expr_sexp("0b1010"), "(INTVAL \"0b1010\")");
    assert_eq!(expr_sexp("3.14"), "(REALVAL \"3.14\")");
    assert_eq!(expr_sexp("1.0e6"), "(REALVAL \"1.0e6\")");
    assert_eq!(expr_sexp("0u41"), "(CHRVAL \"0u41\")");
    assert_eq!(expr_sexp("\"hi\""), "(QUOTEDVAL \"\\\"hi\\\"\")");
    assert_eq!(expr_sexp("'hi'"), "(QUOTEDVAL \"'hi'\")");
    assert_eq!(expr_sexp("x"), "(IDENT \"x\")");
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        expr_sexp("1 + 2 * 3"),
        "(PLUS (INTVAL \"1\") (MUL (INTVAL \"2\") (INTVAL \"3\")))"
    );
    assert_eq!(
        expr_sexp("1 * 2 + 3"),
        "(PLUS (MUL (INTVAL \"1\") (INTVAL \"2\")) (INTVAL \"3\"))"
    );
}

#[test]
fn additive_binds_tighter_than_relational() {
    assert_eq!(
        expr_sexp("a = b + c"),
        "(EQ (IDENT \"a\") (PLUS (IDENT \"b\") (IDENT \"c\")))"
    );
    assert_eq!(
        expr_sexp("a + b < c * d"),
        "(LT (PLUS (IDENT \"a\") (IDENT \"b\")) (MUL (IDENT \"c\") (IDENT \"d\")))"
    );
}

#[test]
fn all_operator_spellings() {
    for (source, node) in [
        ("a = b", "EQ"),
        ("a # b", "NEQ"),
        ("a < b", "LT"),
        ("a <= b", "LTEQ"),
        ("a > b", "GT"),
        ("a >= b", "GTEQ"),
        ("a == b", "IDTY"),
        ("a IN b", "IN"),
        ("a + b", "PLUS"),
        ("a - b", "MINUS"),
        ("a OR b", "OR"),
        ("a & b", "CONCAT"),
        ("a \\ b", "SETDIFF"),
        ("a * b", "MUL"),
        ("a / b", "QUOT"),
        ("a DIV b", "DIV"),
        ("a MOD b", "MOD"),
        ("a AND b", "AND"),
    ] {
        assert_eq!(
            expr_sexp(source),
            format!("({node} (IDENT \"a\") (IDENT \"b\"))"),
            "for '{source}'"
        );
    }
}

// ============================================================================
// Associativity
// ============================================================================

#[test]
fn additive_operators_are_left_associative() {
    assert_eq!(
        expr_sexp("a - b - c"),
        "(MINUS (MINUS (IDENT \"a\") (IDENT \"b\")) (IDENT \"c\"))"
    );
    assert_eq!(
        expr_sexp("a + b - c OR d"),
        "(OR (MINUS (PLUS (IDENT \"a\") (IDENT \"b\")) (IDENT \"c\")) (IDENT \"d\"))"
    );
}

#[test]
fn multiplicative_operators_are_left_associative() {
    assert_eq!(
        expr_sexp("a / b / c"),
        "(QUOT (QUOT (IDENT \"a\") (IDENT \"b\")) (IDENT \"c\"))"
    );
}

#[test]
fn relational_operators_do_not_chain() {
    // The second '<' is left unconsumed; at most one relational operator
    // per expression.
    let mut parser = Parser::new("a < b < c");
    let expr = parser.parse_expression();

    assert_eq!(parser.ast().sexp(expr), "(LT (IDENT \"a\") (IDENT \"b\"))");
}

// ============================================================================
// Unary Operators
// ============================================================================

#[test]
fn unary_minus_binds_to_the_following_factor_only() {
    assert_eq!(expr_sexp("-a"), "(NEG (IDENT \"a\"))");
    assert_eq!(
        expr_sexp("-a + b"),
        "(PLUS (NEG (IDENT \"a\")) (IDENT \"b\"))"
    );
    assert_eq!(
        expr_sexp("-a * b"),
        "(MUL (NEG (IDENT \"a\")) (IDENT \"b\"))"
    );
}

#[test]
fn not_is_a_simple_term_prefix() {
    assert_eq!(expr_sexp("NOT a"), "(NOT (IDENT \"a\"))");
    assert_eq!(
        expr_sexp("NOT a AND b"),
        "(AND (NOT (IDENT \"a\")) (IDENT \"b\"))"
    );
    assert_eq!(
        expr_sexp("NOT a OR NOT b"),
        "(OR (NOT (IDENT \"a\")) (NOT (IDENT \"b\")))"
    );
}

// ============================================================================
// Type Conversion
// ============================================================================

#[test]
fn type_conversion_binds_tighter_than_binary_operators() {
    assert_eq!(
        expr_sexp("a :: Cardinal + b"),
        "(PLUS (TYPECONV (IDENT \"a\") (IDENT \"Cardinal\")) (IDENT \"b\"))"
    );
    assert_eq!(
        expr_sexp("NOT flag :: Boolean"),
        "(NOT (TYPECONV (IDENT \"flag\") (IDENT \"Boolean\")))"
    );
}

// ============================================================================
// Parentheses
// ============================================================================

#[test]
fn parentheses_reset_precedence_without_a_node() {
    assert_eq!(
        expr_sexp("(1 + 2) * 3"),
        "(MUL (PLUS (INTVAL \"1\") (INTVAL \"2\")) (INTVAL \"3\"))"
    );
    assert_eq!(expr_sexp("(x)"), "(IDENT \"x\")");
}

// ============================================================================
// Designators
// ============================================================================

#[test]
fn qualified_identifiers() {
    assert_eq!(
        expr_sexp("Terminal.Write"),
        "(QUALIDENT (IDENT \"Terminal\") (IDENT \"Write\"))"
    );
}

#[test]
fn source_designator_tails() {
    assert_eq!(expr_sexp("p^"), "(DESIG (IDENT \"p\") (DEREF))");
    assert_eq!(expr_sexp("p^^"), "(DESIG (IDENT \"p\") (DEREF) (DEREF))");
    assert_eq!(
        expr_sexp("a[1]"),
        "(DESIG (IDENT \"a\") (INDEX (INTVAL \"1\")))"
    );
    assert_eq!(
        expr_sexp("p^.next[2]"),
        "(DESIG (IDENT \"p\") (DEREF) (SELECT (IDENT \"next\")) (INDEX (INTVAL \"2\")))"
    );
}

#[test]
fn function_calls() {
    assert_eq!(expr_sexp("f()"), "(FCALL (IDENT \"f\") (EXPRLIST))");
    assert_eq!(
        expr_sexp("f(1, x)"),
        "(FCALL (IDENT \"f\") (EXPRLIST (INTVAL \"1\") (IDENT \"x\")))"
    );
    assert_eq!(
        expr_sexp("m.f(p^)"),
        "(FCALL (QUALIDENT (IDENT \"m\") (IDENT \"f\")) \
         (EXPRLIST (DESIG (IDENT \"p\") (DEREF))))"
    );
}

#[test]
fn calls_nest_in_expressions() {
    assert_eq!(
        expr_sexp("f(x) + g(y) * 2"),
        "(PLUS (FCALL (IDENT \"f\") (EXPRLIST (IDENT \"x\"))) \
         (MUL (FCALL (IDENT \"g\") (EXPRLIST (IDENT \"y\"))) (INTVAL \"2\")))"
    );
}
