//! Tests for definition and declaration parsing: the six list contexts,
//! procedures, formal parameters and binding specifiers.

use mod2c_parser::{Parse, parse_source};

fn parsed(source: &str) -> Parse { parse_source(source) }

fn clean_module_sexp(source: &str) -> String {
    let parse = parse_source(source);
    assert!(
        parse.stats.is_clean(),
        "expected a clean parse, got:\n{}",
        parse.reporter.emit("test", None)
    );

    parse.ast.sexp(parse.module())
}

// ============================================================================
// Constant Definitions
// ============================================================================

#[test]
fn const_definition_shape() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; CONST K = 42; END Foo.");

    assert!(sexp.contains(
        "(DEFLIST (CONSTDEFLIST (CONST () (IDENT \"K\") () (INTVAL \"42\"))))"
    ));
}

#[test]
fn const_definition_with_type_annotation() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; CONST K : Cardinal = 42; END Foo.");

    assert!(sexp.contains("(CONST () (IDENT \"K\") (IDENT \"Cardinal\") (INTVAL \"42\"))"));
}

#[test]
fn const_definition_with_binding() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; CONST [TLIMIT] K = 8; END Foo.");

    assert!(sexp.contains("(CONST (BINDING \"TLIMIT\") (IDENT \"K\") () (INTVAL \"8\"))"));
}

#[test]
fn several_consts_in_one_section() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; CONST A = 1; B = 2; C = 3; END Foo.");

    let section_start = sexp.find("(CONSTDEFLIST").expect("const section present");
    let section = &sexp[section_start..];

    assert_eq!(section.matches("(CONST ").count(), 3);
}

// ============================================================================
// Type and Variable Definitions
// ============================================================================

#[test]
fn type_definition_shape() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; TYPE T = Cardinal; END Foo.");

    assert!(sexp.contains("(TYPEDEFLIST (TYPE (IDENT \"T\") (IDENT \"Cardinal\")))"));
}

#[test]
fn opaque_type_in_interface_is_clean() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; TYPE T = OPAQUE; END Foo.");

    assert!(sexp.contains("(TYPE (IDENT \"T\") (OPAQUE))"));
}

#[test]
fn opaque_type_outside_interface_is_semantic_error() {
    let parse = parsed("IMPLEMENTATION MODULE Foo; TYPE T = OPAQUE; END Foo.");

    assert_eq!(parse.stats.semantic_error_count, 1);
    assert_eq!(parse.stats.syntax_error_count, 0);
    // Parsed all the same
    assert!(parse.ast.sexp(parse.module()).contains("(OPAQUE)"));
}

#[test]
fn var_declaration_shape() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; VAR x, y : Cardinal; END Foo.");

    assert!(sexp.contains(
        "(VARDEFLIST (VAR (IDENTLIST (IDENT \"x\") (IDENT \"y\")) (IDENT \"Cardinal\")))"
    ));
}

#[test]
fn duplicate_ident_in_list_is_dropped() {
    let parse = parsed("INTERFACE MODULE Foo; VAR x, x, y : Cardinal; END Foo.");

    assert_eq!(parse.stats.semantic_error_count, 1);
    assert_eq!(parse.stats.syntax_error_count, 0);

    let sexp = parse.ast.sexp(parse.module());
    assert!(sexp.contains("(IDENTLIST (IDENT \"x\") (IDENT \"y\"))"));
}

#[test]
fn declaration_lists_use_private_kinds() {
    let sexp = clean_module_sexp(
        "MODULE Foo; CONST K = 1; TYPE T = Cardinal; VAR v : T; BEGIN END Foo.",
    );

    assert!(sexp.contains("(CONSTDECLLIST "));
    assert!(sexp.contains("(TYPEDECLLIST "));
    assert!(sexp.contains("(VARDECLLIST "));
    assert!(!sexp.contains("DEFLIST ("));
}

// ============================================================================
// Procedures
// ============================================================================

#[test]
fn procedure_header_in_interface() {
    let sexp = clean_module_sexp(
        "INTERFACE MODULE Foo; PROCEDURE Next ( steps : Cardinal ) : Cardinal; END Foo.",
    );

    assert!(sexp.contains(
        "(PROCDEF () (IDENT \"Next\") \
         (FPARAMLIST (FPARAMS (IDENTLIST (IDENT \"steps\")) (IDENT \"Cardinal\"))) \
         (IDENT \"Cardinal\"))"
    ));
}

#[test]
fn parameterless_procedure_header() {
    let sexp = clean_module_sexp("INTERFACE MODULE Foo; PROCEDURE Reset; END Foo.");

    assert!(sexp.contains("(PROCDEF () (IDENT \"Reset\") () ())"));
}

#[test]
fn formal_parameter_modes() {
    let sexp = clean_module_sexp(
        "INTERFACE MODULE Foo; \
         PROCEDURE P ( CONST a : T; VAR b : T; c : T ); END Foo.",
    );

    assert!(sexp.contains("(CONSTP (IDENTLIST (IDENT \"a\")) (IDENT \"T\"))"));
    assert!(sexp.contains("(VARP (IDENTLIST (IDENT \"b\")) (IDENT \"T\"))"));
    assert!(sexp.contains("(FPARAMS (IDENTLIST (IDENT \"c\")) (IDENT \"T\"))"));
}

#[test]
fn open_array_and_casting_formal_types() {
    let sexp = clean_module_sexp(
        "INTERFACE MODULE Foo; \
         PROCEDURE P ( a : ARRAY OF Octet; b : CAST ADDRESS; \
         c : CAST ARRAY OF OCTETSEQ ); END Foo.",
    );

    assert!(sexp.contains("(OPENARRAY (IDENT \"Octet\"))"));
    assert!(sexp.contains("(CASTADDR)"));
    assert!(sexp.contains("(CASTOCTSEQ)"));
}

#[test]
fn procedure_declaration_with_block() {
    let sexp = clean_module_sexp(
        "MODULE Foo; \
         PROCEDURE Step; \
         VAR n : Cardinal; \
         BEGIN n := 1 END Step; \
         BEGIN END Foo.",
    );

    assert!(sexp.contains("(PROC (PROCDEF () (IDENT \"Step\") () ())"));
    assert!(sexp.contains("(VARDECLLIST (VAR (IDENTLIST (IDENT \"n\")) (IDENT \"Cardinal\")))"));
}

// ============================================================================
// Binding Specifiers
// ============================================================================

#[test]
fn binding_specifier_canonical_forms() {
    for (source_binding, canonical) in [
        ("NEW", "NEW"),
        ("NEW+", "NEW+"),
        ("NEW#", "NEW#"),
        ("READ", "READ"),
        ("READ*", "READ*"),
        ("WRITE", "WRITE"),
        ("WRITE#", "WRITE#"),
        ("RETAIN", "RETAIN"),
        ("RELEASE", "RELEASE"),
        ("COLLATION", "COLLATION"),
        ("TLIMIT", "TLIMIT"),
    ] {
        let source =
            format!("INTERFACE MODULE Foo; PROCEDURE [{source_binding}] P; END Foo.");
        let sexp = clean_module_sexp(&source);

        assert!(
            sexp.contains(&format!("(BINDING \"{canonical}\")")),
            "binding {source_binding} should canonicalise to {canonical}: {sexp}"
        );
    }
}

#[test]
fn unknown_bindable_records_empty_lexeme() {
    let parse = parsed("INTERFACE MODULE Foo; PROCEDURE [Frobnicate] P; END Foo.");

    assert_eq!(parse.stats.semantic_error_count, 1);
    assert_eq!(parse.stats.syntax_error_count, 0);
    assert!(parse.ast.sexp(parse.module()).contains("(BINDING \"\")"));
}

// ============================================================================
// TO DO Lists
// ============================================================================

#[test]
fn to_do_declaration() {
    let sexp = clean_module_sexp(
        "MODULE Foo; TO DO (42, 2) \"rework the cache\", 8; \"verify\" END; BEGIN END Foo.",
    );

    assert!(sexp.contains(
        "(TODO (ISSUE (INTVAL \"42\") (INTVAL \"2\")) \
         (TASK (QUOTEDVAL \"\\\"rework the cache\\\"\") (INTVAL \"8\")) \
         (TASK (QUOTEDVAL \"\\\"verify\\\"\") ()))"
    ));
}
