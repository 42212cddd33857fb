//! Tests for the parse driver: path validation, the `FILE` envelope, the
//! digest key and the file-convention checks.

use std::fs;
use std::path::Path;

use mod2c_parser::{Status, parse_file, parse_source};

fn write_source(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write test source");

    path
}

// ============================================================================
// Path Validation
// ============================================================================

#[test]
fn missing_file_is_invalid_pathname() {
    let parse = parse_file(Path::new("/no/such/place/Foo.def"));

    assert_eq!(parse.status, Status::InvalidPathname);
    assert!(parse.root.is_empty());
}

#[test]
fn unknown_suffix_is_invalid_sourcetype() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(dir.path(), "Foo.c", "int main;");

    let parse = parse_file(&path);

    assert_eq!(parse.status, Status::InvalidSourcetype);
    assert!(parse.root.is_empty());
}

#[test]
fn non_identifier_basename_is_invalid_pathname() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(dir.path(), "2Fast.def", "INTERFACE MODULE Foo; END Foo.");

    let parse = parse_file(&path);

    assert_eq!(parse.status, Status::InvalidPathname);
}

// ============================================================================
// The FILE Envelope
// ============================================================================

#[test]
fn root_is_wrapped_in_the_file_envelope() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(dir.path(), "Foo.def", "INTERFACE MODULE Foo; END Foo.");

    let parse = parse_file(&path);

    assert_eq!(parse.status, Status::Success);
    assert!(parse.stats.is_clean());

    let sexp = parse.ast.sexp(parse.root);
    assert!(sexp.starts_with("(FILE (FNAME \"Foo.def\") (KEY \""));
    assert!(sexp.ends_with("(INTERFACE (IDENT \"Foo\") () ()))"));

    // The digest key is 16 hex digits
    let key_node = parse.ast.child(parse.root, 1);
    let key = parse.ast.lexeme(key_node).expect("key lexeme").to_string();
    assert_eq!(key.len(), 16);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn digest_ignores_comments_and_layout() {
    let plain = parse_source("INTERFACE MODULE Foo; END Foo.");
    let commented = parse_source("INTERFACE (* hello *) MODULE\n  Foo; END Foo.");
    let changed = parse_source("INTERFACE MODULE Bar; END Bar.");

    let key = |parse: &mod2c_parser::Parse| {
        let node = parse.ast.child(parse.root, 1);
        parse.ast.lexeme(node).expect("key").to_string()
    };

    assert_eq!(key(&plain), key(&commented));
    assert_ne!(key(&plain), key(&changed));
}

// ============================================================================
// File-Convention Checks
// ============================================================================

#[test]
fn matching_basename_and_suffix_is_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(dir.path(), "Foo.mod", "MODULE Foo; BEGIN END Foo.");

    let parse = parse_file(&path);

    assert_eq!(parse.status, Status::Success);
    assert!(parse.stats.is_clean());
}

#[test]
fn basename_mismatch_is_a_semantic_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(dir.path(), "Bar.mod", "MODULE Foo; BEGIN END Foo.");

    let parse = parse_file(&path);

    // Still a successful parse; the mismatch is a diagnostic, not a failure
    assert_eq!(parse.status, Status::Success);
    assert_eq!(parse.stats.syntax_error_count, 0);
    assert_eq!(parse.stats.semantic_error_count, 1);
}

#[test]
fn module_kind_against_suffix() {
    let dir = tempfile::tempdir().expect("tempdir");

    // A program module in a .def file is a semantic diagnostic
    let path = write_source(dir.path(), "Foo.def", "MODULE Foo; BEGIN END Foo.");
    let parse = parse_file(&path);
    assert_eq!(parse.status, Status::Success);
    assert_eq!(parse.stats.semantic_error_count, 1);

    // An implementation module in a .mod file is fine
    let path = write_source(dir.path(), "Queue.mod", "IMPLEMENTATION MODULE Queue; VAR n : Cardinal; END Queue.");
    let parse = parse_file(&path);
    assert!(parse.stats.is_clean());
}

#[test]
fn statistics_travel_with_the_parse() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_source(
        dir.path(),
        "Foo.def",
        "INTERFACE MODULE Foo;\nCONST K = ;\nEND Bar.\n",
    );

    let parse = parse_file(&path);

    assert_eq!(parse.status, Status::Success);
    assert!(parse.stats.syntax_error_count >= 1);
    assert_eq!(parse.stats.semantic_error_count, 1);
    assert_eq!(parse.stats.line_count, 3);
}
