//! Round-trip law: rendering a parsed module back to source and re-parsing
//! it reproduces a structurally equal AST.

use mod2c_parser::parse_source;

fn assert_roundtrip(source: &str) {
    let first = parse_source(source);
    assert!(
        first.stats.is_clean(),
        "original source must parse cleanly:\n{}",
        first.reporter.emit("original", None)
    );

    let rendered = first.ast.render(first.module());

    let second = parse_source(&rendered);
    assert!(
        second.stats.is_clean(),
        "rendered source must parse cleanly:\n---\n{rendered}\n---\n{}",
        second.reporter.emit("rendered", None)
    );

    assert!(
        first.ast.deep_eq(first.module(), &second.ast, second.module()),
        "round trip changed the tree:\n---\n{rendered}\n---\nfirst:  {}\nsecond: {}",
        first.ast.sexp(first.module()),
        second.ast.sexp(second.module())
    );
}

#[test]
fn minimal_modules_round_trip() {
    assert_roundtrip("INTERFACE MODULE Foo; END Foo.");
    assert_roundtrip("MODULE Foo; BEGIN END Foo.");
    assert_roundtrip("IMPLEMENTATION MODULE Foo; VAR x : T; END Foo.");
}

#[test]
fn interface_with_definitions_round_trips() {
    assert_roundtrip(
        "INTERFACE MODULE Stacks; \
         IMPORT Memory, Console+; \
         CONST [TLIMIT] Limit : Index = 100; \
         TYPE Stack = OPAQUE; \
         TYPE Index = [0 .. 100] OF Cardinal; \
         VAR count, depth : Cardinal; \
         PROCEDURE [NEW+] Create ( VAR s : Stack; size : Cardinal ) : Status; \
         PROCEDURE Push ( CONST item : CAST ARRAY OF OCTETSEQ ); \
         END Stacks.",
    );
}

#[test]
fn structural_types_round_trip() {
    assert_roundtrip(
        "INTERFACE MODULE Shapes; \
         TYPE Color = ( red, green, blue ); \
         TYPE Tint = ( + Color, magenta ); \
         TYPE Palette = SET OF Color; \
         TYPE Name = ALIAS OF String; \
         TYPE Grid = ARRAY 16 OF Row; \
         TYPE Point = RECORD ( Base ) x : Real; y : Real END; \
         TYPE Handler = PROCEDURE ( Point, ARRAY OF Octet ) : Boolean; \
         TYPE Link = POINTER TO Point; \
         VAR origin : Point; \
         END Shapes.",
    );
}

#[test]
fn private_pointer_round_trips() {
    assert_roundtrip(
        "IMPLEMENTATION MODULE Buffers; \
         TYPE Buffer = POINTER TO RECORD \
         count : Cardinal; \
         + data : ARRAY capacity OF Octet \
         END; \
         END Buffers.",
    );
}

#[test]
fn statements_round_trip() {
    assert_roundtrip(
        "MODULE Demo; \
         IMPORT Terminal; \
         VAR i, total : Cardinal; \
         PROCEDURE Update ( VAR n : Cardinal ); \
         BEGIN n := n + 1 END Update; \
         BEGIN \
         total := 0; \
         NEW buffer CAPACITY 256; \
         NEW node := initValue; \
         RETAIN node; \
         RELEASE node; \
         COPY total := total + 1; \
         READ @chan : line, count; \
         WRITE #(\"format\", total), extra; \
         IF total = 0 THEN NOP ELSIF total > 1 THEN EXIT ELSE NOP END; \
         CASE total OF | 1 : NOP | 2, 3 .. 5 : EXIT ELSE NOP END; \
         LOOP EXIT END; \
         WHILE total < 10 DO total++ END; \
         REPEAT total-- UNTIL total = 0; \
         FOR k--, v IN collection DO NOP END; \
         TO DO (42, 2) \"rework\", 8; \"verify\" END; \
         Update(total); \
         buffer[1] := 0; \
         buf[1 .. 2] := part; \
         ptr^.field := value.source[3] \
         END Demo.",
    );
}

#[test]
fn expressions_round_trip() {
    assert_roundtrip(
        "MODULE Exprs; \
         BEGIN \
         a := 1 + 2 * 3; \
         b := (1 + 2) * 3; \
         c := -x * y + z; \
         d := NOT flag AND ready OR done; \
         e := value :: Cardinal + offset; \
         f := lo <= hi; \
         g := item IN set \\ mask; \
         h := name & \"suffix\"; \
         i := Calls.f(p^, a[k], 0u41) \
         END Exprs.",
    );
}
