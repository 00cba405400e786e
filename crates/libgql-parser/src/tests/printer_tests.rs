use crate::parse_executable_document;
use crate::parse_schema_document;
use crate::print_ast;
use crate::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

/// Printing a parsed document must be a fixed point: parsing the printed
/// form and printing again yields the same text.
fn assert_executable_print_stable(source: &str) -> Result<String> {
    let printed = print_ast(&parse_executable_document(source)?);
    let reprinted = print_ast(&parse_executable_document(&printed)?);
    assert_eq!(printed, reprinted, "print is not a fixed point");
    Ok(printed)
}

fn assert_schema_print_stable(source: &str) -> Result<String> {
    let printed = print_ast(&parse_schema_document(source)?);
    let reprinted = print_ast(&parse_schema_document(&printed)?);
    assert_eq!(printed, reprinted, "print is not a fixed point");
    Ok(printed)
}

#[test]
fn prints_shorthand_query() -> Result<()> {
    let printed = assert_executable_print_stable("{ a b }")?;
    assert_eq!(printed, "{\n  a\n  b\n}\n");
    Ok(())
}

#[test]
fn prints_full_operation() -> Result<()> {
    let printed = assert_executable_print_stable(
        "query Q($id:ID!,$n:Int=3){user(id:$id){name friends(first:$n){name}}}",
    )?;
    assert_eq!(
        printed,
        "query Q($id: ID!, $n: Int = 3) {\n  user(id: $id) {\n    name\n    \
         friends(first: $n) {\n      name\n    }\n  }\n}\n",
    );
    Ok(())
}

#[test]
fn prints_fragments_and_directives() -> Result<()> {
    assert_executable_print_stable(
        "query Q($s: Boolean!) {
            x @skip(if: $s)
            ...Frag @include(if: true)
            ... on User { id }
        }
        fragment Frag on Query { y }",
    )?;
    Ok(())
}

#[test]
fn prints_all_value_kinds() -> Result<()> {
    let printed = assert_executable_print_stable(
        r#"{ f(a: 42, b: -3.5e2, c: "s\"tr", d: true, e: null, g: RED, h: [1, [2]], i: {x: 1}) }"#,
    )?;
    assert!(printed.contains(r#"c: "s\"tr""#), "{printed}");
    assert!(printed.contains("h: [1, [2]]"), "{printed}");
    assert!(printed.contains("i: {x: 1}"), "{printed}");
    Ok(())
}

#[test]
fn prints_schema_document() -> Result<()> {
    let printed = assert_schema_print_stable(
        r#"
        schema { query: Q }

        "Greets."
        type Q implements Node & Named @cached {
            hello(value: String = "world"): String! @deprecated(reason: "old")
        }

        union U = A | B

        enum E { X Y }

        input I { n: Int! = 4 }

        directive @tag(name: String!) repeatable on FIELD_DEFINITION
        "#,
    )?;
    assert!(printed.contains("schema {\n  query: Q\n}"), "{printed}");
    assert!(printed.contains("type Q implements Node & Named @cached {"), "{printed}");
    assert!(printed.contains("union U = A | B"), "{printed}");
    assert!(
        printed.contains("directive @tag(name: String!) repeatable on FIELD_DEFINITION"),
        "{printed}",
    );
    Ok(())
}

#[test]
fn prints_multiline_descriptions_as_block_strings() -> Result<()> {
    let printed = assert_schema_print_stable(
        "\"\"\"\nLine one.\nLine two.\n\"\"\"\ntype T { x: Int }",
    )?;
    assert!(printed.contains("\"\"\""), "{printed}");
    assert!(printed.contains("Line one."), "{printed}");
    Ok(())
}
