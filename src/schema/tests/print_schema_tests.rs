use crate::schema::build_schema;
use crate::schema::print_schema;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[test]
fn prints_types_in_declaration_order() -> Result<()> {
    let schema = build_schema(
        "type Query { b: Beta, a: Alpha }
         type Beta { x: Int }
         type Alpha { y: Int }",
    )?;
    let printed = print_schema(&schema);
    let beta_at = printed.find("type Beta").unwrap();
    let alpha_at = printed.find("type Alpha").unwrap();
    assert!(beta_at < alpha_at, "{printed}");
    Ok(())
}

#[test]
fn omits_builtins_and_introspection_types() -> Result<()> {
    let schema = build_schema("type Query { x: Int }")?;
    let printed = print_schema(&schema);
    assert!(!printed.contains("scalar Int"), "{printed}");
    assert!(!printed.contains("__Schema"), "{printed}");
    assert!(!printed.contains("__typename"), "{printed}");
    assert!(!printed.contains("directive @skip"), "{printed}");
    Ok(())
}

#[test]
fn prints_schema_block_only_for_non_default_roots() -> Result<()> {
    let default_roots = build_schema("type Query { x: Int }")?;
    assert!(!print_schema(&default_roots).contains("schema {"));

    let custom_roots = build_schema(
        "schema { query: Root }
         type Root { x: Int }",
    )?;
    let printed = print_schema(&custom_roots);
    assert!(printed.contains("schema {\n  query: Root\n}"), "{printed}");
    Ok(())
}

#[test]
fn printed_sdl_rebuilds_to_an_equivalent_schema() -> Result<()> {
    let sdl = r#"
        "A point in time."
        scalar When

        interface Node { id: ID! }

        type Query {
            node(id: ID! = "0"): Node
            all(filter: Filter): [Thing!]!
            when: When
        }

        type Thing implements Node @special {
            id: ID!
            kind: Kind @deprecated(reason: "gone")
        }

        enum Kind { A B }

        input Filter { kinds: [Kind!], limit: Int = 10 }

        union Anything = Thing

        directive @special repeatable on OBJECT
    "#;
    let build = |source: &str| {
        Schema::builder()
            .load_sdl(source)?
            .with_scalar("When", crate::scalars::datetime_scalar())
            .build()
    };

    let first = build(sdl)?;
    let printed = print_schema(&first);
    let second = build(&printed)?;
    let reprinted = print_schema(&second);

    assert_eq!(printed, reprinted);
    Ok(())
}
