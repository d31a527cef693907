//! Property-based tests for tag generation
//!
//! Tests that generation is idempotent on its own output, that name conversion
//! is deterministic and that unexported fields are never touched.

use proptest::prelude::*;
use tagsmith_core::naming::to_lower_camel_case;
use tagsmith_core::{Generator, Options};

// Strategy: exported Go identifiers
fn arb_exported_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,12}"
}

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

// Strategy: unexported Go identifiers
fn arb_unexported_name() -> impl Strategy<Value = String> {
    "[a-z][A-Za-z0-9]{0,12}".prop_filter("Go keywords are not identifiers", |name| {
        !GO_KEYWORDS.contains(&name.as_str())
    })
}

fn arb_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "string",
        "int",
        "float64",
        "bool",
        "time.Time",
        "[]byte",
        "map[string]int",
        "*Node",
    ])
}

fn struct_source(fields: &[(String, &str)]) -> String {
    let mut source = String::from("package model\n\ntype Record struct {\n");
    for (name, ty) in fields {
        source.push_str(&format!("\t{name} {ty}\n"));
    }
    source.push_str("}\n");
    source
}

fn generator() -> Generator {
    let options = Options {
        tags: vec!["json".to_string(), "yaml".to_string()],
        ..Options::default()
    };
    Generator::new(&options).expect("options should be valid")
}

proptest! {
    /// Property: a second run over generated output changes nothing
    #[test]
    fn proptest_generation_is_idempotent(
        fields in prop::collection::btree_map(arb_exported_name(), arb_type(), 1..8)
    ) {
        let fields: Vec<(String, &str)> = fields.into_iter().collect();
        let generator = generator();

        let first = generator
            .process_source(&struct_source(&fields))
            .expect("generation should succeed");
        let rewritten = first.source.expect("exported fields should be tagged");

        let second = generator
            .process_source(&rewritten)
            .expect("generation should succeed on its own output");

        prop_assert!(second.source.is_none());
    }

    /// Property: unexported fields never receive tags
    #[test]
    fn proptest_unexported_fields_untouched(
        fields in prop::collection::btree_map(arb_unexported_name(), arb_type(), 1..8)
    ) {
        let fields: Vec<(String, &str)> = fields.into_iter().collect();

        let output = generator()
            .process_source(&struct_source(&fields))
            .expect("generation should succeed");

        prop_assert!(output.source.is_none());
        prop_assert_eq!(output.structs.len(), 1);
        prop_assert!(output.structs[0].fields.is_empty());
    }

    /// Property: name conversion is deterministic and starts lower-case
    #[test]
    fn proptest_name_conversion_deterministic(name in arb_exported_name()) {
        let first = to_lower_camel_case(&name);
        let second = to_lower_camel_case(&name);

        prop_assert_eq!(&first, &second);
        prop_assert!(first.chars().next().is_some_and(|c| !c.is_uppercase()));
    }
}
