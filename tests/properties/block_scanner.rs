//! Property tests for the brace-boundary scanner.

use proptest::prelude::*;

use infracheck::blocks::{find_block, find_object, matching_brace};
use infracheck::Content;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,10}").unwrap()
}

/// HCL-ish text with balanced braces, quoted strings and comments
fn balanced_text() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        proptest::string::string_regex("[a-z_ =0-9\n]{0,12}").unwrap(),
        proptest::string::string_regex("\"[a-z {}]{0,8}\"").unwrap(),
        proptest::string::string_regex("# [a-z {}]{0,8}\n").unwrap(),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|parts| format!("{{{}}}", parts.join(" ")))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The scanner never panics on arbitrary input.
    #[test]
    fn property_scanner_never_panics(
        text in "(?s).{0,256}",
        open in 0usize..300,
        keyword in name(),
    ) {
        let _ = matching_brace(&text, open);
        let _ = find_block(&text, "variable", &keyword);
        let _ = find_object(&text, &keyword);
        let content = Content::new("fuzz.tf", text.clone());
        let _ = content.named_blocks(&keyword).map(|blocks| blocks.count());
        let _ = content.has_description("output", &keyword);
    }

    /// PROPERTY: A closing brace found is always a `}` after the opening one.
    #[test]
    fn property_matching_brace_points_at_close(text in "(?s)[{}\"a#\n]{0,64}") {
        for (open, _) in text.match_indices('{') {
            if let Some(close) = matching_brace(&text, open) {
                prop_assert!(close > open);
                prop_assert_eq!(&text[close..=close], "}");
            }
        }
    }

    /// PROPERTY: A block body is recovered exactly, whatever it nests.
    #[test]
    fn property_find_block_recovers_body(
        block in name(),
        inner in balanced_text(),
        trailer in "[a-z {}\n]{0,16}",
    ) {
        let text = format!("variable \"{block}\" {{{inner}}}\n{trailer}");
        let found = find_block(&text, "variable", &block).unwrap();
        prop_assert_eq!(found, Some(inner.as_str()));
    }

    /// PROPERTY: Every declared block name is reported, in file order.
    #[test]
    fn property_named_blocks_lists_declarations(
        names in prop::collection::vec(name(), 0..6),
    ) {
        let text: String = names
            .iter()
            .map(|n| format!("output \"{n}\" {{\n  description = \"{n}\"\n}}\n\n"))
            .collect();
        let content = Content::new("outputs.tf", text);
        let found: Vec<&str> = content.outputs().unwrap().collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(found, expected);
    }
}
