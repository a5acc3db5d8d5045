//! Property-based tests for the root path model.
//!
//! These tests use proptest to generate random path strings and verify that
//! parsing and formatting invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{last_segment, RootPath};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.+-]{1,12}"
    }

    proptest! {
        /// Property: formatting then parsing a well-formed path is lossless
        #[test]
        fn format_parse_roundtrip(
            root in segment(),
            rest in prop::collection::vec(segment(), 0..5),
        ) {
            let path = RootPath::new(root, rest.join("\\"));
            prop_assert_eq!(RootPath::parse(&path.to_string()), path);
        }

        /// Property: a string built as root or root\relative formats back to itself
        #[test]
        fn parse_format_identity(
            root in segment(),
            rest in prop::collection::vec(segment(), 0..5),
        ) {
            let mut input = root;
            for part in &rest {
                input.push('\\');
                input.push_str(part);
            }
            prop_assert_eq!(RootPath::parse(&input).to_string(), input);
        }

        /// Property: extra separators never leak into the root or relative parts
        #[test]
        fn separators_collapse(
            root in segment(),
            rest in prop::collection::vec(segment(), 0..4),
            lead in 0usize..3,
        ) {
            let input = format!("{}{}//{}", "\\".repeat(lead), root, rest.join("\\\\"));
            let path = RootPath::parse(&input);
            prop_assert_eq!(path.root(), root.as_str());
            prop_assert!(!path.relative().starts_with('\\'));
            prop_assert!(!path.relative().contains("\\\\"));
            prop_assert!(!path.relative().contains('/'));
        }

        /// Property: parsing never panics and only yields an empty root for
        /// separator-only input
        #[test]
        fn parse_total(input in ".*") {
            let path = RootPath::parse(&input);
            let has_content = input.chars().any(|c| c != '\\' && c != '/');
            prop_assert_eq!(path.is_top_level(), !has_content);
        }

        /// Property: the name of a parsed path is its last segment
        #[test]
        fn name_is_last_segment(
            root in segment(),
            rest in prop::collection::vec(segment(), 1..5),
        ) {
            let path = RootPath::new(root, rest.join("\\"));
            prop_assert_eq!(path.name(), rest.last().unwrap().as_str());
            prop_assert_eq!(last_segment(path.relative()), path.name());
        }
    }
}
