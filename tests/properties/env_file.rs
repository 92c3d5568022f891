//! Property tests for the `.env` parser.

use proptest::prelude::*;

use shipit::infrastructure::env_file::parse_env;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a written `KEY=value` line reads back as written.
    #[test]
    fn property_simple_assignment_is_read_back(
        key in "[A-Z][A-Z0-9_]{0,15}",
        value in "[A-Za-z0-9_./:=-]{0,32}",
    ) {
        let parsed = parse_env(&format!("# comment\n\n{}={}\n", key, value));
        prop_assert_eq!(parsed, vec![(key, value)]);
    }

    /// PROPERTY: comment-only content yields nothing.
    #[test]
    fn property_comments_are_ignored(body in "[^\n]{0,40}") {
        let input = format!("#{}", body);
        prop_assert!(parse_env(&input).is_empty());
    }
}
