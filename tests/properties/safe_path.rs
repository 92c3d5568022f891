//! Property tests for the Path Guard.
#![cfg(unix)]

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use shipit::domain::value_objects::{normalize, resolve_safe_path};

const ROOT: &str = "/work/project";

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap(),
        1 => Just("..".to_string()),
        1 => Just(".".to_string()),
    ]
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=6).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an accepted destination always lies under the root.
    #[test]
    fn property_result_is_inside_root(dest in relative_path()) {
        if let Ok(resolved) = resolve_safe_path(&dest, ROOT) {
            prop_assert!(resolved.starts_with(ROOT));
            prop_assert_eq!(normalize(&resolved), resolved);
        }
    }

    /// PROPERTY: acceptance matches the lexical answer exactly.
    #[test]
    fn property_rejects_exactly_the_escapes(dest in relative_path()) {
        let lexical = normalize(&Path::new(ROOT).join(&dest));
        let escapes = !lexical.starts_with(ROOT);
        prop_assert_eq!(resolve_safe_path(&dest, ROOT).is_err(), escapes);
    }

    /// PROPERTY: absolute paths outside the root are always rejected.
    #[test]
    fn property_absolute_outside_is_rejected(
        dir in "[a-z]{1,8}",
        file in "[a-z]{1,8}",
    ) {
        prop_assume!(dir != "work");
        let outside = PathBuf::from("/").join(&dir).join(&file);
        prop_assert!(resolve_safe_path(&outside, ROOT).is_err());
    }

    /// PROPERTY: sibling directories sharing a name prefix are not inside.
    #[test]
    fn property_prefix_sibling_is_rejected(suffix in "[a-z0-9]{1,8}") {
        let sibling = format!("/work/project{}/file", suffix);
        prop_assert!(resolve_safe_path(&sibling, ROOT).is_err());
    }

    /// PROPERTY: the guard never panics on arbitrary input.
    #[test]
    fn property_never_panics(s in "(?s).{0,128}") {
        let _ = resolve_safe_path(&s, ROOT);
    }
}
