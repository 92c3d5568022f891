//! Property tests for the package name fixer.

use proptest::prelude::*;

use shipit::domain::value_objects::{fix_package_name, is_valid_package_name};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: output is lowercase alphanumerics joined by single hyphens.
    #[test]
    fn property_output_is_valid(name in "(?s).{0,64}") {
        let fixed = fix_package_name(&name);
        prop_assert!(is_valid_package_name(&fixed), "invalid output {:?}", fixed);
        prop_assert!(!fixed.starts_with('-') && !fixed.ends_with('-'));
        prop_assert!(!fixed.contains("--"));
    }

    /// PROPERTY: fixing is idempotent.
    #[test]
    fn property_idempotent(name in "[A-Za-z0-9_ .@/-]{0,40}") {
        let once = fix_package_name(&name);
        prop_assert_eq!(fix_package_name(&once), once);
    }

    /// PROPERTY: names that are already valid are left alone.
    #[test]
    fn property_valid_names_unchanged(name in "[a-z0-9]{1,10}(-[a-z0-9]{1,10}){0,3}") {
        prop_assert!(is_valid_package_name(&name));
        prop_assert_eq!(fix_package_name(&name), name);
    }
}
