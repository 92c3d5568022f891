#![no_main]

use libfuzzer_sys::fuzz_target;
use shipit::domain::value_objects::{fix_package_name, is_valid_package_name};

fuzz_target!(|name: &str| {
    let fixed = fix_package_name(name);
    assert!(is_valid_package_name(&fixed));
    assert_eq!(fix_package_name(&fixed), fixed);
});
