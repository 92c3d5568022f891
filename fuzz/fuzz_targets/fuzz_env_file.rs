#![no_main]

use libfuzzer_sys::fuzz_target;
use shipit::infrastructure::env_file::parse_env;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        for (key, _) in parse_env(content) {
            assert!(!key.is_empty());
            assert!(!key.contains('='));
        }
    }
});
