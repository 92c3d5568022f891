#![no_main]

use libfuzzer_sys::fuzz_target;
use shipit::domain::entities::Manifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(manifest) = Manifest::parse(content) {
            let _ = manifest.name();
            let _ = manifest.script("build");
            let _ = manifest.to_pretty_json();
        }
    }
});
