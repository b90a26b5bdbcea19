#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Malformed sources must become SourceParse errors, never panics
        if let Ok(unit) = bridgewright::parse_java_source(content, Path::new("Fuzz.java")) {
            for method in unit.methods {
                let _ = method.descriptor();
                let _ = bridgewright::domain::services::jni_symbol(
                    &method.owning_class,
                    &method.name,
                    None,
                );
            }
        }
    }
});
