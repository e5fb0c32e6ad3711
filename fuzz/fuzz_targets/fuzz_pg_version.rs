#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = std::str::from_utf8(data) {
        // Version detection - this should never panic
        let _ = ringprov::domain::value_objects::PgVersion::parse(output);
    }
});
