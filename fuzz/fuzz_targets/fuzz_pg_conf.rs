#![no_main]

use libfuzzer_sys::fuzz_target;
use ringprov::domain::services::pg_conf;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let once = pg_conf::set_parameter(content, "listen_addresses", "*");
        let twice = pg_conf::set_parameter(&once.content, "listen_addresses", "*");
        assert!(!twice.changed);

        let rules = vec!["host all all 0.0.0.0/0 md5".to_string()];
        let hba = pg_conf::append_hba_rules(content, &rules);
        assert!(!pg_conf::append_hba_rules(&hba.content, &rules).changed);
    }
});
