//! Property tests for postgresql.conf and pg_hba.conf editing.

use proptest::prelude::*;

use ringprov::domain::services::pg_conf::{
    append_hba_rules, current_value, missing_hba_rules, render_value, set_parameter,
};

fn setting_key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z_]{0,24}").unwrap()
}

fn setting_value() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..100_000).prop_map(|n| n.to_string()),
        (1u32..4096).prop_map(|n| format!("{n}MB")),
        Just("*".to_string()),
        Just("on".to_string()),
        proptest::string::string_regex("[A-Za-z0-9 ,.'/_-]{1,24}")
            .unwrap()
            .prop_filter("non-blank", |s| !s.trim().is_empty()),
    ]
}

fn conf_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("# comment".to_string()),
        (setting_key(), setting_value()).prop_map(|(k, v)| format!("{k} = {}", render_value(&v))),
        (setting_key(), setting_value())
            .prop_map(|(k, v)| format!("#{k} = {}\t# default", render_value(&v))),
    ]
}

fn conf_body() -> impl Strategy<Value = String> {
    proptest::collection::vec(conf_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

fn hba_rule() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("host"), Just("hostssl"), Just("local")],
        prop_oneof![Just("all"), Just("ring")],
        prop_oneof![Just("0.0.0.0/0"), Just("::/0"), Just("10.0.0.0/8")],
        prop_oneof![Just("md5"), Just("scram-sha-256"), Just("peer")],
        1usize..6,
    )
        .prop_map(|(kind, db, addr, method, pad)| {
            let sep = " ".repeat(pad);
            format!("{kind}{sep}{db}{sep}all{sep}{addr}{sep}{method}")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Setting a parameter twice is the same as setting it once.
    #[test]
    fn property_set_parameter_is_idempotent(
        body in conf_body(),
        key in setting_key(),
        value in setting_value(),
    ) {
        let once = set_parameter(&body, &key, &value);
        let twice = set_parameter(&once.content, &key, &value);
        prop_assert!(!twice.changed);
        prop_assert_eq!(twice.content, once.content);
    }

    /// PROPERTY: After setting, the effective value is the rendered value.
    #[test]
    fn property_set_parameter_takes_effect(
        body in conf_body(),
        key in setting_key(),
        value in setting_value(),
    ) {
        let edited = set_parameter(&body, &key, &value);
        prop_assert_eq!(current_value(&edited.content, &key), Some(render_value(&value)));
    }

    /// PROPERTY: Lines for other keys are never touched.
    #[test]
    fn property_set_parameter_changes_at_most_one_line(
        body in conf_body(),
        key in setting_key(),
        value in setting_value(),
    ) {
        let edited = set_parameter(&body, &key, &value);
        let before: Vec<&str> = body.lines().collect();
        let after: Vec<&str> = edited.content.lines().collect();
        prop_assert!(after.len() == before.len() || after.len() == before.len() + 1);
        let differing = before.iter().zip(after.iter()).filter(|(a, b)| a != b).count();
        prop_assert!(differing <= 1);
    }

    /// PROPERTY: Appended rules are present afterwards and never appended twice.
    #[test]
    fn property_hba_append_is_idempotent(
        existing in proptest::collection::vec(hba_rule(), 0..5),
        wanted in proptest::collection::vec(hba_rule(), 0..5),
    ) {
        let body = existing.join("\n");
        let once = append_hba_rules(&body, &wanted);
        prop_assert!(missing_hba_rules(&once.content, &wanted).is_empty());

        let twice = append_hba_rules(&once.content, &wanted);
        prop_assert!(!twice.changed);
        prop_assert_eq!(twice.content, once.content);
    }

    /// PROPERTY: Arbitrary text never panics the editors.
    #[test]
    fn property_editors_never_panic(body in "(?s).{0,256}", key in setting_key()) {
        let _ = set_parameter(&body, &key, "x");
        let _ = current_value(&body, &key);
        let _ = append_hba_rules(&body, &["host all all 0.0.0.0/0 md5".to_string()]);
    }
}
