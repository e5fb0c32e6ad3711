//! Scenario: running ringprov again on a provisioned host
//!
//! Success Criteria:
//! - No stage reports a change
//! - Generated files are byte-identical
//! - Nothing is reinstalled, recreated or reloaded

use ringprov::{Config, ProvisionOptions, StageId, WritePolicy};

use crate::common::*;

#[test]
fn scenario_second_run_changes_nothing() {
    let host = FakeHost::fresh();
    provision(&host).execute(&ProvisionOptions::new());
    let site = host.file(SITE);
    let unit = host.file(UNIT);
    let conf = host.file(PG_CONF);
    host.clear_calls();

    let report = provision(&host).execute(&ProvisionOptions::new());

    assert!(report.is_success());
    assert_eq!(report.changed(), 0, "records: {:?}", report.records);
    assert_eq!(host.file(SITE), site);
    assert_eq!(host.file(UNIT), unit);
    assert_eq!(host.file(PG_CONF), conf);

    let mutations = host.mutations();
    assert!(!mutations.iter().any(|m| m.contains("apt-get")));
    assert!(!mutations.iter().any(|m| m.contains("createdb")));
    assert!(!mutations.iter().any(|m| m.contains("-m venv")));
    assert!(!mutations.iter().any(|m| m.starts_with("nginx -t")));
    assert!(!mutations.iter().any(|m| m.contains("daemon-reload")));
}

#[test]
fn scenario_reconcile_follows_config_change() {
    let host = FakeHost::fresh();
    provision(&host).execute(&ProvisionOptions::new());

    let mut config = Config::default();
    config.backend.port = 9000;
    let report = provision_with(&host, config)
        .execute(&ProvisionOptions::new().with_write_policy(WritePolicy::Reconcile));

    assert_eq!(
        report.outcome_of(StageId::Proxy),
        Some(&ringprov::Outcome::Changed)
    );
    assert_eq!(
        report.outcome_of(StageId::Backend),
        Some(&ringprov::Outcome::Changed)
    );
    assert!(host
        .file(SITE)
        .unwrap()
        .contains("proxy_pass http://127.0.0.1:9000/;"));
    assert!(host.file(UNIT).unwrap().contains("--port 9000"));
}

#[test]
fn scenario_write_once_ignores_config_change() {
    let host = FakeHost::fresh();
    provision(&host).execute(&ProvisionOptions::new());
    let site = host.file(SITE);

    let mut config = Config::default();
    config.backend.port = 9000;
    provision_with(&host, config).execute(&ProvisionOptions::new());

    assert_eq!(host.file(SITE), site);
}

#[test]
fn scenario_status_is_read_only() {
    let host = FakeHost::fresh();
    provision(&host).execute(&ProvisionOptions::new());
    host.clear_calls();

    let report = provision(&host).execute(&ProvisionOptions::status());

    assert_eq!(report.records.len(), 1);
    assert!(report.summary.is_some());
    assert!(host.mutations().is_empty());
}
