//! Scenario: the database is slow or never comes up
//!
//! Success Criteria:
//! - A slow database is waited for within the attempt budget
//! - A dead database costs exactly `max_attempts` probes, then the run
//!   continues without the database stage

use ringprov::{Config, Outcome, ProvisionOptions, StageId};

use crate::common::*;

fn select_one_probes(host: &FakeHost) -> usize {
    host.calls()
        .iter()
        .filter(|c| c.arguments().iter().any(|a| a == "SELECT 1"))
        .count()
}

#[test]
fn scenario_slow_database_is_waited_for() {
    let host = FakeHost::fresh().with_slow_database(3);

    let report = provision(&host).execute(&ProvisionOptions::new());

    assert_eq!(
        report.outcome_of(StageId::Readiness),
        Some(&Outcome::AlreadySatisfied)
    );
    assert_eq!(report.outcome_of(StageId::Database), Some(&Outcome::Changed));
    assert_eq!(select_one_probes(&host), 4);
}

#[test]
fn scenario_dead_database_is_bounded() {
    let host = FakeHost::fresh().with_dead_database();
    let mut config = Config::default();
    config.readiness.max_attempts = 5;

    let report = provision_with(&host, config).execute(&ProvisionOptions::new());

    assert!(report.is_success());
    assert!(report.is_partial());
    assert!(report.outcome_of(StageId::Readiness).unwrap().is_failed());
    assert!(matches!(
        report.outcome_of(StageId::Database),
        Some(Outcome::Skipped { .. })
    ));
    assert!(!host.has_database("ring"));

    let is_active_probes = host
        .calls()
        .iter()
        .filter(|c| c.arguments().iter().any(|a| a == "--quiet"))
        .count();
    assert_eq!(is_active_probes, 5);

    // Later stages still run
    assert_eq!(report.outcome_of(StageId::Proxy), Some(&Outcome::Changed));
    assert!(report.summary.is_some());
}
