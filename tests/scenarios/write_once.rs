//! Scenario: an operator hand-edits a generated file
//!
//! Journey: after provisioning, the operator tweaks the proxy site by hand
//! and runs ringprov again.
//!
//! Success Criteria:
//! - Write-once leaves the edit alone, silently
//! - Reconcile leaves the edit alone but reports the drift
//! - `--force` puts the generated content back

use std::sync::{Arc, Mutex};

use ringprov::domain::ports::{ProvisionEvent, ProvisionEventSink};
use ringprov::{Outcome, ProvisionOptions, StageId, WritePolicy};

use crate::common::*;

const EDITED: &str = "server { listen 8080; }\n";

#[derive(Default)]
struct Drifts(Mutex<Vec<String>>);

impl ProvisionEventSink for Drifts {
    fn on_event(&self, event: ProvisionEvent) {
        if let ProvisionEvent::Drift { path, diff, .. } = event {
            self.0
                .lock()
                .unwrap()
                .push(format!("{}\n{}", path.display(), diff));
        }
    }
}

fn provisioned_then_edited() -> FakeHost {
    let host = FakeHost::fresh();
    provision(&host).execute(&ProvisionOptions::new());
    host.put_file(SITE, EDITED);
    host.clear_calls();
    host
}

#[test]
fn scenario_write_once_keeps_edit() {
    let host = provisioned_then_edited();
    let drifts = Arc::new(Drifts::default());

    let report = provision(&host).execute_with_events(&ProvisionOptions::new(), drifts.clone());

    assert_eq!(
        report.outcome_of(StageId::Proxy),
        Some(&Outcome::AlreadySatisfied)
    );
    assert_eq!(host.file(SITE).as_deref(), Some(EDITED));
    assert!(drifts.0.lock().unwrap().is_empty());
}

#[test]
fn scenario_reconcile_reports_drift() {
    let host = provisioned_then_edited();
    let drifts = Arc::new(Drifts::default());

    let report = provision(&host).execute_with_events(
        &ProvisionOptions::new().with_write_policy(WritePolicy::Reconcile),
        drifts.clone(),
    );

    assert!(report.is_success());
    assert_eq!(host.file(SITE).as_deref(), Some(EDITED));
    let drifts = drifts.0.lock().unwrap();
    assert_eq!(drifts.len(), 1);
    assert!(drifts[0].starts_with(SITE));
    assert!(drifts[0].contains("-server { listen 8080; }"));
}

#[test]
fn scenario_force_restores_generated_content() {
    let host = provisioned_then_edited();

    let report = provision(&host).execute(&ProvisionOptions::new().with_force(true));

    assert_eq!(report.outcome_of(StageId::Proxy), Some(&Outcome::Changed));
    assert!(host.file(SITE).unwrap().contains("listen 80;"));
    let mutations = host.mutations();
    assert!(mutations.iter().any(|m| m == "nginx -t"));
    assert!(mutations.iter().any(|m| m == "systemctl reload nginx"));
}
