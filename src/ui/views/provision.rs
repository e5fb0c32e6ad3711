//! Text rendering for provisioning runs

use ringprov::domain::entities::SummaryReport;
use ringprov::domain::value_objects::{FailurePolicy, Outcome, StageId};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::Tone;

pub fn render_header(ui: &UiContext, dry_run: bool, write_policy: &str) -> String {
    let title = if dry_run {
        "ringprov plan"
    } else {
        "ringprov provision"
    };
    format!(
        "{} {} {}",
        Icon::Provision.colored(ui.color, ui.unicode),
        Tone::Plain.paint(title).bold().render(ui.color),
        Tone::Dim.paint(format!("(write policy: {write_policy})")).render(ui.color),
    )
}

fn outcome_icon(outcome: &Outcome) -> Icon {
    match outcome {
        Outcome::AlreadySatisfied => Icon::Success,
        Outcome::Changed => Icon::Changed,
        Outcome::Skipped { .. } => Icon::Skipped,
        Outcome::Failed { .. } => Icon::Error,
    }
}

pub fn render_stage_line(
    ui: &UiContext,
    position: usize,
    total: usize,
    stage: StageId,
    outcome: &Outcome,
) -> String {
    let outcome_text = Tone::of_outcome(outcome).paint(outcome.to_string());
    format!(
        "{} [{position}/{total}] {}: {}",
        outcome_icon(outcome).colored(ui.color, ui.unicode),
        stage.title(),
        outcome_text.render(ui.color),
    )
}

pub fn render_failure(ui: &UiContext, stage: StageId, policy: FailurePolicy, error: &str) -> String {
    let icon = match policy {
        FailurePolicy::Abort => Icon::Error,
        FailurePolicy::Warn | FailurePolicy::Ignore => Icon::Warning,
    };
    let text = Tone::of_policy(policy).paint(error);
    format!(
        "{} {stage} ({policy}): {}",
        icon.colored(ui.color, ui.unicode),
        text.render(ui.color)
    )
}

pub fn render_detail(ui: &UiContext, icon: Icon, message: &str) -> String {
    format!(
        "    {} {}",
        icon.colored(ui.color, ui.unicode),
        Tone::Dim.paint(message).render(ui.color)
    )
}

pub fn render_completion(
    ui: &UiContext,
    changed: usize,
    satisfied: usize,
    skipped: usize,
    failed: usize,
    aborted: bool,
) -> String {
    let counts = format!(
        "{changed} changed, {satisfied} already satisfied, {skipped} skipped, {failed} failed"
    );
    if aborted {
        format!(
            "{} {} ({counts})",
            Icon::Error.colored(ui.color, ui.unicode),
            Tone::Error.paint("Provisioning aborted").bold().render(ui.color)
        )
    } else if failed > 0 {
        format!(
            "{} {} ({counts})",
            Icon::Warning.colored(ui.color, ui.unicode),
            Tone::Warning.paint("Provisioning finished with failures").render(ui.color)
        )
    } else {
        format!(
            "{} {} ({counts})",
            Icon::Success.colored(ui.color, ui.unicode),
            Tone::Success.paint("Provisioning complete").render(ui.color)
        )
    }
}

/// The closing status block
pub fn render_summary(ui: &UiContext, report: &SummaryReport) -> String {
    let mut out = String::new();
    let heading = |text: &str| Tone::Plain.paint(text).bold().render(ui.color);

    out.push_str(&format!(
        "{} {}\n",
        Icon::Status.colored(ui.color, ui.unicode),
        heading("Status")
    ));

    out.push_str(&format!("\n{}\n", heading("Versions")));
    for v in &report.versions {
        out.push_str(&format!("  {:<12} {}\n", v.tool, v.version));
    }

    out.push_str(&format!("\n{}\n", heading("Directories")));
    for dir in &report.directories {
        out.push_str(&format!("  {}\n", dir.display()));
    }

    let creds = &report.credentials;
    out.push_str(&format!("\n{}\n", heading("Database")));
    out.push_str(&format!("  {:<12} {}\n", "database", creds.database));
    out.push_str(&format!("  {:<12} {}\n", "user", creds.user));
    out.push_str(&format!("  {:<12} {}\n", "password", creds.password));
    out.push_str(&format!("  {:<12} {}:{}\n", "address", creds.host, creds.port));
    out.push_str(&format!("  {:<12} {}\n", "url", creds.url()));

    out.push_str(&format!("\n{}\n", heading("Services")));
    for service in &report.services {
        let icon = if service.is_active() {
            Icon::Success
        } else {
            Icon::Warning
        };
        out.push_str(&format!(
            "  {} {:<14} {}\n",
            icon.colored(ui.color, ui.unicode),
            service.service,
            service.state
        ));
    }
    out
}
