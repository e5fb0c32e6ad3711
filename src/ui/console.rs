//! Console event sink
//!
//! Progress goes to stderr so stdout stays clean for the status block.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use ringprov::domain::ports::{ProvisionEvent, ProvisionEventSink};
use ringprov::domain::value_objects::FailurePolicy;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::provision::{
    render_completion, render_detail, render_failure, render_header, render_stage_line,
    render_summary,
};

pub struct ConsoleEventSink {
    ui: UiContext,
    quiet: bool,
    total: AtomicUsize,
    position: AtomicUsize,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext, quiet: bool) -> Self {
        Self {
            ui,
            quiet,
            total: AtomicUsize::new(0),
            position: AtomicUsize::new(0),
        }
    }

    fn progress(&self, line: &str) {
        if !self.quiet {
            eprintln!("{line}");
        }
    }

    /// Lines for one event: (line, goes to stdout)
    fn render(&self, event: &ProvisionEvent) -> Vec<(String, bool)> {
        let ui = &self.ui;
        match event {
            ProvisionEvent::Started {
                stage_count,
                dry_run,
                write_policy,
            } => {
                self.total.store(*stage_count, Ordering::Relaxed);
                self.position.store(0, Ordering::Relaxed);
                vec![(render_header(ui, *dry_run, write_policy.as_str()), false)]
            }
            ProvisionEvent::StageStarted { stage, .. } if ui.verbose > 0 => vec![(
                render_detail(ui, Icon::Arrow, &format!("{}...", stage.title())),
                false,
            )],
            ProvisionEvent::StageStarted { .. } => Vec::new(),
            ProvisionEvent::StageNote { message, .. } if ui.verbose > 0 => {
                vec![(render_detail(ui, Icon::Arrow, message), false)]
            }
            ProvisionEvent::StageNote { .. } => Vec::new(),
            ProvisionEvent::Planned { action } => {
                vec![(render_detail(ui, Icon::Planned, action), false)]
            }
            ProvisionEvent::Drift { path, diff, .. } => {
                let mut lines = vec![(
                    render_detail(
                        ui,
                        Icon::Drift,
                        &format!("{} was edited by hand, leaving it in place", path.display()),
                    ),
                    false,
                )];
                if ui.verbose > 0 {
                    lines.extend(diff.lines().map(|l| (format!("      {l}"), false)));
                }
                lines
            }
            ProvisionEvent::StageFinished { stage, outcome, .. } => {
                let position = self.position.fetch_add(1, Ordering::Relaxed) + 1;
                let total = self.total.load(Ordering::Relaxed);
                vec![(render_stage_line(ui, position, total, *stage, outcome), false)]
            }
            ProvisionEvent::StageFailed {
                stage,
                policy,
                error,
                ..
            } => {
                if *policy == FailurePolicy::Ignore && ui.verbose == 0 {
                    return Vec::new();
                }
                vec![(render_failure(ui, *stage, *policy, error), false)]
            }
            ProvisionEvent::Summary(report) => vec![(render_summary(ui, report), true)],
            ProvisionEvent::Completed {
                changed,
                satisfied,
                skipped,
                failed,
                aborted,
            } => vec![(
                render_completion(ui, *changed, *satisfied, *skipped, *failed, *aborted),
                false,
            )],
        }
    }
}

impl ProvisionEventSink for ConsoleEventSink {
    fn on_event(&self, event: ProvisionEvent) {
        let always = matches!(
            event,
            ProvisionEvent::Summary(_) | ProvisionEvent::StageFailed { .. }
        );
        for (line, stdout) in self.render(&event) {
            if stdout {
                let mut out = std::io::stdout().lock();
                let _ = write!(out, "{line}");
                let _ = out.flush();
            } else if always {
                eprintln!("{line}");
            } else {
                self.progress(&line);
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        !self.quiet
    }
}
