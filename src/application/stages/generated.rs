//! Writing generated files under the active write policy

use std::path::Path;

use crate::application::provision::StageContext;
use crate::domain::ports::ProvisionEvent;
use crate::domain::services::{unified_diff, FileAction, Planner, SkipReason, TargetFileState};
use crate::domain::value_objects::ContentHash;
use crate::error::ProvisionResult;

/// Ensure `path` holds `content` as far as the write policy allows
///
/// Returns true when the file was written.
pub(crate) fn ensure_generated_file(
    ctx: &mut StageContext<'_>,
    path: &Path,
    content: &str,
) -> ProvisionResult<bool> {
    let desired = ContentHash::from_content(content);
    let target = if !ctx.fs.exists(path) {
        TargetFileState::not_exists()
    } else {
        match ctx.fs.hash(path) {
            Ok(hash) => TargetFileState::exists_with_hash(hash),
            Err(err) => {
                log::debug!("cannot hash {}: {}", path.display(), err);
                TargetFileState::exists_unreadable()
            }
        }
    };
    let recorded = ctx.ledger.recorded_hash(path);

    let mut action = Planner::plan_file(ctx.write_policy, &desired, &target, recorded.as_ref());
    if ctx.force {
        action = action.resolve_overwrite();
    }

    match action {
        FileAction::Write => {
            ctx.fs.write(path, content)?;
            ctx.record_file(path, content);
            let verb = if target.exists { "updated" } else { "created" };
            ctx.note(format!("{verb} {}", path.display()));
            Ok(true)
        }
        FileAction::Skip(SkipReason::Exists) => {
            ctx.note(format!("{} exists, left as is", path.display()));
            Ok(false)
        }
        FileAction::Skip(SkipReason::UpToDate) => {
            if recorded.as_ref() != Some(&desired) {
                ctx.record_file(path, content);
            }
            Ok(false)
        }
        FileAction::Conflict(reason) => {
            let current = ctx.fs.read(path).unwrap_or_default();
            let diff = unified_diff(&path.display().to_string(), &current, content);
            log::warn!(
                "{} {}; keeping it (use --force to overwrite)",
                path.display(),
                reason.as_str()
            );
            ctx.emit(ProvisionEvent::Drift {
                stage: ctx.stage(),
                path: path.to_path_buf(),
                diff,
            });
            Ok(false)
        }
    }
}
