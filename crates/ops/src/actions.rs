//! Per-file actions: delete and relocate
//!
//! Every action reports its own outcome as an event and returns the failure to
//! the caller for counting. A failed action leaves the source file in place.

use crate::OpsCtx;
use std::path::{Path, PathBuf};
use sweeper_config::{Action, Location};
use sweeper_errors::{ActionError, UserFacingError};
use sweeper_events::{EventEmitter, FailureContext, SweepEvent};
use tokio::fs;

/// What happened to a qualifying file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Deleted { path: PathBuf },
    Moved { from: PathBuf, to: PathBuf },
}

/// Destination of a move: `relative` mirrored under `target_root`
#[must_use]
pub fn mirrored_path(target_root: &Path, relative: &Path) -> PathBuf {
    target_root.join(relative)
}

/// Apply the location's action to one qualifying file
///
/// `path` is the full path of the file and `relative` its path below the
/// location's source root.
///
/// # Errors
///
/// Returns the action failure after it has been reported as an event.
pub async fn execute_action(
    ctx: &OpsCtx,
    location: &Location,
    path: &Path,
    relative: &Path,
    age_days: i64,
) -> Result<ActionOutcome, ActionError> {
    match &location.action {
        Action::Delete => {
            delete_file(ctx, &location.source, path, age_days).await?;
            Ok(ActionOutcome::Deleted {
                path: path.to_path_buf(),
            })
        }
        Action::Move { target } => {
            let destination = mirrored_path(target, relative);
            move_file(ctx, &location.source, path, &destination, age_days).await?;
            Ok(ActionOutcome::Moved {
                from: path.to_path_buf(),
                to: destination,
            })
        }
    }
}

/// Remove a file
///
/// # Errors
///
/// Returns [`ActionError::DeleteFailed`] if the file cannot be removed.
pub async fn delete_file(
    ctx: &OpsCtx,
    location: &Path,
    path: &Path,
    age_days: i64,
) -> Result<(), ActionError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            ctx.emit_sweep(
                SweepEvent::FileDeleted {
                    path: path.to_path_buf(),
                    age_days,
                },
                location,
            );
            Ok(())
        }
        Err(e) => {
            let err = ActionError::DeleteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            };
            ctx.emit_sweep(
                SweepEvent::DeleteFailed {
                    path: path.to_path_buf(),
                    failure: failure(&err),
                },
                location,
            );
            Err(err)
        }
    }
}

/// Rename `source` to `destination`, creating the destination's parent
/// directories first.
///
/// If the parent directories cannot be created the rename is not attempted.
/// An existing file at `destination` is replaced.
///
/// # Errors
///
/// Returns [`ActionError::CreateDirFailed`] or [`ActionError::RenameFailed`].
pub async fn move_file(
    ctx: &OpsCtx,
    location: &Path,
    source: &Path,
    destination: &Path,
    age_days: i64,
) -> Result<(), ActionError> {
    if let Some(parent) = destination.parent() {
        if let Err(e) = create_parent_dirs(parent).await {
            let err = ActionError::CreateDirFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            };
            ctx.emit_sweep(
                SweepEvent::DirectoryCreateFailed {
                    path: parent.to_path_buf(),
                    failure: failure(&err),
                },
                location,
            );
            return Err(err);
        }
    }

    match fs::rename(source, destination).await {
        Ok(()) => {
            ctx.emit_sweep(
                SweepEvent::FileMoved {
                    from: source.to_path_buf(),
                    to: destination.to_path_buf(),
                    age_days,
                },
                location,
            );
            Ok(())
        }
        Err(e) => {
            let err = ActionError::rename_failed(source, destination, &e);
            ctx.emit_sweep(
                SweepEvent::MoveFailed {
                    from: source.to_path_buf(),
                    to: destination.to_path_buf(),
                    failure: failure(&err),
                },
                location,
            );
            Err(err)
        }
    }
}

async fn create_parent_dirs(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(dir).await
}

fn failure<E: UserFacingError>(err: &E) -> FailureContext {
    FailureContext::from_error(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_path_preserves_structure() {
        assert_eq!(
            mirrored_path(Path::new("/b"), Path::new("x/y.txt")),
            PathBuf::from("/b/x/y.txt")
        );
        assert_eq!(
            mirrored_path(Path::new("/archive"), Path::new("reports/q1.csv")),
            PathBuf::from("/archive/reports/q1.csv")
        );
    }
}
