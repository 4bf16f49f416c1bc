//! Retention sweep over one location's directory tree

use crate::actions::{execute_action, ActionOutcome};
use crate::policy::RetentionPolicy;
use crate::OpsCtx;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::{Instant, SystemTime};
use sweeper_config::Location;
use sweeper_errors::{Error, SweepError};
use sweeper_events::{EventEmitter, FailureContext, SweepEvent, SweepReport};
use walkdir::{DirEntry, WalkDir};

/// Walk one location and apply its action to every expired file.
///
/// Entries are visited in lexical order. Directories are descended into but
/// never acted on; every other entry, symlinks included, is judged by its own
/// modification time. A file whose metadata cannot be read is reported and
/// skipped, and a failed action is reported and counted.
///
/// # Errors
///
/// Returns [`SweepError::WalkFailed`] as soon as the traversal itself fails,
/// including when the source does not exist or is not a directory. Files
/// visited before the failure keep whatever action was applied to them.
pub async fn sweep_location(
    ctx: &OpsCtx,
    location: &Location,
    now: DateTime<Utc>,
) -> Result<SweepReport, Error> {
    let start = Instant::now();
    let source = location.source.as_path();
    let policy = RetentionPolicy::new(location.max_age_days);
    let mut report = SweepReport::default();

    ctx.emit_sweep(
        SweepEvent::LocationStarted {
            source: source.to_path_buf(),
            max_age_days: location.max_age_days,
            action: location.action.to_string(),
        },
        source,
    );

    // Directory reads are blocking and run inline; queued events are picked up
    // at the next action's await. The walk is interleaved with the actions
    // rather than collected up front, so files seen before a traversal error
    // have already been acted on when the error aborts the location.
    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                return Err(walk_failed(ctx, source, path.as_deref(), e.to_string()));
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if entry.depth() == 0 {
            return Err(walk_failed(
                ctx,
                source,
                Some(entry.path()),
                "not a directory".to_string(),
            ));
        }

        report.examined += 1;

        let modified = match modified_time(&entry) {
            Ok(modified) => modified,
            Err(err) => {
                report.skipped += 1;
                ctx.emit_sweep(
                    SweepEvent::MetadataFailed {
                        path: entry.path().to_path_buf(),
                        failure: FailureContext::from_error(&err),
                    },
                    source,
                );
                continue;
            }
        };

        let age_days = RetentionPolicy::age_days(DateTime::<Utc>::from(modified), now);
        if !policy.is_expired_age(age_days) {
            continue;
        }
        report.expired += 1;

        let relative = entry.path().strip_prefix(source).map_err(|_| {
            Error::internal(format!(
                "walked path {} is outside {}",
                entry.path().display(),
                source.display()
            ))
        })?;

        match execute_action(ctx, location, entry.path(), relative, age_days).await {
            Ok(ActionOutcome::Deleted { .. }) => report.deleted += 1,
            Ok(ActionOutcome::Moved { .. }) => report.moved += 1,
            Err(_) => report.failed += 1,
        }
    }

    ctx.emit_sweep(
        SweepEvent::LocationCompleted {
            source: source.to_path_buf(),
            report,
            duration: start.elapsed(),
        },
        source,
    );

    Ok(report)
}

/// Sweep every configured location in order, stopping at the first
/// traversal failure.
///
/// Each location is judged against the clock as read when its sweep starts.
///
/// # Errors
///
/// Returns the first error from [`sweep_location`]; later locations are not
/// visited.
pub async fn sweep_all(ctx: &OpsCtx) -> Result<Vec<SweepReport>, Error> {
    let mut reports = Vec::with_capacity(ctx.config.locations.len());
    for location in &ctx.config.locations {
        reports.push(sweep_location(ctx, location, Utc::now()).await?);
    }
    Ok(reports)
}

fn modified_time(entry: &DirEntry) -> Result<SystemTime, SweepError> {
    let unavailable = |message: String| SweepError::MetadataUnavailable {
        path: entry.path().display().to_string(),
        message,
    };
    entry
        .metadata()
        .map_err(|e| unavailable(e.to_string()))?
        .modified()
        .map_err(|e| unavailable(e.to_string()))
}

fn walk_failed(ctx: &OpsCtx, source: &Path, path: Option<&Path>, message: String) -> Error {
    let err = SweepError::WalkFailed {
        root: source.display().to_string(),
        path: path.map(|p| p.display().to_string()),
        message,
    };
    ctx.emit_sweep(
        SweepEvent::WalkFailed {
            source: source.to_path_buf(),
            path: path.map(Path::to_path_buf),
            failure: FailureContext::from_error(&err),
        },
        source,
    );
    err.into()
}
