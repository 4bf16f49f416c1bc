//! Log file setup and structured logging of events
//!
//! Every event received from the operations layer becomes exactly one record
//! in the configured log file, with the event metadata carried as structured
//! fields.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use sweeper_errors::ConfigError;
use sweeper_events::{AppEvent, EventMessage, GeneralEvent, SweepEvent};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Open `log_file` for appending and route all tracing output to it.
///
/// # Errors
///
/// Returns [`ConfigError::LogFileUnavailable`] if the file cannot be opened
/// or created.
pub fn init_tracing(log_file: &Path) -> Result<(), ConfigError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| ConfigError::LogFileUnavailable {
            path: log_file.display().to_string(),
            message: e.to_string(),
        })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    Ok(())
}

/// Log an event using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    match &message.event {
        AppEvent::General(event) => log_general_event(message, event),
        AppEvent::Sweep(event) => log_sweep_event(message, event),
    }
}

fn log_general_event(message: &EventMessage, event: &GeneralEvent) {
    let meta = &message.meta;
    match event {
        GeneralEvent::OperationStarted { operation } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                operation = %operation,
                "Operation started"
            );
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            if *success {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    success = success,
                    "Operation completed successfully"
                );
            } else {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    operation = %operation,
                    success = success,
                    "Operation completed with issues"
                );
            }
        }
        GeneralEvent::OperationFailed { operation, failure } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                operation = %operation,
                retryable = failure.retryable,
                code = ?failure.code,
                reason = %failure.message,
                hint = ?failure.hint,
                "Operation failed"
            );
        }
        GeneralEvent::Warning { message, context } => {
            warn!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                detail = %message,
                context = %context,
                "Warning"
            );
        }
    }
}

fn log_sweep_event(message: &EventMessage, event: &SweepEvent) {
    let meta = &message.meta;
    match event {
        SweepEvent::LocationStarted {
            source,
            max_age_days,
            action,
        } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                location = %source.display(),
                max_age_days = max_age_days,
                action = %action,
                "Sweeping location"
            );
        }
        SweepEvent::LocationCompleted {
            source,
            report,
            duration,
        } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                location = %source.display(),
                examined = report.examined,
                expired = report.expired,
                deleted = report.deleted,
                moved = report.moved,
                failed = report.failed,
                skipped = report.skipped,
                duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                "Location swept"
            );
        }
        SweepEvent::WalkFailed {
            source,
            path,
            failure,
        } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                location = %source.display(),
                path = ?path,
                code = ?failure.code,
                reason = %failure.message,
                hint = ?failure.hint,
                "Walk failed"
            );
        }
        SweepEvent::MetadataFailed { path, failure } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                path = %path.display(),
                code = ?failure.code,
                reason = %failure.message,
                "Metadata unavailable, file skipped"
            );
        }
        SweepEvent::FileDeleted { path, age_days } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                path = %path.display(),
                age_days = age_days,
                "File deleted"
            );
        }
        SweepEvent::DeleteFailed { path, failure } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                path = %path.display(),
                code = ?failure.code,
                reason = %failure.message,
                hint = ?failure.hint,
                "Delete failed"
            );
        }
        SweepEvent::FileMoved { from, to, age_days } => {
            info!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                from = %from.display(),
                to = %to.display(),
                age_days = age_days,
                "File moved"
            );
        }
        SweepEvent::MoveFailed { from, to, failure } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                from = %from.display(),
                to = %to.display(),
                retryable = failure.retryable,
                code = ?failure.code,
                reason = %failure.message,
                hint = ?failure.hint,
                "Move failed"
            );
        }
        SweepEvent::DirectoryCreateFailed { path, failure } => {
            error!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                correlation = ?meta.correlation_id,
                path = %path.display(),
                code = ?failure.code,
                reason = %failure.message,
                "Could not create target directory"
            );
        }
    }
}
