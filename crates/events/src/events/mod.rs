use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use sweeper_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod general;
pub mod sweep;

pub use general::*;
pub use sweep::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Traversal and per-file action events
    Sweep(SweepEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::GENERAL,
            Self::Sweep(event) if event.is_action() => EventSource::ACTION,
            Self::Sweep(_) => EventSource::SWEEP,
        }
    }

    /// Severity of this event
    #[must_use]
    pub fn log_level(&self) -> EventLevel {
        match self {
            Self::General(GeneralEvent::OperationFailed { .. }) => EventLevel::Error,
            Self::Sweep(event) if event.is_failure() => EventLevel::Error,
            Self::General(
                GeneralEvent::Warning { .. } | GeneralEvent::OperationCompleted { success: false, .. },
            ) => EventLevel::Warn,
            _ => EventLevel::Info,
        }
    }
}
