#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for sweeper
//!
//! Operations never write log lines themselves. They emit events through an
//! [`EventSender`] handed to them explicitly, and the CLI renders whatever
//! arrives on the matching [`EventReceiver`] into the sweep log.
//!
//! ## Architecture
//!
//! - **Domain events**: [`GeneralEvent`] for operation lifecycle and
//!   free-form warnings, [`SweepEvent`] for traversal and per-file actions
//! - **Unified `EventEmitter` trait**: one API whether you hold a raw sender
//!   or a context that contains one
//! - **Metadata envelope**: every event travels as an [`EventMessage`] with
//!   an id, timestamp, level and source

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{AppEvent, FailureContext, GeneralEvent, SweepEvent, SweepReport};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// An event together with the metadata captured when it was emitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    /// Wrap an event, deriving level and source from the event itself
    #[must_use]
    pub fn new(event: AppEvent) -> Self {
        let meta = EventMeta::new(event.log_level(), event.event_source());
        Self { meta, event }
    }

    /// Wrap an event and tag it with a correlation id
    #[must_use]
    pub fn correlated(event: AppEvent, correlation_id: impl Into<String>) -> Self {
        let mut message = Self::new(event);
        message.meta = message.meta.with_correlation_id(correlation_id);
        message
    }
}

impl From<AppEvent> for EventMessage {
    fn from(event: AppEvent) -> Self {
        Self::new(event)
    }
}

/// Type alias for event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout sweeper
///
/// This trait provides a single, consistent API for emitting events regardless of
/// whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an already wrapped message
    fn emit_message(&self, message: EventMessage) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(message);
        }
    }

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        self.emit_message(EventMessage::new(event));
    }

    /// Emit an event tagged with a correlation id
    fn emit_correlated(&self, event: AppEvent, correlation_id: impl Into<String>) {
        self.emit_message(EventMessage::correlated(event, correlation_id));
    }

    /// Emit a sweep event tagged with the location it belongs to
    fn emit_sweep(&self, event: SweepEvent, location: &std::path::Path) {
        self.emit_correlated(AppEvent::Sweep(event), location.display().to_string());
    }

    /// Emit a warning event; `context` names where the finding came from
    fn emit_warning(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message, context)));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, failure: FailureContext) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            failure,
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
