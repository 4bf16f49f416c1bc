//! Operations context for dependency injection

use sweeper_config::Config;
use sweeper_errors::Error;
use sweeper_events::{EventEmitter, EventSender};

/// Operations context handed to every sweep and action
pub struct OpsCtx {
    /// Event sender; the only way operations report what they did
    pub tx: EventSender,
    /// Loaded configuration
    pub config: Config,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for [`OpsCtx`]
pub struct OpsContextBuilder {
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create a new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            tx: None,
            config: None,
        }
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender is missing. A missing
    /// configuration falls back to one with no locations.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let tx = self
            .tx
            .ok_or_else(|| Error::internal("missing component: event_sender"))?;

        Ok(OpsCtx {
            tx,
            config: self.config.unwrap_or_default(),
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_event_sender() {
        let err = OpsContextBuilder::new()
            .with_config(Config::default())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn test_builder_defaults_config() {
        let (tx, _rx) = sweeper_events::channel();
        let ctx = OpsContextBuilder::new().with_event_sender(tx).build().unwrap();
        assert!(ctx.config.locations.is_empty());
    }
}
