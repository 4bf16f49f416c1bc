//! Directory traversal error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors that abort the sweep of a location
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SweepError {
    #[error("failed to walk {root}: {message}")]
    WalkFailed {
        root: String,
        path: Option<String>,
        message: String,
    },

    #[error("failed to read metadata for {path}: {message}")]
    MetadataUnavailable { path: String, message: String },
}

impl UserFacingError for SweepError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::WalkFailed { .. } => {
                Some("Check that the location exists and every subdirectory is readable.")
            }
            Self::MetadataUnavailable { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::MetadataUnavailable { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::WalkFailed { .. } => "sweep.walk_failed",
            Self::MetadataUnavailable { .. } => "sweep.metadata_unavailable",
        })
    }
}
