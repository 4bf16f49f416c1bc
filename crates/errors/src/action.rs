//! Per-file action error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Errors raised while deleting or relocating a single file.
///
/// These never abort a sweep: the file is left where it was and the sweep
/// moves on to the next entry.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ActionError {
    #[error("failed to delete {path}: {message}")]
    DeleteFailed { path: String, message: String },

    #[error("failed to create directory {path}: {message}")]
    CreateDirFailed { path: String, message: String },

    #[error("failed to move {source_path} to {target_path}: {message}")]
    RenameFailed {
        source_path: String,
        target_path: String,
        message: String,
        cross_device: bool,
    },
}

impl ActionError {
    /// Build a rename failure, flagging cross-device moves
    #[must_use]
    pub fn rename_failed(
        source: &std::path::Path,
        target: &std::path::Path,
        err: &std::io::Error,
    ) -> Self {
        Self::RenameFailed {
            source_path: source.display().to_string(),
            target_path: target.display().to_string(),
            message: err.to_string(),
            cross_device: err.kind() == std::io::ErrorKind::CrossesDevices,
        }
    }
}

impl UserFacingError for ActionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DeleteFailed { .. } => Some("Check permissions on the file and its directory."),
            Self::CreateDirFailed { .. } => {
                Some("Ensure the target root exists or can be created by this user.")
            }
            Self::RenameFailed {
                cross_device: true, ..
            } => Some("Source and target must be on the same filesystem."),
            Self::RenameFailed { .. } => Some("Check permissions on the source and target."),
        }
    }

    fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::RenameFailed {
                cross_device: true,
                ..
            }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::DeleteFailed { .. } => "action.delete_failed",
            Self::CreateDirFailed { .. } => "action.create_dir_failed",
            Self::RenameFailed { .. } => "action.rename_failed",
        })
    }
}
