use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::FailureContext;

/// Counters for one location's sweep.
///
/// Informational only: a report with failures does not change the exit
/// status of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Non-directory entries visited
    pub examined: u64,
    /// Entries older than the threshold
    pub expired: u64,
    pub deleted: u64,
    pub moved: u64,
    /// Expired entries whose action failed
    pub failed: u64,
    /// Entries skipped because their metadata could not be read
    pub skipped: u64,
}

impl SweepReport {
    /// Files actually removed or relocated
    #[must_use]
    pub fn actioned(&self) -> u64 {
        self.deleted + self.moved
    }

    /// Whether the sweep touched the filesystem at all
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.actioned() == 0
    }
}

/// Events emitted while sweeping a location and acting on its files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SweepEvent {
    /// A location's tree is about to be walked
    LocationStarted {
        source: PathBuf,
        max_age_days: u32,
        action: String,
    },

    /// The walk finished without a traversal error
    LocationCompleted {
        source: PathBuf,
        report: SweepReport,
        duration: Duration,
    },

    /// The walk itself failed; the sweep of this location is aborted
    WalkFailed {
        source: PathBuf,
        path: Option<PathBuf>,
        failure: FailureContext,
    },

    /// A file's metadata could not be read; the file is skipped
    MetadataFailed {
        path: PathBuf,
        failure: FailureContext,
    },

    FileDeleted {
        path: PathBuf,
        age_days: i64,
    },

    DeleteFailed {
        path: PathBuf,
        failure: FailureContext,
    },

    FileMoved {
        from: PathBuf,
        to: PathBuf,
        age_days: i64,
    },

    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        failure: FailureContext,
    },

    /// The destination directory of a move could not be created
    DirectoryCreateFailed {
        path: PathBuf,
        failure: FailureContext,
    },
}

impl SweepEvent {
    /// Whether the event reports a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::WalkFailed { .. }
                | Self::MetadataFailed { .. }
                | Self::DeleteFailed { .. }
                | Self::MoveFailed { .. }
                | Self::DirectoryCreateFailed { .. }
        )
    }

    /// Whether the event concerns a single file action rather than the walk
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Self::FileDeleted { .. }
                | Self::DeleteFailed { .. }
                | Self::FileMoved { .. }
                | Self::MoveFailed { .. }
                | Self::DirectoryCreateFailed { .. }
        )
    }
}
