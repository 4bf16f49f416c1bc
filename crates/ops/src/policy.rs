//! Age threshold evaluation

use chrono::{DateTime, Utc};

/// Decides whether a file is old enough to act on.
///
/// Ages are whole days truncated toward zero, and a file qualifies only when
/// its age is strictly greater than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    max_age_days: u32,
}

impl RetentionPolicy {
    #[must_use]
    pub fn new(max_age_days: u32) -> Self {
        Self { max_age_days }
    }

    /// Whole days between `modified` and `now`.
    ///
    /// Modification times in the future give zero or a negative age.
    #[must_use]
    pub fn age_days(modified: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(modified).num_days()
    }

    #[must_use]
    pub fn is_expired_age(&self, age_days: i64) -> bool {
        age_days > i64::from(self.max_age_days)
    }

    #[must_use]
    pub fn is_expired(&self, modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.is_expired_age(Self::age_days(modified, now))
    }
}
