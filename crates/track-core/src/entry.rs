//! Recorded work sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One recorded or in-progress work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Who ran the tracker when the session started.
    pub user: String,
    /// Free-text title. Empty means "no title".
    pub title: String,
    /// When the session started. Never changes after creation.
    pub start: DateTime<Utc>,
    /// When the session ended. `None` while the session is running.
    pub end: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// Creates a running entry.
    pub fn started(user: impl Into<String>, title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            user: user.into(),
            title: title.into(),
            start,
            end: None,
        }
    }

    /// Returns true while the session has no end timestamp.
    pub const fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Returns the title, or `None` when it is empty.
    pub fn title(&self) -> Option<&str> {
        if self.title.is_empty() {
            None
        } else {
            Some(&self.title)
        }
    }

    /// Length of a completed session. `None` while running.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }
}

/// Partial update applied to an existing entry.
///
/// Fields left as `None` keep the entry's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub end: Option<DateTime<Utc>>,
}

impl EntryPatch {
    /// A patch that terminates an entry at `end`.
    pub fn end_at(end: DateTime<Utc>) -> Self {
        Self {
            end: Some(end),
            ..Self::default()
        }
    }

    /// Applies the patch onto `entry`.
    pub fn apply(self, entry: &mut TimeEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(end) = self.end {
            entry.end = Some(end);
        }
    }
}
