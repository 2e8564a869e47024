//! Start command: opens a new tracking session.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use track_core::TimeEntry;
use track_store::{EntryStore, find_active};

use super::StateConflict;

/// Runs the start command.
///
/// Fails with [`StateConflict::AlreadyRunning`] if a session is already active.
pub fn run<W: Write>(
    writer: &mut W,
    store: &EntryStore,
    title: Option<&str>,
    user: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let entries = store.read_all()?;
    if let Some((index, active)) = find_active(&entries) {
        tracing::debug!(index, "refusing to start: timer already running");
        return Err(StateConflict::AlreadyRunning {
            title: active.title.clone(),
        }
        .into());
    }

    let title = title.unwrap_or_default();
    let index = store.append(TimeEntry::started(user, title, now))?;
    tracing::debug!(index, user, "started entry");

    if title.is_empty() {
        writeln!(writer, "Started tracking")?;
    } else {
        writeln!(writer, "Started tracking for \"{title}\"")?;
    }
    Ok(())
}
