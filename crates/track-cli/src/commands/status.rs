//! Status command for showing the active session.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use track_core::{TimeEntry, format_elapsed};
use track_store::{EntryStore, find_active};

/// Renders the status line for `entries` as of `now`.
pub fn render(entries: &[TimeEntry], now: DateTime<Utc>) -> String {
    let Some((_, active)) = find_active(entries) else {
        return "Nothing is being tracked".to_string();
    };

    let elapsed = format_elapsed(active.start, now);
    match active.title() {
        Some(title) => format!("Tracking: \"{title}\" - {elapsed}"),
        None => format!("Tracking: {elapsed}"),
    }
}

/// Runs the status command.
pub fn run<W: Write>(writer: &mut W, store: &EntryStore, now: DateTime<Utc>) -> Result<()> {
    let entries = store.read_all()?;
    writeln!(writer, "{}", render(&entries, now))?;
    Ok(())
}
