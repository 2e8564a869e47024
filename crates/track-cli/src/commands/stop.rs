//! Stop command: closes the active tracking session.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use track_core::{EntryPatch, format_elapsed};
use track_store::{EntryStore, find_active};

use super::StateConflict;

/// Runs the stop command.
///
/// Fails with [`StateConflict::NothingToStop`] if no session is active.
pub fn run<W: Write>(writer: &mut W, store: &EntryStore, now: DateTime<Utc>) -> Result<()> {
    let entries = store.read_all()?;
    let Some((index, active)) = find_active(&entries) else {
        return Err(StateConflict::NothingToStop.into());
    };

    store.patch(index, EntryPatch::end_at(now))?;
    tracing::debug!(index, "stopped entry");

    let elapsed = format_elapsed(active.start, now);
    match active.title() {
        Some(title) => writeln!(writer, "Stopped tracking \"{title}\" ({elapsed})")?,
        None => writeln!(writer, "Stopped tracking ({elapsed})")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;
    use track_core::TimeEntry;

    fn setup() -> (TempDir, EntryStore) {
        let temp = tempfile::tempdir().unwrap();
        let store = EntryStore::new(temp.path().join("timetrack.csv"));
        (temp, store)
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 29, 9, 0, 0).unwrap()
    }

    #[test]
    fn stop_sets_end_on_active_entry() {
        let (_temp, store) = setup();
        store
            .append(TimeEntry::started("sami", "design review", start()))
            .unwrap();
        let mut output = Vec::new();

        let now = start() + Duration::seconds(3661);
        run(&mut output, &store, now).unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries[0].end, Some(now));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Stopped tracking \"design review\" (1h 1m 1s)\n"
        );
    }

    #[test]
    fn stop_untitled_entry() {
        let (_temp, store) = setup();
        store.append(TimeEntry::started("sami", "", start())).unwrap();
        let mut output = Vec::new();

        run(&mut output, &store, start() + Duration::seconds(60)).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "Stopped tracking (1m)\n");
    }

    #[test]
    fn stop_targets_last_running_entry() {
        let (_temp, store) = setup();
        store.append(TimeEntry::started("sami", "stale", start())).unwrap();
        store
            .append(TimeEntry::started("sami", "current", start() + Duration::hours(1)))
            .unwrap();
        let mut output = Vec::new();

        let now = start() + Duration::hours(2);
        run(&mut output, &store, now).unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries[0].end, None);
        assert_eq!(entries[1].end, Some(now));
    }

    #[test]
    fn stop_with_nothing_running_is_conflict_without_mutation() {
        let (_temp, store) = setup();
        let mut finished = TimeEntry::started("sami", "done", start());
        finished.end = Some(start() + Duration::minutes(5));
        store.write_all(&[finished]).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();
        let mut output = Vec::new();

        let err = run(&mut output, &store, start() + Duration::hours(1)).unwrap_err();

        assert_eq!(
            err.downcast_ref::<StateConflict>(),
            Some(&StateConflict::NothingToStop)
        );
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
        assert!(output.is_empty());
    }

    #[test]
    fn stop_on_missing_file_does_not_create_it() {
        let (_temp, store) = setup();
        let mut output = Vec::new();

        assert!(run(&mut output, &store, start()).is_err());
        assert!(!store.path().exists());
    }
}
